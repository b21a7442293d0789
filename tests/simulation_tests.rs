#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use fogwalk::simulation::commands::Command;
use fogwalk::simulation::grid::{ALIVE, DEAD};
use fogwalk::simulation::observer::Direction;
use fogwalk::simulation::params::{DEFAULT_WARMUP_STEPS, StructureParams, VisibilityParams};
use fogwalk::simulation::simulator::FOG_CHAR;
use fogwalk::{ConfigError, Params, SimError, Simulation};

fn create_test_params() -> Params {
    Params::new(40, 2, 6, (0.0, 18.0), (1.0, 1.3))
        .with_visibility(VisibilityParams::Proximity {
            inner: 4.0,
            outer: 7.0,
            outermost: 10.0,
            half_life: 2.0,
            warmup_steps: DEFAULT_WARMUP_STEPS,
        })
        .with_campfire_radius(3.0)
        .with_structures(StructureParams {
            count: 3,
            min_distance: 8.0,
            radius: 2.0,
            max_attempts: 1000,
        })
        .with_seed(42)
}

fn protected_cells(sim: &Simulation) -> Vec<((usize, usize), u8)> {
    let width = sim.grid().width();
    let mut cells = Vec::new();
    for i in 0..width {
        for j in 0..width {
            if sim.is_protected(i, j) {
                cells.push(((i, j), sim.cell_state(i, j).expect("in bounds")));
            }
        }
    }
    cells
}

#[test]
fn test_simulation_creation() {
    let sim = Simulation::new(create_test_params()).expect("valid params");

    assert_eq!(sim.tick(), 0);
    assert_eq!(sim.policy_name(), "proximity");
    assert_eq!(sim.structures().len(), 3);
    assert_eq!(sim.protection().structures().count(), 3);
    assert_eq!(sim.observer().map(|o| o.position()), Some((20, 20)));
    // warm-up already sensed the observer's surroundings
    assert!(sim.is_visible(20, 20));
    assert!(sim.is_visible(20, 26));
    assert!(!sim.is_visible(0, 0));
}

#[test]
fn test_protected_cells_never_change() {
    let mut sim = Simulation::new(create_test_params()).expect("valid params");
    sim.toggle_campfire(20, 20).expect("in bounds");
    sim.toggle_campfire(5, 30).expect("in bounds");

    let before = protected_cells(&sim);
    assert!(!before.is_empty());

    for step in 0..30 {
        let direction = if step % 2 == 0 {
            Direction::Down
        } else {
            Direction::Right
        };
        sim.submit(Command::Move(direction));
        sim.step_with_commands();
        assert_eq!(protected_cells(&sim), before, "after step {step}");
    }
}

#[test]
fn test_cells_stay_binary_and_dump_round_trips() {
    let mut sim = Simulation::new(create_test_params()).expect("valid params");

    for _ in 0..5 {
        sim.step();
        let rows = sim.dump_text();
        assert_eq!(rows.len(), 40);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.chars().count(), 40);
            for (j, c) in row.chars().enumerate() {
                let value = sim.cell_state(i, j).expect("in bounds");
                assert!(value == DEAD || value == ALIVE);
                assert_eq!(c, if value == ALIVE { '#' } else { '.' });
            }
        }
    }
    assert_eq!(sim.cell_state(40, 0), None);
}

#[test]
fn test_visible_dump_hides_unsensed_cells() {
    let sim = Simulation::new(create_test_params()).expect("valid params");
    let rows = sim.dump_visible_text();

    for (i, row) in rows.iter().enumerate() {
        for (j, c) in row.chars().enumerate() {
            assert_eq!(c == FOG_CHAR, !sim.is_visible(i, j), "cell ({i}, {j})");
        }
    }
}

#[test]
fn test_same_seed_is_reproducible() {
    let mut a = Simulation::new(create_test_params()).expect("valid params");
    let mut b = Simulation::new(create_test_params()).expect("valid params");

    for _ in 0..10 {
        a.submit(Command::Move(Direction::Left));
        b.submit(Command::Move(Direction::Left));
        a.step_with_commands();
        b.step_with_commands();
    }

    assert_eq!(a.dump_text(), b.dump_text());
    assert_eq!(a.dump_visible_text(), b.dump_visible_text());
}

#[test]
fn test_commands_move_observer_and_toggle_campfire() {
    let mut sim = Simulation::new(create_test_params()).expect("valid params");

    sim.submit(Command::Move(Direction::Up));
    sim.submit(Command::Move(Direction::Right));
    sim.submit(Command::ToggleCampfireHere);
    assert_eq!(sim.pending_commands(), 3);
    sim.step_with_commands();

    assert_eq!(sim.pending_commands(), 0);
    assert_eq!(sim.tick(), 1);
    assert_eq!(sim.observer().map(|o| o.position()), Some((19, 21)));
    assert!(sim.protection().has_campfire((19, 21)));

    sim.apply(Command::ToggleCampfireAt((19, 21)))
        .expect("in bounds");
    assert!(!sim.protection().has_campfire((19, 21)));
}

#[test]
fn test_out_of_bounds_campfire_is_rejected() {
    let mut sim = Simulation::new(create_test_params()).expect("valid params");

    let err = sim.toggle_campfire(40, 3).expect_err("outside the grid");
    assert!(matches!(
        err,
        SimError::OutOfBounds {
            i: 40,
            j: 3,
            width: 40
        }
    ));
}

#[test]
fn test_sweep_has_no_observer() {
    let params = Params::radar().with_seed(3);
    let mut sim = Simulation::new(Params {
        width: 30,
        ..params
    })
    .expect("valid params");

    assert!(sim.observer().is_none());
    assert!(matches!(sim.move_observer(1, 0), Err(SimError::NoObserver)));
    assert!(matches!(
        sim.apply(Command::ToggleCampfireHere),
        Err(SimError::NoObserver)
    ));
    // explicit campfires still work without an observer
    assert!(sim.toggle_campfire(3, 3).expect("in bounds"));
    sim.step();
    assert_eq!(sim.tick(), 1);
}

#[test]
fn test_construct_rejects_bad_thresholds() {
    let result = Simulation::construct(10, 5, 5, (0.0, 20.0), (1.0, 1.0));

    assert!(matches!(
        result,
        Err(SimError::Config(ConfigError::InvalidThresholds { k: 5, b: 5 }))
    ));
}

#[test]
fn test_impossible_structures_fail_construction() {
    let mut params = create_test_params();
    params.width = 10;
    params.structures = Some(StructureParams {
        count: 5,
        min_distance: 50.0,
        radius: 1.0,
        max_attempts: 100,
    });

    let result = Simulation::new(params);

    assert!(matches!(
        result,
        Err(SimError::Config(ConfigError::InsufficientSpace {
            requested: 5,
            ..
        }))
    ));
}
