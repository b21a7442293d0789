#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use fogwalk::simulation::error::ConfigError;
use fogwalk::simulation::geometric_utils::cell_distance;
use fogwalk::simulation::grid::{ALIVE, DEAD, Grid, Rule, Seeding};
use fogwalk::simulation::params::StructureParams;
use fogwalk::simulation::protection::ProtectionRegistry;
use fogwalk::simulation::structures::{place_structures, poisson_disk_sample};
use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn all_cells(width: usize) -> Vec<(usize, usize)> {
    (0..width)
        .flat_map(|i| (0..width).map(move |j| (i, j)))
        .collect()
}

fn create_test_grid(width: usize) -> Grid {
    Grid::from_cells(
        Array2::ones((width, width)),
        Rule { k: 2, b: 6 },
        Seeding {
            radii: (0.0, 100.0),
            weights: (1.0, 1.0),
        },
    )
}

#[test]
fn test_poisson_disk_sample_is_separated() {
    let candidates = all_cells(20);

    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let points = poisson_disk_sample(&candidates, 3.0, 5, 1000, &mut rng)
            .expect("20x20 grid fits five points");

        assert_eq!(points.len(), 5);
        for (a_idx, &a) in points.iter().enumerate() {
            assert!(candidates.contains(&a));
            for &b in &points[a_idx + 1..] {
                assert!(cell_distance(a, b) >= 3.0, "{a:?} and {b:?} too close");
            }
        }
    }
}

#[test]
fn test_poisson_disk_sample_reports_insufficient_space() {
    let candidates = all_cells(3);
    let mut rng = StdRng::seed_from_u64(1);

    let result = poisson_disk_sample(&candidates, 10.0, 5, 200, &mut rng);

    match result {
        Err(ConfigError::InsufficientSpace {
            requested,
            placed,
            min_distance,
        }) => {
            assert_eq!(requested, 5);
            assert_eq!(placed, 1);
            assert_eq!(min_distance, 10.0);
        }
        other => panic!("expected insufficient space, got {other:?}"),
    }
}

#[test]
fn test_poisson_disk_sample_edge_cases() {
    let mut rng = StdRng::seed_from_u64(2);

    let none = poisson_disk_sample(&[], 3.0, 0, 10, &mut rng).expect("nothing requested");
    assert!(none.is_empty());

    let empty = poisson_disk_sample(&[], 3.0, 1, 10, &mut rng);
    assert!(matches!(
        empty,
        Err(ConfigError::InsufficientSpace { placed: 0, .. })
    ));
}

#[test]
fn test_place_structures_clears_and_protects() {
    let mut grid = create_test_grid(30);
    // carve two dead spots so they are the only candidates
    grid.set_cell((5, 5), DEAD);
    grid.set_cell((20, 20), DEAD);
    let mut protection = ProtectionRegistry::new();
    let mut rng = StdRng::seed_from_u64(4);
    let params = StructureParams {
        count: 2,
        min_distance: 10.0,
        radius: 2.0,
        max_attempts: 1000,
    };

    let mut anchors = place_structures(&mut grid, &mut protection, &params, &mut rng)
        .expect("two far-apart candidates");
    anchors.sort_unstable();

    assert_eq!(anchors, vec![(5, 5), (20, 20)]);
    assert_eq!(protection.structures().count(), 2);
    for i in 0..30 {
        for j in 0..30 {
            let near = anchors.iter().any(|&a| cell_distance(a, (i, j)) <= 2.0);
            assert_eq!(protection.is_protected((i, j)), near);
            let expected = if near { DEAD } else { ALIVE };
            assert_eq!(grid.cell_at((i, j)), Some(expected), "cell ({i}, {j})");
        }
    }
}

#[test]
fn test_place_structures_near_edge_stays_in_bounds() {
    let mut grid = create_test_grid(8);
    grid.set_cell((0, 0), DEAD);
    let mut protection = ProtectionRegistry::new();
    let mut rng = StdRng::seed_from_u64(0);
    let params = StructureParams {
        count: 1,
        min_distance: 1.0,
        radius: 3.0,
        max_attempts: 10,
    };

    let anchors = place_structures(&mut grid, &mut protection, &params, &mut rng)
        .expect("one candidate");

    assert_eq!(anchors, vec![(0, 0)]);
    assert_eq!(grid.cell_at((3, 0)), Some(DEAD));
    assert_eq!(grid.cell_at((2, 2)), Some(DEAD));
    assert_eq!(grid.cell_at((3, 3)), Some(ALIVE));
}
