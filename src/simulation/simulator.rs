//! Simulation facade composing the grid store, protection and visibility layers.
//!
//! The front end only ever talks to [`Simulation`]: it reads cell state for
//! display and forwards movement and campfire commands between steps.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use super::commands::{Command, CommandQueue};
use super::error::SimError;
use super::geometric_utils::Cell;
use super::grid::{ALIVE, Grid, Rule, Seeding, StepSummary};
use super::observer::Observer;
use super::params::Params;
use super::protection::ProtectionRegistry;
use super::structures::place_structures;
use super::visibility::{VisibilityPolicy, build_policy};

/// Character printed for cells that are not sensed in the fog-of-war dump.
pub const FOG_CHAR: char = '?';

/// A running simulation.
pub struct Simulation {
    params: Params,
    grid: Grid,
    protection: ProtectionRegistry,
    policy: Box<dyn VisibilityPolicy>,
    queue: CommandQueue,
    rng: StdRng,
    tick: u64,
    structures: Vec<Cell>,
    last_summary: StepSummary,
}

impl Simulation {
    /// Validates `params`, seeds the grid, places structures and warms up the
    /// visibility layer.
    pub fn new(params: Params) -> Result<Self, SimError> {
        params.validate()?;

        let mut rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let rule = Rule {
            k: params.k,
            b: params.b,
        };
        let seeding = Seeding {
            radii: params.radii,
            weights: params.weights,
        };
        let mut grid = Grid::new(params.width, rule, seeding, &mut rng);

        let mut protection = ProtectionRegistry::new();
        let structures = match &params.structures {
            Some(structure_params) => {
                place_structures(&mut grid, &mut protection, structure_params, &mut rng)?
            }
            None => Vec::new(),
        };

        let policy = build_policy(&params.visibility, params.width);

        let mut sim = Self {
            params,
            grid,
            protection,
            policy,
            queue: CommandQueue::new(),
            rng,
            tick: 0,
            structures,
            last_summary: StepSummary::default(),
        };

        let warmup = sim.policy.warmup_steps();
        for _ in 0..warmup {
            sim.advance();
        }
        sim.policy.finish_warmup();

        info!(
            width = sim.params.width,
            k = sim.params.k,
            b = sim.params.b,
            policy = sim.policy.name(),
            structures = sim.structures.len(),
            warmup,
            "simulation constructed"
        );

        Ok(sim)
    }

    /// Shorthand for a plain automaton with the radar disabled.
    pub fn construct(
        width: usize,
        k: u8,
        b: u8,
        radii: (f64, f64),
        weights: (f64, f64),
    ) -> Result<Self, SimError> {
        Self::new(Params::new(width, k, b, radii, weights))
    }

    fn advance(&mut self) -> StepSummary {
        self.policy.begin_step();
        let summary = self
            .grid
            .step(&self.protection, self.policy.as_mut(), &mut self.rng);
        self.policy
            .end_step(&mut self.grid, &self.protection, &mut self.rng);
        self.last_summary = summary;
        summary
    }

    /// Advances exactly one tick.
    pub fn step(&mut self) -> StepSummary {
        let summary = self.advance();
        self.tick += 1;
        debug!(
            tick = self.tick,
            alive = self.grid.alive_count(),
            recomputed = summary.recomputed,
            retained = summary.retained,
            reseeded = summary.reseeded,
            frozen = summary.frozen,
            visited = self.observer().map_or(0, |o| o.visited().len()),
            "step"
        );
        summary
    }

    /// Applies every queued command, then advances one tick.
    ///
    /// A command that fails is logged and skipped; the remaining ones still apply.
    pub fn step_with_commands(&mut self) -> StepSummary {
        let pending: Vec<Command> = self.queue.drain().collect();
        for command in pending {
            if let Err(err) = self.apply(command) {
                warn!(?command, %err, "command rejected");
            }
        }
        self.step()
    }

    /// Queues a command for the next [`step_with_commands`](Self::step_with_commands).
    pub fn submit(&mut self, command: Command) {
        self.queue.push(command);
    }

    /// Applies a command immediately.
    pub fn apply(&mut self, command: Command) -> Result<(), SimError> {
        match command {
            Command::Move(direction) => {
                let (dx, dy) = direction.delta();
                self.move_observer(dx, dy)
            }
            Command::ToggleCampfireHere => {
                let position = self.observer().ok_or(SimError::NoObserver)?.position();
                self.toggle_campfire(position.0, position.1).map(|_| ())
            }
            Command::ToggleCampfireAt((i, j)) => self.toggle_campfire(i, j).map(|_| ()),
        }
    }

    /// Value of cell `(i, j)`, or `None` outside the grid.
    pub fn cell_state(&self, i: usize, j: usize) -> Option<u8> {
        self.grid.cell_at((i, j))
    }

    /// Whether cell `(i, j)` is currently sensed by the visibility layer.
    pub fn is_visible(&self, i: usize, j: usize) -> bool {
        self.grid.contains((i, j)) && self.policy.is_visible((i, j), &self.grid)
    }

    /// Whether cell `(i, j)` is frozen by a campfire or structure.
    pub fn is_protected(&self, i: usize, j: usize) -> bool {
        self.protection.is_protected((i, j))
    }

    /// Places a campfire at `(i, j)` or removes the one already there.
    /// Returns true when a campfire is present afterwards.
    pub fn toggle_campfire(&mut self, i: usize, j: usize) -> Result<bool, SimError> {
        let cell = self.check_bounds(i, j)?;
        let placed = self
            .protection
            .toggle_campfire(cell, self.params.campfire_radius);
        if placed {
            info!(i, j, "placed campfire");
        } else {
            info!(i, j, "removed campfire");
        }
        Ok(placed)
    }

    /// Moves the observer by a unit delta, clamped to the grid edges.
    pub fn move_observer(&mut self, dx: i32, dy: i32) -> Result<(), SimError> {
        let width = self.grid.width();
        self.policy
            .observer_mut()
            .ok_or(SimError::NoObserver)?
            .move_by(dx, dy, width)
    }

    /// Text snapshot, one row per line: `.` dead, `#` alive.
    pub fn dump_text(&self) -> Vec<String> {
        self.grid.to_text()
    }

    /// Like [`dump_text`](Self::dump_text), but unsensed cells print as `?`.
    pub fn dump_visible_text(&self) -> Vec<String> {
        let width = self.grid.width();
        (0..width)
            .map(|i| {
                (0..width)
                    .map(|j| {
                        if !self.is_visible(i, j) {
                            FOG_CHAR
                        } else if self.grid.cell_at((i, j)) == Some(ALIVE) {
                            '#'
                        } else {
                            '.'
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Number of steps taken, excluding warm-up.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Parameters of this run.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The grid store.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The protection registry.
    pub fn protection(&self) -> &ProtectionRegistry {
        &self.protection
    }

    /// Structure anchors placed at initialisation.
    pub fn structures(&self) -> &[Cell] {
        &self.structures
    }

    /// The observer, when the proximity layer is active.
    pub fn observer(&self) -> Option<&Observer> {
        self.policy.observer()
    }

    /// Name of the active visibility layer.
    pub fn policy_name(&self) -> &str {
        self.policy.name()
    }

    /// Decision tally of the most recent step.
    pub fn last_summary(&self) -> StepSummary {
        self.last_summary
    }

    /// Number of commands waiting for the next step.
    pub fn pending_commands(&self) -> usize {
        self.queue.len()
    }

    fn check_bounds(&self, i: usize, j: usize) -> Result<Cell, SimError> {
        if self.grid.contains((i, j)) {
            Ok((i, j))
        } else {
            Err(SimError::OutOfBounds {
                i,
                j,
                width: self.grid.width(),
            })
        }
    }
}
