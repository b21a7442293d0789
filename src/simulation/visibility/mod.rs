//! Visibility layers deciding, per cell and per step, how the automaton may update.
//!
//! A [`VisibilityPolicy`] is consulted by the grid store for every unprotected
//! cell. It answers with a [`Decision`]:
//! - [`Decision::ApplyRule`]: the cell is freshly sensed and follows the threshold rule
//! - [`Decision::Retain`]: the cell keeps its remembered value
//! - [`Decision::Reseed`]: the cell is treated as unknown and redrawn from the seeding rule

mod proximity;
mod sweep;

pub use proximity::{Proximity, despawn_probability};
pub use sweep::Sweep;

use rand::rngs::StdRng;

use super::geometric_utils::Cell;
use super::grid::Grid;
use super::observer::Observer;
use super::params::VisibilityParams;
use super::protection::ProtectionRegistry;

/// Outcome of a visibility decision for a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Recompute the cell with the neighbour rule.
    ApplyRule,
    /// Keep the current value.
    Retain,
    /// Redraw the cell with the radial seeding rule.
    Reseed,
}

/// Strategy that overrides the automaton's per-cell update.
///
/// The grid store calls [`begin_step`](VisibilityPolicy::begin_step) once, then
/// [`decide`](VisibilityPolicy::decide) for every unprotected cell and
/// [`observe`](VisibilityPolicy::observe) for every protected one, then swaps in
/// the new grid and calls [`end_step`](VisibilityPolicy::end_step).
pub trait VisibilityPolicy: Send {
    /// Human-readable name of the policy.
    fn name(&self) -> &str;

    /// Advances policy state before the cell pass.
    fn begin_step(&mut self) {}

    /// Records that `cell` was within reach this step without deciding its value.
    ///
    /// Called for cells whose value is frozen by protection, which never reach
    /// [`decide`](VisibilityPolicy::decide).
    fn observe(&mut self, _cell: Cell) {}

    /// Decides how `cell` is updated, given the grid as it was before the step.
    fn decide(&mut self, cell: Cell, grid: &Grid) -> Decision;

    /// Runs after the new grid is in place.
    fn end_step(&mut self, _grid: &mut Grid, _protection: &ProtectionRegistry, _rng: &mut StdRng) {
    }

    /// Whether `cell` is currently sensed, for fog-of-war display.
    fn is_visible(&self, cell: Cell, grid: &Grid) -> bool;

    /// Number of untracked warm-up steps to run at construction.
    fn warmup_steps(&self) -> u32 {
        0
    }

    /// Called once the warm-up steps have run.
    fn finish_warmup(&mut self) {}

    /// Observer driving the policy, if any.
    fn observer(&self) -> Option<&Observer> {
        None
    }

    /// Mutable access to the observer, if any.
    fn observer_mut(&mut self) -> Option<&mut Observer> {
        None
    }
}

/// Builds the policy described by `params` for a grid of the given width.
pub fn build_policy(params: &VisibilityParams, width: usize) -> Box<dyn VisibilityPolicy> {
    match *params {
        VisibilityParams::Sweep { step_angle } => Box::new(Sweep::new(step_angle)),
        VisibilityParams::Proximity {
            inner,
            outer,
            outermost,
            half_life,
            warmup_steps,
        } => {
            let start = (width / 2, width / 2);
            Box::new(
                Proximity::new(Observer::new(start), inner, outer, outermost, half_life)
                    .with_warmup_steps(warmup_steps),
            )
        }
    }
}
