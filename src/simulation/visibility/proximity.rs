//! Observer-centred visibility with probabilistic forgetting.
//!
//! Around the observer there are three distance bands:
//! - up to `outer`: cells are sensed and marked visited; those at `inner` or
//!   beyond follow the neighbour rule, closer ones keep their value
//! - up to `outermost`: cells never sensed before are reseeded as fresh territory;
//!   cells still remembered keep their value instead
//! - beyond: cells keep whatever value was last known
//!
//! Protected cells within `outer` are sensed too, although their value is frozen.
//!
//! After each step, remembered cells outside `outer` are forgotten with a
//! per-step probability derived from a half-life, and reseeded unless protected.

use rand::Rng;
use rand::rngs::StdRng;
use tracing::trace;

use super::super::geometric_utils::{Cell, cell_distance};
use super::super::grid::Grid;
use super::super::observer::Observer;
use super::super::protection::ProtectionRegistry;
use super::{Decision, VisibilityPolicy};

/// Per-step forgetting probability for a given half-life in steps.
///
/// `1 - 0.5^(1 / half_life)`, so a remembered cell survives `half_life` steps
/// with probability one half.
pub fn despawn_probability(half_life: f64) -> f64 {
    (1.0 - 0.5_f64.powf(1.0 / half_life)).clamp(0.0, 1.0)
}

/// Visibility layer driven by a moving [`Observer`].
#[derive(Debug, Clone)]
pub struct Proximity {
    observer: Observer,
    inner: f64,
    outer: f64,
    outermost: f64,
    despawn_prob: f64,
    warmup_steps: u32,
    warming_up: bool,
}

impl Proximity {
    /// Creates the layer. Radii are expected to satisfy `inner <= outer <= outermost`.
    pub fn new(observer: Observer, inner: f64, outer: f64, outermost: f64, half_life: f64) -> Self {
        Self {
            observer,
            inner,
            outer,
            outermost,
            despawn_prob: despawn_probability(half_life),
            warmup_steps: 0,
            warming_up: false,
        }
    }

    /// Requests `steps` warm-up steps during which `inner` is treated as zero.
    pub fn with_warmup_steps(mut self, steps: u32) -> Self {
        self.warmup_steps = steps;
        self.warming_up = steps > 0;
        self
    }

    /// Forgetting probability applied per step.
    pub fn despawn_prob(&self) -> f64 {
        self.despawn_prob
    }

    /// Inner radius currently in effect.
    pub fn effective_inner(&self) -> f64 {
        if self.warming_up { 0.0 } else { self.inner }
    }

    /// Configured `(inner, outer, outermost)` radii.
    pub fn radii(&self) -> (f64, f64, f64) {
        (self.inner, self.outer, self.outermost)
    }

    /// Whether the warm-up phase is still active.
    pub fn is_warming_up(&self) -> bool {
        self.warming_up
    }
}

impl VisibilityPolicy for Proximity {
    fn name(&self) -> &str {
        "proximity"
    }

    fn observe(&mut self, cell: Cell) {
        if cell_distance(cell, self.observer.position()) <= self.outer {
            self.observer.mark_visited(cell);
        }
    }

    fn decide(&mut self, cell: Cell, _grid: &Grid) -> Decision {
        let dist = cell_distance(cell, self.observer.position());
        if dist <= self.outer {
            self.observer.mark_visited(cell);
            if dist >= self.effective_inner() {
                Decision::ApplyRule
            } else {
                Decision::Retain
            }
        } else if dist <= self.outermost && !self.observer.is_visited(cell) {
            Decision::Reseed
        } else {
            Decision::Retain
        }
    }

    fn end_step(&mut self, grid: &mut Grid, protection: &ProtectionRegistry, rng: &mut StdRng) {
        let position = self.observer.position();
        let out_of_range: Vec<Cell> = self
            .observer
            .visited()
            .iter()
            .copied()
            .filter(|&cell| cell_distance(cell, position) > self.outer)
            .collect();

        for cell in out_of_range {
            if !rng.random_bool(self.despawn_prob) {
                continue;
            }
            // campfires keep their surroundings in memory
            if protection.is_campfire_covered(cell) {
                continue;
            }
            self.observer.forget(cell);
            if !protection.is_protected(cell) {
                grid.reseed(cell, rng);
            }
            trace!(i = cell.0, j = cell.1, "forgot cell");
        }
    }

    fn is_visible(&self, cell: Cell, _grid: &Grid) -> bool {
        self.observer.is_visited(cell)
    }

    fn warmup_steps(&self) -> u32 {
        if self.warming_up { self.warmup_steps } else { 0 }
    }

    fn finish_warmup(&mut self) {
        self.warming_up = false;
    }

    fn observer(&self) -> Option<&Observer> {
        Some(&self.observer)
    }

    fn observer_mut(&mut self) -> Option<&mut Observer> {
        Some(&mut self.observer)
    }
}
