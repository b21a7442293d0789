//! Radar sweep: a rotating half-plane beam with a long trailing afterglow.

use std::f64::consts::{PI, TAU};

use super::super::geometric_utils::{Cell, cell_angle, normalize_angle, within};
use super::super::grid::Grid;
use super::{Decision, VisibilityPolicy};

/// Angular width of the trailing arc in which cells keep their last reading.
pub const AFTERGLOW_ARC: f64 = 5.5;

/// Rotating radar beam centred on the grid.
///
/// Cells in the half-plane ahead of the beam are recomputed, cells in the
/// trailing arc keep their echo, and the unlit remainder is reseeded.
#[derive(Debug, Clone)]
pub struct Sweep {
    cur: f64,
    step_angle: f64,
}

impl Sweep {
    /// Creates a sweep starting at angle zero. A negative `step_angle` disables the radar.
    pub fn new(step_angle: f64) -> Self {
        Self {
            cur: 0.0,
            step_angle,
        }
    }

    /// Current beam angle in `[0, 2π)`.
    pub fn angle(&self) -> f64 {
        self.cur
    }

    /// Angle the beam moves per step.
    pub fn step_angle(&self) -> f64 {
        self.step_angle
    }

    /// Whether the radar is switched off.
    pub fn is_disabled(&self) -> bool {
        self.step_angle < 0.0
    }

    /// Rotates the beam by one step.
    pub fn advance(&mut self) {
        if self.is_disabled() {
            return;
        }
        self.cur = normalize_angle(self.cur + TAU - self.step_angle);
    }

    /// Decision for a cell at angle `arg` around the grid centre.
    pub fn classify(&self, arg: f64) -> Decision {
        if self.is_disabled() || within(arg, self.cur, PI) {
            Decision::ApplyRule
        } else if within(arg, self.cur, AFTERGLOW_ARC) {
            Decision::Retain
        } else {
            Decision::Reseed
        }
    }
}

impl VisibilityPolicy for Sweep {
    fn name(&self) -> &str {
        "sweep"
    }

    fn begin_step(&mut self) {
        self.advance();
    }

    fn decide(&mut self, cell: Cell, grid: &Grid) -> Decision {
        if self.is_disabled() {
            return Decision::ApplyRule;
        }
        self.classify(cell_angle(cell, grid.center()))
    }

    fn is_visible(&self, cell: Cell, grid: &Grid) -> bool {
        self.is_disabled() || self.classify(cell_angle(cell, grid.center())) != Decision::Reseed
    }
}
