//! Observer position, movement and the memory of sensed cells.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::error::SimError;
use super::geometric_utils::Cell;

/// Unit movement directions. `Up` decreases the row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// One row up.
    Up,
    /// One row down.
    Down,
    /// One column left.
    Left,
    /// One column right.
    Right,
}

impl Direction {
    /// `(row, column)` delta of this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

/// The moving observer consumed by the proximity visibility layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observer {
    position: Cell,
    // Ordered so the decay pass consumes random draws in a reproducible order.
    visited: BTreeSet<Cell>,
}

impl Observer {
    /// Creates an observer at `position` with an empty memory.
    pub fn new(position: Cell) -> Self {
        Self {
            position,
            visited: BTreeSet::new(),
        }
    }

    /// Current position.
    pub fn position(&self) -> Cell {
        self.position
    }

    /// All cells currently remembered as sensed.
    pub fn visited(&self) -> &BTreeSet<Cell> {
        &self.visited
    }

    /// Whether `cell` is remembered as sensed.
    pub fn is_visited(&self, cell: Cell) -> bool {
        self.visited.contains(&cell)
    }

    /// Records `cell` as sensed. Returns true if it was not known before.
    pub fn mark_visited(&mut self, cell: Cell) -> bool {
        self.visited.insert(cell)
    }

    /// Drops `cell` from memory. Returns true if it was known.
    pub fn forget(&mut self, cell: Cell) -> bool {
        self.visited.remove(&cell)
    }

    /// Moves by a unit delta, clamping the result to a `width × width` grid.
    ///
    /// Deltas larger than one cell on either axis are rejected.
    pub fn move_by(&mut self, dx: i32, dy: i32, width: usize) -> Result<(), SimError> {
        if dx.abs() > 1 || dy.abs() > 1 {
            return Err(SimError::NonUnitMove { dx, dy });
        }
        let max = width.saturating_sub(1);
        self.position = (
            clamp_axis(self.position.0, dx, max),
            clamp_axis(self.position.1, dy, max),
        );
        Ok(())
    }

    /// Moves one cell in `direction`, clamped to the grid.
    pub fn step_towards(&mut self, direction: Direction, width: usize) -> Result<(), SimError> {
        let (dx, dy) = direction.delta();
        self.move_by(dx, dy, width)
    }
}

fn clamp_axis(value: usize, delta: i32, max: usize) -> usize {
    value
        .saturating_add_signed(delta as isize)
        .min(max)
}
