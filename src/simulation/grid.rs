//! Grid store: the cell array, the neighbour rule and the radial seeding rule.
//!
//! A step is synchronous. Neighbour counts are taken from the previous grid in a
//! parallel pass, every cell is then decided against that snapshot, and the
//! finished grid replaces the old one in a single assignment.

use ndarray::{Array2, Zip};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometric_utils::{Cell, cell_distance};
use super::protection::ProtectionRegistry;
use super::visibility::{Decision, VisibilityPolicy};

/// Dead / clear cell value.
pub const DEAD: u8 = 0;
/// Alive / opaque cell value.
pub const ALIVE: u8 = 1;

/// Threshold rule applied to a cell's live-neighbour count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// At or below this many neighbours the cell dies.
    pub k: u8,
    /// At or above this many neighbours the cell becomes alive.
    pub b: u8,
}

impl Rule {
    /// Next value for a cell with `count` live neighbours and value `current`.
    #[inline]
    pub fn apply(&self, count: u8, current: u8) -> u8 {
        if count <= self.k {
            DEAD
        } else if count >= self.b {
            ALIVE
        } else {
            current
        }
    }
}

/// Radial seeding rule used at construction and whenever a cell is reseeded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Seeding {
    /// `(inner, outer)` radii around the grid centre.
    pub radii: (f64, f64),
    /// `(dead, alive)` weights for the random draw inside the ring.
    pub weights: (f64, f64),
}

impl Seeding {
    /// Probability that a cell inside the ring seeds alive.
    pub fn alive_probability(&self) -> f64 {
        let (dead, alive) = self.weights;
        let total = dead + alive;
        if total > 0.0 && total.is_finite() {
            (alive / total).clamp(0.0, 1.0)
        } else {
            0.5
        }
    }

    /// Seeds a cell at distance `dist` from the grid centre.
    pub fn seed<R: Rng + ?Sized>(&self, dist: f64, rng: &mut R) -> u8 {
        let (inner, outer) = self.radii;
        if dist < inner || dist > outer {
            return ALIVE;
        }
        u8::from(rng.random_bool(self.alive_probability()))
    }
}

/// Per-step tally of the decisions taken, used for logging and inspection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepSummary {
    /// Cells recomputed with the neighbour rule.
    pub recomputed: usize,
    /// Cells that kept their remembered value.
    pub retained: usize,
    /// Cells reseeded as unknown territory.
    pub reseeded: usize,
    /// Cells vetoed by the protection registry.
    pub frozen: usize,
}

/// The square cell matrix together with its update rules.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Array2<u8>,
    rule: Rule,
    seeding: Seeding,
}

impl Grid {
    /// Creates a `width × width` grid, seeding every cell with the radial rule.
    pub fn new<R: Rng + ?Sized>(width: usize, rule: Rule, seeding: Seeding, rng: &mut R) -> Self {
        let center = (width / 2, width / 2);
        let cells = Array2::from_shape_fn((width, width), |cell| {
            seeding.seed(cell_distance(cell, center), rng)
        });
        Self {
            cells,
            rule,
            seeding,
        }
    }

    /// Wraps an existing cell array. Values other than 0 are stored as 1.
    ///
    /// # Panics
    ///
    /// Panics if `cells` is not square.
    pub fn from_cells(cells: Array2<u8>, rule: Rule, seeding: Seeding) -> Self {
        assert_eq!(cells.nrows(), cells.ncols(), "grid must be square");
        Self {
            cells: cells.mapv(|v| u8::from(v != DEAD)),
            rule,
            seeding,
        }
    }

    /// Side length of the grid.
    #[inline]
    pub fn width(&self) -> usize {
        self.cells.nrows()
    }

    /// Centre cell used by the seeding rule and the radar.
    #[inline]
    pub fn center(&self) -> Cell {
        let c = self.width() / 2;
        (c, c)
    }

    /// Whether `cell` lies on the grid.
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.0 < self.width() && cell.1 < self.width()
    }

    /// Neighbour rule in use.
    pub fn rule(&self) -> Rule {
        self.rule
    }

    /// Seeding rule in use.
    pub fn seeding(&self) -> Seeding {
        self.seeding
    }

    /// Read-only view of the cell array.
    pub fn cells(&self) -> &Array2<u8> {
        &self.cells
    }

    /// Value of `cell`, or `None` outside the grid.
    #[inline]
    pub fn cell_at(&self, cell: Cell) -> Option<u8> {
        self.cells.get(cell).copied()
    }

    /// Overwrites `cell`. Any non-zero value is stored as alive.
    /// Returns false when the cell is outside the grid.
    pub fn set_cell(&mut self, cell: Cell, value: u8) -> bool {
        match self.cells.get_mut(cell) {
            Some(slot) => {
                *slot = u8::from(value != DEAD);
                true
            }
            None => false,
        }
    }

    /// Number of live cells.
    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v == ALIVE).count()
    }

    /// Coordinates of all dead cells in row-major order.
    pub fn dead_cells(&self) -> Vec<Cell> {
        self.cells
            .indexed_iter()
            .filter(|&(_, &v)| v == DEAD)
            .map(|(cell, _)| cell)
            .collect()
    }

    /// Counts live cells among the in-bounds Moore neighbours of `cell`.
    /// Edges do not wrap.
    pub fn neighbor_count(&self, cell: Cell) -> u8 {
        let (i, j) = cell;
        let mut total = 0;
        for di in -1isize..=1 {
            for dj in -1isize..=1 {
                if di == 0 && dj == 0 {
                    continue;
                }
                let (Some(ni), Some(nj)) = (i.checked_add_signed(di), j.checked_add_signed(dj))
                else {
                    continue;
                };
                if let Some(&v) = self.cells.get((ni, nj)) {
                    total += v;
                }
            }
        }
        total
    }

    /// Neighbour counts for every cell, computed in parallel from the current grid.
    pub fn neighbor_counts(&self) -> Array2<u8> {
        let mut counts = Array2::zeros(self.cells.raw_dim());
        Zip::indexed(&mut counts).par_for_each(|cell, count| {
            *count = self.neighbor_count(cell);
        });
        counts
    }

    /// Draws a fresh value for `cell` from the seeding rule.
    pub fn seed_value<R: Rng + ?Sized>(&self, cell: Cell, rng: &mut R) -> u8 {
        self.seeding.seed(cell_distance(cell, self.center()), rng)
    }

    /// Reseeds `cell` in place.
    pub fn reseed<R: Rng + ?Sized>(&mut self, cell: Cell, rng: &mut R) {
        let value = self.seed_value(cell, rng);
        self.set_cell(cell, value);
    }

    /// Advances the automaton by one synchronous step.
    ///
    /// Protection is consulted first and a protected cell keeps its value; the
    /// policy only observes it. Every other cell follows the decision of
    /// `policy`. No cell reads a value produced during the same step.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        protection: &ProtectionRegistry,
        policy: &mut dyn VisibilityPolicy,
        rng: &mut R,
    ) -> StepSummary {
        let counts = self.neighbor_counts();
        let mut next = self.cells.clone();
        let mut summary = StepSummary::default();

        for (cell, slot) in next.indexed_iter_mut() {
            let current = self.cells[cell];
            if protection.is_protected(cell) {
                policy.observe(cell);
                summary.frozen += 1;
                continue;
            }
            *slot = match policy.decide(cell, self) {
                Decision::ApplyRule => {
                    summary.recomputed += 1;
                    self.rule.apply(counts[cell], current)
                }
                Decision::Retain => {
                    summary.retained += 1;
                    current
                }
                Decision::Reseed => {
                    summary.reseeded += 1;
                    self.seed_value(cell, rng)
                }
            };
        }

        self.cells = next;
        summary
    }

    /// Text snapshot: one row per line, `.` for dead and `#` for alive.
    pub fn to_text(&self) -> Vec<String> {
        self.cells
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|&v| if v == ALIVE { '#' } else { '.' }).collect())
            .collect()
    }
}
