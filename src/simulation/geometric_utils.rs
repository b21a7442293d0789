//! Geometric utility functions for grid distances and beam angles.

use geo::algorithm::Distance;
use geo::{Euclidean, Point};
use std::f64::consts::TAU;

/// A grid coordinate as `(row, column)`.
pub type Cell = (usize, usize);

/// Converts a grid coordinate into a `geo` point (x = row, y = column).
#[inline]
pub fn cell_point(cell: Cell) -> Point<f64> {
    Point::new(cell.0 as f64, cell.1 as f64)
}

/// Euclidean distance between two grid coordinates.
#[inline]
pub fn cell_distance(a: Cell, b: Cell) -> f64 {
    Euclidean.distance(cell_point(a), cell_point(b))
}

/// Angle of `cell` around `center`, normalised into `[0, 2π)`.
///
/// The row offset is passed as the first `atan2` argument, so angle zero points
/// along the column axis and angles grow towards increasing rows.
pub fn cell_angle(cell: Cell, center: Cell) -> f64 {
    let x = cell.0 as f64 - center.0 as f64;
    let y = cell.1 as f64 - center.1 as f64;
    normalize_angle(x.atan2(y))
}

/// Wraps an angle into `[0, 2π)`.
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Returns true if `b` lies in the half-open arc `[a, a + delta)`, measured
/// counter-clockwise with wraparound at `2π`.
#[inline]
pub fn within(a: f64, b: f64, delta: f64) -> bool {
    normalize_angle(b - a) < delta
}
