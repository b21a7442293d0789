//! Structure placement by Poisson-disk rejection sampling.
//!
//! Runs once after the grid is seeded: well-separated anchors are drawn from
//! the dead cells, the disc around each anchor is cleared and the anchors are
//! registered as permanent protection.

use kdtree::KdTree;
use kdtree::distance::squared_euclidean;
use rand::Rng;
use tracing::{debug, info};

use super::error::ConfigError;
use super::geometric_utils::Cell;
use super::grid::{DEAD, Grid};
use super::params::StructureParams;
use super::protection::{Anchor, ProtectionRegistry};

/// Type alias for the 2D KD-tree holding accepted anchors.
type Tree2D = KdTree<f64, Cell, [f64; 2]>;

fn point(cell: Cell) -> [f64; 2] {
    [cell.0 as f64, cell.1 as f64]
}

/// Whether `candidate` is at least `min_distance` away from every accepted point.
fn is_clear(tree: &Tree2D, candidate: Cell, min_distance: f64) -> bool {
    match tree.nearest(&point(candidate), 1, &squared_euclidean) {
        Ok(nearest) => nearest
            .first()
            .is_none_or(|(dist_sq, _)| *dist_sq >= min_distance * min_distance),
        Err(_) => false,
    }
}

/// Draws `n` mutually separated points from `candidates`.
///
/// Each point gets up to `max_attempts` uniform draws. A draw is accepted when
/// its distance to every previously accepted point is at least `min_distance`.
/// If a point cannot be placed, [`ConfigError::InsufficientSpace`] is returned.
pub fn poisson_disk_sample<R: Rng + ?Sized>(
    candidates: &[Cell],
    min_distance: f64,
    n: usize,
    max_attempts: u32,
    rng: &mut R,
) -> Result<Vec<Cell>, ConfigError> {
    let mut accepted = Vec::with_capacity(n);
    if n == 0 {
        return Ok(accepted);
    }
    let insufficient = |placed: usize| ConfigError::InsufficientSpace {
        requested: n,
        placed,
        min_distance,
    };
    if candidates.is_empty() {
        return Err(insufficient(0));
    }

    let mut tree: Tree2D = KdTree::with_capacity(2, n);
    for _ in 0..n {
        let mut placed = None;
        for _ in 0..max_attempts {
            let candidate = candidates[rng.random_range(0..candidates.len())];
            if is_clear(&tree, candidate, min_distance) {
                placed = Some(candidate);
                break;
            }
        }
        let Some(anchor) = placed else {
            return Err(insufficient(accepted.len()));
        };
        tree.add(point(anchor), anchor)
            .map_err(|_| insufficient(accepted.len()))?;
        accepted.push(anchor);
    }

    Ok(accepted)
}

/// Samples structure anchors among the dead cells, clears their surroundings
/// and registers them as permanent protection.
pub fn place_structures<R: Rng + ?Sized>(
    grid: &mut Grid,
    protection: &mut ProtectionRegistry,
    params: &StructureParams,
    rng: &mut R,
) -> Result<Vec<Cell>, ConfigError> {
    let candidates = grid.dead_cells();
    debug!(
        candidates = candidates.len(),
        requested = params.count,
        "sampling structure anchors"
    );
    let anchors = poisson_disk_sample(
        &candidates,
        params.min_distance,
        params.count,
        params.max_attempts,
        rng,
    )?;

    for &anchor in &anchors {
        let zone = Anchor::structure(anchor, params.radius);
        clear_disc(grid, &zone);
        protection.place(zone);
    }

    info!(count = anchors.len(), radius = params.radius, "placed structures");
    Ok(anchors)
}

fn clear_disc(grid: &mut Grid, anchor: &Anchor) {
    let reach = anchor.radius.floor() as usize;
    let max = grid.width().saturating_sub(1);
    let (ai, aj) = anchor.cell;
    for i in ai.saturating_sub(reach)..=(ai + reach).min(max) {
        for j in aj.saturating_sub(reach)..=(aj + reach).min(max) {
            if anchor.covers((i, j)) {
                grid.set_cell((i, j), DEAD);
            }
        }
    }
}
