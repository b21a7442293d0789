//! Error types for configuration and runtime commands.

use thiserror::Error;

/// Problems detected while validating or loading simulation parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The grid must contain at least one cell.
    #[error("grid width must be positive, got {0}")]
    InvalidWidth(usize),

    /// The death threshold must lie strictly below the birth threshold.
    #[error("thresholds must satisfy k < b, got k = {k}, b = {b}")]
    InvalidThresholds {
        /// Death/survival threshold.
        k: u8,
        /// Birth threshold.
        b: u8,
    },

    /// Seeding radii must be finite, non-negative and ordered.
    #[error("seeding radii must satisfy 0 <= inner <= outer, got ({inner}, {outer})")]
    InvalidRadii {
        /// Inner seeding radius.
        inner: f64,
        /// Outer seeding radius.
        outer: f64,
    },

    /// Seeding weights must be finite, non-negative and not both zero.
    #[error("seeding weights must be non-negative with a positive sum, got ({dead}, {alive})")]
    InvalidWeights {
        /// Weight of the dead outcome.
        dead: f64,
        /// Weight of the alive outcome.
        alive: f64,
    },

    /// Campfire radius must be finite and non-negative.
    #[error("campfire radius must be non-negative, got {0}")]
    InvalidCampfireRadius(f64),

    /// The visibility layer is misconfigured.
    #[error("invalid visibility parameters: {0}")]
    InvalidVisibility(String),

    /// The structure layer is misconfigured.
    #[error("invalid structure parameters: {0}")]
    InvalidStructures(String),

    /// Poisson-disk sampling ran out of attempts.
    #[error(
        "insufficient space for requested structures: placed {placed} of {requested} \
         with minimum separation {min_distance}"
    )]
    InsufficientSpace {
        /// Number of anchors asked for.
        requested: usize,
        /// Number of anchors accepted before giving up.
        placed: usize,
        /// Minimum separation between anchors.
        min_distance: f64,
    },

    /// Reading or writing a parameter file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A parameter file could not be parsed or serialised.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors surfaced by the simulation facade.
#[derive(Debug, Error)]
pub enum SimError {
    /// Construction failed because of a configuration problem.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A coordinate outside the grid was addressed.
    #[error("cell ({i}, {j}) is outside the {width}x{width} grid")]
    OutOfBounds {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
        /// Grid width.
        width: usize,
    },

    /// Observer moves are limited to one cell per axis.
    #[error("observer moves must be unit steps, got ({dx}, {dy})")]
    NonUnitMove {
        /// Row delta.
        dx: i32,
        /// Column delta.
        dy: i32,
    },

    /// The active visibility policy has no observer to move.
    #[error("the active visibility policy has no observer")]
    NoObserver,
}
