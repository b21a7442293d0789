//! # Fogwalk - Cellular Automaton Under Partial Observation
//!
//! A two-state cellular automaton whose per-cell update is overridden by
//! layered visibility and protection policies. What is not currently sensed is
//! either remembered as it was last seen or treated as unknown and redrawn.
//!
//! ## Features
//!
//! - Threshold automaton on a square grid (`count <= k` dies, `count >= b` is born)
//! - Radar sweep: a rotating half-plane beam with a trailing afterglow
//! - Observer: distance bands around a moving observer with half-life forgetting
//! - Campfires and structures that freeze the cells around them
//! - Poisson-disk structure placement with bounded retries
//! - Seedable randomness for reproducible runs
//! - Headless text dumps for inspection
//!
//! ## Core Modules
//!
//! - [`simulation::grid`] - Cell array, neighbour rule and seeding rule
//! - [`simulation::visibility`] - Sweep and proximity visibility layers
//! - [`simulation::protection`] - Campfire and structure exclusion zones
//! - [`simulation::structures`] - Structure placement
//! - [`simulation::observer`] - Observer position and memory
//! - [`simulation::simulator`] - The simulation facade used by front ends

/// Core simulation logic and data structures.
pub mod simulation {
    /// Front-end commands applied between steps.
    pub mod commands;
    /// Configuration and runtime error types.
    pub mod error;
    /// Geometric utility functions for distances and angles.
    pub mod geometric_utils;
    /// Grid store with the neighbour and seeding rules.
    pub mod grid;
    /// Observer position, movement and visited cells.
    pub mod observer;
    /// Simulation parameters, presets and validation.
    pub mod params;
    /// Campfire and structure protection zones.
    pub mod protection;
    /// Simulation facade composing all layers.
    pub mod simulator;
    /// Poisson-disk structure placement.
    pub mod structures;
    /// Visibility layers deciding how each cell updates.
    ///
    /// The [`visibility::VisibilityPolicy`] trait is implemented by
    /// [`visibility::Sweep`] and [`visibility::Proximity`].
    pub mod visibility;
}

pub use simulation::error::{ConfigError, SimError};
pub use simulation::params::{Params, StructureParams, VisibilityParams};
pub use simulation::simulator::Simulation;
