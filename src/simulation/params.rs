use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::ConfigError;

/// Step angle value that switches the radar sweep off.
pub const RADAR_DISABLED: f64 = -1.0;

/// Number of untracked warm-up steps run before observer limits apply.
pub const DEFAULT_WARMUP_STEPS: u32 = 10;

/// Default number of draws per structure anchor before sampling gives up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Simulation parameters fixed for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// Grid side length; the grid is `width × width`.
    pub width: usize,
    /// Death/survival threshold: a cell with at most `k` live neighbours dies.
    pub k: u8,
    /// Birth threshold: a cell with at least `b` live neighbours becomes alive.
    pub b: u8,
    /// Seeding radii `(inner, outer)` measured from the grid centre.
    /// Cells closer than `inner` or further than `outer` always seed alive.
    pub radii: (f64, f64),
    /// Seeding weights `(dead, alive)` biasing the random coin flip.
    pub weights: (f64, f64),
    /// Protection radius of every campfire placed during the run.
    pub campfire_radius: f64,
    /// Which visibility layer drives the per-cell decision.
    pub visibility: VisibilityParams,
    /// Optional structures carved out at initialisation.
    #[serde(default)]
    pub structures: Option<StructureParams>,
    /// Seed for the random source; `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Configuration of the active visibility layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VisibilityParams {
    /// Rotating radar beam around the grid centre.
    Sweep {
        /// Angle the beam turns per step, in radians.
        /// Any negative value disables the radar.
        step_angle: f64,
    },
    /// Observer-centred annuli with probabilistic forgetting.
    Proximity {
        /// Cells closer than this keep their remembered value.
        inner: f64,
        /// Cells up to this distance follow the automaton rule.
        outer: f64,
        /// Unknown cells up to this distance are reseeded every step.
        outermost: f64,
        /// Half-life, in steps, of a remembered cell outside the observer's range.
        half_life: f64,
        /// Warm-up steps run with `inner` forced to zero.
        #[serde(default = "default_warmup_steps")]
        warmup_steps: u32,
    },
}

fn default_warmup_steps() -> u32 {
    DEFAULT_WARMUP_STEPS
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

/// Structure placement parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureParams {
    /// Number of structures to place.
    pub count: usize,
    /// Minimum distance between two structure anchors.
    pub min_distance: f64,
    /// Radius of the cleared, permanently protected zone around each anchor.
    pub radius: f64,
    /// Draws allowed per anchor before placement fails.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for Params {
    fn default() -> Self {
        Self::radar()
    }
}

impl Params {
    /// Creates parameters for a plain automaton with the radar disabled.
    pub fn new(width: usize, k: u8, b: u8, radii: (f64, f64), weights: (f64, f64)) -> Self {
        Self {
            width,
            k,
            b,
            radii,
            weights,
            campfire_radius: 10.0,
            visibility: VisibilityParams::Sweep {
                step_angle: RADAR_DISABLED,
            },
            structures: None,
            seed: None,
        }
    }

    /// Sets the visibility layer.
    pub fn with_visibility(mut self, visibility: VisibilityParams) -> Self {
        self.visibility = visibility;
        self
    }

    /// Sets the structure layer.
    pub fn with_structures(mut self, structures: StructureParams) -> Self {
        self.structures = Some(structures);
        self
    }

    /// Sets the campfire radius.
    pub fn with_campfire_radius(mut self, radius: f64) -> Self {
        self.campfire_radius = radius;
        self
    }

    /// Fixes the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Rotating radar over a ring-shaped random field.
    pub fn radar() -> Self {
        let n = 100.0;
        Self::new(202, 2, 6, (n / 5.0, 9.0 * n / 10.0), (1.0, 1.0))
            .with_visibility(VisibilityParams::Sweep { step_angle: 0.5 })
    }

    /// Radar sweep with click-placed campfires.
    pub fn campfire() -> Self {
        let n = 100.0;
        Self::new(202, 2, 6, (0.0, 9.0 * n / 10.0), (1.0, 1.0))
            .with_visibility(VisibilityParams::Sweep { step_angle: 0.5 })
            .with_campfire_radius(20.0)
    }

    /// Walking observer with fog of war.
    pub fn observer() -> Self {
        let n = 80.0;
        Self::new(162, 2, 6, (0.0, 9.0 * n / 10.0), (1.0, 1.0))
            .with_visibility(VisibilityParams::Proximity {
                inner: 15.0,
                outer: 20.0,
                outermost: 25.0,
                half_life: 2.0,
                warmup_steps: DEFAULT_WARMUP_STEPS,
            })
            .with_campfire_radius(15.0)
    }

    /// Walking observer on a map dotted with protected structures.
    pub fn structures() -> Self {
        let mut params = Self::observer().with_structures(StructureParams {
            count: 10,
            min_distance: 20.0,
            radius: 5.0,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        });
        params.k = 3;
        params.weights = (1.0, 1.3);
        params
    }

    /// Looks up a named preset.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "radar" => Some(Self::radar()),
            "campfire" => Some(Self::campfire()),
            "observer" => Some(Self::observer()),
            "structures" => Some(Self::structures()),
            _ => None,
        }
    }

    /// Names accepted by [`Params::preset`].
    pub fn preset_names() -> &'static [&'static str] {
        &["radar", "campfire", "observer", "structures"]
    }

    /// Checks every configuration invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::InvalidWidth(self.width));
        }
        if self.k >= self.b {
            return Err(ConfigError::InvalidThresholds {
                k: self.k,
                b: self.b,
            });
        }

        let (inner, outer) = self.radii;
        if !is_non_negative(inner) || !is_non_negative(outer) || outer < inner {
            return Err(ConfigError::InvalidRadii { inner, outer });
        }

        let (dead, alive) = self.weights;
        if !is_non_negative(dead) || !is_non_negative(alive) || dead + alive <= 0.0 {
            return Err(ConfigError::InvalidWeights { dead, alive });
        }

        if !is_non_negative(self.campfire_radius) {
            return Err(ConfigError::InvalidCampfireRadius(self.campfire_radius));
        }

        match self.visibility {
            VisibilityParams::Sweep { step_angle } => {
                if !step_angle.is_finite() {
                    return Err(ConfigError::InvalidVisibility(format!(
                        "step angle must be finite, got {step_angle}"
                    )));
                }
            }
            VisibilityParams::Proximity {
                inner,
                outer,
                outermost,
                half_life,
                ..
            } => {
                if !is_non_negative(inner) || !is_non_negative(outer) || !is_non_negative(outermost)
                {
                    return Err(ConfigError::InvalidVisibility(format!(
                        "observer radii must be non-negative, got ({inner}, {outer}, {outermost})"
                    )));
                }
                if inner > outer || outer > outermost {
                    return Err(ConfigError::InvalidVisibility(format!(
                        "observer radii must satisfy inner <= outer <= outermost, \
                         got ({inner}, {outer}, {outermost})"
                    )));
                }
                if !half_life.is_finite() || half_life <= 0.0 {
                    return Err(ConfigError::InvalidVisibility(format!(
                        "half-life must be positive, got {half_life}"
                    )));
                }
            }
        }

        if let Some(structures) = &self.structures {
            if !is_non_negative(structures.min_distance) {
                return Err(ConfigError::InvalidStructures(format!(
                    "minimum distance must be non-negative, got {}",
                    structures.min_distance
                )));
            }
            if !is_non_negative(structures.radius) {
                return Err(ConfigError::InvalidStructures(format!(
                    "radius must be non-negative, got {}",
                    structures.radius
                )));
            }
            if structures.max_attempts == 0 {
                return Err(ConfigError::InvalidStructures(
                    "at least one placement attempt is required".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Saves the parameters to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads and validates parameters from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
