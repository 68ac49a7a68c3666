//! Configuration loading and typed config structures for the Dog Park
//! simulation.
//!
//! The canonical configuration lives in `dogpark-config.yaml`. This module
//! defines strongly-typed structs mirroring the YAML layout, a loader, and
//! the up-front validation that keeps placement searches from running out of
//! room.

use std::path::Path;

use dogpark_agents::DogConfig;
use serde::Deserialize;
use tracing::{info, warn};

/// Environment variable that overrides `simulation.seed`.
pub const SEED_ENV_VAR: &str = "DOGPARK_SEED";

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but describes an impossible park.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level park configuration.
///
/// Mirrors the structure of `dogpark-config.yaml`. Every section and field
/// has a default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ParkConfig {
    /// Grid dimensions.
    #[serde(default)]
    pub park: ParkLayoutConfig,

    /// Dog population parameters.
    #[serde(default)]
    pub population: PopulationConfig,

    /// Stationary object counts placed at construction.
    #[serde(default)]
    pub objects: ObjectsConfig,

    /// Arrival parameters for individual dogs.
    #[serde(default)]
    pub dogs: DogConfig,

    /// Seed, run bounds, and placement limits.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,
}

impl ParkConfig {
    /// Build a configuration from the classic park parameters, keeping
    /// defaults for everything else.
    pub fn new(
        width: u32,
        height: u32,
        max_dogs: u32,
        num_trees: u32,
        num_food_bowls: u32,
        num_toys: u32,
        arrival_rate: f64,
    ) -> Self {
        Self {
            park: ParkLayoutConfig { width, height },
            population: PopulationConfig {
                max_dogs,
                arrival_rate,
            },
            objects: ObjectsConfig {
                trees: num_trees,
                food_bowls: num_food_bowls,
                toys: num_toys,
            },
            ..Self::default()
        }
    }

    /// Replace the RNG seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.simulation.seed = seed;
        self
    }

    /// Load configuration from a YAML file at the given path.
    ///
    /// `DOGPARK_SEED`, when set to a valid `u64`, overrides
    /// `simulation.seed`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when it exists, otherwise start from defaults. The
    /// environment seed override and validation apply either way.
    ///
    /// # Errors
    ///
    /// Same as [`ParkConfig::from_file`].
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::from_file(path);
        }
        info!(path = %path.display(), "Config file not found, using defaults");
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string. No environment overrides are
    /// applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(raw) = std::env::var(SEED_ENV_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(seed) => self.simulation.seed = seed,
                Err(e) => warn!(value = %raw, error = %e, "ignoring unparsable DOGPARK_SEED"),
            }
        }
    }

    /// Number of cells in the grid.
    pub fn cell_count(&self) -> u64 {
        u64::from(self.park.width).saturating_mul(u64::from(self.park.height))
    }

    /// Check that the configuration describes a park the world can build
    /// and keep replenishing.
    ///
    /// Only objects are counted. `max_dogs` bounds arrivals over the whole
    /// run, so a crowd of dogs can still leave no empty cell for a
    /// replacement bowl; that shows up as `WorldError::GridSaturated` from a
    /// step.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| -> Result<(), ConfigError> { Err(ConfigError::Invalid { reason }) };
        let ParkLayoutConfig { width, height } = self.park;

        if width == 0 {
            return invalid("park.width must be at least 1".to_owned());
        }
        if height < 2 {
            return invalid("park.height must be at least 2 (row 0 is the entrance)".to_owned());
        }
        let rate = self.population.arrival_rate;
        if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
            return invalid(format!(
                "population.arrival_rate must be within [0, 1], got {rate}"
            ));
        }
        if self.simulation.max_placement_attempts == 0 {
            return invalid("simulation.max_placement_attempts must be at least 1".to_owned());
        }

        let inner_cells = u64::from(width).saturating_mul(u64::from(height).saturating_sub(1));
        let trees_and_toys = u64::from(self.objects.trees).saturating_add(u64::from(self.objects.toys));
        if trees_and_toys > inner_cells {
            return invalid(format!(
                "{trees_and_toys} trees and toys do not fit in the {inner_cells} cells above the entrance row"
            ));
        }
        let all_objects = trees_and_toys.saturating_add(u64::from(self.objects.food_bowls));
        if all_objects >= self.cell_count() {
            return invalid(format!(
                "{all_objects} objects leave no free cell in a {width}x{height} park"
            ));
        }

        self.dogs.validate().map_err(|e| ConfigError::Invalid {
            reason: format!("dogs: {e}"),
        })
    }
}

/// Grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ParkLayoutConfig {
    /// Columns (default: 10).
    #[serde(default = "default_width")]
    pub width: u32,

    /// Rows, including the entrance row (default: 10).
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for ParkLayoutConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Dog population configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PopulationConfig {
    /// Upper bound on dogs ever admitted (default: 25).
    #[serde(default = "default_max_dogs")]
    pub max_dogs: u32,

    /// Probability of one arrival per step, in `[0, 1]` (default: 0.15).
    #[serde(default = "default_arrival_rate")]
    pub arrival_rate: f64,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            max_dogs: default_max_dogs(),
            arrival_rate: default_arrival_rate(),
        }
    }
}

/// Stationary object counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ObjectsConfig {
    /// Trees (default: 10). Never on the entrance row.
    #[serde(default = "default_trees")]
    pub trees: u32,

    /// Food bowls (default: 3). Kept constant by replenishment.
    #[serde(default = "default_food_bowls")]
    pub food_bowls: u32,

    /// Toys (default: 5). Never on the entrance row at creation.
    #[serde(default = "default_toys")]
    pub toys: u32,
}

impl Default for ObjectsConfig {
    fn default() -> Self {
        Self {
            trees: default_trees(),
            food_bowls: default_food_bowls(),
            toys: default_toys(),
        }
    }
}

/// Seed, run bounds, and placement limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Seed for the world RNG (default: 42).
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Steps the run loop executes before stopping (default: 100). Zero
    /// runs until the park empties.
    #[serde(default = "default_max_steps")]
    pub max_steps: u64,

    /// Real-time pause between steps in milliseconds (default: 0).
    #[serde(default)]
    pub tick_interval_ms: u64,

    /// Random cells tried before an object placement gives up
    /// (default: 10000).
    #[serde(default = "default_max_placement_attempts")]
    pub max_placement_attempts: u32,
}

impl Default for SimulationBoundsConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            max_steps: default_max_steps(),
            tick_interval_ms: 0,
            max_placement_attempts: default_max_placement_attempts(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

const fn default_width() -> u32 {
    10
}

const fn default_height() -> u32 {
    10
}

const fn default_max_dogs() -> u32 {
    25
}

const fn default_arrival_rate() -> f64 {
    0.15
}

const fn default_trees() -> u32 {
    10
}

const fn default_food_bowls() -> u32 {
    3
}

const fn default_toys() -> u32 {
    5
}

const fn default_seed() -> u64 {
    42
}

const fn default_max_steps() -> u64 {
    100
}

const fn default_max_placement_attempts() -> u32 {
    10_000
}
