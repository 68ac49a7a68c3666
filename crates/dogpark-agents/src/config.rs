//! Configuration for newly arriving dogs.
//!
//! [`DogConfig`] is embedded in the `dogs` section of the park configuration
//! file; every field has a default so partial YAML works.

use serde::Deserialize;

use crate::error::AgentError;

/// Tunables applied when a dog arrives at the park.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DogConfig {
    /// Lowest starting energy, inclusive (default: 10).
    #[serde(default = "default_min_energy")]
    pub min_energy: u32,

    /// Highest starting energy, inclusive (default: 100).
    #[serde(default = "default_max_energy")]
    pub max_energy: u32,

    /// Image tags a renderer uses to tell dogs apart. One is chosen uniformly
    /// per dog.
    #[serde(default = "default_image_tags")]
    pub image_tags: Vec<String>,
}

impl Default for DogConfig {
    fn default() -> Self {
        Self {
            min_energy: default_min_energy(),
            max_energy: default_max_energy(),
            image_tags: default_image_tags(),
        }
    }
}

impl DogConfig {
    /// Check that a dog can be generated from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidEnergyRange`] if `min_energy > max_energy`,
    /// or [`AgentError::NoImageTags`] if the tag list is empty.
    pub fn validate(&self) -> Result<(), AgentError> {
        if self.min_energy > self.max_energy {
            return Err(AgentError::InvalidEnergyRange {
                min: self.min_energy,
                max: self.max_energy,
            });
        }
        if self.image_tags.is_empty() {
            return Err(AgentError::NoImageTags);
        }
        Ok(())
    }
}

const fn default_min_energy() -> u32 {
    10
}

const fn default_max_energy() -> u32 {
    100
}

fn default_image_tags() -> Vec<String> {
    (1..=4).map(|n| format!("DogPic{n}.png")).collect()
}
