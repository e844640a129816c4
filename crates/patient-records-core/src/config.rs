//! Registry configuration.

use serde::{Deserialize, Serialize};

use crate::store::DEFAULT_STORAGE_KEY;

/// Number of records generated when the store is empty.
pub const DEFAULT_SEED_COUNT: usize = 20;

/// Settings for [`crate::registry::PatientRegistry`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RegistryConfig {
    /// Records generated on first bootstrap
    pub seed_count: usize,
    /// Key the collection is stored under
    pub storage_key: String,
    /// Fixed RNG seed for reproducible synthetic data
    pub rng_seed: Option<u64>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            seed_count: DEFAULT_SEED_COUNT,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            rng_seed: None,
        }
    }
}

impl RegistryConfig {
    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_seed_count(mut self, seed_count: usize) -> Self {
        self.seed_count = seed_count;
        self
    }

    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.seed_count, 20);
        assert_eq!(config.storage_key, "patients");
        assert_eq!(config.rng_seed, None);
    }

    #[test]
    fn test_from_partial_json() {
        let config = RegistryConfig::from_json(r#"{"rng_seed": 99}"#).unwrap();
        assert_eq!(config.rng_seed, Some(99));
        assert_eq!(config.seed_count, DEFAULT_SEED_COUNT);

        assert!(RegistryConfig::from_json("[]").is_err());
    }
}
