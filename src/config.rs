use serde::{Deserialize, Serialize};

use crate::core::faction::DEFAULT_FACTION_CAP;
use crate::core::registry::DEFAULT_BIO_THRESHOLD;

/// Pipeline tuning knobs, assembled from CLI arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    /// Maximum concurrent generator calls.
    pub concurrency: usize,
    /// Attempts per hero before falling back to a review placeholder.
    pub max_retries: u32,
    /// Bio similarity above this is a uniqueness violation.
    pub similarity_threshold: f64,
    /// Maximum share of the roster any one faction may hold.
    pub faction_cap: f64,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            concurrency: 10,
            max_retries: 3,
            similarity_threshold: DEFAULT_BIO_THRESHOLD,
            faction_cap: DEFAULT_FACTION_CAP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ForgeConfig::default();
        assert_eq!(config.concurrency, 10);
        assert_eq!(config.max_retries, 3);
        assert!((config.similarity_threshold - 0.60).abs() < 1e-9);
        assert!((config.faction_cap - 0.40).abs() < 1e-9);
    }
}
