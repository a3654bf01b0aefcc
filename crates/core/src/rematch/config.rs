//! Rematch configuration.

use serde::{Deserialize, Serialize};

/// Configuration for candidate shortlisting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RematchConfig {
    /// Minimum name similarity for a catalog row to enter the shortlist.
    #[serde(default = "default_min_similarity")]
    pub min_similarity: f64,
    /// How many shortlisted candidates the judge is asked about, best first.
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
}

impl Default for RematchConfig {
    fn default() -> Self {
        Self {
            min_similarity: default_min_similarity(),
            max_candidates: default_max_candidates(),
        }
    }
}

fn default_min_similarity() -> f64 {
    0.3
}

fn default_max_candidates() -> usize {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RematchConfig::default();
        assert_eq!(config.min_similarity, 0.3);
        assert_eq!(config.max_candidates, 3);
    }

    #[test]
    fn deserializes_overrides() {
        let config: RematchConfig = toml::from_str("min_similarity = 0.5").unwrap();
        assert_eq!(config.min_similarity, 0.5);
        assert_eq!(config.max_candidates, 3);
    }
}
