use super::{types::Config, ConfigError};

/// Validate configuration
///
/// Checks the constraints serde defaults cannot express:
/// - fetcher has at least one user agent and a non-zero retry budget
/// - the listing URL template carries the `{page}` placeholder
/// - similarity thresholds are within [0, 1]
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.fetcher.user_agents.is_empty() {
        return Err(ConfigError::ValidationError(
            "fetcher.user_agents cannot be empty".to_string(),
        ));
    }

    if config.fetcher.max_retries == 0 {
        return Err(ConfigError::ValidationError(
            "fetcher.max_retries cannot be 0".to_string(),
        ));
    }

    if !config.crawler.list_url_template.contains("{page}") {
        return Err(ConfigError::ValidationError(
            "crawler.list_url_template must contain the {page} placeholder".to_string(),
        ));
    }

    if !(0.0..=1.0).contains(&config.rematch.min_similarity) {
        return Err(ConfigError::ValidationError(
            "rematch.min_similarity must be between 0 and 1".to_string(),
        ));
    }

    if !(0.0..=1.0).contains(&config.judge.fallback_threshold) {
        return Err(ConfigError::ValidationError(
            "judge.fallback_threshold must be between 0 and 1".to_string(),
        ));
    }

    Ok(())
}
