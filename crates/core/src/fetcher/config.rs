//! Fetcher configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the HTTP fetcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// User-agent pool; one is picked pseudo-randomly per request.
    #[serde(default = "default_user_agents")]
    pub user_agents: Vec<String>,
    /// Optional HTTP(S) proxy URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Maximum attempts per URL (first try included).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base factor for exponential backoff, in seconds. The sleep before
    /// attempt `n + 1` is `backoff_factor * 2^n`.
    #[serde(default = "default_backoff_factor")]
    pub backoff_factor: f64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agents: default_user_agents(),
            proxy: None,
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            backoff_factor: default_backoff_factor(),
        }
    }
}

fn default_user_agents() -> Vec<String> {
    [
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
        "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_timeout() -> u32 {
    30
}

fn default_max_retries() -> u32 {
    5
}

fn default_backoff_factor() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pool_is_nonempty() {
        let config = FetcherConfig::default();
        assert!(!config.user_agents.is_empty());
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.backoff_factor, 1.0);
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: FetcherConfig = toml::from_str("").unwrap();
        assert_eq!(config.timeout_secs, 30);
        assert!(config.proxy.is_none());
    }

    #[test]
    fn deserializes_proxy() {
        let config: FetcherConfig =
            toml::from_str(r#"proxy = "http://127.0.0.1:7890""#).unwrap();
        assert_eq!(config.proxy.as_deref(), Some("http://127.0.0.1:7890"));
    }
}
