//! Page fetching with retry, user-agent rotation and charset sniffing.

mod config;
mod http;

pub use config::FetcherConfig;
pub use http::HttpFetcher;

use async_trait::async_trait;
use thiserror::Error;

/// Errors for page fetching.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed after {attempts} attempts for {url}: {reason}")]
    Exhausted {
        url: String,
        attempts: u32,
        reason: String,
    },

    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Capability trait for fetching a page as text.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a URL and return its decoded body.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
