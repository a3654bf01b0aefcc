//! Mock page fetcher for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::fetcher::{FetchError, PageFetcher};

/// Mock implementation of the PageFetcher trait.
///
/// Serves canned HTML by URL, records every fetch for assertions, and can
/// fail specific URLs to simulate an unreachable page.
pub struct MockFetcher {
    pages: Arc<RwLock<HashMap<String, String>>>,
    failing: Arc<RwLock<HashSet<String>>>,
    fetches: Arc<RwLock<Vec<String>>>,
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFetcher {
    /// Create a new mock fetcher with no pages.
    pub fn new() -> Self {
        Self {
            pages: Arc::new(RwLock::new(HashMap::new())),
            failing: Arc::new(RwLock::new(HashSet::new())),
            fetches: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Serve `html` for `url`.
    pub async fn set_page(&self, url: &str, html: impl Into<String>) {
        self.pages.write().await.insert(url.to_string(), html.into());
    }

    /// Make fetches of `url` fail.
    pub async fn fail_url(&self, url: &str) {
        self.failing.write().await.insert(url.to_string());
    }

    /// URLs fetched so far, in order.
    pub async fn recorded_fetches(&self) -> Vec<String> {
        self.fetches.read().await.clone()
    }

    /// Number of fetches performed.
    pub async fn fetch_count(&self) -> usize {
        self.fetches.read().await.len()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.fetches.write().await.push(url.to_string());

        if self.failing.read().await.contains(url) {
            return Err(FetchError::Exhausted {
                url: url.to_string(),
                attempts: 1,
                reason: "injected failure".to_string(),
            });
        }

        match self.pages.read().await.get(url) {
            Some(html) => Ok(html.clone()),
            None => Err(FetchError::Exhausted {
                url: url.to_string(),
                attempts: 1,
                reason: "no canned page".to_string(),
            }),
        }
    }
}
