//! Mock download dispatcher for testing.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::dispatcher::{DispatchError, Dispatcher};

/// A recorded enqueue for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEnqueue {
    pub uri: String,
    pub target_dir: PathBuf,
    pub filename: Option<String>,
}

/// Mock implementation of the Dispatcher trait. Records enqueues and can
/// fail the next call.
pub struct MockDispatcher {
    enqueues: Arc<RwLock<Vec<RecordedEnqueue>>>,
    next_error: Arc<RwLock<Option<DispatchError>>>,
}

impl Default for MockDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDispatcher {
    pub fn new() -> Self {
        Self {
            enqueues: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Recorded enqueues, in order.
    pub async fn recorded_enqueues(&self) -> Vec<RecordedEnqueue> {
        self.enqueues.read().await.clone()
    }

    pub async fn enqueue_count(&self) -> usize {
        self.enqueues.read().await.len()
    }

    /// Fail the next enqueue with the given error.
    pub async fn set_next_error(&self, error: DispatchError) {
        *self.next_error.write().await = Some(error);
    }
}

#[async_trait]
impl Dispatcher for MockDispatcher {
    async fn enqueue(
        &self,
        uri: &str,
        target_dir: &Path,
        filename: Option<&str>,
    ) -> Result<(), DispatchError> {
        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }
        self.enqueues.write().await.push(RecordedEnqueue {
            uri: uri.to_string(),
            target_dir: target_dir.to_path_buf(),
            filename: filename.map(String::from),
        });
        Ok(())
    }
}
