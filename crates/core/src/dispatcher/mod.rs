//! Download dispatch - forwarding discovered links to a download daemon.

mod aria2;
mod config;

pub use aria2::Aria2Dispatcher;
pub use config::Aria2Config;

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

/// Errors for dispatch operations.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("RPC request failed: {0}")]
    Rpc(String),

    #[error("RPC error response: {code} - {message}")]
    RpcError { code: i64, message: String },

    #[error("Failed to create download directory {path}: {reason}")]
    TargetDir { path: String, reason: String },
}

/// Capability trait for enqueueing downloads.
///
/// Enqueue-and-forget: the crawler never polls download status.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Enqueue a URI for download into `target_dir`, optionally naming the
    /// output file.
    async fn enqueue(
        &self,
        uri: &str,
        target_dir: &Path,
        filename: Option<&str>,
    ) -> Result<(), DispatchError>;
}
