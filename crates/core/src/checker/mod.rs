//! Video integrity checking.
//!
//! The scanner walks a library directory, filters candidate video files by
//! extension and size, and asks a media validator whether each one is
//! structurally intact. Validator failures classify the file as damaged
//! (fail-closed); the scanner itself never deletes or moves anything.

mod config;
mod ffmpeg;
mod scanner;

pub use config::CheckerConfig;
pub use ffmpeg::FfmpegValidator;
pub use scanner::IntegrityScanner;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

/// Errors for integrity checking.
#[derive(Debug, Error)]
pub enum CheckerError {
    #[error("ffmpeg not found at '{path}'")]
    FfmpegNotFound { path: String },

    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Capability trait for media validation.
///
/// Modeled as an interface rather than a concrete subprocess call so a
/// library binding can be swapped in without touching the scanner.
#[async_trait]
pub trait MediaValidator: Send + Sync {
    /// Whether the file at `path` is structurally intact.
    async fn validate(&self, path: &Path) -> Result<bool, CheckerError>;
}
