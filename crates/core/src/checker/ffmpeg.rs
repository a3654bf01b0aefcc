//! FFmpeg-based media validator.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::{CheckerError, MediaValidator};

/// Validator that decodes the whole file with ffmpeg and treats any decoder
/// diagnostic as damage.
///
/// Runs `ffmpeg -v error -i <file> -f null -`. A clean file produces no
/// stderr output at the `error` log level, so the verdict is simply whether
/// stderr is empty.
pub struct FfmpegValidator {
    ffmpeg_path: String,
}

impl FfmpegValidator {
    /// Creates a validator using the given ffmpeg binary path.
    pub fn new(ffmpeg_path: impl Into<String>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }
}

#[async_trait]
impl MediaValidator for FfmpegValidator {
    async fn validate(&self, path: &Path) -> Result<bool, CheckerError> {
        let output = Command::new(&self.ffmpeg_path)
            .args(["-v", "error", "-i"])
            .arg(path)
            .args(["-f", "null", "-"])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CheckerError::FfmpegNotFound {
                        path: self.ffmpeg_path.clone(),
                    }
                } else {
                    CheckerError::Io(e)
                }
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        let intact = stderr.trim().is_empty();
        if !intact {
            debug!(path = %path.display(), "ffmpeg reported decode errors: {}", stderr.trim());
        }
        Ok(intact)
    }
}
