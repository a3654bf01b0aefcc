//! Directory scanner that drives the media validator.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{info, warn};
use walkdir::WalkDir;

use super::{CheckerConfig, CheckerError, MediaValidator};

/// Walks a library directory and maps each candidate video file to its
/// integrity verdict.
pub struct IntegrityScanner {
    validator: Arc<dyn MediaValidator>,
    config: CheckerConfig,
}

impl IntegrityScanner {
    pub fn new(validator: Arc<dyn MediaValidator>, config: CheckerConfig) -> Self {
        Self { validator, config }
    }

    fn is_video_file(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let dotted = format!(".{}", ext.to_lowercase());
        self.config.video_extensions.iter().any(|e| e == &dotted)
    }

    /// Scans `directory` recursively and validates every video file smaller
    /// than `max_size_bytes`. Files at or above the ceiling are presumed
    /// complete and skipped. Returns path -> intact verdict for the files
    /// that were validated.
    pub async fn scan(
        &self,
        directory: &Path,
        max_size_bytes: u64,
    ) -> Result<HashMap<PathBuf, bool>, CheckerError> {
        if !directory.is_dir() {
            return Err(CheckerError::DirectoryNotFound(directory.to_path_buf()));
        }

        let mut candidates = Vec::new();
        for entry in WalkDir::new(directory) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() || !self.is_video_file(entry.path()) {
                continue;
            }
            let size = match entry.metadata() {
                Ok(meta) => meta.len(),
                Err(e) => {
                    warn!(path = %entry.path().display(), "Failed to stat file: {}", e);
                    continue;
                }
            };
            if size >= max_size_bytes {
                continue;
            }
            candidates.push(entry.into_path());
        }

        info!(
            "Validating {} video file(s) under {}",
            candidates.len(),
            directory.display()
        );

        let concurrency = self.config.concurrency.max(1);
        let verdicts: Vec<(PathBuf, bool)> = stream::iter(candidates)
            .map(|path| {
                let validator = Arc::clone(&self.validator);
                async move {
                    let intact = match validator.validate(&path).await {
                        Ok(intact) => intact,
                        Err(e) => {
                            // A file we cannot check counts as damaged.
                            warn!(path = %path.display(), "Validation failed: {}", e);
                            false
                        }
                    };
                    (path, intact)
                }
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;

        Ok(verdicts.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockValidator;

    fn write_file(dir: &Path, name: &str, len: usize) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, vec![0u8; len]).unwrap();
        path
    }

    #[tokio::test]
    async fn validates_small_video_files_only() {
        let dir = tempfile::TempDir::new().unwrap();
        let small = write_file(dir.path(), "movie.mkv", 100);
        write_file(dir.path(), "notes.txt", 100);
        write_file(dir.path(), "big.mp4", 4096);

        let validator = Arc::new(MockValidator::new());
        let scanner = IntegrityScanner::new(validator.clone(), CheckerConfig::default());
        let verdicts = scanner.scan(dir.path(), 1024).await.unwrap();

        assert_eq!(verdicts.len(), 1);
        assert_eq!(verdicts.get(&small), Some(&true));
        assert_eq!(validator.recorded_validations().await, vec![small]);
    }

    #[tokio::test]
    async fn file_at_size_ceiling_is_skipped() {
        let dir = tempfile::TempDir::new().unwrap();
        write_file(dir.path(), "exact.mp4", 1024);

        let validator = Arc::new(MockValidator::all_damaged());
        let scanner = IntegrityScanner::new(validator.clone(), CheckerConfig::default());
        let verdicts = scanner.scan(dir.path(), 1024).await.unwrap();

        assert!(verdicts.is_empty());
        assert!(validator.recorded_validations().await.is_empty());
    }

    #[tokio::test]
    async fn extension_match_is_case_insensitive() {
        let dir = tempfile::TempDir::new().unwrap();
        let upper = write_file(dir.path(), "MOVIE.MKV", 100);

        let scanner =
            IntegrityScanner::new(Arc::new(MockValidator::all_damaged()), CheckerConfig::default());
        let verdicts = scanner.scan(dir.path(), 1024).await.unwrap();

        assert_eq!(verdicts.get(&upper), Some(&false));
    }

    #[tokio::test]
    async fn validator_error_classifies_as_damaged() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_file(dir.path(), "movie.rmvb", 100);

        let scanner =
            IntegrityScanner::new(Arc::new(MockValidator::failing()), CheckerConfig::default());
        let verdicts = scanner.scan(dir.path(), 1024).await.unwrap();

        assert_eq!(verdicts.get(&path), Some(&false));
    }

    #[tokio::test]
    async fn scans_nested_directories() {
        let dir = tempfile::TempDir::new().unwrap();
        let nested = dir.path().join("流浪地球(2019)");
        std::fs::create_dir(&nested).unwrap();
        let path = write_file(&nested, "movie.mp4", 100);

        let scanner =
            IntegrityScanner::new(Arc::new(MockValidator::new()), CheckerConfig::default());
        let verdicts = scanner.scan(dir.path(), 1024).await.unwrap();

        assert_eq!(verdicts.get(&path), Some(&true));
    }

    #[tokio::test]
    async fn missing_directory_is_an_error() {
        let scanner =
            IntegrityScanner::new(Arc::new(MockValidator::new()), CheckerConfig::default());
        let result = scanner.scan(Path::new("/nonexistent/library"), 1024).await;
        assert!(matches!(result, Err(CheckerError::DirectoryNotFound(_))));
    }
}
