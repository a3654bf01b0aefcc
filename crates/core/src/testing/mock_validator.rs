//! Mock media validator for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::checker::{CheckerError, MediaValidator};

/// Mock implementation of the MediaValidator trait.
///
/// Answers from a path to verdict map; unmapped paths get the default
/// verdict (intact). Every call is recorded.
pub struct MockValidator {
    verdicts: Arc<RwLock<HashMap<PathBuf, bool>>>,
    validations: Arc<RwLock<Vec<PathBuf>>>,
    default_verdict: bool,
    fail_all: bool,
}

impl Default for MockValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockValidator {
    pub fn new() -> Self {
        Self {
            verdicts: Arc::new(RwLock::new(HashMap::new())),
            validations: Arc::new(RwLock::new(Vec::new())),
            default_verdict: true,
            fail_all: false,
        }
    }

    /// Make every unmapped path come back damaged instead of intact.
    pub fn all_damaged() -> Self {
        Self {
            default_verdict: false,
            ..Self::new()
        }
    }

    /// Make every validation fail with an I/O error.
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::new()
        }
    }

    pub async fn set_verdict(&self, path: impl Into<PathBuf>, intact: bool) {
        self.verdicts.write().await.insert(path.into(), intact);
    }

    /// Paths validated so far, in call order.
    pub async fn recorded_validations(&self) -> Vec<PathBuf> {
        self.validations.read().await.clone()
    }
}

#[async_trait]
impl MediaValidator for MockValidator {
    async fn validate(&self, path: &Path) -> Result<bool, CheckerError> {
        self.validations.write().await.push(path.to_path_buf());
        if self.fail_all {
            return Err(CheckerError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("cannot read {}", path.display()),
            )));
        }
        Ok(self
            .verdicts
            .read()
            .await
            .get(path)
            .copied()
            .unwrap_or(self.default_verdict))
    }
}
