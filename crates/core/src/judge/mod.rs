//! Same-work judging - deciding whether two movie references denote the
//! same film.
//!
//! The judge is consulted by the rematcher to confirm fuzzy candidates. An
//! LLM-backed judge gives the best answers; a similarity heuristic is both
//! the no-LLM fallback and a standalone implementation, so the rematcher
//! works offline.

mod config;
mod heuristic;
mod llm;
mod llm_judge;

pub use config::{create_judge, JudgeConfig, JudgeProvider};
pub use heuristic::{heuristic_same_work, HeuristicJudge};
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, OllamaClient, OpenAiClient};
pub use llm_judge::LlmJudge;

use async_trait::async_trait;
use thiserror::Error;

use crate::parser::UNKNOWN_YEAR;

/// A movie reference handed to the judge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkRef {
    pub name: String,
    /// Absent year acts as a wildcard in year comparison.
    pub year: Option<String>,
}

impl WorkRef {
    pub fn new(name: impl Into<String>, year: Option<String>) -> Self {
        Self {
            name: name.into(),
            year,
        }
    }

    /// Year for prompts and logs, with the unknown sentinel when absent.
    pub fn year_display(&self) -> &str {
        self.year.as_deref().unwrap_or(UNKNOWN_YEAR)
    }

    /// Years match when equal or when either side is unknown.
    pub fn year_matches(&self, other: &WorkRef) -> bool {
        match (&self.year, &other.year) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        }
    }
}

/// Errors for judge operations.
#[derive(Debug, Error)]
pub enum JudgeError {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Unexpected judge answer: {0}")]
    UnexpectedAnswer(String),
}

/// Capability trait answering "do these two references denote the same
/// work?".
#[async_trait]
pub trait Judge: Send + Sync {
    /// Name of this judge for logging.
    fn name(&self) -> &str;

    /// Whether `a` and `b` denote the same film.
    async fn same_work(&self, a: &WorkRef, b: &WorkRef) -> Result<bool, JudgeError>;
}
