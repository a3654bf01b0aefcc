//! Mock same-work judge for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::judge::{Judge, JudgeError, WorkRef};

/// Mock implementation of the Judge trait.
///
/// Pops scripted answers in order, falling back to a default verdict when
/// the script runs dry, and records every question asked.
pub struct MockJudge {
    script: Arc<RwLock<VecDeque<bool>>>,
    default_verdict: bool,
    questions: Arc<RwLock<Vec<(WorkRef, WorkRef)>>>,
}

impl Default for MockJudge {
    fn default() -> Self {
        Self::new()
    }
}

impl MockJudge {
    /// A judge that confirms everything it is asked.
    pub fn new() -> Self {
        Self {
            script: Arc::new(RwLock::new(VecDeque::new())),
            default_verdict: true,
            questions: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// A judge that rejects everything it is asked.
    pub fn denying() -> Self {
        Self {
            default_verdict: false,
            ..Self::new()
        }
    }

    /// Queue answers to give, in order, before the default applies.
    pub async fn script_answers(&self, answers: impl IntoIterator<Item = bool>) {
        self.script.write().await.extend(answers);
    }

    /// Questions asked so far, in order.
    pub async fn recorded_questions(&self) -> Vec<(WorkRef, WorkRef)> {
        self.questions.read().await.clone()
    }

    pub async fn question_count(&self) -> usize {
        self.questions.read().await.len()
    }
}

#[async_trait]
impl Judge for MockJudge {
    fn name(&self) -> &str {
        "mock"
    }

    async fn same_work(&self, a: &WorkRef, b: &WorkRef) -> Result<bool, JudgeError> {
        self.questions.write().await.push((a.clone(), b.clone()));
        Ok(self
            .script
            .write()
            .await
            .pop_front()
            .unwrap_or(self.default_verdict))
    }
}
