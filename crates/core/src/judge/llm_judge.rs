//! LLM-backed same-work judge.

use async_trait::async_trait;
use tracing::warn;

use super::heuristic::heuristic_same_work;
use super::llm::{CompletionRequest, LlmClient};
use super::{Judge, JudgeError, WorkRef};

/// System prompt: answer 是/否, nothing else. The few-shot examples pin down
/// the edge cases (retitled releases, sequels, unknown year as wildcard).
const SYSTEM_PROMPT: &str = "你是一个电影专家，需要判断用户给出的两个电影名称是否指向同一部电影。\n\
只需要回答 \"是\" 或 \"否\"，不需要任何解释。\n\n\
例如：\n\
《数码宝贝：最后的进化》(2020) 和 《数码宝贝大冒险：最后的进化·羁绊》(2020) -> 是\n\
《蜘蛛侠：平行宇宙》(2018) 和 《蜘蛛侠：穿越平行宇宙》(2018) -> 是\n\
《流浪地球》(2019) 和 《流浪地球2》(2023) -> 否\n\
闻香识女人 (1992) 和 闻香识女人 (未知年份) -> 是";

/// Judge that asks an LLM, falling back to the similarity heuristic when the
/// LLM is unreachable or answers garbage. Never hard-fails a rematch.
pub struct LlmJudge {
    client: Box<dyn LlmClient>,
    fallback_threshold: f64,
}

impl LlmJudge {
    pub fn new(client: Box<dyn LlmClient>, fallback_threshold: f64) -> Self {
        Self {
            client,
            fallback_threshold,
        }
    }

    fn build_prompt(a: &WorkRef, b: &WorkRef) -> String {
        format!(
            "第一部电影：《{}》({})\n第二部电影：《{}》({})",
            a.name,
            a.year_display(),
            b.name,
            b.year_display()
        )
    }

    fn parse_answer(text: &str) -> Option<bool> {
        match text.trim() {
            "是" => Some(true),
            "否" => Some(false),
            _ => None,
        }
    }
}

#[async_trait]
impl Judge for LlmJudge {
    fn name(&self) -> &str {
        "llm"
    }

    async fn same_work(&self, a: &WorkRef, b: &WorkRef) -> Result<bool, JudgeError> {
        let request = CompletionRequest::new(Self::build_prompt(a, b))
            .with_system(SYSTEM_PROMPT)
            .with_max_tokens(8);

        match self.client.complete(request).await {
            Ok(response) => match Self::parse_answer(&response.text) {
                Some(verdict) => Ok(verdict),
                None => {
                    warn!(
                        "Judge model {} answered {:?}, falling back to similarity",
                        self.client.model(),
                        response.text
                    );
                    Ok(heuristic_same_work(a, b, self.fallback_threshold))
                }
            },
            Err(e) => {
                warn!("LLM judge failed ({}), falling back to similarity", e);
                Ok(heuristic_same_work(a, b, self.fallback_threshold))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::llm::{CompletionResponse, LlmError};

    struct ScriptedLlm {
        answer: Result<&'static str, ()>,
    }

    #[async_trait]
    impl LlmClient for ScriptedLlm {
        fn provider(&self) -> &str {
            "scripted"
        }

        fn model(&self) -> &str {
            "scripted"
        }

        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            match self.answer {
                Ok(text) => Ok(CompletionResponse {
                    text: text.to_string(),
                    model: "scripted".to_string(),
                }),
                Err(()) => Err(LlmError::Http("connection refused".to_string())),
            }
        }
    }

    fn movie(name: &str, year: &str) -> WorkRef {
        WorkRef::new(name, Some(year.to_string()))
    }

    #[tokio::test]
    async fn yes_answer_confirms() {
        let judge = LlmJudge::new(Box::new(ScriptedLlm { answer: Ok("是") }), 0.8);
        let verdict = judge
            .same_work(
                &movie("数码宝贝：最后的进化", "2020"),
                &movie("数码宝贝大冒险：最后的进化·羁绊", "2020"),
            )
            .await
            .unwrap();
        assert!(verdict);
    }

    #[tokio::test]
    async fn no_answer_rejects() {
        let judge = LlmJudge::new(Box::new(ScriptedLlm { answer: Ok("否") }), 0.8);
        let verdict = judge
            .same_work(&movie("流浪地球", "2019"), &movie("流浪地球2", "2023"))
            .await
            .unwrap();
        assert!(!verdict);
    }

    #[tokio::test]
    async fn llm_failure_falls_back_to_heuristic() {
        let judge = LlmJudge::new(Box::new(ScriptedLlm { answer: Err(()) }), 0.8);

        // Identical name and year: the heuristic confirms.
        let verdict = judge
            .same_work(&movie("流浪地球", "2019"), &movie("流浪地球", "2019"))
            .await
            .unwrap();
        assert!(verdict);

        // Dissimilar names: the heuristic rejects.
        let verdict = judge
            .same_work(&movie("流浪地球", "2019"), &movie("蜘蛛侠", "2019"))
            .await
            .unwrap();
        assert!(!verdict);
    }

    #[tokio::test]
    async fn garbage_answer_falls_back_to_heuristic() {
        let judge = LlmJudge::new(
            Box::new(ScriptedLlm {
                answer: Ok("这两部电影是同一部。"),
            }),
            0.8,
        );
        let verdict = judge
            .same_work(&movie("宁静", "2022"), &movie("宁静", "2022"))
            .await
            .unwrap();
        assert!(verdict);
    }

    #[test]
    fn prompt_renders_sentinel_year() {
        let prompt = LlmJudge::build_prompt(
            &movie("闻香识女人", "1992"),
            &WorkRef::new("闻香识女人", None),
        );
        assert!(prompt.contains("《闻香识女人》(1992)"));
        assert!(prompt.contains("(未知年份)"));
    }
}
