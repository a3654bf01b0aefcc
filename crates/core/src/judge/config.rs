//! Judge configuration and factory.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::heuristic::{HeuristicJudge, DEFAULT_THRESHOLD};
use super::llm::{LlmClient, OllamaClient, OpenAiClient};
use super::llm_judge::LlmJudge;
use super::Judge;

/// LLM provider backing the judge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JudgeProvider {
    /// No LLM; similarity heuristic only.
    #[default]
    None,
    /// OpenAI-compatible chat-completions endpoint.
    #[serde(rename = "openai")]
    OpenAi,
    /// Local Ollama instance.
    Ollama,
}

/// Judge configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JudgeConfig {
    #[serde(default)]
    pub provider: JudgeProvider,
    /// Model name (required for openai/ollama providers).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// API key (openai provider).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Custom API base URL (self-hosted endpoints).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Name-similarity threshold for the heuristic fallback.
    #[serde(default = "default_fallback_threshold")]
    pub fallback_threshold: f64,
}

fn default_timeout() -> u32 {
    30
}

fn default_fallback_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

/// Build a judge from config, degrading to the heuristic when the LLM
/// section is incomplete.
pub fn create_judge(config: &JudgeConfig) -> Arc<dyn Judge> {
    match config.provider {
        JudgeProvider::None => {
            info!("Using heuristic judge (no LLM configured)");
            Arc::new(HeuristicJudge::new(config.fallback_threshold))
        }
        JudgeProvider::OpenAi => {
            let (Some(model), Some(api_key)) = (&config.model, &config.api_key) else {
                warn!("judge.provider = openai but model/api_key missing, using heuristic");
                return Arc::new(HeuristicJudge::new(config.fallback_threshold));
            };
            match OpenAiClient::new(api_key, model, config.timeout_secs) {
                Ok(client) => {
                    let client: Box<dyn LlmClient> = match &config.api_base {
                        Some(base) => Box::new(client.with_api_base(base)),
                        None => Box::new(client),
                    };
                    info!("Using LLM judge ({} via openai)", model);
                    Arc::new(LlmJudge::new(client, config.fallback_threshold))
                }
                Err(e) => {
                    warn!("Failed to build OpenAI client ({}), using heuristic", e);
                    Arc::new(HeuristicJudge::new(config.fallback_threshold))
                }
            }
        }
        JudgeProvider::Ollama => {
            let Some(model) = &config.model else {
                warn!("judge.provider = ollama but model missing, using heuristic");
                return Arc::new(HeuristicJudge::new(config.fallback_threshold));
            };
            match OllamaClient::new(model, config.timeout_secs) {
                Ok(client) => {
                    let client: Box<dyn LlmClient> = match &config.api_base {
                        Some(base) => Box::new(client.with_api_base(base)),
                        None => Box::new(client),
                    };
                    info!("Using LLM judge ({} via ollama)", model);
                    Arc::new(LlmJudge::new(client, config.fallback_threshold))
                }
                Err(e) => {
                    warn!("Failed to build Ollama client ({}), using heuristic", e);
                    Arc::new(HeuristicJudge::new(config.fallback_threshold))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_provider_is_none() {
        let config = JudgeConfig::default();
        assert_eq!(config.provider, JudgeProvider::None);
        let judge = create_judge(&config);
        assert_eq!(judge.name(), "heuristic");
    }

    #[test]
    fn incomplete_openai_config_degrades_to_heuristic() {
        let config = JudgeConfig {
            provider: JudgeProvider::OpenAi,
            model: Some("qwen2.5:72b".to_string()),
            api_key: None,
            ..JudgeConfig::default()
        };
        let judge = create_judge(&config);
        assert_eq!(judge.name(), "heuristic");
    }

    #[test]
    fn full_openai_config_builds_llm_judge() {
        let config = JudgeConfig {
            provider: JudgeProvider::OpenAi,
            model: Some("qwen2.5:72b".to_string()),
            api_key: Some("token-abc123".to_string()),
            api_base: Some("http://10.0.0.2:8000/v1".to_string()),
            ..JudgeConfig::default()
        };
        let judge = create_judge(&config);
        assert_eq!(judge.name(), "llm");
    }

    #[test]
    fn deserializes_from_toml() {
        let config: JudgeConfig = toml::from_str(
            r#"
provider = "ollama"
model = "qwen2.5:7b"
"#,
        )
        .unwrap();
        assert_eq!(config.provider, JudgeProvider::Ollama);
        assert_eq!(config.fallback_threshold, 0.8);
    }

    #[test]
    fn openai_provider_spelling_round_trips() {
        let config: JudgeConfig = toml::from_str(
            r#"
provider = "openai"
model = "gpt-4o-mini"
api_key = "token-abc123"
"#,
        )
        .unwrap();
        assert_eq!(config.provider, JudgeProvider::OpenAi);

        let serialized = toml::to_string(&config).unwrap();
        assert!(serialized.contains("provider = \"openai\""));
    }
}
