//! Checker configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the integrity checker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// Path to the ffmpeg binary.
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,
    /// File extensions counted as video files (lowercase, with dot).
    #[serde(default = "default_video_extensions")]
    pub video_extensions: Vec<String>,
    /// How many files are validated concurrently.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            video_extensions: default_video_extensions(),
            concurrency: default_concurrency(),
        }
    }
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_video_extensions() -> Vec<String> {
    [".mp4", ".avi", ".mkv", ".mov", ".wmv", ".flv", ".rmvb"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_concurrency() -> usize {
    4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_common_containers() {
        let config = CheckerConfig::default();
        assert!(config.video_extensions.contains(&".mkv".to_string()));
        assert!(config.video_extensions.contains(&".rmvb".to_string()));
        assert_eq!(config.concurrency, 4);
    }

    #[test]
    fn deserializes_custom_extensions() {
        let config: CheckerConfig = toml::from_str(
            r#"
video_extensions = [".mkv"]
concurrency = 2
"#,
        )
        .unwrap();
        assert_eq!(config.video_extensions, vec![".mkv"]);
        assert_eq!(config.concurrency, 2);
        assert_eq!(config.ffmpeg_path, "ffmpeg");
    }
}
