use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::checker::CheckerConfig;
use crate::crawler::CrawlerConfig;
use crate::dispatcher::Aria2Config;
use crate::fetcher::FetcherConfig;
use crate::judge::JudgeConfig;
use crate::rematch::RematchConfig;

/// Root configuration
///
/// Every section has working defaults, so an absent or empty config file
/// yields a usable setup (heuristic judge, no downloader).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    /// Aria2 downloader. Absent means dispatching is disabled.
    #[serde(default)]
    pub downloader: Option<Aria2Config>,
    #[serde(default)]
    pub checker: CheckerConfig,
    #[serde(default)]
    pub judge: JudgeConfig,
    #[serde(default)]
    pub rematch: RematchConfig,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("cinevault.db")
}
