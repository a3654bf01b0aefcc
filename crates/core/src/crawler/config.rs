//! Crawler configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for the scrape pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Listing page URL template with a `{page}` placeholder.
    #[serde(default = "default_list_url_template")]
    pub list_url_template: String,
    /// Base directory download dispatches target.
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            list_url_template: default_list_url_template(),
            download_dir: default_download_dir(),
        }
    }
}

fn default_list_url_template() -> String {
    "https://www.dytt8.com/html/gndy/dyzz/list_23_{page}.html".to_string()
}

fn default_download_dir() -> PathBuf {
    PathBuf::from("downloads")
}

impl CrawlerConfig {
    /// Renders the listing URL for a page number.
    pub fn list_url(&self, page: u32) -> String {
        self.list_url_template.replace("{page}", &page.to_string())
    }
}
