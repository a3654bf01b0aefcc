//! The scrape pipeline: listing pages to detail pages to catalog rows, with
//! optional download dispatch.

mod config;
mod runner;

pub use config::CrawlerConfig;
pub use runner::{CrawlError, Crawler};
