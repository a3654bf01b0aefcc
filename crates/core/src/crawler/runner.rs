//! The page loop.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::dispatcher::{DispatchError, Dispatcher};
use crate::fetcher::{FetchError, PageFetcher};
use crate::parser::{parse_detail, parse_listing, DetailInfo, ListingEntry, ParseError, UNKNOWN_YEAR};
use crate::store::{MovieStore, NewMovie, StoreError};

use super::CrawlerConfig;

/// Errors for a single page or movie step.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Drives the scrape: listing pages in sequence, each movie fetched, parsed,
/// deduplicated and persisted, optionally handed to the download dispatcher.
///
/// Failures are contained at the smallest scope that makes sense. A page
/// that will not fetch or parse is skipped; a movie that fails is logged and
/// counted as a failure; the run always completes the requested page range.
pub struct Crawler {
    fetcher: Arc<dyn PageFetcher>,
    store: Arc<dyn MovieStore>,
    dispatcher: Option<Arc<dyn Dispatcher>>,
    config: CrawlerConfig,
}

impl Crawler {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        store: Arc<dyn MovieStore>,
        dispatcher: Option<Arc<dyn Dispatcher>>,
        config: CrawlerConfig,
    ) -> Self {
        Self {
            fetcher,
            store,
            dispatcher,
            config,
        }
    }

    /// Scrapes pages `start_page..=end_page`. Returns how many movies were
    /// processed successfully (inserted or already present).
    pub async fn run(&self, start_page: u32, end_page: u32) -> u64 {
        info!("Starting crawl of pages {} to {}", start_page, end_page);

        let mut successful = 0u64;
        for page in start_page..=end_page {
            let entries = match self.scrape_listing_page(page).await {
                Ok(entries) => entries,
                Err(e) => {
                    error!("Failed to scrape page {}: {}", page, e);
                    continue;
                }
            };
            info!("Found {} movies on page {}", entries.len(), page);

            for entry in entries {
                match self.process_movie(&entry).await {
                    Ok(true) => successful += 1,
                    Ok(false) => {}
                    Err(e) => {
                        error!("Failed to process movie {}: {}", entry.url, e);
                    }
                }
            }
            info!("Completed page {}", page);
        }

        info!("Crawl complete, {} movies processed", successful);
        successful
    }

    async fn scrape_listing_page(&self, page: u32) -> Result<Vec<ListingEntry>, CrawlError> {
        let url = self.config.list_url(page);
        info!("Scraping listing page {}", url);
        let html = self.fetcher.fetch(&url).await?;
        Ok(parse_listing(&html, &url)?)
    }

    /// Returns `Ok(true)` when the movie ends up in the catalog, `Ok(false)`
    /// when it is skipped for incomplete detail info.
    async fn process_movie(&self, entry: &ListingEntry) -> Result<bool, CrawlError> {
        info!("Processing movie {} ({})", entry.title, entry.url);

        let html = self.fetcher.fetch(&entry.url).await?;
        let info = parse_detail(&html);
        if !info.is_complete() {
            warn!("Skipping movie with incomplete info: {}", entry.url);
            return Ok(false);
        }
        let DetailInfo {
            name,
            year,
            subtitle,
            resolution,
            link,
        } = info;
        // is_complete guarantees these.
        let (Some(name), Some(link)) = (name, link) else {
            return Ok(false);
        };

        let id = match self
            .store
            .find_id_by_name_year(&name, year.as_deref())?
        {
            Some(id) => {
                info!("Movie already in catalog: {} ({:?})", name, year);
                Some(id)
            }
            None => {
                info!("Adding movie to catalog: {} ({:?})", name, year);
                self.store.insert(&NewMovie {
                    name: name.clone(),
                    link: link.clone(),
                    year: year.clone(),
                    subtitle,
                    resolution,
                })?
            }
        };

        if let (Some(dispatcher), Some(_)) = (&self.dispatcher, id) {
            let year_display = year.as_deref().unwrap_or(UNKNOWN_YEAR);
            let target_dir = self
                .config
                .download_dir
                .join(format!("{}_{}", name, year_display));
            info!("Enqueueing download for {} ({})", name, year_display);
            dispatcher.enqueue(&link, &target_dir, Some(&name)).await?;
        }

        Ok(true)
    }
}
