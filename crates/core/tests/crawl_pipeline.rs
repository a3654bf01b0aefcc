//! Crawl pipeline integration tests.
//!
//! These tests drive the crawler end to end with a mock fetcher serving
//! listing and detail fixtures, asserting on catalog rows, dedupe behavior
//! and download dispatch.

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use cinevault_core::crawler::{Crawler, CrawlerConfig};
use cinevault_core::dispatcher::Dispatcher;
use cinevault_core::store::{MovieStore, SqliteMovieStore};
use cinevault_core::testing::{fixtures, MockDispatcher, MockFetcher};

struct TestHarness {
    fetcher: Arc<MockFetcher>,
    store: Arc<SqliteMovieStore>,
    _temp_dir: TempDir,
}

impl TestHarness {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = Arc::new(
            SqliteMovieStore::new(&temp_dir.path().join("test.db"))
                .expect("Failed to create store"),
        );
        Self {
            fetcher: Arc::new(MockFetcher::new()),
            store,
            _temp_dir: temp_dir,
        }
    }

    fn config(&self) -> CrawlerConfig {
        CrawlerConfig {
            list_url_template: "http://movies.test/list_23_{page}.html".to_string(),
            download_dir: PathBuf::from("/downloads"),
        }
    }

    fn crawler(&self, dispatcher: Option<Arc<MockDispatcher>>) -> Crawler {
        let dispatcher: Option<Arc<dyn Dispatcher>> = match dispatcher {
            Some(d) => Some(d),
            None => None,
        };
        Crawler::new(
            self.fetcher.clone(),
            self.store.clone(),
            dispatcher,
            self.config(),
        )
    }

    /// Serve a one-page site with two movies.
    async fn seed_two_movie_site(&self) {
        self.fetcher
            .set_page(
                "http://movies.test/list_23_1.html",
                fixtures::listing_page(&[
                    ("/detail/earth.html", "流浪地球2"),
                    ("/detail/scent.html", "闻香识女人"),
                ]),
            )
            .await;
        self.fetcher
            .set_page(
                "http://movies.test/detail/earth.html",
                fixtures::detail_page(
                    &fixtures::full_title("流浪地球2", "2023", "1080P中英双字"),
                    "magnet:?xt=urn:btih:earth2",
                ),
            )
            .await;
        self.fetcher
            .set_page(
                "http://movies.test/detail/scent.html",
                fixtures::detail_page(
                    &fixtures::full_title("闻香识女人", "1992", "BD国语中字"),
                    "ftp://movies.test/scent.mkv",
                ),
            )
            .await;
    }
}

#[tokio::test]
async fn crawl_persists_parsed_movies() {
    let harness = TestHarness::new();
    harness.seed_two_movie_site().await;

    let processed = harness.crawler(None).run(1, 1).await;
    assert_eq!(processed, 2);

    let rows = harness.store.all().unwrap();
    assert_eq!(rows.len(), 2);

    let earth = rows.iter().find(|r| r.name == "流浪地球2").unwrap();
    assert_eq!(earth.year.as_deref(), Some("2023"));
    assert_eq!(earth.subtitle.as_deref(), Some("中英双字"));
    assert_eq!(earth.resolution.as_deref(), Some("1080P"));
    assert_eq!(earth.link, "magnet:?xt=urn:btih:earth2");

    let scent = rows.iter().find(|r| r.name == "闻香识女人").unwrap();
    assert_eq!(scent.link, "ftp://movies.test/scent.mkv");
}

#[tokio::test]
async fn second_run_deduplicates_by_name_and_year() {
    let harness = TestHarness::new();
    harness.seed_two_movie_site().await;

    let crawler = harness.crawler(None);
    assert_eq!(crawler.run(1, 1).await, 2);
    // Already-present movies still count as processed.
    assert_eq!(crawler.run(1, 1).await, 2);

    assert_eq!(harness.store.all().unwrap().len(), 2);
}

#[tokio::test]
async fn dispatcher_receives_enqueues_for_new_movies() {
    let harness = TestHarness::new();
    harness.seed_two_movie_site().await;

    let dispatcher = Arc::new(MockDispatcher::new());
    harness.crawler(Some(dispatcher.clone())).run(1, 1).await;

    let enqueues = dispatcher.recorded_enqueues().await;
    assert_eq!(enqueues.len(), 2);

    let earth = enqueues
        .iter()
        .find(|e| e.uri == "magnet:?xt=urn:btih:earth2")
        .unwrap();
    assert_eq!(earth.target_dir, PathBuf::from("/downloads/流浪地球2_2023"));
    assert_eq!(earth.filename.as_deref(), Some("流浪地球2"));
}

#[tokio::test]
async fn incomplete_detail_pages_are_skipped() {
    let harness = TestHarness::new();
    harness
        .fetcher
        .set_page(
            "http://movies.test/list_23_1.html",
            fixtures::listing_page(&[("/detail/gone.html", "下架影片")]),
        )
        .await;
    harness
        .fetcher
        .set_page("http://movies.test/detail/gone.html", fixtures::empty_detail_page())
        .await;

    let processed = harness.crawler(None).run(1, 1).await;
    assert_eq!(processed, 0);
    assert!(harness.store.all().unwrap().is_empty());
}

#[tokio::test]
async fn failed_page_is_skipped_and_the_run_continues() {
    let harness = TestHarness::new();
    harness.seed_two_movie_site().await;
    // Page 2 is not canned, so fetching it fails.

    let processed = harness.crawler(None).run(1, 2).await;
    assert_eq!(processed, 2);
}

#[tokio::test]
async fn failed_detail_fetch_does_not_abort_the_page() {
    let harness = TestHarness::new();
    harness.seed_two_movie_site().await;
    harness
        .fetcher
        .fail_url("http://movies.test/detail/earth.html")
        .await;

    let processed = harness.crawler(None).run(1, 1).await;
    assert_eq!(processed, 1);
    let rows = harness.store.all().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "闻香识女人");
}

#[tokio::test]
async fn pagination_links_are_not_fetched() {
    let harness = TestHarness::new();
    harness.seed_two_movie_site().await;

    harness.crawler(None).run(1, 1).await;

    let fetches = harness.fetcher.recorded_fetches().await;
    assert!(fetches
        .iter()
        .all(|url| !url.contains("list_23_2.html")));
}
