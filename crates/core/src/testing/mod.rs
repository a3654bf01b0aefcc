//! Testing utilities and mock implementations for E2E tests.
//!
//! This module provides mock implementations of the external service traits,
//! allowing the crawl and rematch pipelines to be exercised without a
//! website, an aria2 daemon, ffmpeg or an LLM.

mod mock_dispatcher;
mod mock_fetcher;
mod mock_judge;
mod mock_validator;

pub use mock_dispatcher::{MockDispatcher, RecordedEnqueue};
pub use mock_fetcher::MockFetcher;
pub use mock_judge::MockJudge;
pub use mock_validator::MockValidator;

/// HTML fixture builders matching the movie site's markup.
pub mod fixtures {
    /// Build a listing page with a `co_content8` container.
    ///
    /// Each `(href, title)` pair becomes an anchor; a pagination link is
    /// always appended so tests cover the skip rule.
    pub fn listing_page(entries: &[(&str, &str)]) -> String {
        let mut anchors = String::new();
        for (href, title) in entries {
            anchors.push_str(&format!("<a href=\"{}\">{}</a>\n", href, title));
        }
        format!(
            "<html><body><div class=\"co_content8\">\n{}<a href=\"list_23_2.html\">下一页</a>\n</div></body></html>",
            anchors
        )
    }

    /// Build a detail page with a `title_all` heading and a `Zoom` download
    /// section.
    pub fn detail_page(full_title: &str, link: &str) -> String {
        format!(
            "<html><head><title>{}</title></head><body>\
             <div class=\"title_all\"><h1>{}</h1></div>\
             <div id=\"Zoom\"><a href=\"{}\">下载</a></div>\
             </body></html>",
            full_title, full_title, link
        )
    }

    /// A detail page with no extractable title or link.
    pub fn empty_detail_page() -> String {
        "<html><body><p>页面不存在</p></body></html>".to_string()
    }

    /// Conventional full title as the site renders it.
    pub fn full_title(name: &str, year: &str, tags: &str) -> String {
        format!("{}年{} 《{}》迅雷下载", year, tags, name)
    }
}
