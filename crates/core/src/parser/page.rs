//! HTML extraction for listing and detail pages.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use scraper::{Html, Selector};
use url::Url;

use super::{DetailInfo, ListingEntry, ParseError};

/// The listing content container.
static LISTING_CONTAINER: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.co_content8").expect("valid selector"));

/// Anchors inside the listing content container.
static LISTING_ANCHORS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.co_content8 a").expect("valid selector"));

static TITLE_ALL_H1: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.title_all h1").expect("valid selector"));

static HEAD_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("valid selector"));

static ALL_ANCHORS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a").expect("valid selector"));

static ZOOM_ANCHORS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div#Zoom a").expect("valid selector"));

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"《(.*?)》").expect("valid regex"));

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{4})年").expect("valid regex"));

/// Ordered subtitle keyword rules. First match wins.
const SUBTITLE_RULES: &[(&str, &str)] = &[
    ("中英双字", "中英双字"),
    ("中英字幕", "中英字幕"),
    ("国语中字", "国语中字"),
    ("BD", "BD"),
    ("HD", "HD"),
];

/// Ordered resolution keyword rules. First match wins.
const RESOLUTION_RULES: &[(&str, &str)] = &[("1080P", "1080P"), ("HD", "HD"), ("BD", "BD")];

/// Link schemes that count as download links, in the order the detail page
/// extraction accepts them.
const LINK_SCHEMES: &[&str] = &["magnet", "ftp", "thunder"];

/// Extract (detail URL, title) pairs from a listing page.
///
/// Anchors whose href starts with `list` are pagination links and skipped.
/// Remaining hrefs are resolved to absolute URLs against `base_url`.
pub fn parse_listing(html: &str, base_url: &str) -> Result<Vec<ListingEntry>, ParseError> {
    let base = Url::parse(base_url).map_err(|e| ParseError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;

    let document = Html::parse_document(html);

    // Distinguish "page without the content area" (layout change, error
    // page) from a genuinely empty listing.
    if document.select(&LISTING_CONTAINER).next().is_none() {
        return Err(ParseError::MissingListingContainer);
    }

    let mut entries = Vec::new();
    for anchor in document.select(&LISTING_ANCHORS) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if href.starts_with("list") {
            continue;
        }
        let Ok(url) = base.join(href) else {
            tracing::debug!("Skipping unresolvable href: {}", href);
            continue;
        };
        entries.push(ListingEntry {
            url: url.to_string(),
            title: anchor.text().collect::<String>().trim().to_string(),
        });
    }

    Ok(entries)
}

/// Extract movie fields from a detail page.
///
/// Never fails: each field degrades to `None` independently.
pub fn parse_detail(html: &str) -> DetailInfo {
    let document = Html::parse_document(html);

    // Page title: the title_all header first, then <title>.
    let full_title = document
        .select(&TITLE_ALL_H1)
        .next()
        .map(|h1| h1.text().collect::<String>())
        .or_else(|| {
            document
                .select(&HEAD_TITLE)
                .next()
                .map(|t| t.text().collect::<String>())
        })
        .unwrap_or_default();

    let name = NAME_RE
        .captures(&full_title)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|s| !s.is_empty());

    let year = YEAR_RE
        .captures(&full_title)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string());

    let subtitle = first_matching_rule(&full_title, SUBTITLE_RULES);
    let resolution = first_matching_rule(&full_title, RESOLUTION_RULES);

    let link = extract_download_link(&document);

    DetailInfo {
        name,
        year,
        subtitle,
        resolution,
        link,
    }
}

/// First rule whose keyword occurs in the title wins; order matters.
fn first_matching_rule(title: &str, rules: &[(&str, &str)]) -> Option<String> {
    rules
        .iter()
        .find(|(keyword, _)| title.contains(keyword))
        .map(|(_, value)| value.to_string())
}

/// Scan the whole document for a magnet/ftp/thunder anchor, then fall back
/// to the Zoom download area.
fn extract_download_link(document: &Html) -> Option<String> {
    for selector in [&*ALL_ANCHORS, &*ZOOM_ANCHORS] {
        for anchor in document.select(selector) {
            if let Some(href) = anchor.value().attr("href") {
                if LINK_SCHEMES.iter().any(|scheme| href.starts_with(scheme)) {
                    return Some(href.to_string());
                }
            }
        }
    }
    None
}
