//! Types for page extraction.

use thiserror::Error;

/// Display sentinel for a movie whose name could not be extracted.
pub const UNKNOWN_NAME: &str = "未知电影名称";
/// Display sentinel for an unknown release year.
pub const UNKNOWN_YEAR: &str = "未知年份";
/// Display sentinel for an unrecognized subtitle tag.
pub const UNKNOWN_SUBTITLE: &str = "未知字幕";
/// Display sentinel for an unrecognized resolution tag.
pub const UNKNOWN_RESOLUTION: &str = "未知分辨率";

/// One movie entry on a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Absolute URL of the detail page.
    pub url: String,
    /// Anchor text from the listing.
    pub title: String,
}

/// Fields extracted from a detail page.
///
/// Absent fields are `None`; the Chinese sentinel strings exist only for
/// operator-facing display (see the `UNKNOWN_*` constants).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailInfo {
    pub name: Option<String>,
    pub year: Option<String>,
    pub subtitle: Option<String>,
    pub resolution: Option<String>,
    /// magnet/ftp/thunder download link, if any anchor carries one.
    pub link: Option<String>,
}

impl DetailInfo {
    /// A movie is worth persisting only when both a name and a link were
    /// extracted.
    pub fn is_complete(&self) -> bool {
        self.name.is_some() && self.link.is_some()
    }

    /// Year for display, with the unknown sentinel when absent.
    pub fn year_display(&self) -> &str {
        self.year.as_deref().unwrap_or(UNKNOWN_YEAR)
    }
}

/// Errors for listing extraction.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Listing container not found")]
    MissingListingContainer,
}
