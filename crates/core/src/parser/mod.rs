//! Listing and detail page extraction.
//!
//! The listing parser turns an index page into (detail URL, title) pairs;
//! the detail parser pulls name/year/subtitle/resolution/link out of a movie
//! page with ordered fallback rules. Extraction never fails a whole page:
//! missing fields degrade to `None` and the caller decides what to skip.

mod page;
mod types;

pub use page::{parse_detail, parse_listing};
pub use types::*;
