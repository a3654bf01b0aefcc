//! Fuzzy re-matching of damaged library files against catalog rows.
//!
//! A damaged file's parent directory encodes the movie it was supposed to be
//! (`Name(Year)`). The rematcher shortlists catalog rows by year and name
//! similarity, asks the judge to confirm the best candidates, and on a
//! confirmed match deletes the broken file and reports the download link so
//! the movie can be fetched again.

mod config;
mod matcher;

pub use config::RematchConfig;
pub use matcher::{parse_directory_name, Rematcher};

use serde::{Deserialize, Serialize};

/// A download link recovered for a damaged file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveredLink {
    /// Movie name from the catalog row.
    pub name: String,
    /// Release year from the catalog row, when known.
    pub year: Option<String>,
    /// The download link to re-fetch.
    pub link: String,
}
