//! Types for the movie store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A persisted movie entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Row id, assigned by the store on insert.
    pub id: i64,
    /// Extracted movie title.
    pub name: String,
    /// Download link (magnet/ftp/thunder). Unique across all records.
    pub link: String,
    /// Four-digit release year when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    /// Subtitle tag from the detail page title, when recognized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Resolution tag from the detail page title, when recognized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    /// When the row was inserted. Never updated.
    pub added_at: DateTime<Utc>,
}

/// A movie about to be inserted.
#[derive(Debug, Clone)]
pub struct NewMovie {
    pub name: String,
    pub link: String,
    pub year: Option<String>,
    pub subtitle: Option<String>,
    pub resolution: Option<String>,
}

/// Errors for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),
}
