//! Movie store - the persistent catalog of scraped movies.
//!
//! One row per discovered download link. The link is the sole integrity
//! constraint; `(name, year)` lookups are a crawl-time dedupe heuristic,
//! not a uniqueness guarantee.

mod sqlite;
mod types;

pub use sqlite::SqliteMovieStore;
pub use types::*;

/// Trait for movie catalog storage.
pub trait MovieStore: Send + Sync {
    /// Insert a movie.
    ///
    /// Returns the assigned row id, or `None` when the link already exists
    /// (duplicate links are a soft failure, not an error).
    fn insert(&self, movie: &NewMovie) -> Result<Option<i64>, StoreError>;

    /// Look up a movie id by exact `(name, year)`.
    ///
    /// An absent year only matches rows whose year is also absent.
    fn find_id_by_name_year(
        &self,
        name: &str,
        year: Option<&str>,
    ) -> Result<Option<i64>, StoreError>;

    /// Look up a movie by its download link.
    fn find_by_link(&self, link: &str) -> Result<Option<MovieRecord>, StoreError>;

    /// All movies, in insertion order.
    fn all(&self) -> Result<Vec<MovieRecord>, StoreError>;

    /// All download links, in insertion order.
    fn all_links(&self) -> Result<Vec<String>, StoreError>;

    /// Delete every row. Operator-triggered resets only.
    fn clear(&self) -> Result<(), StoreError>;
}
