//! SQLite-backed movie store implementation.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ErrorCode};

use super::{MovieRecord, MovieStore, NewMovie, StoreError};

/// SQLite-backed movie store.
///
/// Holds only the database path. Every operation opens a fresh connection
/// and lets it close on scope exit, so no connection state leaks between
/// calls and each call is its own atomic unit.
pub struct SqliteMovieStore {
    path: PathBuf,
}

impl SqliteMovieStore {
    /// Create a store, creating the database file and schema if needed.
    pub fn new(path: &Path) -> Result<Self, StoreError> {
        let store = Self {
            path: path.to_path_buf(),
        };
        let conn = store.open()?;
        Self::initialize_schema(&conn)?;
        Ok(store)
    }

    fn open(&self) -> Result<Connection, StoreError> {
        Connection::open(&self.path).map_err(|e| StoreError::Database(e.to_string()))
    }

    fn initialize_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS movie (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                link TEXT NOT NULL UNIQUE,
                year TEXT,
                subtitle TEXT,
                resolution TEXT,
                added_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_movie_name_year ON movie(name, year);
            "#,
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<MovieRecord> {
        let added_at_str: String = row.get(6)?;
        let added_at = DateTime::parse_from_rfc3339(&added_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(MovieRecord {
            id: row.get(0)?,
            name: row.get(1)?,
            link: row.get(2)?,
            year: row.get(3)?,
            subtitle: row.get(4)?,
            resolution: row.get(5)?,
            added_at,
        })
    }
}

impl MovieStore for SqliteMovieStore {
    fn insert(&self, movie: &NewMovie) -> Result<Option<i64>, StoreError> {
        let conn = self.open()?;
        let now = Utc::now().to_rfc3339();

        let result = conn.execute(
            "INSERT INTO movie (name, link, year, subtitle, resolution, added_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                &movie.name,
                &movie.link,
                &movie.year,
                &movie.subtitle,
                &movie.resolution,
                &now,
            ],
        );

        match result {
            Ok(_) => Ok(Some(conn.last_insert_rowid())),
            // Duplicate link: reject softly, no id assigned.
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Ok(None)
            }
            Err(e) => Err(StoreError::Database(e.to_string())),
        }
    }

    fn find_id_by_name_year(
        &self,
        name: &str,
        year: Option<&str>,
    ) -> Result<Option<i64>, StoreError> {
        let conn = self.open()?;

        // IS is SQLite's null-safe equality, so an absent year matches
        // rows with an absent year.
        let mut stmt = conn
            .prepare("SELECT id FROM movie WHERE name = ? AND year IS ?")
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut rows = stmt
            .query(params![name, year])
            .map_err(|e| StoreError::Database(e.to_string()))?;

        match rows.next().map_err(|e| StoreError::Database(e.to_string()))? {
            Some(row) => {
                let id: i64 = row.get(0).map_err(|e| StoreError::Database(e.to_string()))?;
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }

    fn find_by_link(&self, link: &str) -> Result<Option<MovieRecord>, StoreError> {
        let conn = self.open()?;

        let result = conn.query_row(
            "SELECT id, name, link, year, subtitle, resolution, added_at
             FROM movie WHERE link = ?",
            params![link],
            Self::row_to_record,
        );

        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StoreError::Database(e.to_string())),
        }
    }

    fn all(&self) -> Result<Vec<MovieRecord>, StoreError> {
        let conn = self.open()?;

        let mut stmt = conn
            .prepare(
                "SELECT id, name, link, year, subtitle, resolution, added_at
                 FROM movie ORDER BY id",
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::row_to_record)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(|e| StoreError::Database(e.to_string()))?);
        }
        Ok(records)
    }

    fn all_links(&self) -> Result<Vec<String>, StoreError> {
        let conn = self.open()?;

        let mut stmt = conn
            .prepare("SELECT link FROM movie ORDER BY id")
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut links = Vec::new();
        for row in rows {
            links.push(row.map_err(|e| StoreError::Database(e.to_string()))?);
        }
        Ok(links)
    }

    fn clear(&self) -> Result<(), StoreError> {
        let conn = self.open()?;

        conn.execute("DELETE FROM movie", [])
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }
}
