//! Candidate shortlisting and judge-confirmed recovery.

use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex_lite::Regex;
use tracing::{info, warn};

use crate::judge::{Judge, WorkRef};
use crate::parser::UNKNOWN_YEAR;
use crate::similarity::similarity;
use crate::store::{MovieRecord, MovieStore};

use super::{RecoveredLink, RematchConfig};

static DIR_NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+)\((.+)\)$").expect("valid regex"));

/// Parses a library directory name of the form `Name(Year)`.
///
/// The year component becomes `None` when it carries the unknown-year
/// sentinel. Returns `None` when the name does not fit the pattern at all.
pub fn parse_directory_name(dir_name: &str) -> Option<(String, Option<String>)> {
    let caps = DIR_NAME_RE.captures(dir_name)?;
    // Directory names often carry a space before the parenthesis.
    let name = caps.get(1)?.as_str().trim().to_string();
    let year = caps.get(2)?.as_str().trim();
    let year = if year == UNKNOWN_YEAR {
        None
    } else {
        Some(year.to_string())
    };
    Some((name, year))
}

/// Matches damaged files back to catalog rows and recovers their links.
pub struct Rematcher {
    store: Arc<dyn MovieStore>,
    judge: Arc<dyn Judge>,
    config: RematchConfig,
}

impl Rematcher {
    pub fn new(store: Arc<dyn MovieStore>, judge: Arc<dyn Judge>, config: RematchConfig) -> Self {
        Self {
            store,
            judge,
            config,
        }
    }

    fn shortlist<'a>(
        &self,
        name: &str,
        year: Option<&str>,
        rows: &'a [MovieRecord],
    ) -> Vec<(&'a MovieRecord, f64)> {
        let mut candidates: Vec<(&MovieRecord, f64)> = rows
            .iter()
            .filter(|row| row.year.as_deref() == year)
            .filter_map(|row| {
                let score = similarity(name, &row.name);
                (score > self.config.min_similarity).then_some((row, score))
            })
            .collect();
        // Stable sort keeps catalog order among equal scores.
        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        candidates.truncate(self.config.max_candidates);
        candidates
    }

    async fn recover_one(&self, path: &Path, rows: &[MovieRecord]) -> Option<RecoveredLink> {
        let dir_name = path.parent()?.file_name()?.to_str()?;
        let Some((name, year)) = parse_directory_name(dir_name) else {
            warn!(
                "Directory name {:?} does not look like Name(Year), skipping {}",
                dir_name,
                path.display()
            );
            return None;
        };

        let wanted = WorkRef::new(&name, year.clone());
        let candidates = self.shortlist(&name, year.as_deref(), rows);
        if candidates.is_empty() {
            info!(
                "No catalog candidates for {}({})",
                name,
                wanted.year_display()
            );
            return None;
        }

        for (row, score) in candidates {
            let candidate = WorkRef::new(&row.name, row.year.clone());
            let confirmed = match self.judge.same_work(&wanted, &candidate).await {
                Ok(confirmed) => confirmed,
                Err(e) => {
                    warn!("Judge failed on {} vs {}: {}", name, row.name, e);
                    continue;
                }
            };
            if !confirmed {
                continue;
            }

            info!(
                "Matched {} to catalog row {} (similarity {:.2})",
                path.display(),
                row.name,
                score
            );
            if let Err(e) = tokio::fs::remove_file(path).await {
                // The link is still worth reporting, the operator sees this.
                warn!("Failed to delete {}: {}", path.display(), e);
            }
            return Some(RecoveredLink {
                name: row.name.clone(),
                year: row.year.clone(),
                link: row.link.clone(),
            });
        }

        info!("No judge-confirmed match for {}", path.display());
        None
    }

    /// Recovers download links for damaged files.
    ///
    /// Each path's parent directory is parsed, catalog rows are shortlisted
    /// by year and name similarity, and the judge confirms the best
    /// candidates in order. A confirmed match deletes the damaged file.
    pub async fn rematch(&self, damaged: &[impl AsRef<Path>]) -> Vec<RecoveredLink> {
        let rows = match self.store.all() {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Failed to load catalog for rematch: {}", e);
                return Vec::new();
            }
        };

        let mut recovered = Vec::new();
        for path in damaged {
            if let Some(link) = self.recover_one(path.as_ref(), &rows).await {
                recovered.push(link);
            }
        }
        recovered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_year() {
        assert_eq!(
            parse_directory_name("流浪地球(2019)"),
            Some(("流浪地球".to_string(), Some("2019".to_string())))
        );
    }

    #[test]
    fn whitespace_around_name_and_year_is_trimmed() {
        assert_eq!(
            parse_directory_name("流浪地球 (2019)"),
            Some(("流浪地球".to_string(), Some("2019".to_string())))
        );
        assert_eq!(
            parse_directory_name("信条( 2020 )"),
            Some(("信条".to_string(), Some("2020".to_string())))
        );
    }

    #[test]
    fn unknown_year_sentinel_becomes_none() {
        assert_eq!(
            parse_directory_name("宁静(未知年份)"),
            Some(("宁静".to_string(), None))
        );
    }

    #[test]
    fn rejects_names_without_year_suffix() {
        assert_eq!(parse_directory_name("流浪地球"), None);
        assert_eq!(parse_directory_name("(2019)"), None);
    }

    #[test]
    fn nested_parentheses_keep_trailing_group_as_year() {
        assert_eq!(
            parse_directory_name("信条(Tenet)(2020)"),
            Some(("信条(Tenet)".to_string(), Some("2020".to_string())))
        );
    }
}
