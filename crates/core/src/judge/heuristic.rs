//! Similarity-based same-work heuristic.

use async_trait::async_trait;
use tracing::debug;

use crate::similarity::similarity;

use super::{Judge, JudgeError, WorkRef};

/// Default name-similarity threshold for heuristic confirmation.
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// Two references denote the same work when their names are similar above
/// `threshold` and their years match (absent year is a wildcard).
pub fn heuristic_same_work(a: &WorkRef, b: &WorkRef, threshold: f64) -> bool {
    let name_score = similarity(&a.name, &b.name);
    let years_ok = a.year_matches(b);
    debug!(
        "Heuristic judge: {} vs {} -> similarity {:.2}, years_ok {}",
        a.name, b.name, name_score, years_ok
    );
    name_score > threshold && years_ok
}

/// Judge backed purely by the similarity heuristic. Works offline.
pub struct HeuristicJudge {
    threshold: f64,
}

impl HeuristicJudge {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Default for HeuristicJudge {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

#[async_trait]
impl Judge for HeuristicJudge {
    fn name(&self) -> &str {
        "heuristic"
    }

    async fn same_work(&self, a: &WorkRef, b: &WorkRef) -> Result<bool, JudgeError> {
        Ok(heuristic_same_work(a, b, self.threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(name: &str, year: &str) -> WorkRef {
        WorkRef::new(name, Some(year.to_string()))
    }

    #[test]
    fn identical_names_and_years_match() {
        assert!(heuristic_same_work(
            &movie("流浪地球", "2019"),
            &movie("流浪地球", "2019"),
            DEFAULT_THRESHOLD,
        ));
    }

    #[test]
    fn different_years_block_a_match() {
        assert!(!heuristic_same_work(
            &movie("流浪地球", "2019"),
            &movie("流浪地球", "2023"),
            DEFAULT_THRESHOLD,
        ));
    }

    #[test]
    fn unknown_year_is_wildcard() {
        assert!(heuristic_same_work(
            &movie("闻香识女人", "1992"),
            &WorkRef::new("闻香识女人", None),
            DEFAULT_THRESHOLD,
        ));
    }

    #[test]
    fn dissimilar_names_do_not_match() {
        assert!(!heuristic_same_work(
            &movie("流浪地球", "2019"),
            &movie("蜘蛛侠：平行宇宙", "2019"),
            DEFAULT_THRESHOLD,
        ));
    }

    #[tokio::test]
    async fn heuristic_judge_trait_impl() {
        let judge = HeuristicJudge::default();
        assert_eq!(judge.name(), "heuristic");
        let same = judge
            .same_work(&movie("宁静", "2022"), &movie("宁静", "2022"))
            .await
            .unwrap();
        assert!(same);
    }
}
