//! Normalized string similarity scoring.
//!
//! Used by the rematcher to rank catalog entries against a name parsed from
//! a damaged file's directory, and by the heuristic judge as its
//! confirmation threshold.

/// Similarity between two strings in `[0.0, 1.0]`.
///
/// Backed by normalized Levenshtein distance, so the score is symmetric and
/// `similarity(a, a) == 1.0`. Two empty strings score 1.0 by convention.
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_one() {
        assert_eq!(similarity("流浪地球", "流浪地球"), 1.0);
        assert_eq!(similarity("The Wandering Earth", "The Wandering Earth"), 1.0);
    }

    #[test]
    fn empty_strings_score_one() {
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn symmetric() {
        let pairs = [
            ("流浪地球", "流浪地球2"),
            ("abc", "abd"),
            ("", "nonempty"),
        ];
        for (a, b) in pairs {
            assert_eq!(similarity(a, b), similarity(b, a));
        }
    }

    #[test]
    fn disjoint_strings_score_low() {
        assert!(similarity("abcd", "wxyz") < 0.1);
    }

    #[test]
    fn near_match_outranks_distant_match() {
        let parsed = "流浪地球";
        let exact = similarity(parsed, "流浪地球");
        let sequel = similarity(parsed, "流浪地球2");
        let other = similarity(parsed, "蜘蛛侠：平行宇宙");
        assert!(exact > sequel);
        assert!(sequel > other);
    }

    #[test]
    fn scores_stay_in_unit_interval() {
        for (a, b) in [("a", ""), ("短", "a much longer string"), ("x", "y")] {
            let s = similarity(a, b);
            assert!((0.0..=1.0).contains(&s), "score {} out of range", s);
        }
    }
}
