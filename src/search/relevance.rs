//! Lexical relevance heuristic. Deterministic so identical queries rank identically.

const BASE_SCORE: i32 = 50;
const TITLE_WEIGHT: i32 = 15;
const ABSTRACT_WEIGHT: i32 = 10;
const SUBJECT_WEIGHT: i32 = 5;
const MIN_SCORE: i32 = 10;
const MAX_SCORE: i32 = 100;
/// Query tokens this short or shorter are ignored.
const MAX_IGNORED_TOKEN_CHARS: usize = 2;

/// Score an article's fields against a query. Always within `10..=100`.
///
/// Each query token contributes independently for every field it appears in
/// (case-insensitive substring match).
pub fn score(title: &str, abstract_text: &str, subject_terms: &str, query: &str) -> u8 {
    let title = title.to_lowercase();
    let abstract_text = abstract_text.to_lowercase();
    let subject_terms = subject_terms.to_lowercase();

    let total = query
        .split_whitespace()
        .filter(|token| token.chars().count() > MAX_IGNORED_TOKEN_CHARS)
        .map(str::to_lowercase)
        .fold(BASE_SCORE, |acc, token| {
            let mut gain = 0;
            if title.contains(&token) {
                gain += TITLE_WEIGHT;
            }
            if abstract_text.contains(&token) {
                gain += ABSTRACT_WEIGHT;
            }
            if subject_terms.contains(&token) {
                gain += SUBJECT_WEIGHT;
            }
            acc.saturating_add(gain)
        });

    total.clamp(MIN_SCORE, MAX_SCORE) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_and_abstract_hits_add_up() {
        let s = score(
            "Diabetes outcomes in adults",
            "We evaluated treatment adherence.",
            "",
            "diabetes treatment",
        );
        assert_eq!(s, 75);
    }

    #[test]
    fn no_matches_keeps_base() {
        assert_eq!(score("Asthma", "Lungs", "Airway", "kidney stones"), 50);
    }

    #[test]
    fn short_tokens_are_ignored() {
        assert_eq!(score("of an in", "of an in", "of an in", "of an in"), 50);
    }

    #[test]
    fn subject_terms_count_five() {
        assert_eq!(score("", "", "Hypertension Humans", "hypertension"), 55);
    }

    #[test]
    fn caps_at_one_hundred() {
        let s = score(
            "cancer immunotherapy response",
            "cancer immunotherapy response",
            "cancer immunotherapy response",
            "cancer immunotherapy response",
        );
        assert_eq!(s, 100);
    }

    #[test]
    fn repeated_tokens_each_contribute() {
        assert_eq!(score("stroke", "", "", "stroke stroke"), 80);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(score("COVID-19 Vaccines", "", "", "covid-19"), 65);
    }

    #[test]
    fn deterministic_and_in_range() {
        let inputs = [
            ("", "", "", ""),
            ("a", "b", "c", "   "),
            ("x", "y", "z", "zzz yyy xxx"),
            ("long title words", "abstract body", "mesh", "title words body mesh abstract"),
        ];
        for (t, a, m, q) in inputs {
            let first = score(t, a, m, q);
            assert_eq!(first, score(t, a, m, q));
            assert!((10..=100).contains(&first), "out of range: {first}");
        }
    }
}
