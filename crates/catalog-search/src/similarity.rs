pub const DEFAULT_TOKEN_BOOST: f64 = 0.08;

/// Similarity of a normalized query against a normalized candidate, in `[0, 1]`.
///
/// Directional: the candidate containing the query wins outright, the reverse
/// does not.
pub fn similarity(query: &str, candidate: &str) -> f64 {
    similarity_with_boost(query, candidate, DEFAULT_TOKEN_BOOST)
}

pub(crate) fn similarity_with_boost(query: &str, candidate: &str, token_boost: f64) -> f64 {
    if candidate.is_empty() {
        return 0.0;
    }
    if candidate.contains(query) {
        return 1.0;
    }

    let distance = strsim::levenshtein(query, candidate);
    let max_len = query.chars().count().max(candidate.chars().count());
    if max_len == 0 {
        return 0.0;
    }
    let ratio = 1.0 - distance as f64 / max_len as f64;

    let boosted = query
        .split(' ')
        .filter(|token| !token.trim().is_empty() && candidate.contains(token))
        .fold(ratio, |acc, _| acc + token_boost);

    boosted.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_candidate_scores_zero() {
        assert_eq!(similarity("anything", ""), 0.0);
        assert_eq!(similarity("", ""), 0.0);
    }

    #[test]
    fn substring_short_circuits() {
        assert_eq!(similarity("empire", "the empire strikes back"), 1.0);
        assert_eq!(similarity("", "rogue one"), 1.0);
        assert_eq!(similarity("rogue one", "rogue one"), 1.0);
    }

    #[test]
    fn edit_distance_ratio_without_token_hits() {
        // kitten -> sitting is the textbook distance of 3.
        assert!(approx(similarity("kitten", "sitting"), 1.0 - 3.0 / 7.0));
    }

    #[test]
    fn matching_tokens_boost_the_ratio() {
        let distance = strsim::levenshtein("empire back", "the empire strikes back");
        let plain = 1.0 - distance as f64 / 23.0;
        let score = similarity("empire back", "the empire strikes back");
        assert!(approx(score, plain + 2.0 * DEFAULT_TOKEN_BOOST));
    }

    #[test]
    fn not_symmetric() {
        assert_eq!(similarity("rogue", "rogue one"), 1.0);
        assert!(similarity("rogue one", "rogue") < 1.0);
    }

    #[test]
    fn stays_within_bounds() {
        let pairs = [
            ("a b c d e f g h i j k l", "a b c d e f g h i j k x"),
            ("xyzzy", "return of the jedi"),
            ("episode 5", "episode 6"),
            ("zzzzzzzzzzzzzzzzzzzz", "a"),
        ];
        for (q, c) in pairs {
            let s = similarity(q, c);
            assert!((0.0..=1.0).contains(&s), "{q:?} vs {c:?} -> {s}");
        }
    }
}
