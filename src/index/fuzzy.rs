//! Approximate name matching for symbol search.
//!
//! Scores a query against a candidate with a substring edit distance: the
//! cheapest way to turn the query into *some* substring of the candidate.
//! Case-sensitive; lower score = better match. Candidates whose best score
//! exceeds half the query length are treated as non-matches.

/// Score `query` against `candidate`. `None` means no acceptable match.
pub fn score(query: &str, candidate: &str) -> Option<u32> {
    let query: Vec<char> = query.chars().collect();
    let candidate: Vec<char> = candidate.chars().collect();
    if query.is_empty() {
        return None;
    }

    // Classic edit-distance DP with a zeroed first row, so a match may start
    // anywhere in the candidate.
    let mut previous: Vec<u32> = vec![0; candidate.len() + 1];
    let mut current: Vec<u32> = vec![0; candidate.len() + 1];

    for (i, query_char) in query.iter().enumerate() {
        current[0] = (i + 1) as u32;
        for (j, candidate_char) in candidate.iter().enumerate() {
            let substitution_cost = u32::from(query_char != candidate_char);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + substitution_cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    // Best match may end at any candidate position.
    let best = previous.iter().copied().min().unwrap_or(u32::MAX);
    if u64::from(best) * 2 <= query.len() as u64 {
        Some(best)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_substring_scores_zero() {
        assert_eq!(score("helloWorld", "helloWorld"), Some(0));
        assert_eq!(score("helloWorld", "Stuff.helloWorld"), Some(0));
        assert_eq!(score("myDemoFunc", "myDemoFunction"), Some(0));
    }

    #[test]
    fn near_miss_scores_low() {
        assert_eq!(score("myDemoFnc", "myDemoFunction"), Some(1));
        assert_eq!(score("hello_wrld", "hello_world"), Some(1));
    }

    #[test]
    fn unrelated_names_do_not_match() {
        assert_eq!(score("xyz", "stuff"), None);
        assert_eq!(score("helloWorld", "parseConfig"), None);
    }

    #[test]
    fn matching_is_case_sensitive() {
        // A case difference costs an edit instead of being folded away.
        assert_eq!(score("helloworld", "helloWorld"), Some(1));
    }

    #[test]
    fn empty_query_never_matches() {
        assert_eq!(score("", "anything"), None);
    }

    #[test]
    fn better_matches_score_lower() {
        let close = score("rebuildIndex", "rebuildIndex").unwrap();
        let further = score("rebuildIndex", "rebuldIndexes").unwrap();
        assert!(close < further);
    }
}
