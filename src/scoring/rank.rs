use std::cmp::Ordering;

use super::types::{MethodResult, PartialResult};

/// Descending by score. `NaN` always sorts after every other score.
fn by_score_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Sort scored alternatives best-first and assign ranks `1..=N`.
///
/// The sort is stable: equal scores keep their input order and still get
/// distinct, adjacent ranks. `NaN` scores are ranked last.
pub fn rank_results(partial: Vec<PartialResult>) -> Vec<MethodResult> {
    let mut sorted = partial;
    sorted.sort_by(|a, b| by_score_desc(a.score, b.score));

    sorted
        .into_iter()
        .enumerate()
        .map(|(idx, p)| MethodResult {
            alternative_id: p.alternative_id,
            score: p.score,
            rank: idx + 1,
            normalized_values: p.normalized_values,
            details: p.details,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partials(scores: &[(&str, f64)]) -> Vec<PartialResult> {
        scores
            .iter()
            .map(|(id, s)| PartialResult::new(*id, *s))
            .collect()
    }

    fn ids(results: &[MethodResult]) -> Vec<&str> {
        results.iter().map(|r| r.alternative_id.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(rank_results(Vec::new()).is_empty());
    }

    #[test]
    fn test_sorted_descending_with_ranks() {
        let ranked = rank_results(partials(&[("a", 0.2), ("b", 0.9), ("c", 0.5)]));
        assert_eq!(ids(&ranked), vec!["b", "c", "a"]);
        let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_ties_keep_input_order_and_distinct_ranks() {
        let ranked = rank_results(partials(&[("x", 1.0), ("y", 2.0), ("z", 1.0)]));
        assert_eq!(ids(&ranked), vec!["y", "x", "z"]);
        assert_eq!(ranked[1].rank, 2);
        assert_eq!(ranked[2].rank, 3);
        assert_eq!(ranked[1].score, ranked[2].score);
    }

    #[test]
    fn test_nan_ranked_last() {
        let ranked = rank_results(partials(&[
            ("nan1", f64::NAN),
            ("low", -5.0),
            ("nan2", f64::NAN),
            ("high", 3.0),
        ]));
        assert_eq!(ids(&ranked), vec!["high", "low", "nan1", "nan2"]);
        assert_eq!(ranked[3].rank, 4);
    }

    #[test]
    fn test_infinities() {
        let ranked = rank_results(partials(&[
            ("neg", f64::NEG_INFINITY),
            ("nan", f64::NAN),
            ("pos", f64::INFINITY),
            ("zero", 0.0),
        ]));
        assert_eq!(ids(&ranked), vec!["pos", "zero", "neg", "nan"]);
    }

    #[test]
    fn test_carries_normalized_values_and_details() {
        use crate::scoring::MethodDetails;
        use std::collections::BTreeMap;

        let mut norm = BTreeMap::new();
        norm.insert("c1".to_string(), 0.5);
        let input = vec![PartialResult::new("a", 1.0)
            .with_normalized(norm.clone())
            .with_details(MethodDetails::Wp { vector_s: 2.0 })];
        let ranked = rank_results(input);
        assert_eq!(ranked[0].normalized_values, Some(norm));
        assert_eq!(ranked[0].details, Some(MethodDetails::Wp { vector_s: 2.0 }));
    }
}
