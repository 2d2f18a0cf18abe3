use std::collections::BTreeMap;

use super::method::Method;
use super::methods::{ahp, moora, saw, smart, topsis, wp};
use super::types::{Alternative, Criterion, MethodResult};

/// Run one method over a dataset.
///
/// Returns an empty list when `criteria` or `alternatives` is empty.
/// Inputs are only read; every call allocates a fresh result list.
pub fn compute_results(method: Method, criteria: &[Criterion], alternatives: &[Alternative]) -> Vec<MethodResult> {
    match method {
        Method::Saw => saw::calculate(criteria, alternatives),
        Method::Topsis => topsis::calculate(criteria, alternatives),
        Method::Ahp => ahp::calculate(criteria, alternatives),
        Method::Moora => moora::calculate(criteria, alternatives),
        Method::Smart => smart::calculate(criteria, alternatives),
        Method::Wp => wp::calculate(criteria, alternatives),
    }
}

/// Run a method looked up by its id. Unknown ids yield an empty list.
pub fn compute_results_by_id(method_id: &str, criteria: &[Criterion], alternatives: &[Alternative]) -> Vec<MethodResult> {
    match Method::from_id(method_id) {
        Some(method) => compute_results(method, criteria, alternatives),
        None => Vec::new(),
    }
}

/// Run every registered method over the same dataset.
///
/// Returns an empty map when there is not enough data to score.
pub fn compute_all_results(
    criteria: &[Criterion],
    alternatives: &[Alternative],
) -> BTreeMap<Method, Vec<MethodResult>> {
    if criteria.is_empty() || alternatives.is_empty() {
        return BTreeMap::new();
    }

    Method::ALL
        .into_iter()
        .map(|method| (method, compute_results(method, criteria, alternatives)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::methods::fixtures::*;
    use crate::scoring::CriterionType;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_dispatch_matches_calculators() {
        let criteria = supplier_criteria();
        let alternatives = supplier_alternatives();
        assert_eq!(
            compute_results(Method::Topsis, &criteria, &alternatives),
            topsis::calculate(&criteria, &alternatives)
        );
        assert_eq!(
            compute_results_by_id("wp", &criteria, &alternatives),
            wp::calculate(&criteria, &alternatives)
        );
    }

    #[test]
    fn test_unknown_method_id_is_empty() {
        let results = compute_results_by_id("electre", &supplier_criteria(), &supplier_alternatives());
        assert!(results.is_empty());
    }

    #[test]
    fn test_compute_all_results_covers_registry() {
        let all = compute_all_results(&supplier_criteria(), &supplier_alternatives());
        assert_eq!(all.len(), Method::ALL.len());
        for method in Method::ALL {
            assert_eq!(all[&method].len(), 3, "{} result count", method);
        }
    }

    #[test]
    fn test_compute_all_results_insufficient_data() {
        assert!(compute_all_results(&[], &supplier_alternatives()).is_empty());
        assert!(compute_all_results(&supplier_criteria(), &[]).is_empty());
    }

    #[test]
    fn test_inputs_not_mutated() {
        let criteria = supplier_criteria();
        let alternatives = supplier_alternatives();
        let _ = compute_all_results(&criteria, &alternatives);
        assert_eq!(criteria, supplier_criteria());
        assert_eq!(alternatives, supplier_alternatives());
    }

    #[test]
    fn test_single_criterion_single_alternative() {
        let criteria = vec![Criterion::benefit("c1", "Quality", 0.5)];
        let alternatives = vec![Alternative::new("a1", "Only").with_value("c1", 8.0)];
        let expected = [
            (Method::Saw, 0.5),
            (Method::Topsis, 0.0),
            (Method::Ahp, 1.0),
            (Method::Moora, 0.5),
            (Method::Smart, 0.0),
            (Method::Wp, 1.0),
        ];
        for (method, score) in expected {
            let results = compute_results(method, &criteria, &alternatives);
            assert_eq!(results.len(), 1, "{}", method);
            assert_eq!(results[0].rank, 1, "{}", method);
            assert_close(results[0].score, score);
        }
    }

    #[test]
    fn test_identical_alternatives_get_adjacent_ranks() {
        let criteria = supplier_criteria();
        let twin = |id: &str| {
            Alternative::new(id, id)
                .with_value("c1", 900.0)
                .with_value("c2", 6.0)
                .with_value("c3", 4.0)
        };
        let alternatives = vec![twin("first"), twin("second")];
        for method in Method::ALL {
            let results = compute_results(method, &criteria, &alternatives);
            assert_eq!(results[0].score, results[1].score, "{}", method);
            assert_eq!(ranking(&results), vec!["first", "second"], "{}", method);
            assert_eq!((results[0].rank, results[1].rank), (1, 2), "{}", method);
        }
    }

    fn dataset_strategy() -> impl Strategy<Value = (Vec<Criterion>, Vec<Alternative>)> {
        (1usize..5, 1usize..7).prop_flat_map(|(n_criteria, n_alternatives)| {
            (
                prop::collection::vec((0.01f64..10.0, any::<bool>()), n_criteria),
                prop::collection::vec(prop::collection::vec(0.1f64..1000.0, n_criteria), n_alternatives),
            )
                .prop_map(|(crit_specs, rows)| {
                    let criteria: Vec<Criterion> = crit_specs
                        .into_iter()
                        .enumerate()
                        .map(|(i, (weight, benefit))| {
                            let kind = if benefit { CriterionType::Benefit } else { CriterionType::Cost };
                            Criterion::new(format!("c{}", i + 1), format!("C{}", i + 1), weight, kind)
                        })
                        .collect();
                    let alternatives = rows
                        .into_iter()
                        .enumerate()
                        .map(|(i, row)| {
                            row.into_iter().enumerate().fold(
                                Alternative::new(format!("a{}", i + 1), format!("A{}", i + 1)),
                                |alt, (j, v)| alt.with_value(format!("c{}", j + 1), v),
                            )
                        })
                        .collect();
                    (criteria, alternatives)
                })
        })
    }

    proptest! {
        #[test]
        fn prop_totality_and_rank_bijection((criteria, alternatives) in dataset_strategy()) {
            for method in Method::ALL {
                let results = compute_results(method, &criteria, &alternatives);
                prop_assert_eq!(results.len(), alternatives.len());

                let ranks: HashSet<usize> = results.iter().map(|r| r.rank).collect();
                let expected: HashSet<usize> = (1..=alternatives.len()).collect();
                prop_assert_eq!(ranks, expected);

                let ids: HashSet<&str> = results.iter().map(|r| r.alternative_id.as_str()).collect();
                prop_assert_eq!(ids.len(), alternatives.len());
            }
        }

        #[test]
        fn prop_rank_order_follows_score((criteria, alternatives) in dataset_strategy()) {
            for method in Method::ALL {
                let results = compute_results(method, &criteria, &alternatives);
                for pair in results.windows(2) {
                    prop_assert!(pair[0].rank < pair[1].rank);
                    prop_assert!(pair[0].score >= pair[1].score);
                }
            }
        }

        #[test]
        fn prop_weight_scaling_keeps_smart_and_ahp_ranking(
            (criteria, alternatives) in dataset_strategy(),
            factor in 0.5f64..20.0,
        ) {
            let scaled: Vec<Criterion> = criteria
                .iter()
                .cloned()
                .map(|mut c| { c.weight *= factor; c })
                .collect();
            for method in [Method::Smart, Method::Ahp] {
                let base = compute_results(method, &criteria, &alternatives);
                let other = compute_results(method, &scaled, &alternatives);
                for (a, b) in base.iter().zip(&other) {
                    // same score at every rank position, so the ranking only
                    // differs between alternatives that were already tied
                    prop_assert!((a.score - b.score).abs() < 1e-9);
                    let same_alt = other
                        .iter()
                        .find(|r| r.alternative_id == a.alternative_id)
                        .map(|r| r.score);
                    prop_assert!(same_alt.is_some_and(|s| (a.score - s).abs() < 1e-9));
                }
            }
        }

        #[test]
        fn prop_wp_scores_sum_to_one((criteria, alternatives) in dataset_strategy()) {
            let results = compute_results(Method::Wp, &criteria, &alternatives);
            let total: f64 = results.iter().map(|r| r.score).sum();
            prop_assert!((total - 1.0).abs() < 1e-9);
        }

        #[test]
        fn prop_topsis_scores_bounded((criteria, alternatives) in dataset_strategy()) {
            for r in compute_results(Method::Topsis, &criteria, &alternatives) {
                prop_assert!((0.0..=1.0).contains(&r.score));
            }
        }
    }
}
