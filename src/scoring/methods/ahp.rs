use std::collections::BTreeMap;

use crate::scoring::normalize::{column, normalized_weights, safe_div};
use crate::scoring::rank::rank_results;
use crate::scoring::types::{Alternative, Criterion, CriterionType, MethodResult, PartialResult};

/// Column totals used by the simplified AHP normalization.
struct ColumnSums {
    sum: f64,
    reciprocal_sum: f64,
}

/// Simplified AHP: each column is turned into a priority vector and weighted
/// by normalized criterion weights. No pairwise comparison matrix is built.
///
/// Positive cost values use `(1 / v) / Σ(1 / positive v)`. Everything else,
/// including cost values that are zero or negative, uses `v / Σ v`.
pub fn calculate(criteria: &[Criterion], alternatives: &[Alternative]) -> Vec<MethodResult> {
    if criteria.is_empty() || alternatives.is_empty() {
        return Vec::new();
    }

    let weights = normalized_weights(criteria);

    let sums: Vec<ColumnSums> = criteria
        .iter()
        .map(|c| {
            let values = column(alternatives, &c.id);
            ColumnSums {
                sum: values.iter().sum(),
                reciprocal_sum: values.iter().filter(|v| **v > 0.0).map(|v| 1.0 / v).sum(),
            }
        })
        .collect();

    let partial = alternatives
        .iter()
        .map(|alt| {
            let mut normalized = BTreeMap::new();
            let mut score = 0.0;

            for (c, col) in criteria.iter().zip(&sums) {
                let value = alt.value(&c.id);
                let priority = if c.kind == CriterionType::Cost && value > 0.0 {
                    safe_div(1.0 / value, col.reciprocal_sum)
                } else {
                    safe_div(value, col.sum)
                };
                score += priority * weights[&c.id];
                normalized.insert(c.id.clone(), priority);
            }

            PartialResult::new(alt.id.clone(), score).with_normalized(normalized)
        })
        .collect();

    rank_results(partial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::methods::fixtures::*;

    #[test]
    fn test_empty_inputs() {
        assert!(calculate(&[], &supplier_alternatives()).is_empty());
        assert!(calculate(&supplier_criteria(), &[]).is_empty());
    }

    #[test]
    fn test_supplier_golden_values() {
        let results = calculate(&supplier_criteria(), &supplier_alternatives());
        assert_eq!(ranking(&results), vec!["a2", "a1", "a3"]);
        assert_close(result_for(&results, "a2").score, 0.35181589537223334);
        assert_close(result_for(&results, "a1").score, 0.32587525150905433);
        assert_close(result_for(&results, "a3").score, 0.32230885311871227);
    }

    #[test]
    fn test_scores_sum_to_one_for_positive_data() {
        let results = calculate(&supplier_criteria(), &supplier_alternatives());
        let total: f64 = results.iter().map(|r| r.score).sum();
        assert_close(total, 1.0);
    }

    #[test]
    fn test_single_alternative_scores_one() {
        let criteria = vec![Criterion::cost("c1", "Cost", 5.0)];
        let alternatives = vec![Alternative::new("a1", "Only").with_value("c1", 20.0)];
        let results = calculate(&criteria, &alternatives);
        assert_eq!(results[0].rank, 1);
        assert_close(results[0].score, 1.0);
    }

    #[test]
    fn test_non_positive_cost_falls_back_to_column_sum() {
        let criteria = vec![Criterion::cost("c1", "Cost", 1.0)];
        let alternatives = vec![
            Alternative::new("zero", "Zero").with_value("c1", 0.0),
            Alternative::new("neg", "Negative").with_value("c1", -2.0),
            Alternative::new("pos", "Positive").with_value("c1", 4.0),
        ];
        let results = calculate(&criteria, &alternatives);
        // column sum is 2; reciprocal sum covers only the positive entry
        assert_close(result_for(&results, "zero").score, 0.0);
        assert_close(result_for(&results, "neg").score, -1.0);
        assert_close(result_for(&results, "pos").score, 1.0);
    }
}
