use crate::scoring::normalize::safe_div;
use crate::scoring::rank::rank_results;
use crate::scoring::types::{Alternative, Criterion, CriterionType, MethodDetails, MethodResult, PartialResult};

/// Weighted Product.
///
/// `S = Π value^(±weight)` with the exponent negated for cost criteria, and the
/// score is `S / ΣS`. Powers follow IEEE semantics, so a zero cost value gives
/// an infinite `S` and the resulting `NaN` score is ranked last.
pub fn calculate(criteria: &[Criterion], alternatives: &[Alternative]) -> Vec<MethodResult> {
    if criteria.is_empty() || alternatives.is_empty() {
        return Vec::new();
    }

    let vector_s: Vec<f64> = alternatives
        .iter()
        .map(|alt| {
            criteria.iter().fold(1.0, |s, c| {
                let exponent = match c.kind {
                    CriterionType::Benefit => c.weight,
                    CriterionType::Cost => -c.weight,
                };
                s * alt.value(&c.id).powf(exponent)
            })
        })
        .collect();

    let total: f64 = vector_s.iter().sum();

    let partial = alternatives
        .iter()
        .zip(vector_s)
        .map(|(alt, s)| {
            PartialResult::new(alt.id.clone(), safe_div(s, total))
                .with_details(MethodDetails::Wp { vector_s: s })
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
        assert_close(result_for(&results, "a2").score, 0.3449722933206308);
        assert_close(result_for(&results, "a1").score, 0.33598534737434976);
        assert_close(result_for(&results, "a3").score, 0.3190423593050194);

        match result_for(&results, "a2").details {
            Some(MethodDetails::Wp { vector_s }) => assert_close(vector_s, 0.07459330894392688),
            other => panic!("unexpected details {:?}", other),
        }
    }

    #[test]
    fn test_scores_sum_to_one() {
        let results = calculate(&supplier_criteria(), &supplier_alternatives());
        let total: f64 = results.iter().map(|r| r.score).sum();
        assert_close(total, 1.0);
    }

    #[test]
    fn test_single_alternative_scores_one() {
        let criteria = vec![Criterion::benefit("c1", "Quality", 0.5)];
        let alternatives = vec![Alternative::new("a1", "Only").with_value("c1", 16.0)];
        let results = calculate(&criteria, &alternatives);
        assert_eq!(results[0].rank, 1);
        assert_close(results[0].score, 1.0);
        assert!(results[0].normalized_values.is_none());
    }

    #[test]
    fn test_zero_benefit_values_give_zero_sum() {
        let criteria = vec![Criterion::benefit("c1", "Quality", 1.0)];
        let alternatives = vec![Alternative::new("a1", "X"), Alternative::new("a2", "Y")];
        let results = calculate(&criteria, &alternatives);
        assert!(results.iter().all(|r| r.score == 0.0));
    }

    #[test]
    fn test_zero_cost_value_ranks_last() {
        let criteria = vec![Criterion::cost("c1", "Cost", 1.0)];
        let alternatives = vec![
            Alternative::new("free", "Free").with_value("c1", 0.0),
            Alternative::new("paid", "Paid").with_value("c1", 10.0),
        ];
        let results = calculate(&criteria, &alternatives);
        assert_eq!(ranking(&results), vec!["paid", "free"]);
        assert!(result_for(&results, "free").score.is_nan());
        assert_eq!(result_for(&results, "free").rank, 2);
    }
}
