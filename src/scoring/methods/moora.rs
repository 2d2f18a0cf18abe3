use crate::scoring::normalize::{apply_weights, vector_normalize};
use crate::scoring::rank::rank_results;
use crate::scoring::types::{Alternative, Criterion, CriterionType, MethodDetails, MethodResult, PartialResult};

/// MOORA ratio system: weighted benefit sum minus weighted cost sum over the
/// vector-normalized matrix.
pub fn calculate(criteria: &[Criterion], alternatives: &[Alternative]) -> Vec<MethodResult> {
    if criteria.is_empty() || alternatives.is_empty() {
        return Vec::new();
    }

    let partial = alternatives
        .iter()
        .zip(vector_normalize(criteria, alternatives))
        .map(|(alt, norm_row)| {
            let weighted = apply_weights(criteria, &norm_row);
            let mut benefit_sum = 0.0;
            let mut cost_sum = 0.0;
            for c in criteria {
                match c.kind {
                    CriterionType::Benefit => benefit_sum += weighted[&c.id],
                    CriterionType::Cost => cost_sum += weighted[&c.id],
                }
            }

            PartialResult::new(alt.id.clone(), benefit_sum - cost_sum)
                .with_normalized(norm_row)
                .with_details(MethodDetails::Moora { benefit_sum, cost_sum })
        })
        .collect();

    rank_results(partial)
}
