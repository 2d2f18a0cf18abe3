use std::collections::BTreeMap;

use crate::scoring::normalize::{column, max_of, min_of, positives, safe_div};
use crate::scoring::rank::rank_results;
use crate::scoring::types::{Alternative, Criterion, CriterionType, MethodResult, PartialResult};

/// Simple Additive Weighting.
///
/// Benefit values are divided by the column maximum; cost values divide the
/// smallest positive value in the column. The score is the weighted sum of
/// those ratios.
pub fn calculate(criteria: &[Criterion], alternatives: &[Alternative]) -> Vec<MethodResult> {
    if criteria.is_empty() || alternatives.is_empty() {
        return Vec::new();
    }

    // Reference value per criterion: column max for benefit, min positive for cost.
    // `None` means the cost column has no positive value at all.
    let references: Vec<Option<f64>> = criteria
        .iter()
        .map(|c| {
            let values = column(alternatives, &c.id);
            match c.kind {
                CriterionType::Benefit => max_of(&values),
                CriterionType::Cost => min_of(&positives(&values)),
            }
        })
        .collect();

    let partial = alternatives
        .iter()
        .map(|alt| {
            let mut normalized = BTreeMap::new();
            let mut score = 0.0;

            for (criterion, reference) in criteria.iter().zip(&references) {
                let value = alt.value(&criterion.id);
                let ratio = match (criterion.kind, reference) {
                    (CriterionType::Benefit, Some(max)) => safe_div(value, *max),
                    (CriterionType::Cost, Some(min_positive)) => safe_div(*min_positive, value),
                    (_, None) => 0.0,
                };
                score += ratio * criterion.weight;
                normalized.insert(criterion.id.clone(), ratio);
            }

            PartialResult::new(alt.id.clone(), score).with_normalized(normalized)
        })
        .collect();

    rank_results(partial)
}
