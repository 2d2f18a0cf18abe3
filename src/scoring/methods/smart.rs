use std::collections::BTreeMap;

use crate::scoring::normalize::{column, max_of, min_of, normalized_weights, positives};
use crate::scoring::rank::rank_results;
use crate::scoring::types::{Alternative, Criterion, CriterionType, MethodResult, PartialResult};

/// SMART: min-max utilities weighted by normalized criterion weights.
///
/// Min and max are taken over strictly positive values only (both 0 when the
/// column has none). A column whose min equals its max contributes 0.
pub fn calculate(criteria: &[Criterion], alternatives: &[Alternative]) -> Vec<MethodResult> {
    if criteria.is_empty() || alternatives.is_empty() {
        return Vec::new();
    }

    let weights = normalized_weights(criteria);

    let bounds: Vec<(f64, f64)> = criteria
        .iter()
        .map(|c| {
            let values = positives(&column(alternatives, &c.id));
            (
                min_of(&values).unwrap_or(0.0),
                max_of(&values).unwrap_or(0.0),
            )
        })
        .collect();

    let partial = alternatives
        .iter()
        .map(|alt| {
            let mut utilities = BTreeMap::new();
            let mut score = 0.0;

            for (c, &(min, max)) in criteria.iter().zip(&bounds) {
                let value = alt.value(&c.id);
                let utility = if min == max {
                    0.0
                } else {
                    match c.kind {
                        CriterionType::Benefit => (value - min) / (max - min),
                        CriterionType::Cost => (max - value) / (max - min),
                    }
                };
                score += utility * weights[&c.id];
                utilities.insert(c.id.clone(), utility);
            }

            PartialResult::new(alt.id.clone(), score).with_normalized(utilities)
        })
        .collect();

    rank_results(partial)
}
