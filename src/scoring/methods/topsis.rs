use crate::scoring::normalize::{apply_weights, max_of, min_of, vector_normalize};
use crate::scoring::rank::rank_results;
use crate::scoring::types::{Alternative, Criterion, CriterionType, MethodDetails, MethodResult, PartialResult};

/// TOPSIS: relative closeness to the ideal solution.
///
/// 1. Vector-normalize each column and multiply by the criterion weight.
/// 2. Ideal = best weighted value per criterion, negative-ideal = worst.
/// 3. Score = `d- / (d+ + d-)`, or 0 when both distances are 0.
pub fn calculate(criteria: &[Criterion], alternatives: &[Alternative]) -> Vec<MethodResult> {
    if criteria.is_empty() || alternatives.is_empty() {
        return Vec::new();
    }

    let normalized = vector_normalize(criteria, alternatives);
    let weighted: Vec<_> = normalized.iter().map(|row| apply_weights(criteria, row)).collect();

    let (ideal, negative_ideal): (Vec<f64>, Vec<f64>) = criteria
        .iter()
        .map(|c| {
            let col: Vec<f64> = weighted.iter().map(|row| row[&c.id]).collect();
            let max = max_of(&col).unwrap_or(0.0);
            let min = min_of(&col).unwrap_or(0.0);
            match c.kind {
                CriterionType::Benefit => (max, min),
                CriterionType::Cost => (min, max),
            }
        })
        .unzip();

    let partial = alternatives
        .iter()
        .zip(normalized)
        .zip(&weighted)
        .map(|((alt, norm_row), weighted_row)| {
            let mut positive = 0.0;
            let mut negative = 0.0;
            for (i, c) in criteria.iter().enumerate() {
                let v = weighted_row[&c.id];
                positive += (v - ideal[i]).powi(2);
                negative += (v - negative_ideal[i]).powi(2);
            }
            let positive_distance = positive.sqrt();
            let negative_distance = negative.sqrt();

            let closeness = negative_distance / (positive_distance + negative_distance);
            let score = if closeness.is_nan() { 0.0 } else { closeness };

            PartialResult::new(alt.id.clone(), score)
                .with_normalized(norm_row)
                .with_details(MethodDetails::Topsis {
                    positive_distance,
                    negative_distance,
                })
        })
        .collect();

    rank_results(partial)
}
