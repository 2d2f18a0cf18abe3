//! Column and weight helpers shared by the calculators.
//!
//! Every helper treats a missing value as 0 and maps a zero divisor to 0.

use std::collections::BTreeMap;

use super::types::{Alternative, Criterion};

/// Raw values of one criterion across all alternatives, in input order.
pub fn column(alternatives: &[Alternative], criterion_id: &str) -> Vec<f64> {
    alternatives.iter().map(|a| a.value(criterion_id)).collect()
}

/// `numerator / denominator`, or 0 when the denominator is 0.
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator != 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

pub fn max_of(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

pub fn min_of(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

/// Values strictly greater than zero.
pub fn positives(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| *v > 0.0).collect()
}

/// Euclidean norm of a column.
pub fn euclidean_norm(values: &[f64]) -> f64 {
    values.iter().map(|v| v * v).sum::<f64>().sqrt()
}

/// Criterion weights scaled to sum to 1, keyed by criterion id.
/// All weights become 0 when the total is 0.
pub fn normalized_weights(criteria: &[Criterion]) -> BTreeMap<String, f64> {
    let total: f64 = criteria.iter().map(|c| c.weight).sum();
    criteria
        .iter()
        .map(|c| (c.id.clone(), safe_div(c.weight, total)))
        .collect()
}

/// Vector-normalized matrix: each value divided by its column's Euclidean norm.
/// One map per alternative, in input order.
pub fn vector_normalize(criteria: &[Criterion], alternatives: &[Alternative]) -> Vec<BTreeMap<String, f64>> {
    let norms: Vec<f64> = criteria
        .iter()
        .map(|c| euclidean_norm(&column(alternatives, &c.id)))
        .collect();

    alternatives
        .iter()
        .map(|alt| {
            criteria
                .iter()
                .zip(&norms)
                .map(|(c, norm)| (c.id.clone(), safe_div(alt.value(&c.id), *norm)))
                .collect()
        })
        .collect()
}

/// Multiply each normalized value by its criterion's raw weight.
pub fn apply_weights(criteria: &[Criterion], normalized: &BTreeMap<String, f64>) -> BTreeMap<String, f64> {
    criteria
        .iter()
        .map(|c| {
            let value = normalized.get(&c.id).copied().unwrap_or(0.0);
            (c.id.clone(), value * c.weight)
        })
        .collect()
}
