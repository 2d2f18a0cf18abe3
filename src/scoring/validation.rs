use std::collections::HashSet;

use super::types::{Alternative, Criterion};

/// Lint a dataset before scoring.
/// Returns all problems at once (not just the first).
///
/// The calculators never call this: they accept anything and degrade bad
/// values to 0. Callers use it to warn the user about input that will not
/// score the way they probably expect.
pub fn validate_dataset(criteria: &[Criterion], alternatives: &[Alternative]) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    for (i, c) in criteria.iter().enumerate() {
        if !seen.insert(c.id.as_str()) {
            errors.push(format!("criteria[{}].id: duplicate id '{}'", i, c.id));
        }
        if c.name.trim().is_empty() {
            errors.push(format!("criteria[{}].name: must not be empty", i));
        }
        if !c.weight.is_finite() {
            errors.push(format!("criteria[{}].weight: must be a finite number", i));
        } else if c.weight <= 0.0 {
            errors.push(format!(
                "criteria[{}].weight: must be positive (got {}), it will not contribute",
                i, c.weight
            ));
        }
        if let Some(p) = c.percentage {
            if !(0.0..=100.0).contains(&p) {
                errors.push(format!("criteria[{}].percentage: must be between 0 and 100 (got {})", i, p));
            }
        }
    }

    let criterion_ids: HashSet<&str> = criteria.iter().map(|c| c.id.as_str()).collect();
    let mut seen = HashSet::new();
    for (i, alt) in alternatives.iter().enumerate() {
        if !seen.insert(alt.id.as_str()) {
            errors.push(format!("alternatives[{}].id: duplicate id '{}'", i, alt.id));
        }
        if alt.name.trim().is_empty() {
            errors.push(format!("alternatives[{}].name: must not be empty", i));
        }
        for (key, value) in &alt.values {
            if !criterion_ids.contains(key.as_str()) {
                errors.push(format!(
                    "alternatives[{}].values.{}: unknown criterion, value is ignored",
                    i, key
                ));
            }
            if !value.is_finite() {
                errors.push(format!("alternatives[{}].values.{}: must be a finite number", i, key));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
