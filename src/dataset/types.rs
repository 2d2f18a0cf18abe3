use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::scoring::{Alternative, Criterion, CriterionType};

pub const DATASET_VERSION: u32 = 1;

/// Criteria and alternatives as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub criteria: Vec<Criterion>,
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
}

fn default_version() -> u32 {
    DATASET_VERSION
}

/// Partial update for a criterion; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct CriterionUpdate {
    pub name: Option<String>,
    pub weight: Option<f64>,
    pub kind: Option<CriterionType>,
    pub importance: Option<f64>,
    pub percentage: Option<f64>,
}

/// Partial update for an alternative. `values` are merged into the existing ones.
#[derive(Debug, Clone, Default)]
pub struct AlternativeUpdate {
    pub name: Option<String>,
    pub values: BTreeMap<String, f64>,
}

impl Default for Dataset {
    fn default() -> Self {
        Self::sample()
    }
}

impl Dataset {
    pub fn empty() -> Self {
        Self {
            version: DATASET_VERSION,
            criteria: Vec::new(),
            alternatives: Vec::new(),
        }
    }

    /// Supplier selection example used on first run and by `reset`.
    pub fn sample() -> Self {
        let weighted = |mut c: Criterion, percentage: f64| {
            c.percentage = Some(percentage);
            c
        };
        Self {
            version: DATASET_VERSION,
            criteria: vec![
                weighted(Criterion::cost("c1", "Cost", 0.4), 40.0),
                weighted(Criterion::benefit("c2", "Quality", 0.3), 30.0),
                weighted(Criterion::cost("c3", "Delivery Time", 0.3), 30.0),
            ],
            alternatives: vec![
                Alternative::new("a1", "Option A")
                    .with_value("c1", 1000.0)
                    .with_value("c2", 8.0)
                    .with_value("c3", 5.0),
                Alternative::new("a2", "Option B")
                    .with_value("c1", 1500.0)
                    .with_value("c2", 9.0)
                    .with_value("c3", 3.0),
                Alternative::new("a3", "Option C")
                    .with_value("c1", 800.0)
                    .with_value("c2", 7.0)
                    .with_value("c3", 7.0),
            ],
        }
    }

    /// True when there is not enough data to rank anything.
    pub fn is_insufficient(&self) -> bool {
        self.criteria.is_empty() || self.alternatives.is_empty()
    }

    pub fn criterion(&self, id: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.id == id)
    }

    pub fn alternative(&self, id: &str) -> Option<&Alternative> {
        self.alternatives.iter().find(|a| a.id == id)
    }

    /// Display name for an alternative id, falling back to the id itself.
    pub fn alternative_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.alternative(id).map(|a| a.name.as_str()).unwrap_or(id)
    }

    /// Resolve a criterion by id, or by case-insensitive name.
    pub fn find_criterion_id(&self, key: &str) -> Option<String> {
        self.criterion(key)
            .or_else(|| self.criteria.iter().find(|c| c.name.eq_ignore_ascii_case(key.trim())))
            .map(|c| c.id.clone())
    }

    /// Resolve an alternative by id, or by case-insensitive name.
    pub fn find_alternative_id(&self, key: &str) -> Option<String> {
        self.alternative(key)
            .or_else(|| self.alternatives.iter().find(|a| a.name.eq_ignore_ascii_case(key.trim())))
            .map(|a| a.id.clone())
    }

    /// Next unused id of the form `c<N>`.
    pub fn next_criterion_id(&self) -> String {
        next_id("c", self.criteria.iter().map(|c| c.id.as_str()))
    }

    /// Next unused id of the form `a<N>`.
    pub fn next_alternative_id(&self) -> String {
        next_id("a", self.alternatives.iter().map(|a| a.id.as_str()))
    }

    pub fn add_criterion(&mut self, criterion: Criterion) -> Result<()> {
        if self.criterion(&criterion.id).is_some() {
            bail!("Criterion '{}' already exists", criterion.id);
        }
        self.criteria.push(criterion);
        Ok(())
    }

    pub fn update_criterion(&mut self, id: &str, update: CriterionUpdate) -> Result<()> {
        let Some(criterion) = self.criteria.iter_mut().find(|c| c.id == id) else {
            bail!("Criterion '{}' not found", id);
        };
        if let Some(name) = update.name {
            criterion.name = name;
        }
        if let Some(weight) = update.weight {
            criterion.weight = weight;
        }
        if let Some(kind) = update.kind {
            criterion.kind = kind;
        }
        if update.importance.is_some() {
            criterion.importance = update.importance;
        }
        if update.percentage.is_some() {
            criterion.percentage = update.percentage;
        }
        Ok(())
    }

    /// Remove a criterion and its value from every alternative.
    pub fn remove_criterion(&mut self, id: &str) -> Result<Criterion> {
        let Some(pos) = self.criteria.iter().position(|c| c.id == id) else {
            bail!("Criterion '{}' not found", id);
        };
        for alt in &mut self.alternatives {
            alt.values.remove(id);
        }
        Ok(self.criteria.remove(pos))
    }

    pub fn add_alternative(&mut self, alternative: Alternative) -> Result<()> {
        if self.alternative(&alternative.id).is_some() {
            bail!("Alternative '{}' already exists", alternative.id);
        }
        self.alternatives.push(alternative);
        Ok(())
    }

    pub fn update_alternative(&mut self, id: &str, update: AlternativeUpdate) -> Result<()> {
        let Some(alt) = self.alternatives.iter_mut().find(|a| a.id == id) else {
            bail!("Alternative '{}' not found", id);
        };
        if let Some(name) = update.name {
            alt.name = name;
        }
        alt.values.extend(update.values);
        Ok(())
    }

    pub fn remove_alternative(&mut self, id: &str) -> Result<Alternative> {
        let Some(pos) = self.alternatives.iter().position(|a| a.id == id) else {
            bail!("Alternative '{}' not found", id);
        };
        Ok(self.alternatives.remove(pos))
    }

    /// Set one value. Both ids must exist.
    pub fn set_value(&mut self, alternative_id: &str, criterion_id: &str, value: f64) -> Result<()> {
        if self.criterion(criterion_id).is_none() {
            bail!("Criterion '{}' not found", criterion_id);
        }
        let Some(alt) = self.alternatives.iter_mut().find(|a| a.id == alternative_id) else {
            bail!("Alternative '{}' not found", alternative_id);
        };
        alt.values.insert(criterion_id.to_string(), value);
        Ok(())
    }
}

fn next_id<'a>(prefix: &str, existing: impl Iterator<Item = &'a str>) -> String {
    let highest = existing
        .filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|n| n.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("{}{}", prefix, highest + 1)
}
