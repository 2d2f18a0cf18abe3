//! Import of name-keyed sheets.
//!
//! Sheet rows reference criteria by name instead of id, the way a spreadsheet
//! with a criteria tab and an alternatives tab would:
//!
//! ```yaml
//! criteria:
//!   - { name: Price, weight: 2, type: cost }
//!   - { name: Battery }
//! alternatives:
//!   - name: Laptop X
//!     values: { Price: 1200, Battery: 9 }
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::types::Dataset;
use crate::scoring::{Alternative, Criterion, CriterionType};

#[derive(Debug, Deserialize)]
pub struct Sheet {
    #[serde(default)]
    pub criteria: Vec<CriterionRow>,
    #[serde(default)]
    pub alternatives: Vec<AlternativeRow>,
}

#[derive(Debug, Deserialize)]
pub struct CriterionRow {
    pub name: String,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AlternativeRow {
    pub name: String,
    #[serde(default)]
    pub values: BTreeMap<String, f64>,
}

/// Read a sheet file (`.json`, otherwise YAML).
pub fn read_sheet(path: &Path) -> Result<Sheet> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read import file at {}", path.display()))?;

    let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
    let sheet = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse import file: invalid JSON in {}", path.display()))?
    } else {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse import file: invalid YAML in {}", path.display()))?
    };
    Ok(sheet)
}

/// Convert a sheet into a dataset with generated ids.
///
/// A missing, zero or `NaN` weight becomes 1 and a missing type becomes
/// benefit. Values naming unknown criteria are dropped.
pub fn sheet_to_dataset(sheet: Sheet) -> Result<Dataset> {
    let mut data = Dataset::empty();
    let mut ids_by_name: BTreeMap<String, String> = BTreeMap::new();

    for (i, row) in sheet.criteria.into_iter().enumerate() {
        let kind = match row.kind.as_deref() {
            None => CriterionType::Benefit,
            Some(s) => match CriterionType::parse(s) {
                Some(k) => k,
                None => bail!("criteria[{}].type: expected 'benefit' or 'cost', got '{}'", i, s),
            },
        };
        let weight = match row.weight {
            Some(w) if w != 0.0 && !w.is_nan() => w,
            _ => 1.0,
        };

        let id = data.next_criterion_id();
        ids_by_name.insert(row.name.trim().to_lowercase(), id.clone());
        data.add_criterion(Criterion::new(id, row.name.trim(), weight, kind))?;
    }

    for row in sheet.alternatives {
        let values = row
            .values
            .into_iter()
            .filter_map(|(name, value)| {
                ids_by_name
                    .get(&name.trim().to_lowercase())
                    .map(|id| (id.clone(), value))
            })
            .collect();

        let mut alt = Alternative::new(data.next_alternative_id(), row.name.trim());
        alt.values = values;
        data.add_alternative(alt)?;
    }

    Ok(data)
}

/// Read and convert a sheet file in one step.
pub fn import_sheet(path: &Path) -> Result<Dataset> {
    sheet_to_dataset(read_sheet(path)?)
}
