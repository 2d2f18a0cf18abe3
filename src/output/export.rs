use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use crate::dataset::Dataset;
use crate::scoring::{Alternative, Criterion, Method, MethodResult};

/// Everything needed to reproduce a report: the inputs and every method's ranking.
/// Results are keyed by method id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument<'a> {
    pub generated_at: DateTime<Utc>,
    pub criteria: &'a [Criterion],
    pub alternatives: &'a [Alternative],
    pub results: &'a BTreeMap<Method, Vec<MethodResult>>,
}

impl<'a> ExportDocument<'a> {
    pub fn new(data: &'a Dataset, results: &'a BTreeMap<Method, Vec<MethodResult>>) -> Self {
        Self {
            generated_at: Utc::now(),
            criteria: &data.criteria,
            alternatives: &data.alternatives,
            results,
        }
    }
}

/// Render the export document as pretty JSON.
pub fn export_json(data: &Dataset, results: &BTreeMap<Method, Vec<MethodResult>>) -> Result<String> {
    serde_json::to_string_pretty(&ExportDocument::new(data, results)).context("Failed to serialize export")
}

/// Write rendered output to `path` atomically, with a trailing newline.
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    crate::config::ensure_parent_dir(path)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    writeln!(file, "{}", contents).with_context(|| format!("Failed to write {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save {}", path.display()))?;

    Ok(())
}
