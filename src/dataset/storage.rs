use super::types::{Dataset, DATASET_VERSION};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Get the default dataset file path (~/.config/mcda-rank/dataset.json)
pub fn get_dataset_path() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("dataset.json"))
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Load a dataset from a JSON (or `.yaml`/`.yml`) file
///
/// If the file doesn't exist, returns the sample dataset.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    if !path.exists() {
        return Ok(Dataset::sample());
    }

    let data: Dataset = if is_yaml(path) {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset file at {}", path.display()))?;
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse dataset: invalid YAML in {}", path.display()))?
    } else {
        let file = File::open(path)
            .with_context(|| format!("Failed to open dataset file at {}", path.display()))?;
        serde_json::from_reader(file)
            .with_context(|| format!("Failed to load dataset from {}", path.display()))?
    };

    if data.version != DATASET_VERSION {
        anyhow::bail!("Unsupported dataset version: {}", data.version);
    }

    Ok(data)
}

/// Save a dataset to a JSON file atomically
///
/// The file is never left half-written. Creates the parent directory if
/// it doesn't exist. Always writes JSON, whatever the extension.
pub fn save_dataset(path: &Path, data: &Dataset) -> Result<()> {
    crate::config::ensure_parent_dir(path)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, data).context("Failed to serialize dataset")?;

    file.commit().context("Failed to save dataset")?;

    Ok(())
}
