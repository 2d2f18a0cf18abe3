use super::types::{History, HISTORY_VERSION};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Get the default history file path (~/.config/mcda-rank/history.json)
pub fn get_history_path() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("history.json"))
}

/// Load calculation history from a JSON file
///
/// If the file doesn't exist, returns an empty history.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_history(path: &Path) -> Result<History> {
    if !path.exists() {
        return Ok(History::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open history file at {}", path.display()))?;

    let history: History = serde_json::from_reader(file).context("Failed to load history")?;

    if history.version != HISTORY_VERSION {
        anyhow::bail!("Unsupported history version: {}", history.version);
    }

    Ok(history)
}

/// Save calculation history to a JSON file atomically
pub fn save_history(path: &Path, history: &History) -> Result<()> {
    crate::config::ensure_parent_dir(path)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, history).context("Failed to serialize history")?;

    file.commit().context("Failed to save history")?;

    Ok(())
}
