mod schema;

pub use schema::{Config, HistoryConfig, DEFAULT_MAX_HISTORY, DEFAULT_PRECISION};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::scoring::Method;

/// Get the config directory path (~/.config/mcda-rank/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("mcda-rank"))
}

/// Get the default config file path (~/.config/mcda-rank/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Ensure the parent directory of `path` exists
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory at {}", dir.display()))?;
        }
    }
    Ok(())
}

/// Expand a leading `~` to the home directory
pub fn expand_home(path: &str) -> Result<PathBuf> {
    let path = path.trim();
    if path == "~" {
        return dirs::home_dir().context("Could not determine home directory");
    }
    match path.strip_prefix("~/") {
        Some(rest) => {
            let home = dirs::home_dir().context("Could not determine home directory")?;
            Ok(home.join(rest))
        }
        None => Ok(PathBuf::from(path)),
    }
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/mcda-rank/config.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
///
/// A missing file at the default path is not an error; defaults apply.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    Ok(config)
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref id) = config.default_method {
        if let Err(e) = id.parse::<Method>() {
            errors.push(format!("default_method: {}", e));
        }
    }

    if let Some(precision) = config.precision {
        if precision > 12 {
            errors.push(format!("precision: must be at most 12 (got {})", precision));
        }
    }

    if let Some(ref dataset) = config.dataset {
        if dataset.trim().is_empty() {
            errors.push("dataset: must not be empty".to_string());
        }
    }

    if let Some(ref history) = config.history {
        if history.max_entries == Some(0) {
            errors.push("history.max_entries: must be at least 1".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
