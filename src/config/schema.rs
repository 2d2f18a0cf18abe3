use serde::{Deserialize, Serialize};

use crate::scoring::Method;

/// User configuration.
///
/// Example YAML:
/// ```yaml
/// default_method: topsis
/// precision: 3
/// dataset: ~/decisions/laptop.json
/// history:
///   enabled: true
///   max_entries: 50
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Method used by `rank` when `--method` is not given (default: saw)
    #[serde(default)]
    pub default_method: Option<String>,

    /// Decimal places shown for scores (default: 4)
    #[serde(default)]
    pub precision: Option<usize>,

    /// Dataset file to use instead of ~/.config/mcda-rank/dataset.json
    #[serde(default)]
    pub dataset: Option<String>,

    #[serde(default)]
    pub history: Option<HistoryConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HistoryConfig {
    /// Record `rank --save` calculations (default: true)
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Keep at most this many entries, newest first (default: 100)
    #[serde(default)]
    pub max_entries: Option<usize>,
}

pub const DEFAULT_PRECISION: usize = 4;
pub const DEFAULT_MAX_HISTORY: usize = 100;

impl Config {
    /// Configured default method, falling back to SAW for missing or unknown ids.
    pub fn default_method(&self) -> Method {
        self.default_method
            .as_deref()
            .and_then(Method::from_id)
            .unwrap_or(Method::Saw)
    }

    pub fn precision(&self) -> usize {
        self.precision.unwrap_or(DEFAULT_PRECISION)
    }

    pub fn history_enabled(&self) -> bool {
        self.history.as_ref().and_then(|h| h.enabled).unwrap_or(true)
    }

    pub fn max_history(&self) -> usize {
        self.history
            .as_ref()
            .and_then(|h| h.max_entries)
            .unwrap_or(DEFAULT_MAX_HISTORY)
    }
}
