use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{Method, MethodResult};

pub const HISTORY_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History {
    pub version: u32,
    /// Newest first
    #[serde(default)]
    pub entries: Vec<CalculationRecord>,
}

/// One saved ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub method: Method,
    pub results: Vec<MethodResult>,
    pub timestamp: DateTime<Utc>,
}

impl CalculationRecord {
    /// Id of the rank-1 alternative, if any.
    pub fn winner(&self) -> Option<&str> {
        self.results
            .iter()
            .find(|r| r.rank == 1)
            .map(|r| r.alternative_id.as_str())
    }

    /// Human-friendly age such as "3h ago"
    pub fn format_age(&self) -> String {
        let elapsed = Utc::now() - self.timestamp;
        let Ok(std_elapsed) = elapsed.to_std() else {
            return "just now".to_string();
        };
        // round down to whole minutes before formatting
        let secs = std_elapsed.as_secs() / 60 * 60;
        if secs == 0 {
            return "just now".to_string();
        }
        format!("{} ago", humantime::format_duration(std::time::Duration::from_secs(secs)))
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            version: HISTORY_VERSION,
            entries: Vec::new(),
        }
    }

    /// Record a calculation at the front of the history.
    /// Empty result lists are not recorded; returns whether anything was added.
    pub fn record(&mut self, method: Method, results: Vec<MethodResult>) -> bool {
        self.record_at(method, results, Utc::now())
    }

    pub fn record_at(&mut self, method: Method, results: Vec<MethodResult>, timestamp: DateTime<Utc>) -> bool {
        if results.is_empty() {
            return false;
        }
        self.entries.insert(
            0,
            CalculationRecord {
                method,
                results,
                timestamp,
            },
        );
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Keep only the newest `max` entries
    pub fn truncate(&mut self, max: usize) {
        self.entries.truncate(max);
    }

    /// Drop entries recorded more than `age` ago. Returns how many were removed.
    pub fn prune_older_than(&mut self, age: std::time::Duration) -> usize {
        let Ok(age) = chrono::Duration::from_std(age) else {
            return 0;
        };
        let cutoff = Utc::now() - age;
        let before = self.entries.len();
        self.entries.retain(|e| e.timestamp >= cutoff);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
