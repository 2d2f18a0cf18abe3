use anyhow::{bail, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// The registered ranking methods, in registry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Method {
    Saw,
    Topsis,
    Ahp,
    Moora,
    Smart,
    Wp,
}

impl Method {
    pub const ALL: [Method; 6] = [
        Method::Saw,
        Method::Topsis,
        Method::Ahp,
        Method::Moora,
        Method::Smart,
        Method::Wp,
    ];

    /// Short identifier used on the command line and in stored files.
    pub fn id(&self) -> &'static str {
        match self {
            Method::Saw => "saw",
            Method::Topsis => "topsis",
            Method::Ahp => "ahp",
            Method::Moora => "moora",
            Method::Smart => "smart",
            Method::Wp => "wp",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Method::Saw => "Simple Additive Weighting (SAW)",
            Method::Topsis => "TOPSIS",
            Method::Ahp => "Analytic Hierarchy Process (AHP)",
            Method::Moora => "MOORA",
            Method::Smart => "SMART",
            Method::Wp => "Weighted Product (WP)",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Method::Saw => "Weighted sum of ratings normalized against the best value per criterion.",
            Method::Topsis => "Technique for Order of Preference by Similarity to Ideal Solution.",
            Method::Ahp => "Simplified Analytic Hierarchy Process without pairwise comparisons.",
            Method::Moora => "Multi-Objective Optimization on the basis of Ratio Analysis.",
            Method::Smart => "Simple Multi-Attribute Rating Technique using min-max utilities.",
            Method::Wp => "Product of ratings, each raised to the weight of its criterion.",
        }
    }

    /// Look up a method by id, ignoring case and surrounding whitespace.
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        Method::ALL
            .into_iter()
            .find(|m| m.id().eq_ignore_ascii_case(id))
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Method {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match Method::from_id(s) {
            Some(m) => Ok(m),
            None => {
                let valid: Vec<&str> = Method::ALL.iter().map(|m| m.id()).collect();
                bail!("Unknown method '{}'. Expected one of: {}", s.trim(), valid.join(", "))
            }
        }
    }
}

impl Serialize for Method {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

impl<'de> Deserialize<'de> for Method {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
