use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whether larger raw values are favorable (`Benefit`) or unfavorable (`Cost`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CriterionType {
    Benefit,
    Cost,
}

impl CriterionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CriterionType::Benefit => "benefit",
            CriterionType::Cost => "cost",
        }
    }

    /// Parse "benefit" / "cost", ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "benefit" => Some(CriterionType::Benefit),
            "cost" => Some(CriterionType::Cost),
            _ => None,
        }
    }
}

impl std::fmt::Display for CriterionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A weighted criterion alternatives are scored against.
///
/// `weight` is an unnormalized importance value; methods that need a unit sum
/// normalize internally. Zero or negative weights are accepted and simply
/// stop contributing.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Criterion {
    pub id: String,
    pub name: String,
    #[serde(with = "non_finite_as_null")]
    pub weight: f64,
    #[serde(rename = "type")]
    pub kind: CriterionType,

    /// Optional importance rating kept for presentation; never read by the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<f64>,

    /// Optional share (0-100) kept for presentation; never read by the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

impl Criterion {
    pub fn new(id: impl Into<String>, name: impl Into<String>, weight: f64, kind: CriterionType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            weight,
            kind,
            importance: None,
            percentage: None,
        }
    }

    pub fn benefit(id: impl Into<String>, name: impl Into<String>, weight: f64) -> Self {
        Self::new(id, name, weight, CriterionType::Benefit)
    }

    pub fn cost(id: impl Into<String>, name: impl Into<String>, weight: f64) -> Self {
        Self::new(id, name, weight, CriterionType::Cost)
    }

    pub fn is_benefit(&self) -> bool {
        self.kind == CriterionType::Benefit
    }
}

/// An option being ranked, with one raw value per criterion id.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Alternative {
    pub id: String,
    pub name: String,
    #[serde(default, with = "non_finite_map_as_null")]
    pub values: BTreeMap<String, f64>,
}

impl Alternative {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            values: BTreeMap::new(),
        }
    }

    /// Builder-style helper for setting one value.
    pub fn with_value(mut self, criterion_id: impl Into<String>, value: f64) -> Self {
        self.values.insert(criterion_id.into(), value);
        self
    }

    /// Raw value for a criterion. Missing and `NaN` entries read as 0.
    pub fn value(&self, criterion_id: &str) -> f64 {
        match self.values.get(criterion_id) {
            Some(v) if !v.is_nan() => *v,
            _ => 0.0,
        }
    }
}

/// Method-specific diagnostics attached to a result.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum MethodDetails {
    Topsis {
        #[serde(rename = "positiveDistance", with = "non_finite_as_null")]
        positive_distance: f64,
        #[serde(rename = "negativeDistance", with = "non_finite_as_null")]
        negative_distance: f64,
    },
    Moora {
        #[serde(rename = "benefitSum", with = "non_finite_as_null")]
        benefit_sum: f64,
        #[serde(rename = "costSum", with = "non_finite_as_null")]
        cost_sum: f64,
    },
    Wp {
        #[serde(rename = "vectorS", with = "non_finite_as_null")]
        vector_s: f64,
    },
}

/// A scored alternative before ranks are known.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialResult {
    pub alternative_id: String,
    pub score: f64,
    pub normalized_values: Option<BTreeMap<String, f64>>,
    pub details: Option<MethodDetails>,
}

impl PartialResult {
    pub fn new(alternative_id: impl Into<String>, score: f64) -> Self {
        Self {
            alternative_id: alternative_id.into(),
            score,
            normalized_values: None,
            details: None,
        }
    }

    pub fn with_normalized(mut self, values: BTreeMap<String, f64>) -> Self {
        self.normalized_values = Some(values);
        self
    }

    pub fn with_details(mut self, details: MethodDetails) -> Self {
        self.details = Some(details);
        self
    }
}

/// A ranked result. `rank` is 1-based and assigned over the whole result set.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodResult {
    pub alternative_id: String,
    #[serde(with = "non_finite_as_null")]
    pub score: f64,
    pub rank: usize,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "optional_non_finite_map_as_null"
    )]
    pub normalized_values: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<MethodDetails>,
}

/// JSON has no NaN or infinity. Write them as `null` and read `null` back as `NaN`.
mod non_finite_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

/// Per-criterion values with the same `null` handling as [`non_finite_as_null`].
mod non_finite_map_as_null {
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S: Serializer>(values: &BTreeMap<String, f64>, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(values.len()))?;
        for (key, value) in values {
            map.serialize_entry(key, &value.is_finite().then_some(*value))?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error> {
        let raw = BTreeMap::<String, Option<f64>>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .map(|(key, value)| (key, value.unwrap_or(f64::NAN)))
            .collect())
    }
}

mod optional_non_finite_map_as_null {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S: Serializer>(
        values: &Option<BTreeMap<String, f64>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match values {
            Some(values) => super::non_finite_map_as_null::serialize(values, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<BTreeMap<String, f64>>, D::Error> {
        let raw = Option::<BTreeMap<String, Option<f64>>>::deserialize(deserializer)?;
        Ok(raw.map(|values| {
            values
                .into_iter()
                .map(|(key, value)| (key, value.unwrap_or(f64::NAN)))
                .collect()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_value_reads_as_zero() {
        let alt = Alternative::new("a1", "Option A").with_value("c1", 5.0);
        assert_eq!(alt.value("c1"), 5.0);
        assert_eq!(alt.value("c2"), 0.0);
    }

    #[test]
    fn test_nan_value_reads_as_zero() {
        let alt = Alternative::new("a1", "Option A").with_value("c1", f64::NAN);
        assert_eq!(alt.value("c1"), 0.0);
    }

    #[test]
    fn test_criterion_type_parse() {
        assert_eq!(CriterionType::parse("Benefit"), Some(CriterionType::Benefit));
        assert_eq!(CriterionType::parse(" COST "), Some(CriterionType::Cost));
        assert_eq!(CriterionType::parse("neutral"), None);
    }

    #[test]
    fn test_criterion_serializes_type_field() {
        let c = Criterion::cost("c1", "Cost", 0.4);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["type"], "cost");
        assert!(json.get("kind").is_none());
        assert!(json.get("percentage").is_none());
    }

    #[test]
    fn test_criterion_parses_type_and_percentage() {
        let json = r#"{"id":"c1","name":"Cost","weight":0.4,"type":"cost","percentage":40}"#;
        let c: Criterion = serde_json::from_str(json).unwrap();
        assert_eq!(c.kind, CriterionType::Cost);
        assert_eq!(c.percentage, Some(40.0));
        assert!(c.importance.is_none());
    }

    #[test]
    fn test_method_result_camel_case() {
        let result = MethodResult {
            alternative_id: "a1".to_string(),
            score: 0.5,
            rank: 1,
            normalized_values: None,
            details: Some(MethodDetails::Topsis {
                positive_distance: 0.1,
                negative_distance: 0.2,
            }),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["alternativeId"], "a1");
        assert_eq!(json["details"]["positiveDistance"], 0.1);
        assert!(json.get("normalizedValues").is_none());
    }

    #[test]
    fn test_nan_score_round_trips_as_null() {
        let result = MethodResult {
            alternative_id: "a1".to_string(),
            score: f64::NAN,
            rank: 2,
            normalized_values: None,
            details: Some(MethodDetails::Wp { vector_s: f64::INFINITY }),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains(r#""score":null"#));
        assert!(json.contains(r#""vectorS":null"#));

        let parsed: MethodResult = serde_json::from_str(&json).unwrap();
        assert!(parsed.score.is_nan());
        assert_eq!(parsed.rank, 2);
    }

    #[test]
    fn test_non_finite_inputs_round_trip_as_null() {
        let criterion = Criterion::benefit("c1", "Quality", f64::NAN);
        let json = serde_json::to_string(&criterion).unwrap();
        assert!(json.contains(r#""weight":null"#));
        assert!(serde_json::from_str::<Criterion>(&json).unwrap().weight.is_nan());

        let alt = Alternative::new("a1", "Option A")
            .with_value("c1", f64::INFINITY)
            .with_value("c2", 4.0);
        let json = serde_json::to_string(&alt).unwrap();
        assert!(json.contains(r#""c1":null"#));
        let parsed: Alternative = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.value("c1"), 0.0);
        assert_eq!(parsed.value("c2"), 4.0);
    }

    #[test]
    fn test_non_finite_details_and_normalized_values_reload() {
        let mut normalized = BTreeMap::new();
        normalized.insert("c1".to_string(), f64::NAN);
        normalized.insert("c2".to_string(), 0.5);
        let results = vec![
            MethodResult {
                alternative_id: "a1".to_string(),
                score: f64::NAN,
                rank: 1,
                normalized_values: Some(normalized),
                details: Some(MethodDetails::Topsis {
                    positive_distance: f64::INFINITY,
                    negative_distance: f64::NAN,
                }),
            },
            MethodResult {
                alternative_id: "a2".to_string(),
                score: 0.0,
                rank: 2,
                normalized_values: None,
                details: Some(MethodDetails::Moora {
                    benefit_sum: f64::NAN,
                    cost_sum: 1.0,
                }),
            },
        ];
        let json = serde_json::to_string(&results).unwrap();
        let parsed: Vec<MethodResult> = serde_json::from_str(&json).unwrap();

        let values = parsed[0].normalized_values.as_ref().unwrap();
        assert!(values["c1"].is_nan());
        assert_eq!(values["c2"], 0.5);
        match parsed[0].details {
            Some(MethodDetails::Topsis {
                positive_distance,
                negative_distance,
            }) => {
                assert!(positive_distance.is_nan());
                assert!(negative_distance.is_nan());
            }
            other => panic!("unexpected details: {:?}", other),
        }
        assert!(parsed[1].normalized_values.is_none());
        match parsed[1].details {
            Some(MethodDetails::Moora { benefit_sum, cost_sum }) => {
                assert!(benefit_sum.is_nan());
                assert_eq!(cost_sum, 1.0);
            }
            other => panic!("unexpected details: {:?}", other),
        }
    }

    #[test]
    fn test_details_untagged_parse() {
        let moora: MethodDetails = serde_json::from_str(r#"{"benefitSum":1.0,"costSum":2.0}"#).unwrap();
        assert_eq!(
            moora,
            MethodDetails::Moora {
                benefit_sum: 1.0,
                cost_sum: 2.0
            }
        );
        let wp: MethodDetails = serde_json::from_str(r#"{"vectorS":0.25}"#).unwrap();
        assert_eq!(wp, MethodDetails::Wp { vector_s: 0.25 });
    }
}
