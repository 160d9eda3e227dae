//! Product catalog records
//!
//! A product row carries its identity, category, rating and a nested payload of
//! feature groups. Catalog exports are loose about types, so every field is
//! read leniently: a missing or mistyped value becomes the type default instead
//! of failing the load.

use serde::Serialize;
use serde_json::Value;

/// One vendor product as listed in the catalog.
///
/// Built from raw rows with [`ProductRecord::from_value`]; the serialized form
/// is for output only.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductRecord {
    pub product_name: String,
    pub seller: String,
    pub main_category: String,
    /// Rating on a 0-5 scale, 0 when unknown
    pub rating: f64,
    pub features: FeaturePayload,
}

/// A named group of features, e.g. "Lead Management"
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct FeatureGroup {
    pub category: String,
    pub features: Vec<FeatureRecord>,
}

/// A single declared product feature
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct FeatureRecord {
    pub name: String,
    pub description: String,
    /// Reported adoption percentage
    pub percent: f64,
    pub review_count: f64,
}

/// Parsed state of a product's nested feature payload
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(tag = "state", content = "groups", rename_all = "lowercase")]
pub enum FeaturePayload {
    Present(Vec<FeatureGroup>),
    #[default]
    Absent,
    Malformed,
}

impl FeaturePayload {
    /// Parse a raw payload value.
    ///
    /// Accepts a JSON array of groups or a string holding one (the form a CSV
    /// export stores). Null becomes `Absent`; anything else that is not an
    /// array becomes `Malformed`.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => FeaturePayload::Absent,
            Value::Array(groups) => FeaturePayload::Present(parse_groups(groups)),
            Value::String(raw) => {
                if raw.trim().is_empty() {
                    return FeaturePayload::Absent;
                }
                match serde_json::from_str::<Value>(raw) {
                    Ok(Value::Array(groups)) => FeaturePayload::Present(parse_groups(&groups)),
                    Ok(Value::Null) => FeaturePayload::Absent,
                    _ => FeaturePayload::Malformed,
                }
            }
            _ => FeaturePayload::Malformed,
        }
    }

    /// Feature groups of this payload. `Absent` and `Malformed` have none.
    #[inline]
    pub fn groups(&self) -> &[FeatureGroup] {
        match self {
            FeaturePayload::Present(groups) => groups,
            FeaturePayload::Absent | FeaturePayload::Malformed => &[],
        }
    }

    #[inline]
    pub fn is_present(&self) -> bool {
        matches!(self, FeaturePayload::Present(_))
    }
}

fn parse_groups(groups: &[Value]) -> Vec<FeatureGroup> {
    groups
        .iter()
        .filter_map(Value::as_object)
        .map(|group| FeatureGroup {
            category: group.get("Category").or_else(|| group.get("category"))
                .map(lenient_string)
                .unwrap_or_default(),
            features: group
                .get("features")
                .and_then(Value::as_array)
                .map(|features| {
                    features
                        .iter()
                        .filter_map(Value::as_object)
                        .map(|f| FeatureRecord {
                            name: f.get("name").map(lenient_string).unwrap_or_default(),
                            description: f.get("description").map(lenient_string).unwrap_or_default(),
                            percent: f.get("percent").map(lenient_f64).unwrap_or(0.0),
                            review_count: f.get("review")
                                .or_else(|| f.get("review_count"))
                                .map(lenient_f64)
                                .unwrap_or(0.0),
                        })
                        .collect()
                })
                .unwrap_or_default(),
        })
        .collect()
}

impl ProductRecord {
    /// Build a product from a raw catalog row, tolerating missing columns
    pub fn from_value(row: &Value) -> Self {
        let field = |names: &[&str]| names.iter().find_map(|name| row.get(*name));

        Self {
            product_name: field(&["product_name"]).map(lenient_string).unwrap_or_default(),
            seller: field(&["seller", "vendor"]).map(lenient_string).unwrap_or_default(),
            main_category: field(&["main_category"]).map(lenient_string).unwrap_or_default(),
            rating: field(&["rating"]).map(lenient_f64).unwrap_or(0.0),
            features: field(&["Features", "features"])
                .map(FeaturePayload::from_value)
                .unwrap_or(FeaturePayload::Absent),
        }
    }
}

/// Read a value as text. Null and non-scalar values read as empty.
pub fn lenient_string(value: &Value) -> String {
    match value {
        Value::String(s) if s != "nan" => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Read a value as a finite number; numeric strings are parsed, everything else is 0
pub fn lenient_f64(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}
