//! Static per-apartment attributes.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Apartment number, stable across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApartmentId(pub u32);

impl ApartmentId {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ApartmentId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for ApartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One apartment as listed in the apartment configuration.
///
/// Optional services are keys next to the required fields, e.g.
/// `{"apartment": 7, "area_sqm": 45.0, "has_video": true}`. Any other keys
/// (balances, phone numbers) are kept but never affect billing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApartmentProfile {
    #[serde(rename = "apartment", alias = "id")]
    pub id: ApartmentId,
    pub area_sqm: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl ApartmentProfile {
    pub fn new(id: impl Into<ApartmentId>, area_sqm: f64) -> Self {
        Self {
            id: id.into(),
            area_sqm,
            owner: None,
            attributes: Map::new(),
        }
    }

    pub fn with_flag(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.attributes.insert(name.into(), Value::Bool(enabled));
        self
    }

    /// Whether the optional service `name` is enabled. Absent keys, `null`,
    /// `false`, `0` and empty strings read as off.
    pub fn flag(&self, name: &str) -> bool {
        self.attributes.get(name).is_some_and(is_truthy)
    }

    pub fn has_valid_area(&self) -> bool {
        self.area_sqm.is_finite() && self.area_sqm > 0.0
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(enabled) => *enabled,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_flags_from_sibling_keys() {
        let json = r#"{"apartment": 7, "area_sqm": 45.0, "has_video": true}"#;
        let profile: ApartmentProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.id, ApartmentId(7));
        assert_eq!(profile.area_sqm, 45.0);
        assert!(profile.flag("has_video"));
        assert!(!profile.flag("has_parking"));
    }

    #[test]
    fn missing_flags_default_to_false() {
        let json = r#"{"apartment": 12, "area_sqm": 61.2, "owner": "Sadykova"}"#;
        let profile: ApartmentProfile = serde_json::from_str(json).unwrap();
        assert!(profile.attributes.is_empty());
        assert!(!profile.flag("has_video"));
        assert_eq!(profile.owner.as_deref(), Some("Sadykova"));
    }

    #[test]
    fn unrelated_fields_do_not_break_parsing() {
        let json = r#"{"apartment": 7, "area_sqm": 45.0, "has_video": true,
                       "balance": 0, "phone": "+7 700"}"#;
        let profile: ApartmentProfile = serde_json::from_str(json).unwrap();
        assert!(profile.flag("has_video"));
        assert!(!profile.flag("balance"));
        assert!(profile.flag("phone"));
        assert_eq!(profile.attributes["balance"], 0);
    }

    #[test]
    fn non_boolean_flags_follow_truthiness() {
        let json = r#"{"apartment": 3, "area_sqm": 40.0, "has_video": 1, "has_lift": ""}"#;
        let profile: ApartmentProfile = serde_json::from_str(json).unwrap();
        assert!(profile.flag("has_video"));
        assert!(!profile.flag("has_lift"));
    }

    #[test]
    fn area_must_be_positive_and_finite() {
        assert!(ApartmentProfile::new(1, 30.5).has_valid_area());
        assert!(!ApartmentProfile::new(1, 0.0).has_valid_area());
        assert!(!ApartmentProfile::new(1, -4.0).has_valid_area());
        assert!(!ApartmentProfile::new(1, f64::NAN).has_valid_area());
    }
}
