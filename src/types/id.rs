use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// ElementId: opaque identifier of a vertex, edge or vertex property
///
/// Graph backends hand out ids in several shapes: plain strings, integers,
/// or composite maps such as `{"~label": "person", "community_id": 1, "member_id": 0}`.
/// The id is kept exactly as received and compared by value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(JsonValue);

impl ElementId {
    /// Wrap a raw id value
    pub fn new(value: JsonValue) -> Self {
        Self(value)
    }

    /// Get the raw id value
    pub fn as_json(&self) -> &JsonValue {
        &self.0
    }

    /// Take ownership of the raw id value
    pub fn into_json(self) -> JsonValue {
        self.0
    }

    /// The id as a string, if the backend used string ids
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_str()
    }

    /// The id as an integer, if the backend used numeric ids
    pub fn as_i64(&self) -> Option<i64> {
        self.0.as_i64()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            JsonValue::String(s) => write!(f, "{}", s),
            other => write!(f, "{}", other),
        }
    }
}

impl From<JsonValue> for ElementId {
    fn from(value: JsonValue) -> Self {
        Self(value)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(JsonValue::String(value.to_string()))
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        Self(JsonValue::String(value))
    }
}

impl From<i64> for ElementId {
    fn from(value: i64) -> Self {
        Self(JsonValue::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_composite_id_equality() {
        let a = ElementId::new(json!({"~label": "person", "community_id": 1, "member_id": 0}));
        let b = ElementId::new(json!({"member_id": 0, "~label": "person", "community_id": 1}));
        let c = ElementId::new(json!({"~label": "person", "community_id": 1, "member_id": 1}));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(ElementId::from("v-1").to_string(), "v-1");
        assert_eq!(ElementId::from(42).to_string(), "42");
        assert_eq!(
            ElementId::new(json!({"member_id": 3})).to_string(),
            r#"{"member_id":3}"#
        );
    }

    #[test]
    fn test_id_accessors() {
        assert_eq!(ElementId::from("v-1").as_str(), Some("v-1"));
        assert_eq!(ElementId::from(7).as_i64(), Some(7));
        assert_eq!(ElementId::from(7).as_str(), None);
    }
}
