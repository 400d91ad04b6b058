use super::{id::ElementId, result::GraphResult};
use serde::Serialize;
use std::collections::BTreeMap;

/// One value of a (possibly multi-valued) property
///
/// Vertex property values may carry their own id and meta-properties;
/// edge property values never do.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyValue {
    /// Property id, when the backend assigns one
    pub id: Option<ElementId>,

    /// The value itself
    pub value: GraphResult,

    /// Meta-properties attached to this value
    pub properties: BTreeMap<String, GraphResult>,
}

impl PropertyValue {
    /// Create a bare property value with no id or meta-properties
    pub fn new(value: impl Into<GraphResult>) -> Self {
        Self {
            id: None,
            value: value.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Attach a property id
    pub fn with_id(mut self, id: ElementId) -> Self {
        self.id = Some(id);
        self
    }

    /// Attach a meta-property
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<GraphResult>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// A named property: one or many values in server order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Property {
    values: Vec<PropertyValue>,
}

impl Property {
    pub fn new(values: Vec<PropertyValue>) -> Self {
        Self { values }
    }

    /// Single-valued property
    pub fn single(value: impl Into<GraphResult>) -> Self {
        Self::new(vec![PropertyValue::new(value)])
    }

    /// First value only. Additional values of a multi-property are ignored.
    pub fn value(&self) -> Option<&GraphResult> {
        self.values.first().map(|v| &v.value)
    }

    pub fn values(&self) -> &[PropertyValue] {
        &self.values
    }

    pub fn is_multi_valued(&self) -> bool {
        self.values.len() > 1
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_value_of_multi_property() {
        let prop = Property::new(vec![
            PropertyValue::new("santa fe"),
            PropertyValue::new("brussels"),
        ]);

        assert!(prop.is_multi_valued());
        assert_eq!(prop.len(), 2);
        assert_eq!(prop.value(), Some(&GraphResult::from("santa fe")));
    }

    #[test]
    fn test_empty_property_has_no_value() {
        let prop = Property::new(Vec::new());
        assert!(prop.is_empty());
        assert_eq!(prop.value(), None);
    }

    #[test]
    fn test_value_with_meta() {
        let value = PropertyValue::new("santa fe")
            .with_id(ElementId::from("p-1"))
            .with_meta("startTime", 1997);

        assert_eq!(value.id, Some(ElementId::from("p-1")));
        assert_eq!(value.properties.get("startTime"), Some(&GraphResult::from(1997)));
    }
}
