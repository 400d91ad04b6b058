use super::{id::ElementId, property::Property, result::GraphResult};
use serde::Serialize;
use std::collections::BTreeMap;

/// Vertex returned by a graph query
///
/// Represents a graph vertex with:
/// - Opaque identifier (ElementId)
/// - Label (type/class of the vertex)
/// - Properties, each holding one or many values
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Vertex {
    /// Opaque identifier
    pub id: ElementId,

    /// Vertex label (e.g., "person", "software")
    pub label: String,

    /// Properties by name
    pub properties: BTreeMap<String, Property>,
}

impl Vertex {
    /// Create a vertex with an empty property map
    pub fn new(id: ElementId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Add a property, replacing any previous one with the same name
    pub fn with_property(mut self, key: impl Into<String>, property: Property) -> Self {
        self.properties.insert(key.into(), property);
        self
    }

    /// Get a property by name, `None` if the vertex does not have it
    pub fn property(&self, key: &str) -> Option<&Property> {
        self.properties.get(key)
    }

    /// Get the first value of a property
    pub fn value(&self, key: &str) -> Option<&GraphResult> {
        self.property(key).and_then(Property::value)
    }

    pub fn has_label(&self, expected: &str) -> bool {
        self.label == expected
    }

    /// Check the first value of a property against an expected value
    pub fn has_property(&self, key: &str, expected: impl Into<GraphResult>) -> bool {
        self.value(key) == Some(&expected.into())
    }
}
