use super::{id::ElementId, property::Property, result::GraphResult, vertex::Vertex};
use serde::Serialize;
use std::collections::BTreeMap;

/// Edge returned by a graph query
///
/// Represents a directed edge with:
/// - Opaque identifier (ElementId)
/// - Out vertex id and label (source)
/// - In vertex id and label (target)
/// - Label (type/class of the edge)
/// - Properties
///
/// Endpoints are referenced by id and label only; an edge never holds the
/// vertices themselves.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Edge {
    /// Opaque identifier
    pub id: ElementId,

    /// Edge label (e.g., "knows", "created")
    pub label: String,

    /// Source vertex id
    pub out_v: ElementId,

    /// Source vertex label
    pub out_v_label: String,

    /// Target vertex id
    pub in_v: ElementId,

    /// Target vertex label
    pub in_v_label: String,

    /// Properties by name
    pub properties: BTreeMap<String, Property>,
}

impl Edge {
    /// Create an edge with an empty property map
    pub fn new(
        id: ElementId,
        label: impl Into<String>,
        out_v: ElementId,
        out_v_label: impl Into<String>,
        in_v: ElementId,
        in_v_label: impl Into<String>,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            out_v,
            out_v_label: out_v_label.into(),
            in_v,
            in_v_label: in_v_label.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Add a property, replacing any previous one with the same name
    pub fn with_property(mut self, key: impl Into<String>, property: Property) -> Self {
        self.properties.insert(key.into(), property);
        self
    }

    /// Get a property by name, `None` if the edge does not have it
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

    /// Whether the edge leaves the given vertex
    pub fn has_out_v(&self, vertex: &Vertex) -> bool {
        self.out_v == vertex.id
    }

    /// Whether the edge enters the given vertex
    pub fn has_in_v(&self, vertex: &Vertex) -> bool {
        self.in_v == vertex.id
    }

    pub fn has_out_v_label(&self, expected: &str) -> bool {
        self.out_v_label == expected
    }

    pub fn has_in_v_label(&self, expected: &str) -> bool {
        self.in_v_label == expected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn knows() -> Edge {
        Edge::new(
            ElementId::from(7),
            "knows",
            ElementId::from(1),
            "person",
            ElementId::from(4),
            "person",
        )
        .with_property("weight", Property::single(1.0))
    }

    #[test]
    fn test_edge_creation() {
        let edge = knows();

        assert_eq!(edge.id, ElementId::from(7));
        assert!(edge.has_label("knows"));
        assert!(edge.has_out_v_label("person"));
        assert!(edge.has_in_v_label("person"));
        assert!(!edge.has_in_v_label("software"));
    }

    #[test]
    fn test_edge_weight_matches_integer() {
        let edge = knows();
        assert!(edge.has_property("weight", 1));
        assert!(edge.has_property("weight", 1.0));
        assert!(!edge.has_property("weight", 0.4));
    }

    #[test]
    fn test_edge_endpoints() {
        let edge = knows();
        let marko = Vertex::new(ElementId::from(1), "person");
        let josh = Vertex::new(ElementId::from(4), "person");

        assert!(edge.has_out_v(&marko));
        assert!(edge.has_in_v(&josh));
        assert!(!edge.has_in_v(&marko));
        assert!(!edge.has_out_v(&josh));
    }

    #[test]
    fn test_edge_absent_property() {
        assert!(knows().property("since").is_none());
    }
}
