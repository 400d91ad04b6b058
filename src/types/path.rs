use super::{edge::Edge, result::GraphResult, vertex::Vertex};
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;

/// Error types for Path construction
#[derive(Error, Debug)]
pub enum PathError {
    #[error("Path objects and labels count mismatch: {objects} objects, {labels} label sets")]
    LabelCountMismatch { objects: usize, labels: usize },
}

/// Path represents a traversal result
///
/// A path is an ordered sequence of objects, usually alternating vertices
/// and edges: (v1) -[e1]-> (v2) -[e2]-> (v3) ...
/// Each object is paired with the set of step labels it was bound to, which
/// may be empty.
///
/// Invariants:
/// - objects.len() == labels.len()
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Path {
    objects: Vec<GraphResult>,
    labels: Vec<BTreeSet<String>>,
}

impl Path {
    /// Create a path from its objects and per-object label sets
    ///
    /// # Errors
    /// Returns an error if the two sequences differ in length
    pub fn new(
        objects: Vec<GraphResult>,
        labels: Vec<BTreeSet<String>>,
    ) -> Result<Self, PathError> {
        if objects.len() != labels.len() {
            return Err(PathError::LabelCountMismatch {
                objects: objects.len(),
                labels: labels.len(),
            });
        }
        Ok(Self { objects, labels })
    }

    pub fn objects(&self) -> &[GraphResult] {
        &self.objects
    }

    pub fn labels(&self) -> &[BTreeSet<String>] {
        &self.labels
    }

    pub fn object(&self, index: usize) -> Option<&GraphResult> {
        self.objects.get(index)
    }

    pub fn labels_at(&self, index: usize) -> Option<&BTreeSet<String>> {
        self.labels.get(index)
    }

    /// Check that the object at `index` carries exactly `expected` labels
    ///
    /// Order does not matter. Passing no labels checks for an unlabeled object.
    /// An out-of-range index never matches.
    pub fn has_label(&self, index: usize, expected: &[&str]) -> bool {
        match self.labels.get(index) {
            Some(actual) => {
                let expected: BTreeSet<&str> = expected.iter().copied().collect();
                actual.len() == expected.len()
                    && actual.iter().all(|label| expected.contains(label.as_str()))
            }
            None => false,
        }
    }

    /// Objects bound to the given step label, in path order
    pub fn objects_labeled<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a GraphResult> {
        self.objects
            .iter()
            .zip(self.labels.iter())
            .filter(move |(_, labels)| labels.contains(label))
            .map(|(object, _)| object)
    }

    /// Vertices in the path, skipping non-vertex objects
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.objects.iter().filter_map(|o| o.as_vertex().ok())
    }

    /// Edges in the path, skipping non-edge objects
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.objects.iter().filter_map(|o| o.as_edge().ok())
    }

    /// Number of objects in the path
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
