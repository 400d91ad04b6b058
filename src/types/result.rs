use super::{edge::Edge, path::Path, vertex::Vertex};
use crate::error::{DecodeResult, GraphError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Primitive value carried by a row or a property
///
/// Integers and doubles compare numerically against each other, so a
/// property stored as `1.0` equals an expected `1`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => true,
            (Scalar::Boolean(a), Scalar::Boolean(b)) => a == b,
            (Scalar::Integer(a), Scalar::Integer(b)) => a == b,
            (Scalar::Double(a), Scalar::Double(b)) => a == b,
            (Scalar::Integer(i), Scalar::Double(d)) | (Scalar::Double(d), Scalar::Integer(i)) => {
                *i as f64 == *d
            }
            (Scalar::String(a), Scalar::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Scalar {
    pub fn kind(&self) -> ResultKind {
        match self {
            Scalar::Null => ResultKind::Null,
            Scalar::Boolean(_) => ResultKind::Boolean,
            Scalar::Integer(_) => ResultKind::Integer,
            Scalar::Double(_) => ResultKind::Double,
            Scalar::String(_) => ResultKind::String,
        }
    }
}

/// Kind of value a GraphResult holds, used in cast errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultKind {
    Null,
    Boolean,
    Integer,
    Double,
    String,
    Map,
    List,
    Vertex,
    Edge,
    Path,
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResultKind::Null => "null",
            ResultKind::Boolean => "boolean",
            ResultKind::Integer => "integer",
            ResultKind::Double => "double",
            ResultKind::String => "string",
            ResultKind::Map => "map",
            ResultKind::List => "list",
            ResultKind::Vertex => "vertex",
            ResultKind::Edge => "edge",
            ResultKind::Path => "path",
        };
        f.write_str(name)
    }
}

/// One decoded row of a graph query
///
/// Exactly one variant is active. The `as_*` accessors return the typed view
/// when the variant matches and an `InvalidCast` error otherwise; nothing is
/// coerced except integer-to-double widening in `as_double`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GraphResult {
    Scalar(Scalar),
    Map(BTreeMap<String, GraphResult>),
    List(Vec<GraphResult>),
    Vertex(Vertex),
    Edge(Edge),
    Path(Path),
}

impl GraphResult {
    pub fn kind(&self) -> ResultKind {
        match self {
            GraphResult::Scalar(s) => s.kind(),
            GraphResult::Map(_) => ResultKind::Map,
            GraphResult::List(_) => ResultKind::List,
            GraphResult::Vertex(_) => ResultKind::Vertex,
            GraphResult::Edge(_) => ResultKind::Edge,
            GraphResult::Path(_) => ResultKind::Path,
        }
    }

    fn mismatch(&self, expected: ResultKind) -> GraphError {
        GraphError::InvalidCast {
            expected,
            actual: self.kind(),
        }
    }

    pub fn as_vertex(&self) -> DecodeResult<&Vertex> {
        match self {
            GraphResult::Vertex(v) => Ok(v),
            _ => Err(self.mismatch(ResultKind::Vertex)),
        }
    }

    pub fn as_edge(&self) -> DecodeResult<&Edge> {
        match self {
            GraphResult::Edge(e) => Ok(e),
            _ => Err(self.mismatch(ResultKind::Edge)),
        }
    }

    pub fn as_path(&self) -> DecodeResult<&Path> {
        match self {
            GraphResult::Path(p) => Ok(p),
            _ => Err(self.mismatch(ResultKind::Path)),
        }
    }

    pub fn as_string(&self) -> DecodeResult<&str> {
        match self {
            GraphResult::Scalar(Scalar::String(s)) => Ok(s),
            _ => Err(self.mismatch(ResultKind::String)),
        }
    }

    pub fn as_int(&self) -> DecodeResult<i64> {
        match self {
            GraphResult::Scalar(Scalar::Integer(i)) => Ok(*i),
            _ => Err(self.mismatch(ResultKind::Integer)),
        }
    }

    /// Double value; integers widen, everything else is a cast error
    pub fn as_double(&self) -> DecodeResult<f64> {
        match self {
            GraphResult::Scalar(Scalar::Double(d)) => Ok(*d),
            GraphResult::Scalar(Scalar::Integer(i)) => Ok(*i as f64),
            _ => Err(self.mismatch(ResultKind::Double)),
        }
    }

    pub fn as_boolean(&self) -> DecodeResult<bool> {
        match self {
            GraphResult::Scalar(Scalar::Boolean(b)) => Ok(*b),
            _ => Err(self.mismatch(ResultKind::Boolean)),
        }
    }

    pub fn as_map(&self) -> DecodeResult<&BTreeMap<String, GraphResult>> {
        match self {
            GraphResult::Map(m) => Ok(m),
            _ => Err(self.mismatch(ResultKind::Map)),
        }
    }

    pub fn as_list(&self) -> DecodeResult<&[GraphResult]> {
        match self {
            GraphResult::List(items) => Ok(items),
            _ => Err(self.mismatch(ResultKind::List)),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, GraphResult::Scalar(Scalar::Null))
    }

    /// Look up a key when this result is a map
    pub fn get(&self, key: &str) -> Option<&GraphResult> {
        match self {
            GraphResult::Map(m) => m.get(key),
            _ => None,
        }
    }
}

impl From<Scalar> for GraphResult {
    fn from(value: Scalar) -> Self {
        GraphResult::Scalar(value)
    }
}

impl From<&str> for GraphResult {
    fn from(value: &str) -> Self {
        GraphResult::Scalar(Scalar::String(value.to_string()))
    }
}

impl From<String> for GraphResult {
    fn from(value: String) -> Self {
        GraphResult::Scalar(Scalar::String(value))
    }
}

impl From<i32> for GraphResult {
    fn from(value: i32) -> Self {
        GraphResult::Scalar(Scalar::Integer(value as i64))
    }
}

impl From<i64> for GraphResult {
    fn from(value: i64) -> Self {
        GraphResult::Scalar(Scalar::Integer(value))
    }
}

impl From<f64> for GraphResult {
    fn from(value: f64) -> Self {
        GraphResult::Scalar(Scalar::Double(value))
    }
}

impl From<bool> for GraphResult {
    fn from(value: bool) -> Self {
        GraphResult::Scalar(Scalar::Boolean(value))
    }
}

impl From<Vertex> for GraphResult {
    fn from(value: Vertex) -> Self {
        GraphResult::Vertex(value)
    }
}

impl From<Edge> for GraphResult {
    fn from(value: Edge) -> Self {
        GraphResult::Edge(value)
    }
}

impl From<Path> for GraphResult {
    fn from(value: Path) -> Self {
        GraphResult::Path(value)
    }
}
