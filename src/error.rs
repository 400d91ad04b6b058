/// Error types for result decoding and consumption

use crate::source::FetchError;
use crate::types::{PathError, ResultKind};
use thiserror::Error;

/// Errors surfaced while turning rows into graph results
#[derive(Error, Debug)]
pub enum GraphError {
    /// A row claimed a graph element type but a required field was missing or malformed
    #[error("Decode error at '{field}': {reason}")]
    Decode { field: String, reason: String },

    /// Path objects and labels do not pair up index-for-index
    #[error("Path structure mismatch: {objects} objects, {labels} label sets")]
    StructuralDecode { objects: usize, labels: usize },

    /// Typed accessor called on the wrong variant
    #[error("Invalid cast: expected {expected}, got {actual}")]
    InvalidCast {
        expected: ResultKind,
        actual: ResultKind,
    },

    /// Operation not supported by single-pass consumption
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Page fetch failed in the row source
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Row text was not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GraphError {
    pub(crate) fn decode(field: impl Into<String>, reason: impl Into<String>) -> Self {
        GraphError::Decode {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Prefix the offending field of a decode error with its enclosing location
    pub(crate) fn within(self, parent: &str) -> Self {
        match self {
            GraphError::Decode { field, reason } => {
                let field = if field.starts_with('[') {
                    format!("{}{}", parent, field)
                } else {
                    format!("{}.{}", parent, field)
                };
                GraphError::Decode { field, reason }
            }
            other => other,
        }
    }

    /// Whether the error came from the page fetch rather than from a single row
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, GraphError::Fetch(_))
    }
}

impl From<PathError> for GraphError {
    fn from(err: PathError) -> Self {
        match err {
            PathError::LabelCountMismatch { objects, labels } => {
                GraphError::StructuralDecode { objects, labels }
            }
        }
    }
}

/// Result type for decoding and typed access
pub type DecodeResult<T> = Result<T, GraphError>;
