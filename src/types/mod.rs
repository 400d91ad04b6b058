/// Graph object model for query results
///
/// This module defines the typed values a decoded row can become:
/// - ElementId: opaque identifier of vertices, edges and properties
/// - GraphResult: tagged value over scalar, map, list, vertex, edge and path
/// - Vertex / Edge: graph elements with (multi-valued) properties
/// - Path: ordered objects paired with per-object label sets

pub mod edge;
pub mod id;
pub mod path;
pub mod property;
pub mod result;
pub mod vertex;

pub use edge::Edge;
pub use id::ElementId;
pub use path::{Path, PathError};
pub use property::{Property, PropertyValue};
pub use result::{GraphResult, ResultKind, Scalar};
pub use vertex::Vertex;
