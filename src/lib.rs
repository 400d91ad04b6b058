/// Rust Graph Results
///
/// Consumption pipeline for graph query results: paged raw rows in, typed
/// vertices, edges, paths and scalars out, with background prefetching of
/// the next page while already-fetched results are consumed.
///
/// # Architecture
///
/// ```text
/// ┌──────────────────────────────────────────────────┐
/// │           Graph Result Pipeline                  │
/// ├──────────────────────────────────────────────────┤
/// │  ┌────────────────────────────────┐              │
/// │  │   GraphResultSet               │              │
/// │  │   (one / all / stream)         │              │
/// │  └────────────┬───────────────────┘              │
/// │               ↓                                   │
/// │  ┌────────────────────────────────┐              │
/// │  │   Decoder (row → GraphResult)  │              │
/// │  └────────────┬───────────────────┘              │
/// │               ↓                                   │
/// │  ┌────────────────────────────────┐              │
/// │  │   RowSource (paged buffer,     │              │
/// │  │   one fetch in flight)         │              │
/// │  └────────────┬───────────────────┘              │
/// │               ↓                                   │
/// │  ┌────────────────────────────────┐              │
/// │  │   PageFetcher (transport)      │              │
/// │  └────────────────────────────────┘              │
/// └──────────────────────────────────────────────────┘
/// ```
///
/// # Modules
///
/// - `types`: Graph object model (GraphResult, Vertex, Edge, Path, Property)
/// - `decoder`: Row tree to GraphResult classification
/// - `source`: RowSource / PageFetcher traits, paged and in-memory sources
/// - `result_set`: GraphResultSet, cursor and streams
/// - `config`: Paging and logging configuration
/// - `error`: Error types

pub mod config;
pub mod decoder;
pub mod error;
pub mod result_set;
pub mod source;
pub mod types;

// Re-export commonly used types
pub use types::{
    Edge, ElementId, GraphResult, Path, PathError, Property, PropertyValue, ResultKind, Scalar,
    Vertex,
};

// Re-export decoding
pub use decoder::{decode_row, decode_value};
pub use error::{DecodeResult, GraphError};

// Re-export paging types
pub use source::{
    ExecutionInfo, FetchError, FetchHandle, FetchResult, MemoryPageFetcher, Page, PageFetcher,
    PagedRowSource, PagingState, RawRow, RowSource,
};

// Re-export result set types
pub use result_set::{GraphResultSet, ResultCursor, ResultSetState};

pub use config::{ConfigError, LoggingConfig, PagingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
