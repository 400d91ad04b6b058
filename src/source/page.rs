/// Rows, pages and per-fetch metadata produced by the transport

use crate::error::{DecodeResult, GraphError};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use serde_json::Value as JsonValue;

/// One row of query output, already decoded from the wire into a JSON tree
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    payload: JsonValue,
}

impl RawRow {
    /// Wrap an already-extracted result tree
    pub fn new(payload: JsonValue) -> Self {
        Self { payload }
    }

    /// Parse a row as sent by the server: JSON text with the graph payload under `result`
    pub fn from_json_str(text: &str) -> DecodeResult<Self> {
        let envelope: JsonValue = serde_json::from_str(text)?;
        match envelope {
            JsonValue::Object(mut map) => map
                .remove("result")
                .map(Self::new)
                .ok_or_else(|| GraphError::decode("result", "missing from row envelope")),
            _ => Err(GraphError::decode("result", "row envelope is not an object")),
        }
    }

    pub fn payload(&self) -> &JsonValue {
        &self.payload
    }

    pub fn into_payload(self) -> JsonValue {
        self.payload
    }
}

/// Opaque server cursor pointing at the next page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PagingState(Bytes);

impl PagingState {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    /// Encode a row offset, for fetchers that page over in-memory data
    pub fn from_offset(offset: u64) -> Self {
        let mut buf = BytesMut::with_capacity(8);
        buf.put_u64(offset);
        Self(buf.freeze())
    }

    /// Decode a row offset written by [`PagingState::from_offset`]
    pub fn to_offset(&self) -> Option<u64> {
        if self.0.len() != 8 {
            return None;
        }
        let mut buf = self.0.clone();
        Some(buf.get_u64())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Information about one page fetch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionInfo {
    /// Host that served the page
    pub queried_host: Option<String>,

    /// Hosts tried before (and including) the one that answered
    pub tried_hosts: Vec<String>,

    /// Server warnings attached to the response
    pub warnings: Vec<String>,

    /// Cursor to the page after this one, `None` for the last page
    pub paging_state: Option<PagingState>,
}

impl ExecutionInfo {
    /// Execution info for a page served by a single host
    pub fn from_host(host: impl Into<String>) -> Self {
        let host = host.into();
        Self {
            queried_host: Some(host.clone()),
            tried_hosts: vec![host],
            ..Self::default()
        }
    }
}

/// One batch of rows retrieved by a single fetch
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub rows: Vec<RawRow>,

    /// Cursor to the next page, `None` when this is the last page
    pub paging_state: Option<PagingState>,

    pub execution_info: ExecutionInfo,
}

impl Page {
    pub fn new(rows: Vec<RawRow>, paging_state: Option<PagingState>) -> Self {
        Self {
            rows,
            paging_state,
            execution_info: ExecutionInfo::default(),
        }
    }

    /// A page with no further pages after it
    pub fn last(rows: Vec<RawRow>) -> Self {
        Self::new(rows, None)
    }

    pub fn with_execution_info(mut self, info: ExecutionInfo) -> Self {
        self.execution_info = info;
        self
    }

    pub fn is_last(&self) -> bool {
        self.paging_state.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_from_envelope() {
        let row = RawRow::from_json_str(r#"{"result": {"name": "marko"}}"#).unwrap();
        assert_eq!(row.payload(), &json!({"name": "marko"}));
    }

    #[test]
    fn test_row_envelope_without_result() {
        let err = RawRow::from_json_str(r#"{"value": 1}"#).unwrap_err();
        match err {
            GraphError::Decode { field, .. } => assert_eq!(field, "result"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_row_envelope_invalid_json() {
        let err = RawRow::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, GraphError::Json(_)));
    }

    #[test]
    fn test_paging_state_offset() {
        let state = PagingState::from_offset(250);
        assert_eq!(state.as_bytes().len(), 8);
        assert_eq!(state.to_offset(), Some(250));
        assert_eq!(PagingState::new(vec![1u8, 2, 3]).to_offset(), None);
    }

    #[test]
    fn test_page_last() {
        assert!(Page::last(vec![]).is_last());
        assert!(!Page::new(vec![], Some(PagingState::from_offset(1))).is_last());
    }
}
