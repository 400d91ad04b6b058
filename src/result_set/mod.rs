/// Graph result set
///
/// Consumes a RowSource one row at a time, decoding each row into a
/// GraphResult. Consumption is irreversible: nothing already handed out is
/// kept. Prefetching is driven through `fetch_more_results`, which may be
/// called from another task while this one consumes.

mod cursor;

pub use cursor::ResultCursor;

use crate::decoder::decode_row;
use crate::error::DecodeResult;
use crate::source::{ExecutionInfo, FetchHandle, RowSource};
use crate::types::GraphResult;
use futures::Stream;
use std::fmt;

/// Consumption state, as observable without fetching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSetState {
    /// Buffered rows are available
    Ready,
    /// Nothing buffered but more pages exist
    AwaitingFetch,
    /// Nothing buffered and no more pages
    Exhausted,
}

impl fmt::Display for ResultSetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResultSetState::Ready => "ready",
            ResultSetState::AwaitingFetch => "awaiting-fetch",
            ResultSetState::Exhausted => "exhausted",
        };
        f.write_str(name)
    }
}

/// The result of a graph query
pub struct GraphResultSet<S> {
    source: S,
}

impl<S: RowSource> GraphResultSet<S> {
    /// Wrap the row source of an executed graph query
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Current state, derived from the buffer and paging progress without fetching
    pub fn state(&self) -> ResultSetState {
        if self.source.available_without_fetching() > 0 {
            ResultSetState::Ready
        } else if !self.source.is_fully_fetched() {
            ResultSetState::AwaitingFetch
        } else {
            ResultSetState::Exhausted
        }
    }

    /// Whether there are no more results
    ///
    /// Waits for a page fetch when the buffer is empty and more pages exist.
    pub async fn is_exhausted(&self) -> DecodeResult<bool> {
        Ok(self.source.is_exhausted().await?)
    }

    /// Next result, or `None` when there are no more
    ///
    /// A row that fails to decode is consumed; the following call moves on to
    /// the next row.
    pub async fn one(&self) -> DecodeResult<Option<GraphResult>> {
        match self.source.one().await? {
            Some(row) => decode_row(&row).map(Some),
            None => Ok(None),
        }
    }

    /// All remaining results, fetching every remaining page
    ///
    /// Each row is decoded on its own, so a malformed row shows up as an
    /// `Err` entry in its position while the rows around it are still
    /// returned. The outer error is a page fetch failure.
    ///
    /// Holds the whole remainder in memory; prefer `one` or `stream` for large
    /// result sets. The result set is exhausted afterwards, and an exhausted
    /// result set yields an empty vector.
    pub async fn all(&self) -> DecodeResult<Vec<DecodeResult<GraphResult>>> {
        let rows = self.source.all().await?;
        Ok(rows.iter().map(decode_row).collect())
    }

    /// Single-pass cursor over the remaining results
    pub fn cursor(&self) -> ResultCursor<'_, S> {
        ResultCursor::new(self, None)
    }

    /// Stream of the remaining results
    ///
    /// The stream ends after a fetch failure; decode failures are yielded and
    /// consumption continues.
    pub fn stream(&self) -> impl Stream<Item = DecodeResult<GraphResult>> + '_ {
        self.cursor().into_stream()
    }

    /// Stream that requests the next page whenever at most `threshold`
    /// buffered rows remain
    pub fn prefetching(
        &self,
        threshold: usize,
    ) -> impl Stream<Item = DecodeResult<GraphResult>> + '_ {
        ResultCursor::new(self, Some(threshold)).into_stream()
    }

    /// Number of results that can be retrieved without waiting on a fetch
    pub fn available_without_fetching(&self) -> usize {
        self.source.available_without_fetching()
    }

    /// Whether every page has been fetched
    ///
    /// When true, `available_without_fetching` is the number of results left.
    pub fn is_fully_fetched(&self) -> bool {
        self.source.is_fully_fetched()
    }

    /// Start fetching the next page without waiting for it
    ///
    /// Only one page is fetched at a time: while a fetch is in progress this
    /// returns a handle on that fetch. When the result set is fully fetched the
    /// handle completes immediately without error.
    pub fn fetch_more_results(&self) -> FetchHandle {
        self.source.fetch_more_results()
    }

    /// Execution info of the most recent page fetch
    pub fn execution_info(&self) -> Option<ExecutionInfo> {
        self.source.execution_info()
    }

    /// Execution info of every page fetch, in the order they were made
    pub fn all_execution_info(&self) -> Vec<ExecutionInfo> {
        self.source.all_execution_info()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }
}

impl<S> fmt::Debug for GraphResultSet<S>
where
    S: RowSource,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphResultSet")
            .field("available", &self.source.available_without_fetching())
            .field("fully_fetched", &self.source.is_fully_fetched())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use crate::source::{MemoryPageFetcher, PagedRowSource, RawRow};
    use serde_json::json;

    fn result_set(
        values: Vec<serde_json::Value>,
        page_size: usize,
    ) -> GraphResultSet<PagedRowSource<MemoryPageFetcher>> {
        let rows = values.into_iter().map(RawRow::new).collect();
        let fetcher = MemoryPageFetcher::new(rows, page_size);
        let first = fetcher.first_page();
        GraphResultSet::new(PagedRowSource::with_first_page(fetcher, first))
    }

    #[tokio::test]
    async fn test_state_transitions() {
        let rs = result_set(vec![json!(1), json!(2), json!(3)], 2);
        assert_eq!(rs.state(), ResultSetState::Ready);

        rs.one().await.unwrap();
        rs.one().await.unwrap();
        assert_eq!(rs.state(), ResultSetState::AwaitingFetch);

        rs.one().await.unwrap();
        assert_eq!(rs.state(), ResultSetState::Exhausted);
        assert_eq!(rs.one().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_decode_error_does_not_poison() {
        let rs = result_set(
            vec![json!({"type": "vertex", "label": "x"}), json!("after")],
            10,
        );

        assert!(matches!(rs.one().await, Err(GraphError::Decode { .. })));
        assert_eq!(
            rs.one().await.unwrap(),
            Some(GraphResult::from("after"))
        );
    }

    #[tokio::test]
    async fn test_all_on_exhausted_is_empty() {
        let rs = result_set(vec![json!(1)], 10);
        let results = rs.all().await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].as_ref().unwrap(), &GraphResult::from(1));
        assert!(rs.all().await.unwrap().is_empty());
        assert_eq!(rs.state(), ResultSetState::Exhausted);
    }

    #[tokio::test]
    async fn test_all_keeps_rows_around_malformed_row() {
        let rs = result_set(
            vec![
                json!("first"),
                json!({"type": "vertex", "label": "x"}),
                json!("third"),
            ],
            2,
        );

        let results = rs.all().await.unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap(), &GraphResult::from("first"));
        match &results[1] {
            Err(GraphError::Decode { field, .. }) => assert_eq!(field, "id"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(results[2].as_ref().unwrap(), &GraphResult::from("third"));
        assert_eq!(rs.state(), ResultSetState::Exhausted);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ResultSetState::AwaitingFetch.to_string(), "awaiting-fetch");
    }
}
