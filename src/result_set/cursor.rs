use super::GraphResultSet;
use crate::error::{DecodeResult, GraphError};
use crate::source::RowSource;
use crate::types::GraphResult;
use futures::Stream;
use tracing::trace;

/// Single-pass cursor over a GraphResultSet
///
/// `next` is equivalent to `GraphResultSet::one`; once a result has been
/// returned it cannot be revisited, and creating a new cursor continues from
/// where the previous one stopped. Removal is not supported.
pub struct ResultCursor<'a, S> {
    result_set: &'a GraphResultSet<S>,
    prefetch_threshold: Option<usize>,
    finished: bool,
}

impl<'a, S: RowSource> ResultCursor<'a, S> {
    pub(super) fn new(result_set: &'a GraphResultSet<S>, prefetch_threshold: Option<usize>) -> Self {
        Self {
            result_set,
            prefetch_threshold,
            finished: false,
        }
    }

    /// Whether another result is available; may wait for a page fetch
    pub async fn has_next(&mut self) -> DecodeResult<bool> {
        if self.finished {
            return Ok(false);
        }
        Ok(!self.result_set.is_exhausted().await?)
    }

    /// Next result, `None` once the result set is exhausted
    ///
    /// After a fetch failure the cursor yields that error once and then ends.
    pub async fn next(&mut self) -> Option<DecodeResult<GraphResult>> {
        if self.finished {
            return None;
        }

        self.prefetch_if_low();

        match self.result_set.one().await {
            Ok(Some(result)) => Some(Ok(result)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                if err.is_fetch_error() {
                    self.finished = true;
                }
                Some(Err(err))
            }
        }
    }

    /// Always fails: results cannot be removed from a graph result set
    pub fn remove(&mut self) -> DecodeResult<()> {
        Err(GraphError::UnsupportedOperation(
            "remove on a graph result set cursor".to_string(),
        ))
    }

    /// Turn the cursor into a stream of results
    pub fn into_stream(self) -> impl Stream<Item = DecodeResult<GraphResult>> + 'a {
        futures::stream::unfold(self, |mut cursor| async move {
            let item = cursor.next().await?;
            Some((item, cursor))
        })
    }

    fn prefetch_if_low(&self) {
        let threshold = match self.prefetch_threshold {
            Some(threshold) => threshold,
            None => return,
        };

        let available = self.result_set.available_without_fetching();
        if available <= threshold && !self.result_set.is_fully_fetched() {
            trace!(available, threshold, "requesting next page ahead of consumption");
            // Dropping the handle leaves the fetch running.
            drop(self.result_set.fetch_more_results());
        }
    }
}
