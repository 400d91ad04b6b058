/// Row source abstraction for paged query results
///
/// This module provides the boundary between result decoding and the transport:
/// - RowSource trait: paged access to raw rows with background page fetches
/// - PageFetcher trait: retrieval of a single page by paging state
/// - PagedRowSource: RowSource over any PageFetcher, at most one fetch in flight
/// - MemoryPageFetcher: pages over rows held in memory

pub mod memory;
pub mod page;
pub mod paged;

pub use memory::MemoryPageFetcher;
pub use page::{ExecutionInfo, Page, PagingState, RawRow};
pub use paged::PagedRowSource;

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use thiserror::Error;

/// Page fetch errors
///
/// Cloneable so that every handle coalesced onto one fetch observes the same failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("No async runtime available to drive the page fetch")]
    NoRuntime,

    #[error("Fetch task failed: {0}")]
    TaskFailed(String),
}

/// Result type for page fetches
pub type FetchResult<T> = Result<T, FetchError>;

/// Handle on a page fetch
///
/// Resolves once the page has been appended to the source's buffer. Clones
/// share the same underlying fetch. Dropping a handle does not cancel the fetch.
#[derive(Clone)]
pub struct FetchHandle {
    inner: Shared<BoxFuture<'static, FetchResult<()>>>,
}

impl FetchHandle {
    pub(crate) fn new(future: BoxFuture<'static, FetchResult<()>>) -> Self {
        Self {
            inner: future.shared(),
        }
    }

    /// A handle that is already complete
    pub fn ready(result: FetchResult<()>) -> Self {
        Self::new(futures::future::ready(result).boxed())
    }

    /// The outcome, if the fetch has completed and the handle has been polled
    pub fn peek(&self) -> Option<&FetchResult<()>> {
        self.inner.peek()
    }

    /// Whether two handles wait on the same fetch
    pub fn ptr_eq(&self, other: &FetchHandle) -> bool {
        self.inner.ptr_eq(&other.inner)
    }
}

impl Future for FetchHandle {
    type Output = FetchResult<()>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}

impl fmt::Debug for FetchHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchHandle")
            .field("complete", &self.peek().is_some())
            .finish()
    }
}

/// Paged access to raw rows
///
/// Implementations keep a buffer of fetched-but-undelivered rows. Consuming
/// calls (`one`, `all`, `is_exhausted`) fetch further pages when the buffer
/// runs dry; `fetch_more_results` starts a fetch without waiting for it.
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Whether no rows remain, fetching pages as needed to find out
    async fn is_exhausted(&self) -> FetchResult<bool>;

    /// Next row, or `None` once every page has been consumed
    async fn one(&self) -> FetchResult<Option<RawRow>>;

    /// Every remaining row across all remaining pages, in order
    async fn all(&self) -> FetchResult<Vec<RawRow>>;

    /// Start fetching the next page, or join the fetch already in flight
    ///
    /// Never blocks. When every page has been fetched the handle is already complete.
    fn fetch_more_results(&self) -> FetchHandle;

    /// Rows buffered and deliverable without another fetch
    fn available_without_fetching(&self) -> usize;

    /// Whether the last page has been retrieved
    fn is_fully_fetched(&self) -> bool;

    /// Execution info of the most recent page fetch
    fn execution_info(&self) -> Option<ExecutionInfo>;

    /// Execution info of every page fetch so far, in fetch order
    fn all_execution_info(&self) -> Vec<ExecutionInfo>;
}

/// Retrieval of a single page from the backend
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page starting at `paging_state`, or the first page when `None`
    async fn fetch_page(&self, paging_state: Option<PagingState>) -> FetchResult<Page>;
}
