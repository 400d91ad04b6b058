/// RowSource implementation over a PageFetcher
///
/// Keeps fetched rows in a FIFO buffer and allows a single page fetch in
/// flight. Fetches run as tokio tasks so a prefetch started with
/// `fetch_more_results` progresses even if nobody awaits its handle.

use super::{
    ExecutionInfo, FetchError, FetchHandle, FetchResult, Page, PageFetcher, PagingState, RawRow,
    RowSource,
};
use async_trait::async_trait;
use futures::FutureExt;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{debug, warn};

/// Paging progress, guarded by the source mutex
struct PagingProgress {
    /// Fetched rows not yet handed out
    buffer: VecDeque<RawRow>,

    /// Cursor for the next fetch; `None` before the first page
    next_page: Option<PagingState>,

    /// Set once a page without a paging state has been applied
    fully_fetched: bool,

    /// Pages applied so far
    pages_fetched: usize,

    /// One entry per applied page, in fetch order
    execution_info: Vec<ExecutionInfo>,

    /// The fetch currently in flight
    in_flight: Option<FetchHandle>,
}

impl PagingProgress {
    fn new() -> Self {
        Self {
            buffer: VecDeque::new(),
            next_page: None,
            fully_fetched: false,
            pages_fetched: 0,
            execution_info: Vec::new(),
            in_flight: None,
        }
    }

    fn apply(&mut self, page: Page) {
        let Page {
            rows,
            paging_state,
            mut execution_info,
        } = page;

        execution_info.paging_state = paging_state.clone();
        self.buffer.extend(rows);
        self.fully_fetched = paging_state.is_none();
        self.next_page = paging_state;
        self.pages_fetched += 1;
        self.execution_info.push(execution_info);
    }
}

/// What the buffer can offer without waiting
enum Buffered<T> {
    Ready(T),
    Done,
    NeedsFetch,
}

struct SourceInner<F> {
    fetcher: F,
    progress: Mutex<PagingProgress>,
}

impl<F> SourceInner<F> {
    fn complete_fetch(&self, page_index: usize, outcome: FetchResult<Page>) -> FetchResult<()> {
        let mut progress = self.progress.lock();
        progress.in_flight = None;

        match outcome {
            Ok(page) => {
                debug!(
                    page = page_index,
                    rows = page.rows.len(),
                    last = page.is_last(),
                    host = page.execution_info.queried_host.as_deref().unwrap_or("unknown"),
                    "page fetch completed"
                );
                progress.apply(page);
                Ok(())
            }
            Err(err) => {
                warn!(page = page_index, error = %err, "page fetch failed");
                Err(err)
            }
        }
    }
}

/// RowSource backed by a PageFetcher
pub struct PagedRowSource<F> {
    inner: Arc<SourceInner<F>>,
}

impl<F: PageFetcher + 'static> PagedRowSource<F> {
    /// Create a source that has not fetched anything yet
    ///
    /// The first consuming call (or `fetch_more_results`) retrieves the first page.
    pub fn new(fetcher: F) -> Self {
        Self {
            inner: Arc::new(SourceInner {
                fetcher,
                progress: Mutex::new(PagingProgress::new()),
            }),
        }
    }

    /// Create a source from the first page returned by query execution
    pub fn with_first_page(fetcher: F, first_page: Page) -> Self {
        let source = Self::new(fetcher);
        source.inner.progress.lock().apply(first_page);
        source
    }

    /// The underlying page fetcher
    pub fn fetcher(&self) -> &F {
        &self.inner.fetcher
    }

    /// Number of pages retrieved so far
    pub fn pages_fetched(&self) -> usize {
        self.inner.progress.lock().pages_fetched
    }

    /// Whether a page fetch is currently outstanding
    pub fn is_fetching(&self) -> bool {
        self.inner.progress.lock().in_flight.is_some()
    }

    fn take_row(&self) -> Buffered<RawRow> {
        let mut progress = self.inner.progress.lock();
        match progress.buffer.pop_front() {
            Some(row) => Buffered::Ready(row),
            None if progress.fully_fetched => Buffered::Done,
            None => Buffered::NeedsFetch,
        }
    }

    fn drain_rows(&self, out: &mut Vec<RawRow>) -> bool {
        let mut progress = self.inner.progress.lock();
        out.extend(progress.buffer.drain(..));
        progress.fully_fetched
    }

    fn peek_state(&self) -> Buffered<()> {
        let progress = self.inner.progress.lock();
        if !progress.buffer.is_empty() {
            Buffered::Ready(())
        } else if progress.fully_fetched {
            Buffered::Done
        } else {
            Buffered::NeedsFetch
        }
    }

    fn start_fetch(&self) -> FetchHandle {
        let mut progress = self.inner.progress.lock();

        if progress.fully_fetched {
            return FetchHandle::ready(Ok(()));
        }

        if let Some(handle) = &progress.in_flight {
            debug!(
                page = progress.pages_fetched,
                "fetch already in progress, joining it"
            );
            return handle.clone();
        }

        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => return FetchHandle::ready(Err(FetchError::NoRuntime)),
        };

        let page_index = progress.pages_fetched;
        let paging_state = progress.next_page.clone();
        debug!(page = page_index, "starting page fetch");

        // The task takes the lock only after this function releases it, so
        // `in_flight` is always set before the fetch can complete.
        let task_inner = Arc::clone(&self.inner);
        let task = runtime.spawn(async move {
            let outcome = task_inner.fetcher.fetch_page(paging_state).await;
            task_inner.complete_fetch(page_index, outcome)
        });

        let join_inner = Arc::clone(&self.inner);
        let handle = FetchHandle::new(
            async move {
                match task.await {
                    Ok(result) => result,
                    Err(join_err) => {
                        join_inner.progress.lock().in_flight = None;
                        warn!(page = page_index, error = %join_err, "page fetch task aborted");
                        Err(FetchError::TaskFailed(join_err.to_string()))
                    }
                }
            }
            .boxed(),
        );

        progress.in_flight = Some(handle.clone());
        handle
    }
}

#[async_trait]
impl<F: PageFetcher + 'static> RowSource for PagedRowSource<F> {
    async fn is_exhausted(&self) -> FetchResult<bool> {
        loop {
            match self.peek_state() {
                Buffered::Ready(()) => return Ok(false),
                Buffered::Done => return Ok(true),
                Buffered::NeedsFetch => self.start_fetch().await?,
            }
        }
    }

    async fn one(&self) -> FetchResult<Option<RawRow>> {
        loop {
            match self.take_row() {
                Buffered::Ready(row) => return Ok(Some(row)),
                Buffered::Done => return Ok(None),
                Buffered::NeedsFetch => self.start_fetch().await?,
            }
        }
    }

    async fn all(&self) -> FetchResult<Vec<RawRow>> {
        let mut rows = Vec::new();
        while !self.drain_rows(&mut rows) {
            self.start_fetch().await?;
        }
        Ok(rows)
    }

    fn fetch_more_results(&self) -> FetchHandle {
        self.start_fetch()
    }

    fn available_without_fetching(&self) -> usize {
        self.inner.progress.lock().buffer.len()
    }

    fn is_fully_fetched(&self) -> bool {
        self.inner.progress.lock().fully_fetched
    }

    fn execution_info(&self) -> Option<ExecutionInfo> {
        self.inner.progress.lock().execution_info.last().cloned()
    }

    fn all_execution_info(&self) -> Vec<ExecutionInfo> {
        self.inner.progress.lock().execution_info.clone()
    }
}
