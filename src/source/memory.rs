/// In-memory page fetcher
///
/// Serves a fixed vector of rows in pages of `page_size`, optionally
/// sleeping before each page to stand in for network latency.

use super::{ExecutionInfo, FetchError, FetchResult, Page, PageFetcher, PagingState, RawRow};
use crate::config::PagingConfig;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Default host name reported in execution info
const MEMORY_HOST: &str = "memory";

pub struct MemoryPageFetcher {
    rows: Vec<RawRow>,
    page_size: usize,
    latency: Duration,
    host: String,
    fetches: AtomicUsize,
}

impl MemoryPageFetcher {
    /// Create a fetcher over `rows`; a zero page size is treated as one
    pub fn new(rows: Vec<RawRow>, page_size: usize) -> Self {
        Self {
            rows,
            page_size: page_size.max(1),
            latency: Duration::ZERO,
            host: MEMORY_HOST.to_string(),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Create a fetcher using the configured page size and latency
    pub fn from_config(rows: Vec<RawRow>, config: &PagingConfig) -> Self {
        Self::new(rows, config.page_size).with_latency(config.fetch_latency())
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Number of `fetch_page` calls served so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The first page, as query execution would return it
    ///
    /// Does not count as a fetch.
    pub fn first_page(&self) -> Page {
        self.page_at(0)
    }

    fn page_at(&self, offset: usize) -> Page {
        let start = offset.min(self.rows.len());
        let end = start.saturating_add(self.page_size).min(self.rows.len());
        let paging_state = if end < self.rows.len() {
            Some(PagingState::from_offset(end as u64))
        } else {
            None
        };

        Page::new(self.rows[start..end].to_vec(), paging_state)
            .with_execution_info(ExecutionInfo::from_host(self.host.clone()))
    }
}

#[async_trait]
impl PageFetcher for MemoryPageFetcher {
    async fn fetch_page(&self, paging_state: Option<PagingState>) -> FetchResult<Page> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let offset = match paging_state {
            None => 0,
            Some(state) => state
                .to_offset()
                .ok_or_else(|| FetchError::Transport("invalid paging state".to_string()))?
                as usize,
        };

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        Ok(self.page_at(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(n: usize) -> Vec<RawRow> {
        (0..n).map(|i| RawRow::new(json!(i))).collect()
    }

    #[tokio::test]
    async fn test_pages_follow_paging_state() {
        let fetcher = MemoryPageFetcher::new(rows(5), 2);

        let first = fetcher.fetch_page(None).await.unwrap();
        assert_eq!(first.rows, rows(5)[0..2].to_vec());

        let second = fetcher.fetch_page(first.paging_state).await.unwrap();
        assert_eq!(second.rows, rows(5)[2..4].to_vec());

        let third = fetcher.fetch_page(second.paging_state).await.unwrap();
        assert_eq!(third.rows, rows(5)[4..].to_vec());
        assert!(third.is_last());

        assert_eq!(fetcher.fetch_count(), 3);
    }

    #[tokio::test]
    async fn test_invalid_paging_state() {
        let fetcher = MemoryPageFetcher::new(rows(5), 2);
        let result = fetcher
            .fetch_page(Some(PagingState::new(vec![0u8; 3])))
            .await;
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }

    #[test]
    fn test_first_page_does_not_count() {
        let fetcher = MemoryPageFetcher::new(rows(3), 0).with_host("10.0.0.1");
        let page = fetcher.first_page();

        assert_eq!(fetcher.page_size(), 1);
        assert_eq!(page.rows.len(), 1);
        assert_eq!(
            page.execution_info.queried_host.as_deref(),
            Some("10.0.0.1")
        );
        assert_eq!(fetcher.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_huge_page_size_serves_everything() {
        let config = PagingConfig {
            page_size: usize::MAX,
            ..PagingConfig::default()
        };
        let fetcher = MemoryPageFetcher::from_config(rows(5), &config);

        let first = fetcher.first_page();
        assert_eq!(first.rows, rows(5));
        assert!(first.is_last());

        let page = fetcher
            .fetch_page(Some(PagingState::from_offset(3)))
            .await
            .unwrap();
        assert_eq!(page.rows, rows(5)[3..].to_vec());
        assert!(page.is_last());
    }

    #[test]
    fn test_empty_rows_single_last_page() {
        let fetcher = MemoryPageFetcher::new(Vec::new(), 10);
        let page = fetcher.first_page();
        assert!(page.rows.is_empty());
        assert!(page.is_last());
    }
}
