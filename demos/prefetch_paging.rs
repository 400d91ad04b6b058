/// Prefetching example
///
/// Consumes a slow paged result set while the next page is fetched in the
/// background, and compares the elapsed time with plain consumption.

use futures::StreamExt;
use rust_graph_results::{GraphResultSet, MemoryPageFetcher, PagedRowSource, RawRow};
use serde_json::json;
use std::time::{Duration, Instant};

const ROWS: usize = 200;
const PAGE_SIZE: usize = 20;
const LATENCY: Duration = Duration::from_millis(20);
const WORK: Duration = Duration::from_millis(1);

fn result_set() -> GraphResultSet<PagedRowSource<MemoryPageFetcher>> {
    let rows = (0..ROWS)
        .map(|i| RawRow::new(json!({"id": i, "label": "person", "type": "vertex"})))
        .collect();
    let fetcher = MemoryPageFetcher::new(rows, PAGE_SIZE).with_latency(LATENCY);
    let first = fetcher.first_page();
    GraphResultSet::new(PagedRowSource::with_first_page(fetcher, first))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Prefetch Paging Example ===\n");

    let plain = result_set();
    let start = Instant::now();
    let mut stream = Box::pin(plain.stream());
    while let Some(result) = stream.next().await {
        result?;
        tokio::time::sleep(WORK).await;
    }
    println!("Without prefetching: {:?}", start.elapsed());

    let prefetched = result_set();
    let start = Instant::now();
    let mut stream = Box::pin(prefetched.prefetching(PAGE_SIZE / 2));
    while let Some(result) = stream.next().await {
        result?;
        tokio::time::sleep(WORK).await;
    }
    println!("With prefetching:    {:?}", start.elapsed());

    // Prefetch explicitly from a separate task, then consume
    let manual = std::sync::Arc::new(result_set());
    let prefetcher = {
        let manual = manual.clone();
        tokio::spawn(async move { manual.fetch_more_results().await })
    };
    let first = manual.one().await?;
    prefetcher.await??;
    println!(
        "\nFirst result: {:?}, buffered after background fetch: {}",
        first.map(|r| r.kind()),
        manual.available_without_fetching()
    );

    for (i, info) in manual.all_execution_info().iter().enumerate() {
        println!("  page {} served by {:?}", i, info.queried_host);
    }

    Ok(())
}
