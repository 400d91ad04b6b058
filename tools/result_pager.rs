use anyhow::{Context, Result};
use clap::Parser;
use futures::StreamExt;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_graph_results::{
    GraphResultSet, MemoryPageFetcher, PagedRowSource, PagingConfig, RawRow,
};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LABELS: &[&str] = &["person", "software", "company"];
const NAMES: &[&str] = &["marko", "vadas", "josh", "peter", "lop", "ripple"];

#[derive(Parser, Debug)]
#[command(name = "result_pager")]
#[command(about = "Pages generated graph rows through a prefetching result set", long_about = None)]
struct Args {
    /// Number of generated vertex rows
    #[arg(short, long, default_value_t = 1000)]
    rows: usize,

    /// Rows per page (overrides configuration)
    #[arg(short = 'p', long)]
    page_size: Option<usize>,

    /// Simulated fetch latency in milliseconds (overrides configuration)
    #[arg(short, long)]
    latency_ms: Option<u64>,

    /// Prefetch threshold (overrides configuration)
    #[arg(short = 't', long)]
    threshold: Option<usize>,

    /// Simulated per-row processing time in microseconds
    #[arg(long, default_value_t = 0)]
    work_us: u64,

    /// JSON configuration file; environment variables are used otherwise
    #[arg(short, long)]
    config: Option<String>,

    /// Output JSON results to file
    #[arg(short, long)]
    output: Option<String>,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Debug, Serialize)]
struct PagingReport {
    rows: usize,
    page_size: usize,
    prefetch_threshold: usize,
    fetch_latency_ms: u64,
    results: usize,
    decode_errors: usize,
    pages_fetched: usize,
    fetch_calls: usize,
    elapsed_ms: f64,
    results_per_sec: f64,
    labels: BTreeMap<String, usize>,
}

fn init_logging(config: &PagingConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

fn load_config(args: &Args) -> Result<PagingConfig> {
    let mut config = match &args.config {
        Some(path) => PagingConfig::from_json_file(path)
            .with_context(|| format!("failed to load configuration from {}", path))?,
        None => PagingConfig::from_env()?,
    };

    if let Some(page_size) = args.page_size {
        config.page_size = page_size;
    }
    if let Some(latency_ms) = args.latency_ms {
        config.fetch_latency_ms = latency_ms;
    }
    if let Some(threshold) = args.threshold {
        config.prefetch_threshold = threshold;
    }

    Ok(config)
}

/// Generate vertex rows as the server sends them, wrapped in a result envelope
fn generate_rows(count: usize, seed: u64) -> Result<Vec<RawRow>> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count)
        .map(|i| {
            let label = LABELS[rng.gen_range(0..LABELS.len())];
            let name = NAMES[rng.gen_range(0..NAMES.len())];
            let envelope = json!({
                "result": {
                    "id": {"~label": label, "community_id": 1, "member_id": i},
                    "label": label,
                    "type": "vertex",
                    "properties": {
                        "name": [{"id": {"local_id": format!("n{}", i)}, "value": name}],
                        "age": [{"id": {"local_id": format!("a{}", i)}, "value": rng.gen_range(18..80)}]
                    }
                }
            });
            Ok(RawRow::from_json_str(&envelope.to_string())?)
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = load_config(&args)?;
    init_logging(&config)?;

    println!("=== Result Pager Configuration ===");
    println!("Rows: {}", args.rows);
    println!("Page size: {}", config.page_size);
    println!("Fetch latency: {}ms", config.fetch_latency_ms);
    println!("Prefetch threshold: {}", config.prefetch_threshold);
    println!("==================================\n");

    let rows = generate_rows(args.rows, args.seed)?;
    let fetcher = MemoryPageFetcher::from_config(rows, &config);
    let first = fetcher.first_page();
    let result_set = GraphResultSet::new(PagedRowSource::with_first_page(fetcher, first));

    tracing::info!(
        available = result_set.available_without_fetching(),
        "first page received"
    );

    let work = Duration::from_micros(args.work_us);
    let mut labels: BTreeMap<String, usize> = BTreeMap::new();
    let mut results = 0;
    let mut decode_errors = 0;

    let start = Instant::now();
    let mut stream = Box::pin(result_set.prefetching(config.prefetch_threshold));
    while let Some(item) = stream.next().await {
        match item {
            Ok(result) => {
                results += 1;
                if let Ok(vertex) = result.as_vertex() {
                    *labels.entry(vertex.label.clone()).or_insert(0) += 1;
                }
                if !work.is_zero() {
                    tokio::time::sleep(work).await;
                }
            }
            Err(err) if err.is_fetch_error() => {
                return Err(err).context("page fetch failed");
            }
            Err(err) => {
                decode_errors += 1;
                tracing::warn!(error = %err, "skipping undecodable row");
            }
        }
    }
    drop(stream);
    let elapsed = start.elapsed();

    let source = result_set.source();
    let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
    let report = PagingReport {
        rows: args.rows,
        page_size: source.fetcher().page_size(),
        prefetch_threshold: config.prefetch_threshold,
        fetch_latency_ms: config.fetch_latency_ms,
        results,
        decode_errors,
        pages_fetched: source.pages_fetched(),
        fetch_calls: source.fetcher().fetch_count(),
        elapsed_ms,
        results_per_sec: if elapsed_ms > 0.0 {
            results as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        },
        labels,
    };

    println!("=== Paging Results ===");
    println!("Results: {} ({} decode errors)", report.results, report.decode_errors);
    println!("Pages: {} ({} fetches)", report.pages_fetched, report.fetch_calls);
    println!("Elapsed: {:.2}ms", report.elapsed_ms);
    println!("Throughput: {:.0} results/sec", report.results_per_sec);
    for (label, count) in &report.labels {
        println!("  {}: {}", label, count);
    }

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)?;
        println!("\nResults written to {}", path);
    }

    Ok(())
}
