/// Basic usage example for graph query results
///
/// This example demonstrates:
/// 1. Building vertices, edges and paths directly
/// 2. Decoding raw rows into typed results
/// 3. Consuming a paged result set one result at a time
/// 4. Handling accessor mismatches

use rust_graph_results::{
    decode_row, Edge, ElementId, GraphResult, GraphResultSet, MemoryPageFetcher, PagedRowSource,
    Path, Property, RawRow, Vertex,
};
use serde_json::json;
use std::collections::BTreeSet;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("=== Graph Results - Basic Usage Example ===\n");

    // Example 1: Building graph objects
    println!("1. Building Graph Objects");
    println!("{}", "-".repeat(50));

    let alice = Vertex::new(ElementId::from("person:1"), "person")
        .with_property("name", Property::single("Alice"))
        .with_property("age", Property::single(30));
    let bob = Vertex::new(ElementId::from("person:2"), "person")
        .with_property("name", Property::single("Bob"));

    let knows = Edge::new(
        ElementId::from("knows:1"),
        "knows",
        alice.id.clone(),
        "person",
        bob.id.clone(),
        "person",
    )
    .with_property("since", Property::single(2020));

    println!("Vertex {} ({}) name={:?}", alice.id, alice.label, alice.value("name"));
    println!("Edge {} {} -> {}", knows.label, knows.out_v, knows.in_v);
    println!("Edge starts at alice: {}", knows.has_out_v(&alice));

    let labels: Vec<BTreeSet<String>> = vec![
        ["a".to_string()].into_iter().collect(),
        BTreeSet::new(),
        ["b".to_string()].into_iter().collect(),
    ];
    let path = Path::new(
        vec![alice.clone().into(), knows.clone().into(), bob.clone().into()],
        labels,
    )?;
    println!("Path of {} objects, step 0 labeled a: {}\n", path.len(), path.has_label(0, &["a"]));

    // Example 2: Decoding rows
    println!("2. Decoding Rows");
    println!("{}", "-".repeat(50));

    let row = RawRow::from_json_str(
        r#"{"result": {"id": 7, "label": "software", "type": "vertex",
            "properties": {"name": [{"id": "p1", "value": "lop"}]}}}"#,
    )?;
    let decoded = decode_row(&row)?;
    let vertex = decoded.as_vertex()?;
    println!("Decoded {} vertex with name {:?}", vertex.label, vertex.value("name"));

    let scalar = decode_row(&RawRow::new(json!(42)))?;
    println!("Decoded scalar as int: {}", scalar.as_int()?);
    println!("Decoded scalar as double: {}\n", scalar.as_double()?);

    // Example 3: Consuming a result set
    println!("3. Consuming a Result Set");
    println!("{}", "-".repeat(50));

    let rows: Vec<RawRow> = (0..5)
        .map(|i| RawRow::new(json!({"name": format!("row{}", i), "rank": i})))
        .collect();
    let fetcher = MemoryPageFetcher::new(rows, 2);
    let first = fetcher.first_page();
    let result_set = GraphResultSet::new(PagedRowSource::with_first_page(fetcher, first));

    println!("Available without fetching: {}", result_set.available_without_fetching());
    while let Some(result) = result_set.one().await? {
        let map = result.as_map()?;
        println!(
            "  {} (state: {}, buffered: {})",
            map["name"].as_string()?,
            result_set.state(),
            result_set.available_without_fetching()
        );
    }
    println!("Exhausted: {}\n", result_set.is_exhausted().await?);

    // Example 4: Accessor mismatch
    println!("4. Accessor Mismatch");
    println!("{}", "-".repeat(50));

    let edge_result = GraphResult::from(knows);
    match edge_result.as_vertex() {
        Ok(_) => println!("unexpected vertex"),
        Err(err) => println!("Error: {}", err),
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
