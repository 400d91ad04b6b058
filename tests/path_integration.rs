/// Integration tests for path results
///
/// Feeds path rows shaped like those of the "modern" sample graph through a
/// GraphResultSet and checks objects and step labels.

use rust_graph_results::{
    GraphResult, GraphResultSet, MemoryPageFetcher, PagedRowSource, Path, RawRow,
};
use serde_json::{json, Value as JsonValue};

fn person_id(member_id: i64) -> JsonValue {
    json!({"~label": "person", "community_id": 1368843392, "member_id": member_id})
}

fn software_id(member_id: i64) -> JsonValue {
    json!({"~label": "software", "community_id": 1368843392, "member_id": member_id})
}

fn vertex(id: JsonValue, label: &str, props: &[(&str, JsonValue)]) -> JsonValue {
    let properties: serde_json::Map<String, JsonValue> = props
        .iter()
        .enumerate()
        .map(|(i, (name, value))| {
            (
                name.to_string(),
                json!([{"id": {"local_id": format!("p{}", i)}, "value": value}]),
            )
        })
        .collect();

    json!({
        "id": id,
        "label": label,
        "type": "vertex",
        "properties": properties
    })
}

fn edge(id: &str, label: &str, out_v: (JsonValue, &str), in_v: (JsonValue, &str), weight: f64) -> JsonValue {
    json!({
        "id": {"out_vertex": out_v.0, "local_id": id, "in_vertex": in_v.0, "~type": label},
        "label": label,
        "type": "edge",
        "outV": out_v.0,
        "outVLabel": out_v.1,
        "inV": in_v.0,
        "inVLabel": in_v.1,
        "properties": {"weight": weight}
    })
}

fn marko() -> JsonValue {
    vertex(person_id(0), "person", &[("name", json!("marko")), ("age", json!(29))])
}

fn josh() -> JsonValue {
    vertex(person_id(2), "person", &[("name", json!("josh")), ("age", json!(32))])
}

fn lop() -> JsonValue {
    vertex(software_id(3), "software", &[("name", json!("lop")), ("lang", json!("java"))])
}

fn ripple() -> JsonValue {
    vertex(software_id(4), "software", &[("name", json!("ripple")), ("lang", json!("java"))])
}

/// Both marko -knows-> josh -created-> software paths, labeled as given
fn path_rows(labels: JsonValue) -> Vec<RawRow> {
    let knows = edge("k1", "knows", (person_id(0), "person"), (person_id(2), "person"), 1.0);
    let created_lop = edge("c1", "created", (person_id(2), "person"), (software_id(3), "software"), 0.4);
    let created_ripple = edge("c2", "created", (person_id(2), "person"), (software_id(4), "software"), 1.0);

    [
        json!([marko(), knows.clone(), josh(), created_lop, lop()]),
        json!([marko(), knows, josh(), created_ripple, ripple()]),
    ]
    .into_iter()
    .map(|objects| {
        let text = json!({"result": {"labels": labels.clone(), "objects": objects}}).to_string();
        RawRow::from_json_str(&text).unwrap()
    })
    .collect()
}

fn execute(rows: Vec<RawRow>) -> GraphResultSet<PagedRowSource<MemoryPageFetcher>> {
    let fetcher = MemoryPageFetcher::new(rows, 100);
    let first = fetcher.first_page();
    GraphResultSet::new(PagedRowSource::with_first_page(fetcher, first))
}

fn object(path: &Path, index: usize) -> &GraphResult {
    path.object(index).unwrap()
}

/// Checks marko -knows-> josh -created-> (lop | ripple)
fn validate_path_objects(path: &Path) {
    assert_eq!(path.len(), 5);

    let marko = object(path, 0).as_vertex().unwrap();
    assert!(marko.has_label("person"));
    assert!(marko.has_property("name", "marko"));
    assert!(marko.has_property("age", 29));

    let josh = object(path, 2).as_vertex().unwrap();
    assert!(josh.has_label("person"));
    assert!(josh.has_property("name", "josh"));
    assert!(josh.has_property("age", 32));

    let knows = object(path, 1).as_edge().unwrap();
    assert!(knows.has_label("knows"));
    assert!(knows.has_property("weight", 1));
    assert!(knows.has_out_v_label("person"));
    assert!(knows.has_out_v(marko));
    assert!(knows.has_in_v_label("person"));
    assert!(knows.has_in_v(josh));

    let software = object(path, 4).as_vertex().unwrap();
    let created = object(path, 3).as_edge().unwrap();
    assert!(software.has_label("software"));
    assert!(software.has_property("lang", "java"));
    assert!(created.has_label("created"));
    assert!(created.has_out_v_label("person"));
    assert!(created.has_out_v(josh));
    assert!(created.has_in_v_label("software"));
    assert!(created.has_in_v(software));

    if software.value("name").unwrap().as_string().unwrap() == "lop" {
        assert!(created.has_property("weight", 0.4));
    } else {
        assert!(software.has_property("name", "ripple"));
        assert!(created.has_property("weight", 1.0));
    }
}

#[tokio::test]
async fn test_path_with_some_labels() {
    let rs = execute(path_rows(json!([["a"], [], ["c", "d"], ["e", "f", "g"], []])));
    assert_eq!(rs.available_without_fetching(), 2);

    let mut count = 0;
    while let Some(result) = rs.one().await.unwrap() {
        let path = result.as_path().unwrap();
        validate_path_objects(path);

        assert!(path.has_label(0, &["a"]));
        assert!(path.has_label(1, &[]));
        assert!(path.has_label(2, &["c", "d"]));
        assert!(path.has_label(3, &["e", "f", "g"]));
        assert!(path.has_label(4, &[]));
        count += 1;
    }
    assert_eq!(count, 2);
}

#[tokio::test]
async fn test_path_with_labels() {
    let rs = execute(path_rows(json!([["a"], ["b"], ["c", "d"], ["e", "f", "g"], ["h"]])));
    assert_eq!(rs.available_without_fetching(), 2);

    for result in rs.all().await.unwrap() {
        let result = result.unwrap();
        let path = result.as_path().unwrap();
        validate_path_objects(path);

        assert!(path.has_label(0, &["a"]));
        assert!(path.has_label(1, &["b"]));
        assert!(path.has_label(2, &["d", "c"]));
        assert!(path.has_label(3, &["g", "e", "f"]));
        assert!(path.has_label(4, &["h"]));
    }
}

#[tokio::test]
async fn test_path_without_labels() {
    let rs = execute(path_rows(json!([[], [], [], [], []])));
    assert_eq!(rs.available_without_fetching(), 2);

    let results = rs.all().await.unwrap();
    assert_eq!(results.len(), 2);
    for result in &results {
        let path = result.as_ref().unwrap().as_path().unwrap();
        validate_path_objects(path);

        assert_eq!(path.labels().len(), 5);
        assert!(path.labels().iter().all(|labels| labels.is_empty()));
    }
}

#[tokio::test]
async fn test_path_label_lookup() {
    let rs = execute(path_rows(json!([["a"], [], ["c", "d"], ["e", "f", "g"], []])));
    let result = rs.one().await.unwrap().unwrap();
    let path = result.as_path().unwrap();

    let josh: Vec<_> = path.objects_labeled("c").collect();
    assert_eq!(josh.len(), 1);
    assert!(josh[0].as_vertex().unwrap().has_property("name", "josh"));
    assert_eq!(path.vertices().count(), 3);
    assert_eq!(path.edges().count(), 2);
}

#[tokio::test]
async fn test_vertices_equal_across_rows() {
    let rs = execute(path_rows(json!([[], [], [], [], []])));
    let first = rs.one().await.unwrap().unwrap();
    let second = rs.one().await.unwrap().unwrap();

    let first = first.as_path().unwrap();
    let second = second.as_path().unwrap();

    assert_eq!(first.object(0), second.object(0));
    assert_eq!(first.object(2), second.object(2));
    assert_ne!(first.object(4), second.object(4));
}

#[tokio::test]
async fn test_path_accessor_mismatch() {
    let rs = execute(path_rows(json!([[], [], [], [], []])));
    let result = rs.one().await.unwrap().unwrap();

    assert!(result.as_vertex().is_err());
    assert!(result.as_edge().is_err());
    assert!(result.as_list().is_err());

    let path = result.as_path().unwrap();
    assert!(path.object(1).unwrap().as_vertex().is_err());
    assert!(path.object(0).unwrap().as_edge().is_err());
}
