/// Graph element decoder
///
/// Maps the JSON tree of one row onto a GraphResult:
/// - `{"type": "vertex", ...}` becomes a Vertex
/// - `{"type": "edge", ...}` becomes an Edge
/// - `{"objects": [...], "labels": [...]}` becomes a Path, objects decoded recursively
/// - anything else mirrors the tree: object -> Map, array -> List, primitive -> Scalar
///
/// A recognized element type with a missing or malformed field is a decode
/// error naming the field. Unrecognized shapes never fail.

use crate::error::{DecodeResult, GraphError};
use crate::source::RawRow;
use crate::types::{
    Edge, ElementId, GraphResult, Path, Property, PropertyValue, Scalar, Vertex,
};
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::collections::{BTreeMap, BTreeSet};
use tracing::trace;

const TYPE_VERTEX: &str = "vertex";
const TYPE_EDGE: &str = "edge";

/// Decode one row into a GraphResult
pub fn decode_row(row: &RawRow) -> DecodeResult<GraphResult> {
    let result = decode_value(row.payload())?;
    trace!(kind = %result.kind(), "decoded row");
    Ok(result)
}

/// Decode any JSON tree into a GraphResult
pub fn decode_value(value: &JsonValue) -> DecodeResult<GraphResult> {
    match value {
        JsonValue::Object(map) => decode_object(map),
        JsonValue::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| decode_value(item).map_err(|e| e.within(&format!("[{}]", i))))
            .collect::<DecodeResult<Vec<_>>>()
            .map(GraphResult::List),
        other => Ok(GraphResult::Scalar(decode_scalar(other))),
    }
}

fn decode_object(map: &JsonMap<String, JsonValue>) -> DecodeResult<GraphResult> {
    match map.get("type").and_then(JsonValue::as_str) {
        Some(TYPE_VERTEX) => decode_vertex(map).map(GraphResult::Vertex),
        Some(TYPE_EDGE) => decode_edge(map).map(GraphResult::Edge),
        _ if is_path(map) => decode_path(map).map(GraphResult::Path),
        _ => decode_map(map).map(GraphResult::Map),
    }
}

fn decode_scalar(value: &JsonValue) -> Scalar {
    match value {
        JsonValue::Bool(b) => Scalar::Boolean(*b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Scalar::Integer(i),
            None => n.as_f64().map(Scalar::Double).unwrap_or(Scalar::Null),
        },
        JsonValue::String(s) => Scalar::String(s.clone()),
        _ => Scalar::Null,
    }
}

fn decode_map(map: &JsonMap<String, JsonValue>) -> DecodeResult<BTreeMap<String, GraphResult>> {
    map.iter()
        .map(|(key, value)| {
            decode_value(value)
                .map(|decoded| (key.clone(), decoded))
                .map_err(|e| e.within(key))
        })
        .collect()
}

fn is_path(map: &JsonMap<String, JsonValue>) -> bool {
    matches!(
        (map.get("objects"), map.get("labels")),
        (Some(JsonValue::Array(_)), Some(JsonValue::Array(_)))
    )
}

fn decode_vertex(map: &JsonMap<String, JsonValue>) -> DecodeResult<Vertex> {
    Ok(Vertex {
        id: required_id(map, "id")?,
        label: required_str(map, "label")?,
        properties: decode_properties(map, true)?,
    })
}

fn decode_edge(map: &JsonMap<String, JsonValue>) -> DecodeResult<Edge> {
    Ok(Edge {
        id: required_id(map, "id")?,
        label: required_str(map, "label")?,
        out_v: required_id(map, "outV")?,
        out_v_label: required_str(map, "outVLabel")?,
        in_v: required_id(map, "inV")?,
        in_v_label: required_str(map, "inVLabel")?,
        properties: decode_properties(map, false)?,
    })
}

fn decode_path(map: &JsonMap<String, JsonValue>) -> DecodeResult<Path> {
    let (objects, labels) = match (map.get("objects"), map.get("labels")) {
        (Some(JsonValue::Array(objects)), Some(JsonValue::Array(labels))) => (objects, labels),
        _ => return Err(GraphError::decode("objects", "path requires objects and labels arrays")),
    };

    if objects.len() != labels.len() {
        return Err(GraphError::StructuralDecode {
            objects: objects.len(),
            labels: labels.len(),
        });
    }

    let objects = objects
        .iter()
        .enumerate()
        .map(|(i, object)| {
            decode_value(object).map_err(|e| e.within(&format!("objects[{}]", i)))
        })
        .collect::<DecodeResult<Vec<_>>>()?;

    let labels = labels
        .iter()
        .enumerate()
        .map(|(i, entry)| decode_label_set(entry, i))
        .collect::<DecodeResult<Vec<_>>>()?;

    Ok(Path::new(objects, labels)?)
}

/// Labels of one path step: an array of strings, a lone string, or null for none
fn decode_label_set(entry: &JsonValue, index: usize) -> DecodeResult<BTreeSet<String>> {
    let field = || format!("labels[{}]", index);

    match entry {
        JsonValue::Null => Ok(BTreeSet::new()),
        JsonValue::String(label) => Ok(BTreeSet::from([label.clone()])),
        JsonValue::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| GraphError::decode(field(), "label is not a string"))
            })
            .collect(),
        _ => Err(GraphError::decode(field(), "expected an array of labels")),
    }
}

/// Properties of a vertex or edge; absent means none
///
/// Vertex property entries are `{id, value, properties}` objects; edge
/// property entries are bare values.
fn decode_properties(
    map: &JsonMap<String, JsonValue>,
    vertex: bool,
) -> DecodeResult<BTreeMap<String, Property>> {
    let properties = match map.get("properties") {
        None | Some(JsonValue::Null) => return Ok(BTreeMap::new()),
        Some(JsonValue::Object(properties)) => properties,
        Some(_) => return Err(GraphError::decode("properties", "expected an object")),
    };

    properties
        .iter()
        .map(|(name, raw)| {
            decode_property(raw, vertex)
                .map(|property| (name.clone(), property))
                .map_err(|e| e.within(&format!("properties.{}", name)))
        })
        .collect()
}

fn decode_property(raw: &JsonValue, vertex: bool) -> DecodeResult<Property> {
    let values = match raw {
        JsonValue::Array(entries) => entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                decode_property_value(entry, vertex).map_err(|e| e.within(&format!("[{}]", i)))
            })
            .collect::<DecodeResult<Vec<_>>>()?,
        single => vec![decode_property_value(single, vertex)?],
    };
    Ok(Property::new(values))
}

fn decode_property_value(entry: &JsonValue, vertex: bool) -> DecodeResult<PropertyValue> {
    match entry {
        JsonValue::Object(fields) if vertex && fields.contains_key("value") => {
            let value = decode_value(&fields["value"]).map_err(|e| e.within("value"))?;
            let id = match fields.get("id") {
                None | Some(JsonValue::Null) => None,
                Some(id) => Some(ElementId::new(id.clone())),
            };
            let properties = match fields.get("properties") {
                None | Some(JsonValue::Null) => BTreeMap::new(),
                Some(JsonValue::Object(meta)) => decode_map(meta).map_err(|e| e.within("properties"))?,
                Some(_) => return Err(GraphError::decode("properties", "expected an object")),
            };
            Ok(PropertyValue {
                id,
                value,
                properties,
            })
        }
        other => Ok(PropertyValue::new(decode_value(other)?)),
    }
}

fn required_id(map: &JsonMap<String, JsonValue>, field: &str) -> DecodeResult<ElementId> {
    match map.get(field) {
        None | Some(JsonValue::Null) => Err(GraphError::decode(field, "missing")),
        Some(id) => Ok(ElementId::new(id.clone())),
    }
}

fn required_str(map: &JsonMap<String, JsonValue>, field: &str) -> DecodeResult<String> {
    match map.get(field) {
        None | Some(JsonValue::Null) => Err(GraphError::decode(field, "missing")),
        Some(JsonValue::String(s)) => Ok(s.clone()),
        Some(_) => Err(GraphError::decode(field, "expected a string")),
    }
}
