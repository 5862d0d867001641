//! Normalisation of list responses.
//!
//! The reviews endpoints have answered with a bare array, with
//! `{"resenias": [...]}` and with `{"resenia": {...}}`; some records carry a
//! Mongo-style `_id` instead of `id`. These helpers flatten all of that into
//! plain item lists before typed deserialization.

use serde_json::Value;

/// Copies `_id` into `id` when the record has no usable `id`.
pub fn promote_legacy_id(mut item: Value) -> Value {
    if let Value::Object(map) = &mut item {
        let has_id = map
            .get("id")
            .is_some_and(|id| !id.is_null() && id.as_str() != Some(""));
        if !has_id {
            if let Some(legacy) = map.get("_id").cloned() {
                map.insert("id".into(), legacy);
            }
        }
    }
    item
}

/// Extracts review records from any of the known envelope shapes.
///
/// Unknown shapes yield an empty list.
pub fn review_items(payload: Value) -> Vec<Value> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => match (map.remove("resenias"), map.remove("resenia")) {
            (Some(Value::Array(items)), _) => items,
            (_, Some(single @ Value::Object(_))) => vec![single],
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };
    items.into_iter().map(promote_legacy_id).collect()
}

/// Extracts game records from a list response.
///
/// Returns `None` when the payload is not an array.
pub fn game_items(payload: Value) -> Option<Vec<Value>> {
    match payload {
        Value::Array(items) => Some(items.into_iter().map(promote_legacy_id).collect()),
        _ => None,
    }
}
