//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical response builders so tests do not hand-write JSON.

#![doc(hidden)]

use serde_json::{json, Value};

use crate::response::SearchResponse;

/// Build a response body from `(name, percentage)` rows, one slice per matched item.
pub fn body_with(items: &[&[(&str, Option<f64>)]]) -> String {
    let items: Vec<Value> = items
        .iter()
        .map(|products| {
            let products: Vec<Value> = products
                .iter()
                .map(|(name, pct)| match pct {
                    Some(p) => json!({ "name": name, "percentage": p }),
                    None => json!({ "name": name }),
                })
                .collect();
            json!({ "matchedInternalProducts": products })
        })
        .collect();
    body_with_items(Value::Array(items))
}

/// Wrap an arbitrary `matchedItems` array in the result envelope.
pub fn body_with_items(items: Value) -> String {
    json!({ "result": { "matchedItems": items } }).to_string()
}

/// Decoded form of [`body_with`].
pub fn response_with(items: &[&[(&str, Option<f64>)]]) -> SearchResponse {
    SearchResponse::decode(&body_with(items)).expect("canned body decodes")
}

/// Decoded form of [`body_with_items`].
pub fn response_with_items(items: Value) -> SearchResponse {
    SearchResponse::decode(&body_with_items(items)).expect("canned body decodes")
}

/// Empty but well-formed response body.
pub fn empty_body() -> String {
    body_with(&[])
}
