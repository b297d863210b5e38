//! JSON object rows shared by the streamed table and the dashboard datasets.

use serde_json::{Map, Value};

/// A JSON object row, keyed by column name.
pub type Row = Map<String, Value>;

/// Collect the objects of a JSON array literal. Anything else is dropped.
pub fn rows_from_json(value: Value) -> Vec<Row> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}
