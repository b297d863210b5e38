//! Column type inference over JSON rows.

use chrono::{DateTime, NaiveDate};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::dataset::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Number,
    Boolean,
    Date,
    String,
    /// Only nulls were observed.
    Unknown,
}

impl ColumnType {
    /// Type of a single non-null value.
    fn of(value: &Value) -> Option<ColumnType> {
        match value {
            Value::Null => None,
            Value::Bool(_) => Some(ColumnType::Boolean),
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(ColumnType::Integer),
            Value::Number(_) => Some(ColumnType::Number),
            Value::String(s) if is_date(s) => Some(ColumnType::Date),
            _ => Some(ColumnType::String),
        }
    }

    /// Widen two observed types to one that holds both.
    fn widen(self, other: ColumnType) -> ColumnType {
        use ColumnType::*;
        match (self, other) {
            (a, b) if a == b => a,
            (Unknown, b) => b,
            (a, Unknown) => a,
            (Integer, Number) | (Number, Integer) => Number,
            _ => String,
        }
    }
}

fn is_date(s: &str) -> bool {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() || DateTime::parse_from_rfc3339(s).is_ok()
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ColumnSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// True when some row lacks the column or holds null.
    pub nullable: bool,
}

#[derive(Default)]
struct ColumnStats {
    column_type: Option<ColumnType>,
    seen: usize,
}

/// Infer one column per distinct key, in first-seen order.
pub fn infer_schema(rows: &[Row]) -> Vec<ColumnSchema> {
    let mut columns: IndexMap<&str, ColumnStats> = IndexMap::new();

    for row in rows {
        for (name, value) in row {
            let stats = columns.entry(name.as_str()).or_default();
            if let Some(t) = ColumnType::of(value) {
                stats.column_type = Some(match stats.column_type {
                    Some(prev) => prev.widen(t),
                    None => t,
                });
                stats.seen += 1;
            }
        }
    }

    columns
        .into_iter()
        .map(|(name, stats)| ColumnSchema {
            name: name.to_string(),
            column_type: stats.column_type.unwrap_or(ColumnType::Unknown),
            nullable: stats.seen < rows.len(),
        })
        .collect()
}
