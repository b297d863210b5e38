//! Row filters: equality and inclusive numeric range, AND-ed together.

use serde::Deserialize;
use serde_json::Value;

use crate::dataset::Row;
use crate::error::DashboardError;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Filter {
    /// Keep rows whose `field` equals `value`.
    Eq { field: String, value: Value },
    /// Keep rows whose `field` is numeric and within `[min, max]`.
    Range {
        field: String,
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
}

/// Numeric view of a JSON value; strings and bools are not numbers here.
pub(crate) fn as_number(value: &Value) -> Option<f64> {
    value.as_f64()
}

/// Numbers compare by value so `10` matches `10.0`; everything else by JSON
/// equality.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (as_number(a), as_number(b)) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

impl Filter {
    pub fn field(&self) -> &str {
        match self {
            Filter::Eq { field, .. } | Filter::Range { field, .. } => field,
        }
    }

    pub fn validate(&self) -> Result<(), DashboardError> {
        if let Filter::Range {
            field,
            min: Some(min),
            max: Some(max),
        } = self
        {
            if min > max {
                return Err(DashboardError::InvalidRange {
                    field: field.clone(),
                    min: *min,
                    max: *max,
                });
            }
        }
        Ok(())
    }

    /// Rows lacking the field never match.
    pub fn matches(&self, row: &Row) -> bool {
        let Some(actual) = row.get(self.field()) else {
            return false;
        };
        match self {
            Filter::Eq { value, .. } => values_equal(actual, value),
            Filter::Range { min, max, .. } => match as_number(actual) {
                Some(v) => min.map_or(true, |m| v >= m) && max.map_or(true, |m| v <= m),
                None => false,
            },
        }
    }
}

/// Keep rows matching every filter. An empty filter list keeps everything.
pub fn apply_filters(rows: &[Row], filters: &[Filter]) -> Result<Vec<Row>, DashboardError> {
    for filter in filters {
        filter.validate()?;
    }
    Ok(rows
        .iter()
        .filter(|row| filters.iter().all(|f| f.matches(row)))
        .cloned()
        .collect())
}
