//! Widget aggregations over already-filtered rows.

use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dataset::Row;
use crate::filter::as_number;

/// Label for rows that lack the group-by column.
pub const MISSING_GROUP: &str = "(none)";

/// What the dashboard wants computed.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Widget {
    /// Identity: the filtered rows.
    Table,
    /// Sum of `value_field` per distinct `group_by` value.
    Pie {
        #[serde(rename = "groupBy")]
        group_by: String,
        #[serde(rename = "valueField")]
        value_field: String,
    },
    /// Summed value for the latest period with change against the one before.
    Kpi {
        #[serde(rename = "valueField")]
        value_field: String,
    },
    /// Min and max of a numeric field.
    Range { field: String },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WidgetData {
    Table {
        rows: Vec<Row>,
    },
    Pie {
        slices: Vec<PieSlice>,
    },
    Kpi {
        field: String,
        value: f64,
        previous: Option<f64>,
        #[serde(rename = "changePct")]
        change_pct: Option<f64>,
    },
    Range {
        field: String,
        min: Option<f64>,
        max: Option<f64>,
    },
}

fn label_of(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => MISSING_GROUP.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Non-numeric or missing values count as zero.
fn numeric(row: &Row, field: &str) -> f64 {
    row.get(field).and_then(as_number).unwrap_or(0.0)
}

fn sum(rows: &[&Row], field: &str) -> f64 {
    rows.iter().map(|r| numeric(r, field)).sum()
}

pub fn pie(rows: &[Row], group_by: &str, value_field: &str) -> Vec<PieSlice> {
    let mut groups: IndexMap<String, f64> = IndexMap::new();
    for row in rows {
        *groups.entry(label_of(row.get(group_by))).or_insert(0.0) += numeric(row, value_field);
    }
    groups
        .into_iter()
        .map(|(label, value)| PieSlice { label, value })
        .collect()
}

pub fn range(rows: &[Row], field: &str) -> (Option<f64>, Option<f64>) {
    rows.iter()
        .filter_map(|r| r.get(field).and_then(as_number))
        .fold((None, None), |(min, max), v| {
            (
                Some(min.map_or(v, |m: f64| m.min(v))),
                Some(max.map_or(v, |m: f64| m.max(v))),
            )
        })
}

/// Order period values: numbers numerically, everything else by its text.
fn compare_periods(a: &Value, b: &Value) -> Ordering {
    match (as_number(a), as_number(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => label_of(Some(a)).cmp(&label_of(Some(b))),
    }
}

fn rows_in<'a>(rows: &'a [Row], period_field: &str, period: &Value) -> Vec<&'a Row> {
    rows.iter()
        .filter(|r| r.get(period_field) == Some(period))
        .collect()
}

pub fn percent_change(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        None
    } else {
        Some((current - previous) / previous.abs() * 100.0)
    }
}

/// Returns `(value, previous, change_pct)`.
pub fn kpi(rows: &[Row], value_field: &str, period_field: Option<&str>) -> (f64, Option<f64>, Option<f64>) {
    let Some(period_field) = period_field else {
        let all: Vec<&Row> = rows.iter().collect();
        return (sum(&all, value_field), None, None);
    };

    let mut periods: Vec<&Value> = Vec::new();
    for row in rows {
        if let Some(p) = row.get(period_field).filter(|v| !v.is_null()) {
            if !periods.contains(&p) {
                periods.push(p);
            }
        }
    }
    periods.sort_by(|a, b| compare_periods(a, b));

    match periods.as_slice() {
        [] => (0.0, None, None),
        [only] => (sum(&rows_in(rows, period_field, only), value_field), None, None),
        [.., prev, latest] => {
            let value = sum(&rows_in(rows, period_field, latest), value_field);
            let previous = sum(&rows_in(rows, period_field, prev), value_field);
            (value, Some(previous), percent_change(value, previous))
        }
    }
}

impl Widget {
    pub fn compute(&self, rows: Vec<Row>, period_field: Option<&str>) -> WidgetData {
        match self {
            Widget::Table => WidgetData::Table { rows },
            Widget::Pie {
                group_by,
                value_field,
            } => WidgetData::Pie {
                slices: pie(&rows, group_by, value_field),
            },
            Widget::Kpi { value_field } => {
                let (value, previous, change_pct) = kpi(&rows, value_field, period_field);
                WidgetData::Kpi {
                    field: value_field.clone(),
                    value,
                    previous,
                    change_pct,
                }
            }
            Widget::Range { field } => {
                let (min, max) = range(&rows, field);
                WidgetData::Range {
                    field: field.clone(),
                    min,
                    max,
                }
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Widget::Table => "table",
            Widget::Pie { .. } => "pie",
            Widget::Kpi { .. } => "kpi",
            Widget::Range { .. } => "range",
        }
    }
}
