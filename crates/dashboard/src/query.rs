use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{Widget, WidgetData};
use crate::dataset::Dataset;
use crate::error::DashboardError;
use crate::filter::{apply_filters, Filter};

/// Body of a dashboard widget request.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DashboardQuery {
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(default = "default_widget")]
    pub widget: Widget,
}

fn default_widget() -> Widget {
    Widget::Table
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QueryResult {
    pub dataset: String,
    /// Rows left after filtering.
    pub matched: usize,
    pub widget: WidgetData,
}

/// Filter the dataset, then aggregate for the requested widget.
pub fn run_query(dataset: &Dataset, query: &DashboardQuery) -> Result<QueryResult, DashboardError> {
    let rows = apply_filters(&dataset.rows, &query.filters)?;
    let matched = rows.len();
    debug!(
        dataset = dataset.id,
        widget = query.widget.kind(),
        filters = query.filters.len(),
        matched,
        "dashboard query"
    );
    Ok(QueryResult {
        dataset: dataset.id.to_string(),
        matched,
        widget: query.widget.compute(rows, dataset.period_field),
    })
}
