use serde::Serialize;

use crate::error::DashboardError;
use crate::fixtures;
use crate::schema::{infer_schema, ColumnSchema};

pub use modeler_core::row::Row;

/// One in-memory table.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub id: &'static str,
    pub title: &'static str,
    /// Column whose values order the rows in time; KPIs compare its last two
    /// distinct values.
    pub period_field: Option<&'static str>,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn schema(&self) -> Vec<ColumnSchema> {
        infer_schema(&self.rows)
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            id: self.id.to_string(),
            title: self.title.to_string(),
            row_count: self.rows.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    pub id: String,
    pub title: String,
    pub row_count: usize,
}

/// The fixed set of datasets the dashboard can query.
#[derive(Debug, Clone)]
pub struct DatasetCatalog {
    datasets: Vec<Dataset>,
}

impl DatasetCatalog {
    pub fn builtin() -> Self {
        Self {
            datasets: vec![
                Dataset {
                    id: "sales",
                    title: "Monthly sales by region",
                    period_field: Some("month"),
                    rows: fixtures::sales(),
                },
                Dataset {
                    id: "signups",
                    title: "Weekly sign-ups by source",
                    period_field: Some("week"),
                    rows: fixtures::signups(),
                },
            ],
        }
    }

    pub fn get(&self, id: &str) -> Result<&Dataset, DashboardError> {
        self.datasets
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| DashboardError::DatasetNotFound(id.to_string()))
    }

    pub fn summaries(&self) -> Vec<DatasetSummary> {
        self.datasets.iter().map(Dataset::summary).collect()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}
