//! Hardcoded dashboard datasets with schema inference, filters and widget
//! aggregations. Everything is computed fresh per call from in-memory rows.

pub mod aggregate;
pub mod dataset;
pub mod error;
pub mod filter;
mod fixtures;
pub mod query;
pub mod schema;

pub use aggregate::{Widget, WidgetData};
pub use dataset::{Dataset, DatasetCatalog, DatasetSummary, Row};
pub use error::DashboardError;
pub use filter::Filter;
pub use query::{DashboardQuery, QueryResult};
pub use schema::{ColumnSchema, ColumnType};
