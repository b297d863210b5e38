use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum DashboardError {
    #[error("Dataset not found: {0}")]
    DatasetNotFound(String),

    #[error("Invalid range for '{field}': min {min} is greater than max {max}")]
    InvalidRange { field: String, min: f64, max: f64 },
}
