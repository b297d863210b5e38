pub mod config;
pub mod row;

pub use config::Config;
pub use row::Row;
