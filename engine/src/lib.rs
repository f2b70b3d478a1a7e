// Engine library root: CSV normalization, the dataset store, and the
// filter & aggregation engine behind the dashboard.

pub mod aggregates;
pub mod config;
pub mod data;
pub mod error;
pub mod services;
