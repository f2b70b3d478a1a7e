//! The filter & aggregation engine. Every function here takes an immutable
//! snapshot of records and produces a fresh result; nothing is cached, and
//! every aggregate has a defined zero/empty value for an empty subset.

pub mod city;
pub mod filter;
pub mod funnel;
pub mod kpi;
pub mod models;
pub mod options;
pub mod trend;

use shared::models::Record;

/// Grouping label substituted for empty or absent cells.
pub const UNKNOWN_LABEL: &str = "Unknown";

pub(crate) fn group_label(record: &Record, column: &str) -> String {
    record
        .display(column)
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
}
