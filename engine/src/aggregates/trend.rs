// Financing trend: applications per day.
use std::collections::BTreeMap;

use shared::columns;
use shared::models::{DatePoint, Record};

/// Groups the subset by canonical date and counts occurrences, one point
/// per distinct date, ascending. Records whose date never coerced are left
/// out — they have no position on a date axis.
pub fn by_date(subset: &[Record]) -> Vec<DatePoint> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for record in subset {
        if let Some(date) = record.date(columns::FINANCED_DATE) {
            *counts.entry(date).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .map(|(date, count)| DatePoint {
            date: date.to_string(),
            count,
        })
        .collect()
}
