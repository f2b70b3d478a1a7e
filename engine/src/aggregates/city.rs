// Sales by city: summed financed amount, top cities only.
use std::cmp::Ordering;
use std::collections::HashMap;

use shared::columns;
use shared::models::{CityAmount, Record};

use super::group_label;

/// Sums `Principal_Amount` per city ("Unknown" for empty/absent cities),
/// sorted descending by amount with city name ascending on ties, truncated
/// to `top_n`.
pub fn by_city(subset: &[Record], top_n: usize) -> Vec<CityAmount> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    for record in subset {
        let city = group_label(record, columns::CITY);
        *totals.entry(city).or_default() += record.number_or_zero(columns::PRINCIPAL_AMOUNT);
    }

    let mut series: Vec<CityAmount> = totals
        .into_iter()
        .map(|(city, total_amount)| CityAmount { city, total_amount })
        .collect();
    series.sort_by(|a, b| {
        b.total_amount
            .partial_cmp(&a.total_amount)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.city.cmp(&b.city))
    });
    series.truncate(top_n);
    series
}
