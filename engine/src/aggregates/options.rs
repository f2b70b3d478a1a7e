// Distinct values backing the filter dropdowns, extracted from the sales
// dataset (the funnel dump has no filterable axes of its own).
use std::collections::BTreeSet;

use shared::columns;
use shared::models::{Dataset, FilterOptions};

/// Collects the distinct sorted values available for each filter control.
/// Blank cells are excluded; the store and store-code lists are empty when
/// the dataset lacks the corresponding column.
pub fn filter_options(dataset: &Dataset) -> FilterOptions {
    let dates: BTreeSet<String> = dataset
        .records
        .iter()
        .filter_map(|record| record.date(columns::FINANCED_DATE))
        .map(str::to_string)
        .collect();

    let stores = dataset
        .store_column
        .map(|store_column| distinct_text(dataset, store_column.column_name()))
        .unwrap_or_default();

    let store_codes = if dataset.has_column(columns::CHANNEL_CODE) {
        dataset
            .records
            .iter()
            .filter_map(|record| record.display(columns::CHANNEL_CODE))
            .filter(|code| !code.is_empty())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect()
    } else {
        Vec::new()
    };

    FilterOptions {
        dates: dates.into_iter().collect(),
        cities: distinct_text(dataset, columns::CITY),
        financers: distinct_text(dataset, columns::FINANCER),
        stores,
        store_codes,
        models: distinct_text(dataset, columns::PURCHASED_MODEL_NAME),
    }
}

fn distinct_text(dataset: &Dataset, column: &str) -> Vec<String> {
    dataset
        .records
        .iter()
        .filter_map(|record| record.text(column))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}
