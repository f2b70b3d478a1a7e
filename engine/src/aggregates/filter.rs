// Filtering semantics: predicates are AND-combined and an absent filter
// field imposes no constraint.
use shared::columns;
use shared::filter::FilterSelection;
use shared::models::{Dataset, Record};

/// Applies the full six-field selection to a sales dataset.
pub fn apply_sales(dataset: &Dataset, selection: &FilterSelection) -> Vec<Record> {
    dataset
        .records
        .iter()
        .filter(|record| {
            in_date_range(record, selection)
                && matches_text(record, columns::CITY, &selection.city)
                && matches_text(record, columns::FINANCER, &selection.financer)
                && matches_store(dataset, record, &selection.store)
                && matches_store_code(record, &selection.store_code)
                && matches_text(record, columns::PURCHASED_MODEL_NAME, &selection.model)
        })
        .cloned()
        .collect()
}

/// The funnel dump has no date/city/financer/model axes; only the store
/// predicates apply.
pub fn apply_funnel(dataset: &Dataset, selection: &FilterSelection) -> Vec<Record> {
    dataset
        .records
        .iter()
        .filter(|record| {
            matches_store(dataset, record, &selection.store)
                && matches_store_code(record, &selection.store_code)
        })
        .cloned()
        .collect()
}

// Inclusive lexicographic comparison on the canonical date. Valid because
// the format is zero-padded and fixed-width. Records without a canonical
// date cannot fall inside any range.
fn in_date_range(record: &Record, selection: &FilterSelection) -> bool {
    selection.date_range.as_ref().map_or(true, |range| {
        record
            .date(columns::FINANCED_DATE)
            .map_or(false, |date| range.start.as_str() <= date && date <= range.end.as_str())
    })
}

fn matches_text(record: &Record, column: &str, wanted: &Option<String>) -> bool {
    wanted
        .as_ref()
        .map_or(true, |wanted| record.text(column) == Some(wanted.as_str()))
}

// The store predicate reads the column classified at load time. A dataset
// with no store-identifying column can never match a store selection.
fn matches_store(dataset: &Dataset, record: &Record, wanted: &Option<String>) -> bool {
    wanted.as_ref().map_or(true, |wanted| {
        dataset.store_column.map_or(false, |store_column| {
            record.text(store_column.column_name()) == Some(wanted.as_str())
        })
    })
}

// The channel code is compared as a string even when the export emits it as
// a bare number.
fn matches_store_code(record: &Record, wanted: &Option<String>) -> bool {
    wanted.as_ref().map_or(true, |wanted| {
        record.display(columns::CHANNEL_CODE).as_deref() == Some(wanted.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::csv_parser::CsvNormalizer;
    use shared::filter::DateRange;
    use shared::models::SourceKind;

    fn sales_dataset() -> Dataset {
        let text = "Financed_Date,City,Financer,Channel_Name,Channel_Code,Purchased_Model_Name\n\
                    2024-01-05,Manila,BankCo,Store One,101,Galaxy S24\n\
                    2024-01-20,Cebu,LendCo,Store Two,102,Galaxy A15\n\
                    2024-02-01,Manila,BankCo,Store One,101,Galaxy S24";
        let outcome = CsvNormalizer::parse(text);
        Dataset::new(SourceKind::Sales, outcome.columns, outcome.records)
    }

    #[test]
    fn empty_selection_is_a_no_op() {
        let dataset = sales_dataset();
        let filtered = apply_sales(&dataset, &FilterSelection::default());
        assert_eq!(filtered, dataset.records);
    }

    #[test]
    fn date_range_is_inclusive_lexicographic() {
        let dataset = sales_dataset();
        let selection = FilterSelection {
            date_range: Some(DateRange {
                start: "2024-01-01".into(),
                end: "2024-01-31".into(),
            }),
            ..FilterSelection::default()
        };
        let filtered = apply_sales(&dataset, &selection);
        assert_eq!(filtered.len(), 2);
        assert!(filtered
            .iter()
            .all(|r| r.date("Financed_Date").unwrap() <= "2024-01-31"));
    }

    #[test]
    fn predicates_are_and_combined() {
        let dataset = sales_dataset();
        let selection = FilterSelection {
            city: Some("Manila".into()),
            model: Some("Galaxy S24".into()),
            ..FilterSelection::default()
        };
        assert_eq!(apply_sales(&dataset, &selection).len(), 2);

        let selection = FilterSelection {
            city: Some("Cebu".into()),
            model: Some("Galaxy S24".into()),
            ..FilterSelection::default()
        };
        assert!(apply_sales(&dataset, &selection).is_empty());
    }

    #[test]
    fn store_filter_uses_the_classified_column() {
        let dataset = sales_dataset();
        let selection = FilterSelection {
            store: Some("Store Two".into()),
            ..FilterSelection::default()
        };
        let filtered = apply_sales(&dataset, &selection);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].text("City"), Some("Cebu"));
    }

    #[test]
    fn store_name_variant_is_filterable_too() {
        let text = "Financed_Date,Store_Name\n2024-01-05,Branch A\n2024-01-06,Branch B";
        let outcome = CsvNormalizer::parse(text);
        let dataset = Dataset::new(SourceKind::Sales, outcome.columns, outcome.records);

        let selection = FilterSelection {
            store: Some("Branch A".into()),
            ..FilterSelection::default()
        };
        assert_eq!(apply_sales(&dataset, &selection).len(), 1);
    }

    #[test]
    fn store_filter_without_store_column_matches_nothing() {
        let text = "Financed_Date,City\n2024-01-05,Manila";
        let outcome = CsvNormalizer::parse(text);
        let dataset = Dataset::new(SourceKind::Sales, outcome.columns, outcome.records);

        let selection = FilterSelection {
            store: Some("Anywhere".into()),
            ..FilterSelection::default()
        };
        assert!(apply_sales(&dataset, &selection).is_empty());
    }

    #[test]
    fn store_code_compares_numeric_cells_as_strings() {
        let dataset = sales_dataset();
        let selection = FilterSelection {
            store_code: Some("102".into()),
            ..FilterSelection::default()
        };
        let filtered = apply_sales(&dataset, &selection);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].text("City"), Some("Cebu"));
    }

    #[test]
    fn empty_string_filter_matches_only_empty_cells() {
        let text = "Financed_Date,City\n2024-01-05,\n2024-01-06,Manila";
        let outcome = CsvNormalizer::parse(text);
        let dataset = Dataset::new(SourceKind::Sales, outcome.columns, outcome.records);

        let selection = FilterSelection {
            city: Some(String::new()),
            ..FilterSelection::default()
        };
        let filtered = apply_sales(&dataset, &selection);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].date("Financed_Date"), Some("2024-01-05"));
    }

    #[test]
    fn funnel_filter_ignores_sales_only_axes() {
        let text = "Channel_Name,Channel_Code,Completed_Purchases\n\
                    Store One,101,5\n\
                    Store Two,102,3";
        let outcome = CsvNormalizer::parse(text);
        let dataset = Dataset::new(SourceKind::Funnel, outcome.columns, outcome.records);

        // A city selection must not constrain the funnel subset.
        let selection = FilterSelection {
            city: Some("Manila".into()),
            store: Some("Store One".into()),
            ..FilterSelection::default()
        };
        let filtered = apply_funnel(&dataset, &selection);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].text("Channel_Name"), Some("Store One"));
    }
}
