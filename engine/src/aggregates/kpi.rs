// KPI card values over the filtered subsets.
use shared::columns;
use shared::models::{KpiSummary, Record};

/// Computes the full KPI set. Non-numeric monetary cells contribute zero,
/// so sums and averages are never NaN, and every field has a defined zero
/// value when a subset is empty.
pub fn summarize(sales: &[Record], funnel: &[Record]) -> KpiSummary {
    let total_applications = sales.len() as u64;
    let total_amount_financed: f64 = sales
        .iter()
        .map(|record| record.number_or_zero(columns::PRINCIPAL_AMOUNT))
        .sum();
    let average_loan_value = if total_applications > 0 {
        total_amount_financed / total_applications as f64
    } else {
        0.0
    };

    // Canonical strings order chronologically, so max() is the latest day.
    let latest_date = sales
        .iter()
        .filter_map(|record| record.date(columns::FINANCED_DATE))
        .max()
        .map(str::to_string);
    let latest_day_sales = latest_date.as_deref().map_or(0.0, |latest| {
        sales
            .iter()
            .filter(|record| record.date(columns::FINANCED_DATE) == Some(latest))
            .map(|record| record.number_or_zero(columns::PRINCIPAL_AMOUNT))
            .sum()
    });

    let with_trade_in = flag_count(sales, columns::TRADE_IN);
    let with_care_plus = flag_count(sales, columns::CAREPLUS_PRICE);

    KpiSummary {
        total_applications,
        total_amount_financed,
        average_loan_value,
        latest_date,
        latest_day_sales,
        total_phones: category_count(sales, "phone"),
        total_tablets: category_count(sales, "tablet"),
        with_trade_in,
        without_trade_in: total_applications - with_trade_in,
        with_care_plus,
        without_care_plus: total_applications - with_care_plus,
        total_completed_purchases: funnel
            .iter()
            .map(|record| record.number_or_zero(columns::COMPLETED_PURCHASES))
            .sum(),
    }
}

fn category_count(subset: &[Record], category: &str) -> u64 {
    subset
        .iter()
        .filter(|record| {
            record
                .text(columns::DEVICE_CATEGORY)
                .map_or(false, |value| value.eq_ignore_ascii_case(category))
        })
        .count() as u64
}

// "Has" means strictly greater than 1; 0, 1, and absent all count as
// "does not have".
fn flag_count(subset: &[Record], column: &str) -> u64 {
    subset
        .iter()
        .filter(|record| record.number_or_zero(column) > 1.0)
        .count() as u64
}
