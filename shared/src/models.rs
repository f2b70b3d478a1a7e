use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single normalized cell. The parser tags every value once at load time
/// so downstream consumers never re-coerce raw strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    /// Canonical `YYYY-MM-DD` date string. Zero-padded and fixed-width, so
    /// lexicographic order equals chronological order.
    Date(String),
    Text(String),
}

impl CellValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view with the KPI coercion rule: a non-numeric cell
    /// contributes 0, never NaN.
    pub fn number_or_zero(&self) -> f64 {
        match self {
            CellValue::Number(n) if n.is_finite() => *n,
            CellValue::Number(_) => 0.0,
            CellValue::Date(s) | CellValue::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .unwrap_or(0.0),
        }
    }

    /// String view for exact-equality predicates. Numbers have no string
    /// view: a numeric cell never equals a string filter value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Date(s) | CellValue::Text(s) => Some(s),
            CellValue::Number(_) => None,
        }
    }

    /// Display form used where the contract says "compared as string",
    /// e.g. the channel code, which some exports emit as a bare number.
    pub fn display(&self) -> String {
        match self {
            CellValue::Number(n) => n.to_string(),
            CellValue::Date(s) | CellValue::Text(s) => s.clone(),
        }
    }
}

/// One normalized CSV row: column name to tagged value. All records from
/// one file share the header's column set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    #[serde(flatten)]
    values: HashMap<String, CellValue>,
}

impl Record {
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.values.get(column)
    }

    pub fn text(&self, column: &str) -> Option<&str> {
        self.values.get(column).and_then(CellValue::as_str)
    }

    /// The canonical date string, present only when coercion succeeded.
    pub fn date(&self, column: &str) -> Option<&str> {
        match self.values.get(column) {
            Some(CellValue::Date(s)) => Some(s),
            _ => None,
        }
    }

    pub fn number_or_zero(&self, column: &str) -> f64 {
        self.values
            .get(column)
            .map_or(0.0, CellValue::number_or_zero)
    }

    pub fn display(&self, column: &str) -> Option<String> {
        self.values.get(column).map(CellValue::display)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, CellValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, CellValue)>>(iter: I) -> Self {
        Record {
            values: iter.into_iter().collect(),
        }
    }
}

/// Which upload a dataset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    Sales,
    Funnel,
}

/// Schema variant for the store-identifying column. Exports carry either a
/// channel name or a store name; the variant is classified once at load
/// time instead of being re-detected by every consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreColumn {
    ChannelName,
    StoreName,
}

impl StoreColumn {
    pub fn column_name(&self) -> &'static str {
        match self {
            StoreColumn::ChannelName => crate::columns::CHANNEL_NAME,
            StoreColumn::StoreName => crate::columns::STORE_NAME,
        }
    }
}

/// The full, unfiltered ordered sequence of normalized records from one
/// uploaded file. Replaced wholesale on re-upload, never merged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub kind: SourceKind,
    /// Header columns, trimmed, in file order.
    pub columns: Vec<String>,
    pub store_column: Option<StoreColumn>,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(kind: SourceKind, columns: Vec<String>, records: Vec<Record>) -> Self {
        let store_column = Self::classify_store_column(&columns);
        Dataset {
            kind,
            columns,
            store_column,
            records,
        }
    }

    pub fn empty(kind: SourceKind) -> Self {
        Dataset::new(kind, Vec::new(), Vec::new())
    }

    /// Channel_Name wins when both are present.
    pub fn classify_store_column(columns: &[String]) -> Option<StoreColumn> {
        if columns.iter().any(|c| c == crate::columns::CHANNEL_NAME) {
            Some(StoreColumn::ChannelName)
        } else if columns.iter().any(|c| c == crate::columns::STORE_NAME) {
            Some(StoreColumn::StoreName)
        } else {
            None
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One point of the date-count trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatePoint {
    pub date: String,
    pub count: u64,
}

/// One bar of the city series: summed financed amount per city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityAmount {
    pub city: String,
    pub total_amount: f64,
}

/// One bar of the model series: financed-application count per model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCount {
    pub model: String,
    pub count: u64,
}

/// One stage of the purchase funnel. `conversion_rate` is the percentage of
/// the previous stage's total, rounded to one decimal, and unset for the
/// first stage or when the previous stage's total is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub name: String,
    pub total: f64,
    pub conversion_rate: Option<f64>,
}

/// The KPI card values. Every field has a defined zero value for an empty
/// filtered subset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_applications: u64,
    pub total_amount_financed: f64,
    pub average_loan_value: f64,
    /// Maximum canonical date present, `None` when no record carries one.
    pub latest_date: Option<String>,
    pub latest_day_sales: f64,
    pub total_phones: u64,
    pub total_tablets: u64,
    pub with_trade_in: u64,
    pub without_trade_in: u64,
    pub with_care_plus: u64,
    pub without_care_plus: u64,
    pub total_completed_purchases: f64,
}

/// Distinct values available for each filter control, extracted from the
/// sales dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub dates: Vec<String>,
    pub cities: Vec<String>,
    pub financers: Vec<String>,
    pub stores: Vec<String>,
    pub store_codes: Vec<String>,
    pub models: Vec<String>,
}
