use serde::{Deserialize, Serialize};

/// Inclusive date range over canonical `YYYY-MM-DD` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// The user's current filter constraints. Every field is optional: `None`
/// means "no selection" and imposes no constraint, which is deliberately
/// distinct from `Some("")` — an empty string is a legitimate data value.
///
/// Owned by the presentation layer and passed by value into the engine on
/// every recompute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub date_range: Option<DateRange>,
    pub city: Option<String>,
    pub financer: Option<String>,
    pub store: Option<String>,
    pub store_code: Option<String>,
    pub model: Option<String>,
}

impl FilterSelection {
    /// Clears every field back to "no selection".
    pub fn reset(&mut self) {
        *self = FilterSelection::default();
    }

    pub fn is_empty(&self) -> bool {
        self == &FilterSelection::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_selection_is_empty() {
        assert!(FilterSelection::default().is_empty());
    }

    #[test]
    fn empty_string_selection_is_not_no_selection() {
        let selection = FilterSelection {
            city: Some(String::new()),
            ..FilterSelection::default()
        };
        assert!(!selection.is_empty());
    }

    #[test]
    fn reset_clears_all_fields() {
        let mut selection = FilterSelection {
            date_range: Some(DateRange {
                start: "2024-01-01".into(),
                end: "2024-01-31".into(),
            }),
            city: Some("Manila".into()),
            financer: Some("BankCo".into()),
            store: Some("Store 1".into()),
            store_code: Some("S1".into()),
            model: Some("Galaxy S24".into()),
        };
        selection.reset();
        assert!(selection.is_empty());
    }
}
