//! CSV ingestion and normalization.
//!
//! The sales and funnel dumps come from heterogeneous upstream systems and
//! vary in delimiter, line ending, and date convention. The normalizer
//! degrades gracefully: malformed rows are skipped and counted, unparseable
//! dates stay as raw strings, and parsing always completes with whatever
//! rows succeeded plus diagnostics for the caller.

use shared::columns::DATE_COLUMN_SYNONYMS;
use shared::models::{CellValue, Record};

use serde::Serialize;

/// Date-format sniffing for the financed-date column.
///
/// Slash-separated dates are read month-first (US convention). That is a
/// silent correctness risk for day-first locales; an upstream export using
/// DD/MM/YYYY will come through with month and day swapped whenever the
/// day is 12 or less, and flagged as a failure otherwise.
pub mod date_format {
    use chrono::{NaiveDate, NaiveDateTime};

    const FALLBACK_DATE_FORMATS: [&str; 5] =
        ["%Y-%m-%d", "%Y/%m/%d", "%d-%b-%Y", "%b %d, %Y", "%B %d, %Y"];
    const FALLBACK_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

    /// Normalizes a date cell to canonical `YYYY-MM-DD`, or `None` when no
    /// recognized format yields a valid calendar date.
    pub fn normalize(value: &str) -> Option<String> {
        parse_iso(value)
            .or_else(|| parse_slash_month_first(value))
            .or_else(|| parse_fallback(value))
            .map(|date| date.format("%Y-%m-%d").to_string())
    }

    // Strict zero-padded YYYY-MM-DD only; anything looser falls through to
    // the later steps.
    fn parse_iso(value: &str) -> Option<NaiveDate> {
        let bytes = value.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return None;
        }
        let digits_ok = bytes
            .iter()
            .enumerate()
            .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit());
        if !digits_ok {
            return None;
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
    }

    // M/D/YYYY or MM/DD/YYYY, month first.
    fn parse_slash_month_first(value: &str) -> Option<NaiveDate> {
        let mut parts = value.split('/');
        let (month, day, year) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() {
            return None;
        }
        let shape_ok = (1..=2).contains(&month.len())
            && (1..=2).contains(&day.len())
            && year.len() == 4
            && [month, day, year]
                .iter()
                .all(|p| p.bytes().all(|b| b.is_ascii_digit()));
        if !shape_ok {
            return None;
        }
        NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
    }

    fn parse_fallback(value: &str) -> Option<NaiveDate> {
        for format in FALLBACK_DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(value, format) {
                return Some(date);
            }
        }
        for format in FALLBACK_DATETIME_FORMATS {
            if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
                return Some(datetime.date());
            }
        }
        None
    }

}

/// Non-fatal parse counters, reported to the caller rather than raised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseDiagnostics {
    /// Rows dropped because their field count did not match the header.
    pub rows_skipped: usize,
    /// Date cells that failed every recognized format and stayed raw.
    pub date_failures: usize,
    /// No column matching the date synonym list was found in the header.
    pub missing_date_column: bool,
}

/// Result of one parse: trimmed header columns, the records that survived
/// validation (in file order), and the running diagnostics.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
    pub diagnostics: ParseDiagnostics,
}

pub struct CsvNormalizer;

impl CsvNormalizer {
    /// Parses raw CSV text into normalized records. Never fails: malformed
    /// content is skipped or kept raw, and counted in the diagnostics.
    pub fn parse(raw_text: &str) -> ParseOutcome {
        let mut outcome = ParseOutcome::default();

        // CRLF wins over LF when both could apply.
        let line_ending = if raw_text.contains("\r\n") { "\r\n" } else { "\n" };
        let mut lines = raw_text.split(line_ending);

        let header = match lines.next() {
            Some(line) if !line.trim().is_empty() => line,
            _ => {
                tracing::warn!("empty input, nothing to parse");
                outcome.diagnostics.missing_date_column = true;
                return outcome;
            }
        };

        // The header alone decides the delimiter; data rows never re-detect.
        let delimiter = if header.contains(',') {
            ','
        } else if header.contains(';') {
            ';'
        } else {
            ','
        };

        outcome.columns = header
            .split(delimiter)
            .map(|name| name.trim().to_string())
            .collect();

        let date_column = outcome
            .columns
            .iter()
            .position(|name| DATE_COLUMN_SYNONYMS.contains(&name.as_str()));
        if date_column.is_none() {
            tracing::warn!(
                header = ?outcome.columns,
                "no recognizable date column in header"
            );
            outcome.diagnostics.missing_date_column = true;
        }

        for (line_number, line) in lines.enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let fields = split_fields(line, delimiter);
            if fields.len() != outcome.columns.len() {
                tracing::warn!(
                    line = line_number + 2,
                    fields = fields.len(),
                    expected = outcome.columns.len(),
                    "field count mismatch, row skipped"
                );
                outcome.diagnostics.rows_skipped += 1;
                continue;
            }

            let mut cells = Vec::with_capacity(fields.len());
            for (index, field) in fields.into_iter().enumerate() {
                let cell = coerce_cell(
                    &field,
                    date_column == Some(index),
                    &mut outcome.diagnostics,
                );
                cells.push((outcome.columns[index].clone(), cell));
            }
            outcome.records.push(cells.into_iter().collect());
        }

        tracing::debug!(
            records = outcome.records.len(),
            skipped = outcome.diagnostics.rows_skipped,
            date_failures = outcome.diagnostics.date_failures,
            "parse complete"
        );
        outcome
    }
}

/// Splits one data row on the delimiter, honoring double quotes. A `"` not
/// preceded by a backslash toggles the in-quotes flag and is consumed; the
/// delimiter only separates fields while the flag is off. An unterminated
/// quote simply runs to the end of the line.
fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut previous = '\0';

    for ch in line.chars() {
        if ch == '"' && previous != '\\' {
            in_quotes = !in_quotes;
        } else if ch == delimiter && !in_quotes {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
        previous = ch;
    }
    fields.push(current);
    fields
}

// Coercion precedence: date column first, then finite number, then trimmed
// string with one layer of wrapping quotes stripped.
fn coerce_cell(raw: &str, is_date_cell: bool, diagnostics: &mut ParseDiagnostics) -> CellValue {
    let value = strip_wrapping_quotes(raw.trim());

    if is_date_cell && !value.is_empty() {
        return match date_format::normalize(value) {
            Some(canonical) => CellValue::Date(canonical),
            None => {
                diagnostics.date_failures += 1;
                CellValue::Text(value.to_string())
            }
        };
    }

    if !value.is_empty() {
        if let Ok(number) = value.parse::<f64>() {
            if number.is_finite() {
                return CellValue::Number(number);
            }
        }
    }

    CellValue::Text(value.to_string())
}

fn strip_wrapping_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
