//! Row values handed to the renderer

use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::money::Money;

/// A single renderable cell value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Currency(Money),
    Date(NaiveDate),
    /// Explicitly absent; renders as the placeholder
    #[default]
    Empty,
}

impl CellValue {
    /// Check if the value renders as the placeholder
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Build a date cell from ISO text, keeping the text when it does not
    /// parse
    pub fn date_from_text(text: &str) -> Self {
        match parse_iso_date(text) {
            Some(date) => CellValue::Date(date),
            None => CellValue::Text(text.to_string()),
        }
    }
}

/// Parse `YYYY-MM-DD` or an RFC 3339 timestamp into its calendar date
pub fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<Money> for CellValue {
    fn from(value: Money) -> Self {
        CellValue::Currency(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        CellValue::Date(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

/// A record as a mapping from column key to value
///
/// Keys that a report's columns reference but the row lacks are rendered
/// as the placeholder, never as an error.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportRow {
    values: BTreeMap<String, CellValue>,
}

impl ReportRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Get the value for a key, if present
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for ReportRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = ReportRow::new();
        for (key, value) in iter {
            row.insert(key, value);
        }
        row
    }
}

/// Conversion from a domain record into a renderable row
pub trait ToReportRow {
    fn to_report_row(&self) -> ReportRow;
}

impl ToReportRow for ReportRow {
    fn to_report_row(&self) -> ReportRow {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_builder() {
        let row = ReportRow::new()
            .with("name", "Ada Lovelace")
            .with("credits", 4_u32)
            .with("fee", Money::from_cents(1000))
            .with("email", None::<String>);

        assert_eq!(row.len(), 4);
        assert_eq!(row.get("name"), Some(&CellValue::Text("Ada Lovelace".into())));
        assert_eq!(row.get("credits"), Some(&CellValue::Number(4.0)));
        assert!(row.get("email").unwrap().is_empty());
        assert!(row.get("missing").is_none());
    }

    #[test]
    fn test_from_iterator() {
        let row: ReportRow = vec![("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
