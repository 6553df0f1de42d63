//! Column schema for tabular reports

use serde::{Deserialize, Serialize};
use std::fmt;

use super::style::StyleRule;

/// How the values in a column are interpreted and formatted
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Rendered verbatim
    #[default]
    Text,
    /// Plain number; whole values print without decimals
    Number,
    /// Fixed two decimals prefixed by the currency symbol
    Currency,
    /// Dates in the configured short date format
    Date,
    /// Status label colored by the rule
    Status(StyleRule),
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::Text => "text",
            ColumnKind::Number => "number",
            ColumnKind::Currency => "currency",
            ColumnKind::Date => "date",
            ColumnKind::Status(_) => "status",
        };
        f.write_str(name)
    }
}

/// One table column: header text, the row key it reads, and an optional width
///
/// Widths are points for PDF output and character units for Excel output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub header: String,
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default)]
    pub kind: ColumnKind,
}

impl ColumnSpec {
    /// Create a text column
    pub fn new(header: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            key: key.into(),
            width: None,
            kind: ColumnKind::Text,
        }
    }

    /// Create a currency column
    pub fn currency(header: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(header, key).kind(ColumnKind::Currency)
    }

    /// Create a date column
    pub fn date(header: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(header, key).kind(ColumnKind::Date)
    }

    /// Create a number column
    pub fn number(header: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(header, key).kind(ColumnKind::Number)
    }

    /// Create a status column colored by `rule`
    pub fn status(header: impl Into<String>, key: impl Into<String>, rule: StyleRule) -> Self {
        Self::new(header, key).kind(ColumnKind::Status(rule))
    }

    /// Set an explicit width
    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the column kind
    pub fn kind(mut self, kind: ColumnKind) -> Self {
        self.kind = kind;
        self
    }

    /// The style rule for status columns
    pub fn style_rule(&self) -> Option<&StyleRule> {
        match &self.kind {
            ColumnKind::Status(rule) => Some(rule),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::style::palette;

    #[test]
    fn test_builders() {
        let col = ColumnSpec::currency("Amount", "amount").width(80.0);
        assert_eq!(col.header, "Amount");
        assert_eq!(col.key, "amount");
        assert_eq!(col.width, Some(80.0));
        assert_eq!(col.kind, ColumnKind::Currency);
        assert!(col.style_rule().is_none());
    }

    #[test]
    fn test_status_column_rule() {
        let col = ColumnSpec::status("Status", "status", StyleRule::payment_status());
        let rule = col.style_rule().unwrap();
        assert_eq!(rule.color_for("PAID"), palette::STATUS_GREEN);
        assert_eq!(col.kind.to_string(), "status");
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let col: ColumnSpec =
            serde_json::from_str(r#"{"header": "Name", "key": "name"}"#).unwrap();
        assert_eq!(col.kind, ColumnKind::Text);
        assert!(col.width.is_none());
    }
}
