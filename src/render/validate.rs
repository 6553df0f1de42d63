//! Report definition checks
//!
//! Everything here runs before the first drawing call so that a bad report
//! definition never produces a partial document.

use chrono::format::{Item, StrftimeItems};
use std::collections::HashSet;

use super::RenderOptions;
use crate::error::{ReportError, ReportResult};
use crate::models::ColumnSpec;

/// Validate the title and column schema of a report
pub fn validate_report(title: &str, columns: &[ColumnSpec]) -> ReportResult<()> {
    if title.trim().is_empty() {
        return Err(ReportError::caller("report title must not be empty"));
    }

    if columns.is_empty() {
        return Err(ReportError::caller("at least one column is required"));
    }

    let mut seen = HashSet::with_capacity(columns.len());
    for (index, column) in columns.iter().enumerate() {
        if column.header.trim().is_empty() {
            return Err(ReportError::caller(format!(
                "column {} has an empty header",
                index + 1
            )));
        }
        if column.key.trim().is_empty() {
            return Err(ReportError::caller(format!(
                "column '{}' has an empty key",
                column.header
            )));
        }
        if !seen.insert(column.key.as_str()) {
            return Err(ReportError::caller(format!(
                "duplicate column key '{}'",
                column.key
            )));
        }
        if let Some(width) = column.width {
            if !width.is_finite() || width <= 0.0 {
                return Err(ReportError::caller(format!(
                    "column '{}' has a non-positive width",
                    column.key
                )));
            }
        }
    }

    Ok(())
}

/// Validate render options that would otherwise fail mid-document
pub fn validate_options(options: &RenderOptions) -> ReportResult<()> {
    check_strftime("date format", &options.date_format)?;
    check_strftime("timestamp format", &options.timestamp_format)?;

    let layout = &options.layout;
    let dimensions = [
        ("margin", layout.margin),
        ("row height", layout.row_height),
        ("header height", layout.header_height),
        ("font size", layout.font_size),
    ];
    for (name, value) in dimensions {
        if !value.is_finite() || value <= 0.0 {
            return Err(ReportError::caller(format!("{} must be positive", name)));
        }
    }

    if !layout.continuation_top.is_finite() || layout.continuation_top < 0.0 {
        return Err(ReportError::caller(
            "continuation top must be a non-negative number",
        ));
    }

    if !options.excel_column_width.is_finite() || options.excel_column_width <= 0.0 {
        return Err(ReportError::caller("Excel column width must be positive"));
    }

    Ok(())
}

fn check_strftime(name: &str, format: &str) -> ReportResult<()> {
    if format.is_empty() || StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ReportError::caller(format!(
            "invalid {}: '{}'",
            name, format
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnSpec> {
        vec![ColumnSpec::new("Name", "name"), ColumnSpec::new("Email", "email")]
    }

    #[test]
    fn test_valid_report() {
        assert!(validate_report("Students Report", &columns()).is_ok());
    }

    #[test]
    fn test_empty_columns_rejected() {
        let err = validate_report("Students Report", &[]).unwrap_err();
        assert!(err.is_caller_configuration());
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let mut cols = columns();
        cols.push(ColumnSpec::new("Name again", "name"));
        let err = validate_report("Students Report", &cols).unwrap_err();
        assert!(err.to_string().contains("duplicate column key 'name'"));
    }

    #[test]
    fn test_blank_title_and_header_rejected() {
        assert!(validate_report("   ", &columns()).is_err());
        let cols = vec![ColumnSpec::new("", "name")];
        assert!(validate_report("Report", &cols).is_err());
        let cols = vec![ColumnSpec::new("Name", " ")];
        assert!(validate_report("Report", &cols).is_err());
    }

    #[test]
    fn test_non_positive_width_rejected() {
        let cols = vec![ColumnSpec::new("Name", "name").width(0.0)];
        assert!(validate_report("Report", &cols).is_err());
    }

    #[test]
    fn test_bad_date_format_rejected() {
        let options = RenderOptions {
            date_format: "%Q".into(),
            ..RenderOptions::default()
        };
        let err = validate_options(&options).unwrap_err();
        assert!(err.is_caller_configuration());
        assert!(validate_options(&RenderOptions::default()).is_ok());
    }

    #[test]
    fn test_continuation_top_must_be_non_negative() {
        for continuation_top in [-500.0, f32::NAN, f32::INFINITY] {
            let mut options = RenderOptions::default();
            options.layout.continuation_top = continuation_top;
            let err = validate_options(&options).unwrap_err();
            assert!(err.is_caller_configuration());
        }

        let mut options = RenderOptions::default();
        options.layout.continuation_top = 0.0;
        assert!(validate_options(&options).is_ok());
    }
}
