//! Cell value formatting
//!
//! Turns a row value into the text a given output shows for its column.

use log::trace;

use super::RenderOptions;
use crate::models::{parse_iso_date, CellValue, ColumnKind, Money};

/// Output target, which decides the placeholder for missing values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Pdf,
    Excel,
}

impl Target {
    pub const fn placeholder(self) -> &'static str {
        match self {
            Target::Pdf => "N/A",
            Target::Excel => "",
        }
    }
}

/// Check if a value should render as the placeholder
pub fn is_missing(value: Option<&CellValue>) -> bool {
    match value {
        None | Some(CellValue::Empty) => true,
        Some(CellValue::Text(text)) => text.trim().is_empty(),
        Some(CellValue::Number(n)) => !n.is_finite(),
        _ => false,
    }
}

/// Format a cell for display in a column of the given kind
pub fn format_cell(
    value: Option<&CellValue>,
    kind: &ColumnKind,
    options: &RenderOptions,
    target: Target,
) -> String {
    let value = match value {
        Some(value) if !is_missing(Some(value)) => value,
        _ => {
            trace!("substituting placeholder for missing {} value", kind);
            return target.placeholder().to_string();
        }
    };

    match (kind, value) {
        (ColumnKind::Currency, CellValue::Number(n)) => match Money::from_major(*n) {
            Some(money) => money.format_with_symbol(&options.currency_symbol),
            None => format_large_currency(*n, &options.currency_symbol),
        },
        (ColumnKind::Currency, CellValue::Text(text)) => match Money::parse(text) {
            Ok(money) => money.format_with_symbol(&options.currency_symbol),
            Err(_) => text.clone(),
        },
        (ColumnKind::Date, CellValue::Text(text)) => match parse_iso_date(text) {
            Some(date) => date.format(&options.date_format).to_string(),
            None => text.clone(),
        },
        (_, value) => format_plain(value, options),
    }
}

fn format_plain(value: &CellValue, options: &RenderOptions) -> String {
    match value {
        CellValue::Text(text) => text.clone(),
        CellValue::Number(n) => format_number(*n),
        CellValue::Currency(money) => money.format_with_symbol(&options.currency_symbol),
        CellValue::Date(date) => date.format(&options.date_format).to_string(),
        CellValue::Empty => String::new(),
    }
}

/// Currency beyond whole-cent range, printed from the float itself
fn format_large_currency(n: f64, symbol: &str) -> String {
    if n < 0.0 {
        format!("-{}{:.2}", symbol, -n)
    } else {
        format!("{}{:.2}", symbol, n)
    }
}

/// Whole numbers print without a decimal point
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
