//! Record import for unireport
//!
//! Rows can be read untyped, straight into [`ReportRow`]s, or typed into the
//! record structs in [`crate::models`]. JSON input is an array of objects;
//! CSV input takes its keys from the header row.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ReportError, ReportResult};
use crate::models::{CellValue, ReportRow};

/// Supported input file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    /// Detect the format from the file extension
    pub fn from_path(path: &Path) -> ReportResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(InputFormat::Json),
            Some("csv") => Ok(InputFormat::Csv),
            _ => Err(ReportError::Import(format!(
                "Cannot tell the format of {}. Use a .json or .csv file",
                path.display()
            ))),
        }
    }
}

/// Read a JSON array of objects into rows
///
/// Strings become text, numbers become numbers, booleans become
/// `"true"`/`"false"` and `null` becomes empty. Nested arrays and objects
/// are kept as their JSON text.
pub fn load_json_rows<R: Read>(reader: R) -> ReportResult<Vec<ReportRow>> {
    let value: Value = serde_json::from_reader(reader)
        .map_err(|e| ReportError::Import(format!("Invalid JSON input: {}", e)))?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(ReportError::Import(format!(
                "Expected a JSON array of records, found {}",
                json_kind(&other)
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(fields) => Ok(fields
                .into_iter()
                .map(|(key, value)| (key, json_cell(value)))
                .collect::<ReportRow>()),
            other => Err(ReportError::Import(format!(
                "Record {} is {}, expected an object",
                index + 1,
                json_kind(&other)
            ))),
        })
        .collect()
}

fn json_cell(value: Value) -> CellValue {
    match value {
        Value::Null => CellValue::Empty,
        Value::Bool(b) => CellValue::Text(b.to_string()),
        Value::Number(n) => n.as_f64().map(CellValue::Number).unwrap_or_default(),
        Value::String(s) => CellValue::Text(s),
        nested => CellValue::Text(nested.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Read CSV with a header row into rows
///
/// Empty fields become empty cells and plain decimal fields become numbers.
pub fn load_csv_rows<R: Read>(reader: R) -> ReportResult<Vec<ReportRow>> {
    let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = reader
        .headers()
        .map_err(|e| ReportError::Import(format!("Invalid CSV header: {}", e)))?
        .clone();

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            ReportError::Import(format!("Error reading CSV record {}: {}", idx + 1, e))
        })?;
        rows.push(csv_row(&headers, &record));
    }
    Ok(rows)
}

fn csv_row(headers: &StringRecord, record: &StringRecord) -> ReportRow {
    headers
        .iter()
        .zip(record.iter())
        .map(|(key, field)| {
            let value = if field.is_empty() {
                CellValue::Empty
            } else if let Some(n) = decimal_number(field) {
                CellValue::Number(n)
            } else {
                CellValue::Text(field.to_string())
            };
            (key.to_string(), value)
        })
        .collect()
}

/// Parse plain decimal notation such as `4`, `-12.5` or `0.75`
///
/// Anything else stays text: `nan`, `inf`, exponents, a leading `+`, and
/// zero-padded codes like `007` that would lose their padding.
fn decimal_number(field: &str) -> Option<f64> {
    let digits = field.strip_prefix('-').unwrap_or(field);
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits, None),
    };

    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || (whole.len() > 1 && whole.starts_with('0')) {
        return None;
    }
    if fraction.is_some_and(|fraction| !all_digits(fraction)) {
        return None;
    }

    field.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Deserialize a JSON array into typed records
pub fn load_records<T: DeserializeOwned, R: Read>(reader: R) -> ReportResult<Vec<T>> {
    serde_json::from_reader(reader)
        .map_err(|e| ReportError::Import(format!("Invalid JSON input: {}", e)))
}

/// Deserialize CSV rows into typed records, matching fields by header
pub fn load_csv_records<T: DeserializeOwned, R: Read>(reader: R) -> ReportResult<Vec<T>> {
    let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    reader
        .deserialize()
        .enumerate()
        .map(|(idx, result)| {
            result.map_err(|e| {
                ReportError::Import(format!("Error reading CSV record {}: {}", idx + 1, e))
            })
        })
        .collect()
}

/// Load typed records from a `.json` or `.csv` file
pub fn load_file<T: DeserializeOwned>(path: &Path) -> ReportResult<Vec<T>> {
    let format = InputFormat::from_path(path)?;
    let file = File::open(path).map_err(|e| {
        ReportError::Import(format!("Failed to open {}: {}", path.display(), e))
    })?;
    let reader = BufReader::new(file);

    let records = match format {
        InputFormat::Json => load_records(reader)?,
        InputFormat::Csv => load_csv_records(reader)?,
    };
    debug!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Load untyped rows from a `.json` or `.csv` file
pub fn load_file_rows(path: &Path) -> ReportResult<Vec<ReportRow>> {
    let format = InputFormat::from_path(path)?;
    let file = File::open(path).map_err(|e| {
        ReportError::Import(format!("Failed to open {}: {}", path.display(), e))
    })?;
    let reader = BufReader::new(file);

    match format {
        InputFormat::Json => load_json_rows(reader),
        InputFormat::Csv => load_csv_rows(reader),
    }
}
