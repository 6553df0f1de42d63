//! The spreadsheet capability consumed by the Excel layout
//!
//! [`SheetGrid`] is the in-memory implementation: it keeps the declared
//! columns, the cell grid, row styles and the auto-filter exactly as the
//! layout issued them. The XLSX backend wraps a grid and serializes it.

use std::collections::BTreeMap;

use crate::error::{ReportError, ReportResult};
use crate::models::Color;

/// A typed cell value
#[derive(Debug, Clone, PartialEq)]
pub enum SheetValue {
    Text(String),
    Number(f64),
}

/// One cell with its cell-level formatting
#[derive(Debug, Clone, PartialEq)]
pub struct SheetCell {
    pub value: SheetValue,
    pub num_format: Option<String>,
    pub font_color: Option<Color>,
    pub italic: bool,
}

impl SheetCell {
    pub fn text(text: impl Into<String>) -> Self {
        Self::from_value(SheetValue::Text(text.into()))
    }

    pub fn number(value: f64) -> Self {
        Self::from_value(SheetValue::Number(value))
    }

    fn from_value(value: SheetValue) -> Self {
        Self {
            value,
            num_format: None,
            font_color: None,
            italic: false,
        }
    }

    pub fn with_num_format(mut self, format: impl Into<String>) -> Self {
        self.num_format = Some(format.into());
        self
    }

    pub fn with_font_color(mut self, color: Color) -> Self {
        self.font_color = Some(color);
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// The cell's text, if it holds text
    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            SheetValue::Text(text) => Some(text),
            SheetValue::Number(_) => None,
        }
    }
}

/// A declared column
#[derive(Debug, Clone, PartialEq)]
pub struct SheetColumn {
    pub header: String,
    pub key: String,
    /// Width in character units
    pub width: f64,
}

/// Row-level formatting
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RowStyle {
    pub bold: bool,
    pub italic: bool,
    pub fill: Option<Color>,
    pub bottom_border: bool,
}

/// Auto-filter region: one row across a column range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoFilter {
    pub row: u32,
    pub first_col: u16,
    pub last_col: u16,
}

/// A single-sheet spreadsheet target
///
/// Row 0 holds the headers written by `declare_columns`; appended rows
/// follow in call order.
pub trait SpreadsheetSurface {
    fn create_sheet(&mut self, name: &str) -> ReportResult<()>;
    fn declare_columns(&mut self, columns: &[SheetColumn]) -> ReportResult<()>;
    fn style_row(&mut self, row: u32, style: RowStyle) -> ReportResult<()>;
    fn append_rows(&mut self, rows: &[Vec<SheetCell>]) -> ReportResult<()>;
    fn set_autofilter(&mut self, row: u32, first_col: u16, last_col: u16) -> ReportResult<()>;
    fn append_row(&mut self, row: Vec<SheetCell>) -> ReportResult<()>;
}

/// In-memory spreadsheet
#[derive(Debug, Clone, Default)]
pub struct SheetGrid {
    name: Option<String>,
    columns: Vec<SheetColumn>,
    rows: Vec<Vec<SheetCell>>,
    row_styles: BTreeMap<u32, RowStyle>,
    autofilter: Option<AutoFilter>,
}

impl SheetGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn columns(&self) -> &[SheetColumn] {
        &self.columns
    }

    /// All rows, header first
    pub fn rows(&self) -> &[Vec<SheetCell>] {
        &self.rows
    }

    pub fn row_style(&self, row: u32) -> Option<&RowStyle> {
        self.row_styles.get(&row)
    }

    pub fn autofilter(&self) -> Option<AutoFilter> {
        self.autofilter
    }

    fn require_sheet(&self) -> ReportResult<()> {
        if self.name.is_none() {
            return Err(ReportError::sheet_backend("no sheet has been created"));
        }
        Ok(())
    }

    fn require_columns(&self) -> ReportResult<()> {
        self.require_sheet()?;
        if self.columns.is_empty() {
            return Err(ReportError::sheet_backend("columns have not been declared"));
        }
        Ok(())
    }
}

impl SpreadsheetSurface for SheetGrid {
    fn create_sheet(&mut self, name: &str) -> ReportResult<()> {
        if self.name.is_some() {
            return Err(ReportError::sheet_backend("sheet already created"));
        }
        self.name = Some(name.to_string());
        Ok(())
    }

    fn declare_columns(&mut self, columns: &[SheetColumn]) -> ReportResult<()> {
        self.require_sheet()?;
        if !self.rows.is_empty() {
            return Err(ReportError::sheet_backend(
                "columns must be declared before rows are added",
            ));
        }
        self.columns = columns.to_vec();
        self.rows
            .push(columns.iter().map(|c| SheetCell::text(c.header.as_str())).collect());
        Ok(())
    }

    fn style_row(&mut self, row: u32, style: RowStyle) -> ReportResult<()> {
        self.require_columns()?;
        if row as usize >= self.rows.len() {
            return Err(ReportError::sheet_backend(format!(
                "cannot style row {} of a {}-row sheet",
                row,
                self.rows.len()
            )));
        }
        self.row_styles.insert(row, style);
        Ok(())
    }

    fn append_rows(&mut self, rows: &[Vec<SheetCell>]) -> ReportResult<()> {
        self.require_columns()?;
        self.rows.extend(rows.iter().cloned());
        Ok(())
    }

    fn set_autofilter(&mut self, row: u32, first_col: u16, last_col: u16) -> ReportResult<()> {
        self.require_columns()?;
        if first_col > last_col || last_col as usize >= self.columns.len() {
            return Err(ReportError::sheet_backend(format!(
                "auto-filter columns {}..={} outside the {} declared columns",
                first_col,
                last_col,
                self.columns.len()
            )));
        }
        self.autofilter = Some(AutoFilter {
            row,
            first_col,
            last_col,
        });
        Ok(())
    }

    fn append_row(&mut self, row: Vec<SheetCell>) -> ReportResult<()> {
        self.require_columns()?;
        self.rows.push(row);
        Ok(())
    }
}
