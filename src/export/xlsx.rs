//! XLSX backend built on rust_xlsxwriter
//!
//! [`XlsxSheet`] collects the sheet in a [`SheetGrid`] and writes the
//! workbook in one go when finished.

use rust_xlsxwriter::{Color as XlsxColor, Format, FormatBorder, Workbook};

use crate::error::{ReportError, ReportResult};
use crate::models::Color;
use crate::render::sheet::{
    RowStyle, SheetCell, SheetColumn, SheetGrid, SheetValue, SpreadsheetSurface,
};

/// Longest sheet name Excel accepts
pub const MAX_SHEET_NAME: usize = 31;

const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// A [`SpreadsheetSurface`] producing XLSX bytes
#[derive(Debug, Default)]
pub struct XlsxSheet {
    grid: SheetGrid,
}

impl XlsxSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grid(&self) -> &SheetGrid {
        &self.grid
    }

    /// Serialize the workbook
    pub fn finish(self) -> ReportResult<Vec<u8>> {
        let grid = self.grid;
        let name = grid
            .name()
            .ok_or_else(|| ReportError::sheet_backend("no sheet has been created"))?;

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sanitize_sheet_name(name))?;

        for (col, column) in grid.columns().iter().enumerate() {
            worksheet.set_column_width(col as u16, column.width)?;
        }

        for (row, cells) in grid.rows().iter().enumerate() {
            let row = row as u32;
            let style = grid.row_style(row).copied().unwrap_or_default();
            for (col, cell) in cells.iter().enumerate() {
                let col = col as u16;
                let format = cell_format(&style, cell);
                match &cell.value {
                    SheetValue::Text(text) if text.is_empty() => {
                        worksheet.write_blank(row, col, &format)?;
                    }
                    SheetValue::Text(text) => {
                        worksheet.write_string_with_format(row, col, text, &format)?;
                    }
                    SheetValue::Number(n) => {
                        worksheet.write_number_with_format(row, col, *n, &format)?;
                    }
                }
            }
        }

        if let Some(filter) = grid.autofilter() {
            worksheet.autofilter(filter.row, filter.first_col, filter.row, filter.last_col)?;
        }

        Ok(workbook.save_to_buffer()?)
    }
}

impl SpreadsheetSurface for XlsxSheet {
    fn create_sheet(&mut self, name: &str) -> ReportResult<()> {
        self.grid.create_sheet(name)
    }

    fn declare_columns(&mut self, columns: &[SheetColumn]) -> ReportResult<()> {
        if let Some(column) = columns.iter().find(|c| !(c.width.is_finite() && c.width > 0.0)) {
            return Err(ReportError::sheet_backend(format!(
                "column '{}' has invalid width {}",
                column.header, column.width
            )));
        }
        self.grid.declare_columns(columns)
    }

    fn style_row(&mut self, row: u32, style: RowStyle) -> ReportResult<()> {
        self.grid.style_row(row, style)
    }

    fn append_rows(&mut self, rows: &[Vec<SheetCell>]) -> ReportResult<()> {
        self.grid.append_rows(rows)
    }

    fn set_autofilter(&mut self, row: u32, first_col: u16, last_col: u16) -> ReportResult<()> {
        self.grid.set_autofilter(row, first_col, last_col)
    }

    fn append_row(&mut self, row: Vec<SheetCell>) -> ReportResult<()> {
        self.grid.append_row(row)
    }
}

/// Make `name` acceptable as a worksheet name
pub fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if FORBIDDEN_SHEET_CHARS.contains(&c) { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'');
    let truncated: String = cleaned.chars().take(MAX_SHEET_NAME).collect();
    if truncated.trim().is_empty() {
        "Sheet1".to_string()
    } else {
        truncated
    }
}

fn xlsx_color(color: Color) -> XlsxColor {
    XlsxColor::RGB(color.to_hex())
}

/// Row style combined with the cell's own formatting
fn cell_format(style: &RowStyle, cell: &SheetCell) -> Format {
    let mut format = Format::new();
    if style.bold {
        format = format.set_bold();
    }
    if style.italic || cell.italic {
        format = format.set_italic();
    }
    if let Some(fill) = style.fill {
        format = format.set_background_color(xlsx_color(fill));
    }
    if style.bottom_border {
        format = format.set_border_bottom(FormatBorder::Thin);
    }
    if let Some(color) = cell.font_color {
        format = format.set_font_color(xlsx_color(color));
    }
    if let Some(num_format) = &cell.num_format {
        format = format.set_num_format(num_format);
    }
    format
}
