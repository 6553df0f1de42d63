//! Tabular report rendering
//!
//! Given rows and a column schema, the renderer produces either a paginated
//! PDF table or a single-sheet Excel workbook. The layouts are written
//! against two capability traits:
//!
//! - [`DrawingSurface`]: page drawing (fills, strokes, text, new pages)
//! - [`SpreadsheetSurface`]: sheet building (columns, rows, styles, filters)
//!
//! [`render`] wires them to the concrete pdf-writer and rust_xlsxwriter
//! backends in [`crate::export`]. [`render_pdf`] and [`render_excel`] accept
//! any implementation.
//!
//! Rendering is single-pass and keeps no state between calls. Report
//! definitions are validated before the first drawing call; backend failures
//! are propagated as-is and the partial document is dropped.

pub mod excel;
pub mod format;
pub mod layout;
pub mod metrics;
pub mod pdf;
pub mod sheet;
pub mod surface;
pub mod validate;

use chrono::NaiveDateTime;
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{ReportError, ReportResult};
use crate::export::{PdfSurface, XlsxSheet};
use crate::models::{ColumnSpec, ReportRow};

pub use excel::render_excel;
pub use format::{format_cell, Target};
pub use layout::{LayoutOptions, PageLayout};
pub use pdf::{draw_paginated_table, render_pdf, PdfSummary, RowContext};
pub use sheet::{RowStyle, SheetCell, SheetColumn, SheetGrid, SheetValue, SpreadsheetSurface};
pub use surface::{DrawList, DrawOp, DrawingSurface, Font, Rect, TextAlign, TextOptions};

/// Default footer on the last PDF page
pub const DEFAULT_FOOTER: &str = "University Management System - Confidential";

/// Default Excel column width in character units
pub const DEFAULT_EXCEL_COLUMN_WIDTH: f64 = 20.0;

/// Output document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pdf,
    Excel,
}

impl OutputFormat {
    /// File extension for documents of this format
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Excel => "xlsx",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Pdf => write!(f, "pdf"),
            OutputFormat::Excel => write!(f, "excel"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Ok(OutputFormat::Pdf),
            "excel" | "xlsx" => Ok(OutputFormat::Excel),
            other => Err(ReportError::Validation(format!(
                "Unknown output format '{}'. Use pdf or excel",
                other
            ))),
        }
    }
}

/// Page dimensions in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl Default for PageSize {
    fn default() -> Self {
        Self {
            width: surface::A4_WIDTH,
            height: surface::A4_HEIGHT,
        }
    }
}

/// Everything a render needs besides rows, title and columns
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub currency_symbol: String,
    /// strftime format for date cells
    pub date_format: String,
    /// strftime format for the PDF generation timestamp
    pub timestamp_format: String,
    pub generated_at: NaiveDateTime,
    pub footer_text: String,
    /// Excel sheet name; the title is used when empty
    pub sheet_name: String,
    pub excel_column_width: f64,
    pub page: PageSize,
    pub layout: LayoutOptions,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            date_format: "%m/%d/%Y".to_string(),
            timestamp_format: "%m/%d/%Y %H:%M".to_string(),
            // Unix epoch; callers stamp the real render time
            generated_at: NaiveDateTime::default(),
            footer_text: DEFAULT_FOOTER.to_string(),
            sheet_name: String::new(),
            excel_column_width: DEFAULT_EXCEL_COLUMN_WIDTH,
            page: PageSize::default(),
            layout: LayoutOptions::default(),
        }
    }
}

/// A finished document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub format: OutputFormat,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the document to `path`
    pub fn write_to(&self, path: &Path) -> ReportResult<()> {
        std::fs::write(path, &self.bytes).map_err(|e| {
            ReportError::Export(format!("Failed to write {}: {}", path.display(), e))
        })
    }
}

/// Render `records` as a document in `format`
pub fn render(
    records: &[ReportRow],
    title: &str,
    columns: &[ColumnSpec],
    format: OutputFormat,
    options: &RenderOptions,
) -> ReportResult<Document> {
    let bytes = match format {
        OutputFormat::Pdf => {
            let mut surface = PdfSurface::new(options.page.width, options.page.height)?;
            surface.set_title(title);
            let summary = render_pdf(&mut surface, records, title, columns, options)?;
            info!(
                "rendered '{}': {} rows on {} pages",
                title, summary.data_rows, summary.pages
            );
            surface.finish()?
        }
        OutputFormat::Excel => {
            let mut sheet = XlsxSheet::new();
            render_excel(&mut sheet, records, title, columns, options)?;
            info!("rendered '{}': {} rows to Excel", title, records.len());
            sheet.finish()?
        }
    };

    Ok(Document { format, bytes })
}
