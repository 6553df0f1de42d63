//! Page geometry for PDF tables

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};
use crate::models::ColumnSpec;

const WIDTH_TOLERANCE: f32 = 0.01;

/// Tunable table geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutOptions {
    /// Margin on every side of the page
    pub margin: f32,
    pub row_height: f32,
    pub header_height: f32,
    /// Body and header text size
    pub font_size: f32,
    /// Give every column the same share of the printable width
    pub uniform_widths: bool,
    /// Where the repeated header starts on continuation pages
    pub continuation_top: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            margin: 50.0,
            row_height: 20.0,
            header_height: 24.0,
            font_size: 9.0,
            uniform_widths: false,
            continuation_top: 50.0,
        }
    }
}

/// Geometry of one rendered table, derived once per render
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    /// Top of the header row on the first page
    pub table_top: f32,
    pub continuation_top: f32,
    pub row_height: f32,
    pub header_height: f32,
    pub column_widths: Vec<f32>,
    pub column_offsets: Vec<f32>,
}

impl PageLayout {
    /// Compute the layout and check that the table fits the page
    ///
    /// `table_top` starts at the top margin; callers move it below whatever
    /// they draw above the table.
    pub fn compute(
        columns: &[ColumnSpec],
        page_width: f32,
        page_height: f32,
        options: &LayoutOptions,
    ) -> ReportResult<Self> {
        let printable = page_width - 2.0 * options.margin;
        if printable <= 0.0 || page_height - 2.0 * options.margin <= 0.0 {
            return Err(ReportError::caller(format!(
                "margin {} leaves no printable area on a {}x{} page",
                options.margin, page_width, page_height
            )));
        }

        if !options.continuation_top.is_finite() || options.continuation_top < 0.0 {
            return Err(ReportError::caller(format!(
                "continuation top {} is not a position on the page",
                options.continuation_top
            )));
        }

        let bottom_limit = page_height - options.margin;
        if options.continuation_top + options.header_height + options.row_height > bottom_limit {
            return Err(ReportError::caller(
                "row and header heights do not fit on a continuation page",
            ));
        }

        let column_widths = resolve_column_widths(columns, printable, options.uniform_widths)?;
        let column_offsets = column_widths
            .iter()
            .scan(options.margin, |x, width| {
                let offset = *x;
                *x += width;
                Some(offset)
            })
            .collect();

        Ok(Self {
            page_width,
            page_height,
            margin: options.margin,
            table_top: options.margin,
            continuation_top: options.continuation_top,
            row_height: options.row_height,
            header_height: options.header_height,
            column_widths,
            column_offsets,
        })
    }

    pub fn printable_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    pub fn table_width(&self) -> f32 {
        self.column_widths.iter().sum()
    }

    /// Lowest y a row may reach
    pub fn bottom_limit(&self) -> f32 {
        self.page_height - self.margin
    }

    /// Check if a data row starting at `y` ends inside the page
    pub fn fits(&self, y: f32) -> bool {
        y + self.row_height <= self.bottom_limit()
    }
}

/// Resolve per-column widths within the printable width
///
/// Uniform mode splits the width evenly. Otherwise explicit widths are kept
/// and the columns without one share what remains.
pub fn resolve_column_widths(
    columns: &[ColumnSpec],
    printable_width: f32,
    uniform: bool,
) -> ReportResult<Vec<f32>> {
    if columns.is_empty() {
        return Err(ReportError::caller("at least one column is required"));
    }

    if uniform {
        let share = printable_width / columns.len() as f32;
        return Ok(vec![share; columns.len()]);
    }

    let explicit: f32 = columns.iter().filter_map(|c| c.width).sum();
    let implicit = columns.iter().filter(|c| c.width.is_none()).count();

    if explicit > printable_width + WIDTH_TOLERANCE {
        return Err(ReportError::caller(format!(
            "column widths total {:.1}pt but only {:.1}pt is printable",
            explicit, printable_width
        )));
    }

    let remaining = printable_width - explicit;
    if implicit > 0 && remaining <= WIDTH_TOLERANCE {
        return Err(ReportError::caller(
            "explicit column widths leave no room for the remaining columns",
        ));
    }

    let share = if implicit > 0 {
        remaining / implicit as f32
    } else {
        0.0
    };

    Ok(columns.iter().map(|c| c.width.unwrap_or(share)).collect())
}
