//! Paginated PDF table layout
//!
//! The layout is written against [`DrawingSurface`], so the same code drives
//! the pdf-writer backend and the recording surface used in tests.

use log::debug;

use super::format::{format_cell, Target};
use super::layout::PageLayout;
use super::metrics::truncate_to_width;
use super::surface::{with_fill_color, DrawingSurface, Font, Rect, TextOptions};
use super::validate::{validate_options, validate_report};
use super::RenderOptions;
use crate::error::ReportResult;
use crate::models::{palette, Color, ColumnSpec, ReportRow};

pub const TITLE_FONT_SIZE: f32 = 16.0;
pub const META_FONT_SIZE: f32 = 9.0;
pub const FOOTER_FONT_SIZE: f32 = 8.0;
/// Space between the timestamp line and the table
pub const TITLE_GAP: f32 = 20.0;
/// Horizontal padding inside every cell
pub const CELL_PADDING: f32 = 5.0;
/// Distance of the footer line from the bottom edge of the last page
pub const FOOTER_OFFSET: f32 = 30.0;

/// What a PDF render produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PdfSummary {
    pub pages: usize,
    pub data_rows: usize,
    /// Header emissions, including the repeats after page breaks
    pub header_rows: usize,
}

/// Position of the row a callback is asked to draw
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a> {
    /// Index in the input sequence
    pub index: usize,
    /// Top edge of the row
    pub y: f32,
    pub layout: &'a PageLayout,
}

/// Render a full report (title block, table, footer) onto `surface`
pub fn render_pdf<S: DrawingSurface>(
    surface: &mut S,
    records: &[ReportRow],
    title: &str,
    columns: &[ColumnSpec],
    options: &RenderOptions,
) -> ReportResult<PdfSummary> {
    validate_report(title, columns)?;
    validate_options(options)?;
    let mut layout = PageLayout::compute(
        columns,
        surface.page_width(),
        surface.page_height(),
        &options.layout,
    )?;

    debug!(
        "rendering '{}' as PDF: {} records, {} columns",
        title,
        records.len(),
        columns.len()
    );

    draw_title_block(surface, &layout, title, options)?;
    layout.table_top = surface.cursor_y() + TITLE_GAP;

    let font_size = options.layout.font_size;
    let summary = draw_paginated_table(
        surface,
        &layout,
        columns,
        records,
        font_size,
        |surface, record, ctx| draw_record(surface, record, columns, options, ctx),
    )?;

    draw_footer(surface, &layout, &options.footer_text)?;
    Ok(summary)
}

fn draw_title_block<S: DrawingSurface>(
    surface: &mut S,
    layout: &PageLayout,
    title: &str,
    options: &RenderOptions,
) -> ReportResult<()> {
    let width = layout.printable_width();

    surface.set_fill_color(palette::TEXT)?;
    surface.set_font(Font::Bold)?;
    surface.set_font_size(TITLE_FONT_SIZE)?;
    let title = truncate_to_width(title, Font::Bold, TITLE_FONT_SIZE, width);
    surface.draw_text(&title, layout.margin, layout.margin, TextOptions::centered(width))?;

    let stamp = format!(
        "Generated: {}",
        options.generated_at.format(&options.timestamp_format)
    );
    let y = surface.cursor_y();
    surface.set_font(Font::Regular)?;
    surface.set_font_size(META_FONT_SIZE)?;
    with_fill_color(surface, palette::MUTED, |s| {
        s.draw_text(&stamp, layout.margin, y, TextOptions::right(width))
    })
}

/// Draw `rows` as a table, repeating the header on every new page
///
/// `draw_row` draws the cell contents of one row; the routine owns the
/// header, backgrounds, borders and page breaks. Row backgrounds stripe by
/// input index, so a row's color does not depend on the page it lands on.
pub fn draw_paginated_table<S, R, F>(
    surface: &mut S,
    layout: &PageLayout,
    columns: &[ColumnSpec],
    rows: &[R],
    font_size: f32,
    mut draw_row: F,
) -> ReportResult<PdfSummary>
where
    S: DrawingSurface,
    F: FnMut(&mut S, &R, RowContext<'_>) -> ReportResult<()>,
{
    let mut summary = PdfSummary {
        pages: 1,
        ..PdfSummary::default()
    };

    draw_header(surface, layout, columns, layout.table_top, font_size)?;
    summary.header_rows += 1;
    let mut y = layout.table_top + layout.header_height;

    for (index, row) in rows.iter().enumerate() {
        if !layout.fits(y) {
            surface.new_page()?;
            summary.pages += 1;
            debug!("page break before row {} (page {})", index, summary.pages);

            y = layout.continuation_top;
            draw_header(surface, layout, columns, y, font_size)?;
            summary.header_rows += 1;
            y += layout.header_height;
        }

        let rect = Rect::new(layout.margin, y, layout.table_width(), layout.row_height);
        surface.set_fill_color(stripe_color(index))?;
        surface.fill_rect(rect)?;
        surface.set_stroke_color(palette::BORDER)?;
        surface.stroke_rect(rect)?;

        surface.set_fill_color(palette::TEXT)?;
        draw_row(surface, row, RowContext { index, y, layout })?;
        summary.data_rows += 1;
        y += layout.row_height;
    }

    Ok(summary)
}

/// Row background for the row at input index `index`
pub fn stripe_color(index: usize) -> Color {
    if index % 2 == 0 {
        palette::ROW_EVEN
    } else {
        palette::ROW_ODD
    }
}

fn draw_header<S: DrawingSurface>(
    surface: &mut S,
    layout: &PageLayout,
    columns: &[ColumnSpec],
    y: f32,
    font_size: f32,
) -> ReportResult<()> {
    let rect = Rect::new(layout.margin, y, layout.table_width(), layout.header_height);
    surface.set_fill_color(palette::HEADER_FILL)?;
    surface.fill_rect(rect)?;
    surface.set_stroke_color(palette::BORDER)?;
    surface.stroke_rect(rect)?;

    surface.set_fill_color(palette::TEXT)?;
    surface.set_font(Font::Bold)?;
    surface.set_font_size(font_size)?;
    let text_y = y + (layout.header_height - font_size) / 2.0;
    for (index, column) in columns.iter().enumerate() {
        draw_cell_text(surface, layout, index, &column.header, Font::Bold, font_size, text_y)?;
    }
    surface.set_font(Font::Regular)
}

fn draw_record<S: DrawingSurface>(
    surface: &mut S,
    record: &ReportRow,
    columns: &[ColumnSpec],
    options: &RenderOptions,
    ctx: RowContext<'_>,
) -> ReportResult<()> {
    let font_size = options.layout.font_size;
    surface.set_font_size(font_size)?;
    let text_y = ctx.y + (ctx.layout.row_height - font_size) / 2.0;

    for (index, column) in columns.iter().enumerate() {
        let text = format_cell(record.get(&column.key), &column.kind, options, Target::Pdf);
        match column.style_rule() {
            Some(rule) => with_fill_color(surface, rule.color_for(&text), |s| {
                draw_cell_text(s, ctx.layout, index, &text, Font::Regular, font_size, text_y)
            })?,
            None => {
                draw_cell_text(surface, ctx.layout, index, &text, Font::Regular, font_size, text_y)?
            }
        }
    }
    Ok(())
}

fn draw_cell_text<S: DrawingSurface>(
    surface: &mut S,
    layout: &PageLayout,
    column: usize,
    text: &str,
    font: Font,
    font_size: f32,
    y: f32,
) -> ReportResult<()> {
    let width = (layout.column_widths[column] - 2.0 * CELL_PADDING).max(0.0);
    let text = truncate_to_width(text, font, font_size, width);
    if text.is_empty() {
        return Ok(());
    }
    let x = layout.column_offsets[column] + CELL_PADDING;
    surface.draw_text(&text, x, y, TextOptions::left(width))
}

fn draw_footer<S: DrawingSurface>(
    surface: &mut S,
    layout: &PageLayout,
    footer: &str,
) -> ReportResult<()> {
    if footer.trim().is_empty() {
        return Ok(());
    }
    let width = layout.printable_width();
    surface.set_font(Font::Regular)?;
    surface.set_font_size(FOOTER_FONT_SIZE)?;
    let y = layout.page_height - FOOTER_OFFSET;
    with_fill_color(surface, palette::MUTED, |s| {
        s.draw_text(footer, layout.margin, y, TextOptions::centered(width))
    })
}
