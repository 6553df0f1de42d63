//! Excel worksheet layout

use log::debug;

use super::format::{format_cell, is_missing, Target};
use super::sheet::{RowStyle, SheetCell, SheetColumn, SpreadsheetSurface};
use super::validate::{validate_options, validate_report};
use super::RenderOptions;
use crate::error::ReportResult;
use crate::models::{palette, CellValue, ColumnKind, ColumnSpec, Money, ReportRow};

/// Render a report as a single striped, filterable sheet
///
/// The sheet is named after `options.sheet_name`, falling back to the title.
pub fn render_excel<S: SpreadsheetSurface>(
    sheet: &mut S,
    records: &[ReportRow],
    title: &str,
    columns: &[ColumnSpec],
    options: &RenderOptions,
) -> ReportResult<()> {
    validate_report(title, columns)?;
    validate_options(options)?;

    let sheet_name = if options.sheet_name.trim().is_empty() {
        title
    } else {
        options.sheet_name.as_str()
    };
    debug!(
        "rendering '{}' as Excel sheet '{}': {} records",
        title,
        sheet_name,
        records.len()
    );

    sheet.create_sheet(sheet_name)?;

    let declared: Vec<SheetColumn> = columns
        .iter()
        .map(|column| SheetColumn {
            header: column.header.clone(),
            key: column.key.clone(),
            width: column
                .width
                .map(f64::from)
                .unwrap_or(options.excel_column_width),
        })
        .collect();
    sheet.declare_columns(&declared)?;
    sheet.style_row(
        0,
        RowStyle {
            bold: true,
            fill: Some(palette::SHEET_HEADER_FILL),
            bottom_border: true,
            ..RowStyle::default()
        },
    )?;

    let rows: Vec<Vec<SheetCell>> = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| sheet_cell(record, column, options))
                .collect()
        })
        .collect();
    sheet.append_rows(&rows)?;

    // Sheet position p (1-based, header at 1) is row p - 1; data row i sits
    // at position i + 2.
    for index in (0..records.len()).filter(|i| (i + 2) % 2 == 0) {
        sheet.style_row(
            index as u32 + 1,
            RowStyle {
                fill: Some(palette::SHEET_STRIPE_FILL),
                ..RowStyle::default()
            },
        )?;
    }

    let last_col = (columns.len() - 1) as u16;
    sheet.set_autofilter(0, 0, last_col)?;

    let date = options.generated_at.date().format(&options.date_format);
    sheet.append_row(vec![SheetCell::text(format!("Generated on {}", date)).italic()])?;
    Ok(())
}

/// Number format for currency cells, with the symbol quoted as a literal
pub fn currency_num_format(symbol: &str) -> String {
    format!("\"{}\"#,##0.00", symbol.replace('"', ""))
}

fn sheet_cell(record: &ReportRow, column: &ColumnSpec, options: &RenderOptions) -> SheetCell {
    let value = record.get(&column.key);
    if is_missing(value) {
        let cell = SheetCell::text(Target::Excel.placeholder());
        return match &column.kind {
            ColumnKind::Status(rule) => cell.with_font_color(rule.default_color()),
            _ => cell,
        };
    }

    let currency = || currency_num_format(&options.currency_symbol);
    match (&column.kind, value) {
        (_, Some(CellValue::Currency(money))) => {
            SheetCell::number(money.to_major()).with_num_format(currency())
        }
        (ColumnKind::Currency, Some(CellValue::Number(n))) => match Money::from_major(*n) {
            Some(money) => SheetCell::number(money.to_major()).with_num_format(currency()),
            None => SheetCell::number(*n).with_num_format(currency()),
        },
        (ColumnKind::Currency, Some(CellValue::Text(text))) => match Money::parse(text) {
            Ok(money) => SheetCell::number(money.to_major()).with_num_format(currency()),
            Err(_) => SheetCell::text(text.as_str()),
        },
        (ColumnKind::Text | ColumnKind::Number, Some(CellValue::Number(n))) => {
            SheetCell::number(*n)
        }
        (ColumnKind::Status(rule), _) => {
            let label = format_cell(value, &column.kind, options, Target::Excel);
            let color = rule.color_for(&label);
            SheetCell::text(label).with_font_color(color)
        }
        _ => SheetCell::text(format_cell(value, &column.kind, options, Target::Excel)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StyleRule;
    use crate::render::sheet::{AutoFilter, SheetGrid, SheetValue};
    use chrono::NaiveDate;

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::new("Student", "name"),
            ColumnSpec::currency("Amount", "amount").width(14.0),
            ColumnSpec::date("Date", "date"),
            ColumnSpec::status("Status", "status", StyleRule::payment_status()),
        ]
    }

    fn options() -> RenderOptions {
        RenderOptions {
            sheet_name: "Payments".into(),
            generated_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            ..RenderOptions::default()
        }
    }

    fn records(n: usize) -> Vec<ReportRow> {
        (0..n)
            .map(|i| {
                ReportRow::new()
                    .with("name", format!("Student {}", i))
                    .with("amount", Money::from_cents(10_000 + i as i64))
                    .with("date", NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
                    .with("status", if i % 2 == 0 { "PAID" } else { "DUE" })
            })
            .collect()
    }

    #[test]
    fn test_sheet_structure() {
        let mut grid = SheetGrid::new();
        render_excel(&mut grid, &records(3), "Payments Report", &columns(), &options()).unwrap();

        assert_eq!(grid.name(), Some("Payments"));
        let widths: Vec<f64> = grid.columns().iter().map(|c| c.width).collect();
        assert_eq!(widths, vec![20.0, 14.0, 20.0, 20.0]);

        // header + 3 data rows + trailing date row
        assert_eq!(grid.rows().len(), 5);
        let header = grid.row_style(0).unwrap();
        assert!(header.bold && header.bottom_border);
        assert_eq!(header.fill, Some(palette::SHEET_HEADER_FILL));
        assert_eq!(
            grid.autofilter(),
            Some(AutoFilter { row: 0, first_col: 0, last_col: 3 })
        );

        let trailer = &grid.rows()[4];
        assert_eq!(trailer.len(), 1);
        assert_eq!(trailer[0].as_text(), Some("Generated on 05/01/2024"));
        assert!(trailer[0].italic);
    }

    #[test]
    fn test_zebra_striping_on_even_positions() {
        let mut grid = SheetGrid::new();
        render_excel(&mut grid, &records(5), "Payments Report", &columns(), &options()).unwrap();

        let striped: Vec<u32> = (1..=5)
            .filter(|row| {
                grid.row_style(*row).and_then(|s| s.fill) == Some(palette::SHEET_STRIPE_FILL)
            })
            .collect();
        assert_eq!(striped, vec![1, 3, 5]);
        assert!(grid.row_style(6).is_none());
    }

    #[test]
    fn test_cell_typing() {
        let mut grid = SheetGrid::new();
        let mut rows = records(2);
        rows.push(ReportRow::new().with("name", "Sparse"));
        render_excel(&mut grid, &rows, "Payments Report", &columns(), &options()).unwrap();

        let first = &grid.rows()[1];
        assert_eq!(first[1].value, SheetValue::Number(100.0));
        assert_eq!(first[1].num_format.as_deref(), Some("\"$\"#,##0.00"));
        assert_eq!(first[2].as_text(), Some("01/15/2024"));
        assert_eq!(first[3].font_color, Some(palette::STATUS_GREEN));
        assert_eq!(grid.rows()[2][3].font_color, Some(palette::STATUS_RED));

        let sparse = &grid.rows()[3];
        assert_eq!(sparse[1].as_text(), Some(""));
        assert_eq!(sparse[3].font_color, Some(palette::STATUS_DEFAULT));
    }

    #[test]
    fn test_missing_status_keeps_rule_default_color() {
        let mut grid = SheetGrid::new();
        let rule = StyleRule::payment_status();
        let rows = vec![
            ReportRow::new().with("name", "No status"),
            ReportRow::new()
                .with("name", "Blank status")
                .with("status", CellValue::Empty),
        ];
        render_excel(&mut grid, &rows, "Payments Report", &columns(), &options()).unwrap();

        for row in &grid.rows()[1..3] {
            assert_eq!(row[3].as_text(), Some(""));
            assert_eq!(row[3].font_color, Some(rule.default_color()));
            assert_eq!(row[0].font_color, None);
        }
    }

    #[test]
    fn test_out_of_range_currency_number_keeps_value() {
        let mut grid = SheetGrid::new();
        let rows = vec![ReportRow::new().with("amount", 1e20)];
        render_excel(&mut grid, &rows, "Payments Report", &columns(), &options()).unwrap();

        let cell = &grid.rows()[1][1];
        assert_eq!(cell.value, SheetValue::Number(1e20));
        assert_eq!(cell.num_format.as_deref(), Some("\"$\"#,##0.00"));
    }

    #[test]
    fn test_empty_records() {
        let mut grid = SheetGrid::new();
        render_excel(&mut grid, &[], "Payments Report", &columns(), &options()).unwrap();
        assert_eq!(grid.rows().len(), 2);
    }

    #[test]
    fn test_invalid_columns_touch_nothing() {
        let mut grid = SheetGrid::new();
        let cols = vec![ColumnSpec::new("A", "a"), ColumnSpec::new("B", "a")];
        let err = render_excel(&mut grid, &records(1), "Report", &cols, &options()).unwrap_err();
        assert!(err.is_caller_configuration());
        assert!(grid.name().is_none());
    }

    #[test]
    fn test_sheet_name_falls_back_to_title() {
        let mut grid = SheetGrid::new();
        let opts = RenderOptions {
            sheet_name: String::new(),
            ..options()
        };
        render_excel(&mut grid, &[], "Courses Report", &columns(), &opts).unwrap();
        assert_eq!(grid.name(), Some("Courses Report"));
    }
}
