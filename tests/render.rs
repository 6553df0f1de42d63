//! End-to-end rendering properties, checked through the recording surfaces

use chrono::NaiveDate;
use unireport::models::{palette, ColumnSpec, Payment, ReportRow, StyleRule, ToReportRow};
use unireport::render::{
    render, render_excel, render_pdf, DrawList, Font, LayoutOptions, OutputFormat, PageSize,
    RenderOptions, SheetGrid,
};
use unireport::reports::{payments, ReportKind};

fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("Name", "name"),
        ColumnSpec::currency("Balance", "balance"),
        ColumnSpec::date("Enrolled", "enrolled"),
    ]
}

fn records(n: usize) -> Vec<ReportRow> {
    (0..n)
        .map(|i| {
            ReportRow::new()
                .with("name", format!("Student {:02}", i))
                .with("balance", 100.0 * i as f64)
                .with("enrolled", NaiveDate::from_ymd_opt(2023, 9, 1).unwrap())
        })
        .collect()
}

fn options() -> RenderOptions {
    RenderOptions {
        generated_at: NaiveDate::from_ymd_opt(2024, 6, 30)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
        ..RenderOptions::default()
    }
}

/// 880pt pages with 30pt rows: the first page holds 700pt of rows below the
/// title block and header, continuation pages start at 50pt
fn tall_page_options() -> RenderOptions {
    RenderOptions {
        page: PageSize {
            width: 600.0,
            height: 880.0,
        },
        layout: LayoutOptions {
            margin: 50.0,
            row_height: 30.0,
            header_height: 30.0,
            continuation_top: 50.0,
            ..LayoutOptions::default()
        },
        ..options()
    }
}

fn header_runs(list: &DrawList, header: &str) -> usize {
    list.text_runs()
        .iter()
        .filter(|run| run.font == Font::Bold && run.text == header)
        .count()
}

#[test]
fn test_any_record_count_renders_in_both_formats() {
    for n in [0, 1, 7] {
        for format in [OutputFormat::Pdf, OutputFormat::Excel] {
            let doc = render(&records(n), "Students Report", &columns(), format, &options())
                .unwrap();
            assert!(!doc.is_empty());
        }
    }
}

#[test]
fn test_header_row_follows_column_order() {
    let mut list = DrawList::a4();
    render_pdf(&mut list, &records(2), "Students Report", &columns(), &options()).unwrap();
    let headers: Vec<String> = list
        .text_runs()
        .into_iter()
        .filter(|run| run.font == Font::Bold && run.size == 9.0)
        .map(|run| run.text)
        .collect();
    assert_eq!(headers, vec!["Name", "Balance", "Enrolled"]);

    let mut grid = SheetGrid::new();
    render_excel(&mut grid, &records(2), "Students Report", &columns(), &options()).unwrap();
    let headers: Vec<&str> = grid.rows()[0].iter().filter_map(|c| c.as_text()).collect();
    assert_eq!(headers, vec!["Name", "Balance", "Enrolled"]);
}

#[test]
fn test_forty_five_rows_break_once() {
    let opts = tall_page_options();
    let mut list = DrawList::new(opts.page.width, opts.page.height);
    let summary = render_pdf(&mut list, &records(45), "Students Report", &columns(), &opts).unwrap();

    assert_eq!(summary.pages, 2);
    assert_eq!(summary.header_rows, 2);
    assert_eq!(summary.data_rows, 45);
    assert_eq!(list.page_count(), 2);
    assert_eq!(header_runs(&list, "Name"), 2);

    let first_page_rows = list
        .text_runs()
        .iter()
        .filter(|run| run.page == 1 && run.text.starts_with("Student "))
        .count();
    assert_eq!(first_page_rows, 23);
}

#[test]
fn test_data_row_count_excludes_repeated_headers() {
    let opts = tall_page_options();
    let mut list = DrawList::new(opts.page.width, opts.page.height);
    render_pdf(&mut list, &records(120), "Students Report", &columns(), &opts).unwrap();

    let fills = list.filled_rects();
    let rows = fills
        .iter()
        .filter(|f| f.color == palette::ROW_EVEN || f.color == palette::ROW_ODD)
        .count();
    let headers = fills.iter().filter(|f| f.color == palette::HEADER_FILL).count();
    assert_eq!(rows, 120);
    assert_eq!(headers, list.page_count());

    let mut grid = SheetGrid::new();
    render_excel(&mut grid, &records(120), "Students Report", &columns(), &opts).unwrap();
    // header + data + generated-on row
    assert_eq!(grid.rows().len(), 122);
}

#[test]
fn test_zebra_follows_input_index_across_pages() {
    let opts = tall_page_options();
    let mut list = DrawList::new(opts.page.width, opts.page.height);
    render_pdf(&mut list, &records(45), "Students Report", &columns(), &opts).unwrap();

    let stripes: Vec<_> = list
        .filled_rects()
        .into_iter()
        .filter(|f| f.color != palette::HEADER_FILL)
        .collect();
    assert_eq!(stripes.len(), 45);
    for (index, fill) in stripes.iter().enumerate() {
        let expected = if index % 2 == 0 {
            palette::ROW_EVEN
        } else {
            palette::ROW_ODD
        };
        assert_eq!(fill.color, expected, "row {}", index);
    }
    // row 23 opens page 2 and keeps its odd stripe
    assert_eq!(stripes[23].page, 2);
    assert_eq!(stripes[23].color, palette::ROW_ODD);
}

#[test]
fn test_missing_key_renders_placeholder() {
    let mut list = DrawList::a4();
    let rows = vec![ReportRow::new().with("name", "Only A Name")];
    render_pdf(&mut list, &rows, "Students Report", &columns(), &options()).unwrap();
    let placeholders = list.text_runs().iter().filter(|r| r.text == "N/A").count();
    assert_eq!(placeholders, 2);
}

#[test]
fn test_empty_columns_make_no_drawing_calls() {
    let mut list = DrawList::a4();
    let err = render_pdf(&mut list, &records(3), "Students Report", &[], &options()).unwrap_err();
    assert!(err.is_caller_configuration());
    assert!(list.ops().is_empty());

    let mut grid = SheetGrid::new();
    let err = render_excel(&mut grid, &records(3), "Students Report", &[], &options()).unwrap_err();
    assert!(err.is_caller_configuration());
    assert!(grid.name().is_none());
}

#[test]
fn test_capability_failure_is_propagated() {
    let mut list = DrawList::failing_after(600.0, 880.0, 40);
    let err = render_pdf(&mut list, &records(10), "Students Report", &columns(), &options())
        .unwrap_err();
    assert!(err.is_capability());
    assert!(!err.is_caller_configuration());
}

#[test]
fn test_payment_status_colors() {
    let payments_in: Vec<Payment> = ["PAID", "PENDING", "DUE", "REFUNDED"]
        .iter()
        .enumerate()
        .map(|(i, status)| Payment {
            student_id: format!("S-{}", i),
            student_name: Some(format!("Student {}", i)),
            amount: Some(500.0),
            date: Some("2024-03-01".into()),
            method: Some("Card".into()),
            status: Some(status.to_string()),
        })
        .collect();
    let rows: Vec<ReportRow> = payments_in.iter().map(ToReportRow::to_report_row).collect();

    let mut list = DrawList::a4();
    render_pdf(&mut list, &rows, payments::TITLE, &payments::columns(), &options()).unwrap();
    let color_of = |label: &str| {
        list.text_runs()
            .into_iter()
            .find(|run| run.text == label)
            .map(|run| run.color)
    };
    assert_eq!(color_of("PAID"), Some(palette::STATUS_GREEN));
    assert_eq!(color_of("PENDING"), Some(palette::STATUS_AMBER));
    assert_eq!(color_of("DUE"), Some(palette::STATUS_RED));
    assert_eq!(color_of("REFUNDED"), Some(palette::STATUS_DEFAULT));
    // drawn right after row 0's status cell
    assert_eq!(color_of("Student 1"), Some(palette::TEXT));

    let mut grid = SheetGrid::new();
    render_excel(&mut grid, &rows, payments::TITLE, &payments::columns(), &options()).unwrap();
    let status_col = payments::columns().len() - 1;
    assert_eq!(grid.rows()[1][status_col].font_color, Some(palette::STATUS_GREEN));
    assert_eq!(grid.rows()[4][status_col].font_color, Some(palette::STATUS_DEFAULT));
}

#[test]
fn test_custom_status_rule() {
    let rule = StyleRule::new(palette::STATUS_DEFAULT).with("active", palette::STATUS_GREEN);
    let cols = vec![
        ColumnSpec::new("Code", "code"),
        ColumnSpec::status("State", "state", rule),
    ];
    let rows = vec![ReportRow::new().with("code", "CS101").with("state", "Active")];

    let mut list = DrawList::a4();
    render_pdf(&mut list, &rows, "Courses Report", &cols, &options()).unwrap();
    let run = list.text_runs().into_iter().find(|r| r.text == "Active").unwrap();
    assert_eq!(run.color, palette::STATUS_GREEN);
}

#[test]
fn test_real_pdf_has_one_page_per_break() {
    let opts = tall_page_options();
    let doc = render(&records(45), "Students Report", &columns(), OutputFormat::Pdf, &opts).unwrap();
    let text = String::from_utf8_lossy(&doc.bytes);
    assert!(text.contains("/Count 2"));
}

#[test]
fn test_statement_report_through_kind() {
    let rows = vec![ReportRow::new()
        .with("description", "Library fine")
        .with("amount", -12.5)];
    let doc = ReportKind::Statement
        .render_rows(&rows, Some("Ada Lovelace"), OutputFormat::Excel, &options())
        .unwrap();
    assert!(doc.bytes.starts_with(b"PK"));
    assert!(ReportKind::Statement
        .render_rows(&rows, None, OutputFormat::Pdf, &options())
        .unwrap_err()
        .is_caller_configuration());
}
