//! Payments Report
//!
//! Fee payments across students. Statuses are colored with
//! [`StyleRule::payment_status`].

use crate::error::ReportResult;
use crate::models::{ColumnSpec, Payment, StyleRule};
use crate::render::{Document, OutputFormat, RenderOptions};

use super::{render_records, ReportKind};

pub const TITLE: &str = "Payments Report";
pub const SHEET_NAME: &str = "Payments";

pub fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("Student ID", "studentId").width(70.0),
        ColumnSpec::new("Student", "studentName"),
        ColumnSpec::currency("Amount", "amount").width(70.0),
        ColumnSpec::date("Date", "date").width(60.0),
        ColumnSpec::new("Method", "method"),
        ColumnSpec::status("Status", "status", StyleRule::payment_status()).width(60.0),
    ]
}

/// Render the payments report
pub fn generate_payments_report(
    payments: &[Payment],
    format: OutputFormat,
    options: &RenderOptions,
) -> ReportResult<Document> {
    render_records(ReportKind::Payments, payments, None, format, options)
}
