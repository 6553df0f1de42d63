//! Student transaction statement
//!
//! The ledger of one student's charges and payments. The title carries the
//! student's name.

use crate::error::ReportResult;
use crate::models::{ColumnSpec, StudentTransaction, StyleRule};
use crate::render::{Document, OutputFormat, RenderOptions};

use super::{render_records, ReportKind};

pub const SHEET_NAME: &str = "Statement";

/// Statement title for `student`
pub fn title(student: &str) -> String {
    format!("Transaction Statement: {}", student.trim())
}

pub fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::date("Date", "date").width(65.0),
        ColumnSpec::new("Description", "description"),
        ColumnSpec::new("Reference", "reference").width(90.0),
        ColumnSpec::currency("Amount", "amount").width(75.0),
        ColumnSpec::status("Status", "status", StyleRule::payment_status()).width(65.0),
    ]
}

/// Render the statement of `student`
///
/// # Errors
///
/// A blank student name is a report configuration error.
pub fn generate_student_statement(
    student: &str,
    transactions: &[StudentTransaction],
    format: OutputFormat,
    options: &RenderOptions,
) -> ReportResult<Document> {
    render_records(ReportKind::Statement, transactions, Some(student), format, options)
}
