//! Students Report
//!
//! One row per enrolled student with contact and faculty details.

use crate::error::ReportResult;
use crate::models::{ColumnSpec, Student};
use crate::render::{Document, OutputFormat, RenderOptions};

use super::{render_records, ReportKind};

pub const TITLE: &str = "Students Report";
pub const SHEET_NAME: &str = "Students";

/// Column schema of the students report
pub fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("Student ID", "studentId").width(70.0),
        ColumnSpec::new("Name", "name"),
        ColumnSpec::new("Email", "email").width(120.0),
        ColumnSpec::new("Faculty", "faculty"),
        ColumnSpec::new("Department", "department"),
        ColumnSpec::date("Enrolled", "enrollmentDate").width(60.0),
    ]
}

/// Render the students report
pub fn generate_students_report(
    students: &[Student],
    format: OutputFormat,
    options: &RenderOptions,
) -> ReportResult<Document> {
    render_records(ReportKind::Students, students, None, format, options)
}
