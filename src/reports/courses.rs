//! Courses Report

use crate::error::ReportResult;
use crate::models::{ColumnSpec, Course};
use crate::render::{Document, OutputFormat, RenderOptions};

use super::{render_records, ReportKind};

pub const TITLE: &str = "Courses Report";
pub const SHEET_NAME: &str = "Courses";

pub fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("Code", "code").width(55.0),
        ColumnSpec::new("Course Name", "name").width(130.0),
        ColumnSpec::new("Department", "department"),
        ColumnSpec::number("Credits", "credits").width(45.0),
        ColumnSpec::new("Instructor", "instructor"),
        ColumnSpec::new("Semester", "semester").width(60.0),
    ]
}

/// Render the course catalogue
pub fn generate_courses_report(
    courses: &[Course],
    format: OutputFormat,
    options: &RenderOptions,
) -> ReportResult<Document> {
    render_records(ReportKind::Courses, courses, None, format, options)
}
