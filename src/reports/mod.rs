//! Reports module for unireport
//!
//! The university reports built on the tabular renderer: students, courses,
//! payments and per-student transaction statements. Each report fixes a
//! title, a sheet name and a column schema; the rows come from the typed
//! records in [`crate::models`].

pub mod courses;
pub mod payments;
pub mod statement;
pub mod students;

use std::fmt;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};
use crate::import;
use crate::models::{ColumnSpec, Course, Payment, ReportRow, Student, StudentTransaction, ToReportRow};
use crate::render::{render, Document, OutputFormat, RenderOptions};

pub use courses::generate_courses_report;
pub use payments::generate_payments_report;
pub use statement::generate_student_statement;
pub use students::generate_students_report;

/// The available reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Students,
    Courses,
    Payments,
    Statement,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::Students,
        ReportKind::Courses,
        ReportKind::Payments,
        ReportKind::Statement,
    ];

    pub fn columns(self) -> Vec<ColumnSpec> {
        match self {
            ReportKind::Students => students::columns(),
            ReportKind::Courses => courses::columns(),
            ReportKind::Payments => payments::columns(),
            ReportKind::Statement => statement::columns(),
        }
    }

    /// Document title; statements are titled after `student`
    pub fn title(self, student: Option<&str>) -> ReportResult<String> {
        match self {
            ReportKind::Students => Ok(students::TITLE.to_string()),
            ReportKind::Courses => Ok(courses::TITLE.to_string()),
            ReportKind::Payments => Ok(payments::TITLE.to_string()),
            ReportKind::Statement => match student.map(str::trim) {
                Some(name) if !name.is_empty() => Ok(statement::title(name)),
                _ => Err(ReportError::caller("a statement needs the student's name")),
            },
        }
    }

    pub fn sheet_name(self) -> &'static str {
        match self {
            ReportKind::Students => students::SHEET_NAME,
            ReportKind::Courses => courses::SHEET_NAME,
            ReportKind::Payments => payments::SHEET_NAME,
            ReportKind::Statement => statement::SHEET_NAME,
        }
    }

    /// Load this report's records from a `.json` or `.csv` file
    pub fn load_rows(self, input: &Path) -> ReportResult<Vec<ReportRow>> {
        match self {
            ReportKind::Students => Ok(to_rows(&import::load_file::<Student>(input)?)),
            ReportKind::Courses => Ok(to_rows(&import::load_file::<Course>(input)?)),
            ReportKind::Payments => Ok(to_rows(&import::load_file::<Payment>(input)?)),
            ReportKind::Statement => {
                Ok(to_rows(&import::load_file::<StudentTransaction>(input)?))
            }
        }
    }

    /// Render rows under this report's title, columns and sheet name
    pub fn render_rows(
        self,
        rows: &[ReportRow],
        student: Option<&str>,
        format: OutputFormat,
        options: &RenderOptions,
    ) -> ReportResult<Document> {
        let title = self.title(student)?;
        let options = RenderOptions {
            sheet_name: self.sheet_name().to_string(),
            ..options.clone()
        };
        render(rows, &title, &self.columns(), format, &options)
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::Students => write!(f, "students"),
            ReportKind::Courses => write!(f, "courses"),
            ReportKind::Payments => write!(f, "payments"),
            ReportKind::Statement => write!(f, "statement"),
        }
    }
}

/// Convert typed records to rows, keeping their order
pub fn to_rows<T: ToReportRow>(records: &[T]) -> Vec<ReportRow> {
    records.iter().map(ToReportRow::to_report_row).collect()
}

pub(crate) fn render_records<T: ToReportRow>(
    kind: ReportKind,
    records: &[T],
    student: Option<&str>,
    format: OutputFormat,
    options: &RenderOptions,
) -> ReportResult<Document> {
    kind.render_rows(&to_rows(records), student, format, options)
}
