//! Core data models for unireport
//!
//! This module contains the report schema (columns, rows, cell values, style
//! rules) and the university records that are rendered through it.

pub mod column;
pub mod money;
pub mod payment;
pub mod student;
pub mod style;
pub mod value;

pub use column::{ColumnKind, ColumnSpec};
pub use money::{Money, MoneyParseError};
pub use payment::{Payment, StudentTransaction};
pub use student::{Course, Student};
pub use style::{palette, Color, StyleRule};
pub use value::{parse_iso_date, CellValue, ReportRow, ToReportRow};
