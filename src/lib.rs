//! unireport - Tabular PDF and Excel reports for university records
//!
//! This library renders rows of university data (students, courses,
//! payments, statements) as paginated PDF tables or single-sheet Excel
//! workbooks, driven by a column schema.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Report schema, cell values and the university records
//! - `render`: The tabular renderer and its capability traits
//! - `export`: PDF and XLSX backends
//! - `reports`: The university reports
//! - `import`: JSON and CSV record loading
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use unireport::models::{ColumnSpec, ReportRow};
//! use unireport::render::{render, OutputFormat, RenderOptions};
//!
//! let columns = vec![ColumnSpec::new("Name", "name")];
//! let rows = vec![ReportRow::new().with("name", "Ada Lovelace")];
//! let doc = render(&rows, "Students", &columns, OutputFormat::Pdf, &RenderOptions::default())?;
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod models;
pub mod render;
pub mod reports;

pub use error::{ReportError, ReportResult};
