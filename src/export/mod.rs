//! Document backends for unireport
//!
//! Concrete implementations of the rendering capabilities:
//! - PDF: pages drawn with pdf-writer using the base-14 fonts
//! - XLSX: a single worksheet written with rust_xlsxwriter

pub mod pdf;
pub mod xlsx;

pub use pdf::{encode_win_ansi, PdfSurface, MAX_PAGES};
pub use xlsx::{sanitize_sheet_name, XlsxSheet};
