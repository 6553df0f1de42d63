//! Custom error types for unireport
//!
//! This module defines the error hierarchy for the renderer using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for unireport operations
#[derive(Error, Debug)]
pub enum ReportError {
    /// Settings-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Validation errors for user-supplied values
    #[error("Validation error: {0}")]
    Validation(String),

    /// The caller handed the renderer an unusable report definition
    /// (empty or duplicate columns, blank title, overflowing widths).
    /// Raised before anything is drawn.
    #[error("Report configuration error: {0}")]
    CallerConfiguration(String),

    /// The drawing or spreadsheet backend failed mid-render
    #[error("{backend} backend error: {message}")]
    Capability {
        backend: &'static str,
        message: String,
    },

    /// Record import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl ReportError {
    /// Create a caller configuration error
    pub fn caller(message: impl Into<String>) -> Self {
        Self::CallerConfiguration(message.into())
    }

    /// Create an error for a failing PDF surface
    pub fn pdf_backend(message: impl Into<String>) -> Self {
        Self::Capability {
            backend: "PDF",
            message: message.into(),
        }
    }

    /// Create an error for a failing spreadsheet surface
    pub fn sheet_backend(message: impl Into<String>) -> Self {
        Self::Capability {
            backend: "Spreadsheet",
            message: message.into(),
        }
    }

    /// Check if this error was caused by the report definition
    pub fn is_caller_configuration(&self) -> bool {
        matches!(self, Self::CallerConfiguration(_))
    }

    /// Check if this error came from an underlying backend
    pub fn is_capability(&self) -> bool {
        matches!(self, Self::Capability { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for ReportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ReportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::sheet_backend(err.to_string())
    }
}

/// Result type alias for unireport operations
pub type ReportResult<T> = Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReportError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_caller_error() {
        let err = ReportError::caller("at least one column is required");
        assert_eq!(
            err.to_string(),
            "Report configuration error: at least one column is required"
        );
        assert!(err.is_caller_configuration());
        assert!(!err.is_capability());
    }

    #[test]
    fn test_capability_error() {
        let err = ReportError::pdf_backend("page allocation failed");
        assert_eq!(err.to_string(), "PDF backend error: page allocation failed");
        assert!(err.is_capability());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let report_err: ReportError = io_err.into();
        assert!(matches!(report_err, ReportError::Io(_)));
    }
}
