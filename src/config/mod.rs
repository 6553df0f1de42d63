//! Configuration module for unireport
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - Rendering preferences persisted as JSON

pub mod paths;
pub mod settings;

pub use paths::ReportPaths;
pub use settings::{PageSettings, Settings};
