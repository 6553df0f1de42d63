//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the report layer.

pub mod report;

pub use report::{
    handle_columns_command, handle_preview_command, handle_render_command, handle_table_command,
    PreviewArgs, RenderArgs, TableArgs,
};
