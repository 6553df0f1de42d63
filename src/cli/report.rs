//! CLI commands for reports
//!
//! Provides commands for rendering, previewing and describing the
//! university reports.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Args;
use log::info;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::config::{ReportPaths, Settings};
use crate::error::{ReportError, ReportResult};
use crate::import::load_file_rows;
use crate::models::{ColumnKind, ColumnSpec, ReportRow};
use crate::render::{format_cell, render, OutputFormat, RenderOptions, Target};
use crate::reports::ReportKind;

/// Arguments of `unireport render`
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Report to render
    pub kind: ReportKind,

    /// Records to render (.json or .csv)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output format (pdf or excel); defaults to the configured format
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file; defaults to the reports directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Student name for statements
    #[arg(short, long)]
    pub student: Option<String>,

    /// Give every PDF column the same width
    #[arg(long)]
    pub uniform: bool,
}

/// Arguments of `unireport preview`
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Report to preview
    pub kind: ReportKind,

    /// Records to preview (.json or .csv)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Show at most this many rows
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments of `unireport table`
#[derive(Args, Debug)]
pub struct TableArgs {
    /// Rows to render (.json or .csv), read without a record schema
    #[arg(short, long)]
    pub input: PathBuf,

    /// Document title
    #[arg(short, long)]
    pub title: String,

    /// Column as KEY, KEY=Header or KEY:KIND=Header (kind is text, number,
    /// currency or date). Repeat per column; defaults to every key in the rows
    #[arg(short, long = "column")]
    pub columns: Vec<String>,

    /// Output format (pdf or excel); defaults to the configured format
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file; defaults to the reports directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Give every PDF column the same width
    #[arg(long)]
    pub uniform: bool,
}

/// Handle `unireport render`, returning the written path
pub fn handle_render_command(
    paths: &ReportPaths,
    settings: &Settings,
    args: RenderArgs,
) -> ReportResult<PathBuf> {
    let rows = args.kind.load_rows(&args.input)?;
    let format = args.format.unwrap_or(settings.default_format);

    let mut options = settings.render_options(args.kind.sheet_name(), Local::now().naive_local());
    if args.uniform {
        options.layout.uniform_widths = true;
    }

    let document = args
        .kind
        .render_rows(&rows, args.student.as_deref(), format, &options)?;

    let output = match args.output {
        Some(path) => path,
        None => {
            paths.ensure_directories()?;
            paths
                .output_dir()
                .join(default_file_name(args.kind, args.student.as_deref(), format))
        }
    };
    ensure_parent(&output)?;
    document.write_to(&output)?;

    info!("wrote {} bytes to {}", document.len(), output.display());
    println!(
        "Rendered {} {} ({} rows) to {}",
        args.kind,
        format,
        rows.len(),
        output.display()
    );
    Ok(output)
}

/// Handle `unireport table`, returning the written path
pub fn handle_table_command(
    paths: &ReportPaths,
    settings: &Settings,
    args: TableArgs,
) -> ReportResult<PathBuf> {
    let rows = load_file_rows(&args.input)?;
    let columns = if args.columns.is_empty() {
        columns_from_rows(&rows)
    } else {
        args.columns
            .iter()
            .map(String::as_str)
            .map(parse_column_arg)
            .collect::<ReportResult<Vec<_>>>()?
    };
    let format = args.format.unwrap_or(settings.default_format);

    let mut options = settings.render_options(&args.title, Local::now().naive_local());
    if args.uniform {
        options.layout.uniform_widths = true;
    }
    let document = render(&rows, &args.title, &columns, format, &options)?;

    let output = match args.output {
        Some(path) => path,
        None => {
            paths.ensure_directories()?;
            let stem = slug(&args.title);
            let stem = if stem.is_empty() { "table".to_string() } else { stem };
            paths
                .output_dir()
                .join(format!("{}.{}", stem, format.extension()))
        }
    };
    ensure_parent(&output)?;
    document.write_to(&output)?;

    info!("wrote {} bytes to {}", document.len(), output.display());
    println!(
        "Rendered '{}' {} ({} rows, {} columns) to {}",
        args.title,
        format,
        rows.len(),
        columns.len(),
        output.display()
    );
    Ok(output)
}

/// Parse `KEY`, `KEY=Header` or `KEY:KIND=Header`
pub fn parse_column_arg(arg: &str) -> ReportResult<ColumnSpec> {
    let (spec, header) = match arg.split_once('=') {
        Some((spec, header)) => (spec, Some(header.trim())),
        None => (arg, None),
    };
    let (key, kind) = match spec.split_once(':') {
        Some((key, kind)) => (key.trim(), column_kind(kind.trim())?),
        None => (spec.trim(), ColumnKind::Text),
    };
    let header = header.filter(|h| !h.is_empty()).unwrap_or(key);
    Ok(ColumnSpec::new(header, key).kind(kind))
}

fn column_kind(name: &str) -> ReportResult<ColumnKind> {
    match name.to_ascii_lowercase().as_str() {
        "text" => Ok(ColumnKind::Text),
        "number" => Ok(ColumnKind::Number),
        "currency" => Ok(ColumnKind::Currency),
        "date" => Ok(ColumnKind::Date),
        other => Err(ReportError::caller(format!(
            "unknown column kind '{}'; use text, number, currency or date",
            other
        ))),
    }
}

/// One text column per key found in any row, in key order
fn columns_from_rows(rows: &[ReportRow]) -> Vec<ColumnSpec> {
    let keys: BTreeSet<&str> = rows.iter().flat_map(|row| row.keys()).collect();
    keys.into_iter().map(|key| ColumnSpec::new(key, key)).collect()
}

/// Handle `unireport preview`
pub fn handle_preview_command(settings: &Settings, args: PreviewArgs) -> ReportResult<()> {
    let rows = args.kind.load_rows(&args.input)?;
    let shown = args.limit.unwrap_or(rows.len()).min(rows.len());
    let options = settings.render_options(args.kind.sheet_name(), Local::now().naive_local());

    println!("{}", preview_table(&rows[..shown], &args.kind.columns(), &options));
    if shown < rows.len() {
        println!("... {} more rows", rows.len() - shown);
    }
    Ok(())
}

/// Handle `unireport columns`
pub fn handle_columns_command(kind: ReportKind) {
    println!("{}", columns_table(&kind.columns()));
}

/// Rows formatted the way the PDF prints them
pub fn preview_table(rows: &[ReportRow], columns: &[ColumnSpec], options: &RenderOptions) -> String {
    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|c| c.header.clone()));
    for row in rows {
        builder.push_record(
            columns
                .iter()
                .map(|c| format_cell(row.get(&c.key), &c.kind, options, Target::Pdf)),
        );
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// The column schema as a table
pub fn columns_table(columns: &[ColumnSpec]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Header", "Key", "Kind", "Width"]);
    for column in columns {
        builder.push_record([
            column.header.clone(),
            column.key.clone(),
            column.kind.to_string(),
            column
                .width
                .map(|w| format!("{}pt", w))
                .unwrap_or_else(|| "auto".to_string()),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// File name used when `--output` is not given
pub fn default_file_name(kind: ReportKind, student: Option<&str>, format: OutputFormat) -> String {
    let stem = match (kind, student) {
        (ReportKind::Statement, Some(name)) if !slug(name).is_empty() => {
            format!("statement-{}", slug(name))
        }
        _ => kind.to_string(),
    };
    format!("{}.{}", stem, format.extension())
}

fn slug(text: &str) -> String {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

fn ensure_parent(path: &Path) -> ReportResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .map_err(|e| {
                ReportError::Export(format!("Failed to create {}: {}", parent.display(), e))
            }),
        _ => Ok(()),
    }
}
