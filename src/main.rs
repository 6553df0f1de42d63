use anyhow::Result;
use clap::{Parser, Subcommand};

use unireport::cli::{
    handle_columns_command, handle_preview_command, handle_render_command, handle_table_command,
    PreviewArgs, RenderArgs, TableArgs,
};
use unireport::config::{paths::ReportPaths, settings::Settings};
use unireport::reports::ReportKind;

#[derive(Parser)]
#[command(
    name = "unireport",
    author = "Kaylee Beyene",
    version,
    about = "Render university records as PDF and Excel table reports",
    long_about = "unireport turns student, course, payment and statement records \
                  into paginated PDF tables or filterable Excel sheets."
)]
struct Cli {
    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a report to a PDF or Excel file
    Render(RenderArgs),

    /// Render any JSON or CSV rows under a title of your choosing
    Table(TableArgs),

    /// Print a report's rows as a terminal table
    Preview(PreviewArgs),

    /// List the columns of a report
    Columns {
        /// Report to describe
        kind: ReportKind,
    },

    /// Write the default settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let paths = ReportPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Render(args)) => {
            handle_render_command(&paths, &settings, args)?;
        }
        Some(Commands::Table(args)) => {
            handle_table_command(&paths, &settings, args)?;
        }
        Some(Commands::Preview(args)) => {
            handle_preview_command(&settings, args)?;
        }
        Some(Commands::Columns { kind }) => handle_columns_command(kind),
        Some(Commands::Init) => {
            println!("Initializing unireport at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            println!("Settings written to {}", paths.settings_file().display());
            println!("Reports are saved to {}", paths.output_dir().display());
        }
        Some(Commands::Config) => {
            println!("unireport Configuration");
            println!("=======================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Output directory: {}", paths.output_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Date format:      {}", settings.date_format);
            println!("  Default format:   {}", settings.default_format);
            println!(
                "  Page size:        {} x {} pt",
                settings.page.width, settings.page.height
            );
            println!("  Uniform widths:   {}", settings.page.uniform_widths);
        }
        None => {
            println!("unireport - PDF and Excel reports for university records");
            println!();
            println!("Run 'unireport --help' for usage information.");
        }
    }

    Ok(())
}
