use std::path::PathBuf;

use airport_report::catalog::REPORT_QUERIES;
use airport_report::model::{CellValue, Column, ResultTable};
use airport_report::source::{StaticSource, run_queries};
use airport_report::{ExportOptions, ReportError, Result, export_report};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Export(args) => execute_export(args),
    }
}

fn execute_export(args: ExportArgs) -> Result<()> {
    if !args.input.exists() {
        return Err(ReportError::MissingInput(args.input));
    }

    // Failure to obtain the data is fatal for the whole run; per-query
    // failures are isolated by the orchestrator below.
    let data = std::fs::read_to_string(&args.input)?;
    let tables: Vec<NamedTable> = serde_json::from_str(&data)?;
    let mut source = StaticSource::new(
        tables
            .into_iter()
            .map(|entry| Ok((entry.name, ResultTable::new(entry.columns, entry.rows)?)))
            .collect::<Result<Vec<_>>>()?,
    );

    let results = run_queries(&mut source, REPORT_QUERIES);
    let options = ExportOptions {
        out_dir: args.out_dir,
        prefix: args.prefix,
        include_empty_sheets: args.include_empty,
    };
    let summary = export_report(&results, &options)?;

    println!("created {}", summary.path.display());
    println!("  sheets:  {}", summary.sheet_count);
    println!("  rows:    {}", summary.row_count);
    println!("  columns: {}", summary.column_count);
    println!("  size:    {:.1} KB", summary.file_size as f64 / 1024.0);
    Ok(())
}

/// One named table in the JSON input document. Order in the document is
/// irrelevant: sheets follow the catalog's emission order.
#[derive(Deserialize)]
struct NamedTable {
    name: String,
    columns: Vec<Column>,
    rows: Vec<Vec<CellValue>>,
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Export analytics query results as a formatted Excel report."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the multi-sheet report from pre-materialised query results.
    Export(ExportArgs),
}

#[derive(clap::Args)]
struct ExportArgs {
    /// JSON document holding the named result tables.
    #[arg(long)]
    input: PathBuf,

    /// Directory the report is written into.
    #[arg(long, default_value = "exports")]
    out_dir: PathBuf,

    /// Artifact file name prefix.
    #[arg(long, default_value = "airport_analytics_report")]
    prefix: String,

    /// Keep empty result tables as header-only sheets.
    #[arg(long)]
    include_empty: bool,
}
