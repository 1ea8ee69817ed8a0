//! Stockfinder CLI binary.
//!
//! Screens a JSON export of fundamentals documents against criteria and
//! writes the matches as CSV or JSON.

mod config;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Duration;
use stockfinder::data::{InMemoryPriceStore, PriceLookup};
use stockfinder::output::{ExportFormat, ExportRequest, Exporter, SearchResponse};
use stockfinder::{Criteria, Screener};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stockfinder")]
#[command(about = "Stockfinder: fundamentals screening with growth criteria", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Screen documents against criteria
    Search {
        /// Criteria JSON file
        #[arg(long)]
        criteria: PathBuf,

        /// JSON array of fundamentals documents
        #[arg(long)]
        records: PathBuf,

        /// End-of-day prices keyed by symbol, for share price growth
        #[arg(long)]
        prices: Option<PathBuf>,

        /// Field mapping file
        #[arg(long)]
        mapping: Option<PathBuf>,

        /// Output format (csv, json or pretty-json)
        #[arg(long, default_value = "json")]
        format: String,

        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Export previously returned rows (`{"data": [...], "fieldOrder": [...]}`)
    Export {
        /// Export request JSON file
        input: PathBuf,

        /// Output format (csv, json or pretty-json)
        #[arg(long, default_value = "csv")]
        format: String,

        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the store filter document for a set of criteria
    Query {
        /// Criteria JSON file
        #[arg(long)]
        criteria: PathBuf,

        /// Field mapping file
        #[arg(long)]
        mapping: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Search {
            criteria,
            records,
            prices,
            mapping,
            format,
            output,
        } => {
            let format: ExportFormat = format.parse()?;
            let response = search(&criteria, &records, prices.as_deref(), mapping.as_deref())?;
            write_output(&response, format, output.as_deref())?;
        }
        Commands::Export {
            input,
            format,
            output,
        } => {
            let format: ExportFormat = format.parse()?;
            let request: ExportRequest = serde_json::from_str(&std::fs::read_to_string(input)?)?;
            write_output(&request, format, output.as_deref())?;
        }
        Commands::Query { criteria, mapping } => {
            let criteria = Criteria::from_json_str(&std::fs::read_to_string(criteria)?)?;
            let screener = Screener::new(Arc::new(config::load_mapping(mapping.as_deref())?));
            let query = screener.build_query(&criteria)?;
            println!("{}", serde_json::to_string_pretty(&query.to_document())?);
        }
    }

    Ok(())
}

fn search(
    criteria_path: &Path,
    records_path: &Path,
    prices_path: Option<&Path>,
    mapping_path: Option<&Path>,
) -> Result<SearchResponse, Box<dyn std::error::Error>> {
    // Validate criteria before touching any data files.
    let criteria = Criteria::from_json_str(&std::fs::read_to_string(criteria_path)?)?;
    criteria.validate()?;

    let screener = Screener::new(Arc::new(config::load_mapping(mapping_path)?));

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Loading documents...");
    let documents = config::load_documents(records_path)?;
    let total = documents.len();
    let store = prices_path.map(InMemoryPriceStore::from_path).transpose()?;

    pb.set_message(format!("Screening {total} documents..."));
    let prices = store.as_ref().map(|store| store as &dyn PriceLookup);
    let response = screener.search(documents, &criteria, prices)?;
    pb.finish_and_clear();

    info!(total, matched = response.data.len(), "Search complete");
    eprintln!("Matched {} of {} documents", response.data.len(), total);

    Ok(response)
}

fn write_output(
    data: &dyn Exporter,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            let path = with_extension(path, format);
            data.export_to_file(&path, format)?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", data.export_to_string(format)?),
    }
    Ok(())
}

/// Append the format's extension when the output path has none.
fn with_extension(path: &Path, format: ExportFormat) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(format.extension())
    }
}
