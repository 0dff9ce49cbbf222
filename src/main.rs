//! Page Analyzer main entry point
//!
//! This is the command-line interface for analyzing web pages and managing
//! stored analysis records.

use clap::{Parser, Subcommand};
use page_analyzer::config::{load_config_with_hash, Config};
use page_analyzer::output::{
    load_statistics, print_record, print_records, print_result, print_statistics,
};
use page_analyzer::storage::{open_storage, AnalysisStore};
use page_analyzer::Orchestrator;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Page Analyzer: structural analysis of a single web page
///
/// Fetches a page, counts its headings, classifies and probes its links,
/// and looks for a login form. Every analysis is stored in a SQLite database.
#[derive(Parser, Debug)]
#[command(name = "page-analyzer")]
#[command(version)]
#[command(about = "Structural analysis of a single web page", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a URL and store the result
    Analyze {
        /// Absolute http:// or https:// URL
        url: String,
    },

    /// List all stored records
    List,

    /// Show one stored record
    Show {
        /// Record ID
        id: i64,
    },

    /// Delete one or more records
    Delete {
        /// Record IDs
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Reset records and analyze them again
    Rerun {
        /// Record IDs
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Show record counts by status
    Stats,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_configuration(cli.config.as_deref())?;

    tracing::debug!("Opening database: {}", config.output.database_path);
    let store: Arc<dyn AnalysisStore> =
        Arc::new(open_storage(Path::new(&config.output.database_path))?);

    match cli.command {
        Command::Analyze { url } => handle_analyze(&config, store, &url).await?,
        Command::List => print_records(&store.list_records()?),
        Command::Show { id } => handle_show(store.as_ref(), id)?,
        Command::Delete { ids } => handle_delete(store.as_ref(), &ids)?,
        Command::Rerun { ids } => handle_rerun(&config, store, &ids).await?,
        Command::Stats => print_statistics(&load_statistics(store.as_ref())?),
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("page_analyzer=info,warn"),
            1 => EnvFilter::new("page_analyzer=debug,info"),
            2 => EnvFilter::new("page_analyzer=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file, or the defaults when none is given
fn load_configuration(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        tracing::debug!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    match load_config_with_hash(path) {
        Ok((config, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            Err(e.into())
        }
    }
}

/// Handles `analyze`: creates a record, runs it and prints the result
async fn handle_analyze(
    config: &Config,
    store: Arc<dyn AnalysisStore>,
    url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let orchestrator = Orchestrator::new(config, store)?;
    let (id, handle) = orchestrator.submit(url)?;

    let result = handle.await??;
    println!("Record: {}", id);
    print_result(&result);

    Ok(())
}

/// Handles `show`: prints one stored record
fn handle_show(store: &dyn AnalysisStore, id: i64) -> Result<(), Box<dyn std::error::Error>> {
    match store.get_record(id)? {
        Some(record) => {
            print_record(&record);
            Ok(())
        }
        None => Err(page_analyzer::AnalyzerError::RecordNotFound(id).into()),
    }
}

/// Handles `delete`: removes one or many records
fn handle_delete(store: &dyn AnalysisStore, ids: &[i64]) -> Result<(), Box<dyn std::error::Error>> {
    let deleted = if let [id] = ids {
        usize::from(store.delete_record(*id)?)
    } else {
        store.delete_records(ids)?
    };

    println!("Deleted {} of {} record(s)", deleted, ids.len());
    Ok(())
}

/// Handles `rerun`: re-analyzes records concurrently and waits for all of them
async fn handle_rerun(
    config: &Config,
    store: Arc<dyn AnalysisStore>,
    ids: &[i64],
) -> Result<(), Box<dyn std::error::Error>> {
    let orchestrator = Orchestrator::new(config, store)?;
    let handles = orchestrator.rerun(ids)?;

    if handles.is_empty() {
        println!("No finished records to re-analyze");
        return Ok(());
    }

    let mut failures = 0;
    for (id, handle) in handles {
        match handle.await? {
            Ok(result) => println!("Record {}: {}", id, result.status),
            Err(e) => {
                failures += 1;
                println!("Record {}: failed ({})", id, e);
            }
        }
    }

    if failures > 0 {
        tracing::warn!("{} re-analysis run(s) could not be stored", failures);
    }

    Ok(())
}
