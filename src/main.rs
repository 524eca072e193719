//! get-papers-list - PubMed papers with non-academic authors
//!
//! ## Usage
//!
//! ```bash
//! get-papers-list "cancer immunotherapy" --file results.csv
//! get-papers-list "crispr" --debug
//! ```

use anyhow::Result;
use clap::builder::TypedValueParser as _;
use clap::Parser;
use pubmed_paper_fetcher::{
    config::{DEFAULT_CONCURRENCY, DEFAULT_EUTILS_BASE, DEFAULT_RETMAX, DEFAULT_TIMEOUT_SECS},
    output, FetcherConfig, PubMedClient,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Fetch PubMed papers matching the query and list authors with
/// non-academic affiliations, as CSV or on the console.
#[derive(Parser)]
#[command(name = "get-papers-list")]
#[command(version, about, long_about = None)]
struct Cli {
    /// PubMed search query
    query: String,

    /// Print the query and the fetched IDs, and enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// CSV output file (prints to the console when omitted)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Maximum number of papers to fetch
    #[arg(short = 'n', long, default_value_t = DEFAULT_RETMAX,
          value_parser = clap::value_parser!(u32).range(1..))]
    retmax: u32,

    /// Number of detail requests in flight
    #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY,
          value_parser = clap::value_parser!(u64).range(1..=32).map(|n| n as usize))]
    concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS,
          value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// E-utilities base URL
    #[arg(long, env = "PUBMED_EUTILS_URL", default_value = DEFAULT_EUTILS_BASE)]
    eutils_url: String,
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for the table
    let log_level = if cli.debug { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// Pipeline
// ============================================================================

async fn run(cli: Cli) -> Result<()> {
    let config = FetcherConfig {
        eutils_base: cli.eutils_url,
        timeout: Duration::from_secs(cli.timeout),
        retmax: cli.retmax,
        concurrency: cli.concurrency,
    };
    let client = PubMedClient::new(&config)?;

    if cli.debug {
        println!("Running query: {}", cli.query);
    }

    let ids = client.search_ids(&cli.query, config.retmax).await?;
    if cli.debug {
        println!("Found IDs: {:?}", ids);
    }

    let papers = client.fetch_all(&ids, config.concurrency).await;
    debug!(rows = papers.len(), "Rendering results");

    match cli.file {
        Some(path) => {
            output::save_csv(&path, &papers)
                .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path.display(), e))?;
            println!("Saved to {}", path.display());
        }
        None => println!("{}", output::render_table(&papers)),
    }

    Ok(())
}
