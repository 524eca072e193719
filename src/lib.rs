//! # pubmed_paper_fetcher
//!
//! Search PubMed and surface authors with non-academic (industry) affiliations.
//!
//! ## Modules
//!
//! - [`pubmed`] - E-utilities client (esearch + efetch)
//! - [`efetch`] - efetch XML parsing
//! - [`affiliation`] - Academic vs. industry keyword heuristics and email extraction
//! - [`paper`] - Output records
//! - [`output`] - CSV and console tables
//! - [`config`] - Client settings
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pubmed_paper_fetcher::{FetcherConfig, PubMedClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = FetcherConfig::default();
//!     let client = PubMedClient::new(&config)?;
//!     let ids = client.search_ids("crispr therapy", config.retmax).await?;
//!     let papers = client.fetch_all(&ids, config.concurrency).await;
//!     println!("{}", pubmed_paper_fetcher::output::render_table(&papers));
//!     Ok(())
//! }
//! ```

pub mod affiliation;
pub mod config;
pub mod efetch;
pub mod error;
pub mod output;
pub mod paper;
pub mod pubmed;

pub use config::FetcherConfig;
pub use error::{FetcherError, Result};
pub use paper::PaperRecord;
pub use pubmed::PubMedClient;
