//! Runtime configuration for the PubMed client.

use crate::error::{FetcherError, Result};
use std::time::Duration;
use url::Url;

/// NCBI E-utilities base URL
pub const DEFAULT_EUTILS_BASE: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/";

/// Default number of identifiers requested from esearch
pub const DEFAULT_RETMAX: u32 = 10;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default number of detail fetches in flight (1 = sequential)
pub const DEFAULT_CONCURRENCY: usize = 1;

/// Client and pipeline settings
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Base URL of the E-utilities service; `esearch.fcgi` and `efetch.fcgi` are resolved against it
    pub eutils_base: String,
    /// Timeout applied to every HTTP request
    pub timeout: Duration,
    /// Maximum number of identifiers to request
    pub retmax: u32,
    /// Maximum number of detail fetches in flight
    pub concurrency: usize,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            eutils_base: DEFAULT_EUTILS_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retmax: DEFAULT_RETMAX,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl FetcherConfig {
    /// Check value ranges and the base URL
    pub fn validate(&self) -> Result<()> {
        self.base_url()?;
        if self.retmax == 0 {
            return Err(FetcherError::Validation("retmax must be at least 1".to_string()));
        }
        if self.concurrency == 0 {
            return Err(FetcherError::Validation(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(FetcherError::Validation("timeout must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Parsed base URL, always ending in `/` so endpoints join beneath it
    pub fn base_url(&self) -> Result<Url> {
        let mut base = self.eutils_base.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let url = Url::parse(&base)
            .map_err(|e| FetcherError::Config(format!("Invalid E-utilities URL {:?}: {}", base, e)))?;
        if url.cannot_be_a_base() {
            return Err(FetcherError::Config(format!(
                "E-utilities URL cannot be a base: {}",
                url
            )));
        }
        Ok(url)
    }

    /// Full URL of a named endpoint, e.g. `esearch.fcgi`
    pub fn endpoint(&self, name: &str) -> Result<Url> {
        self.base_url()?
            .join(name)
            .map_err(|e| FetcherError::Config(format!("Invalid endpoint {}: {}", name, e)))
    }
}
