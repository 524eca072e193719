//! PubMed E-utilities client.
//!
//! Two endpoints are used:
//! - `esearch.fcgi` (JSON) to turn a free-text query into PubMed IDs
//! - `efetch.fcgi` (XML) to fetch one record per ID
//!
//! A failed search aborts the batch. A failed detail fetch degrades to a
//! sentinel [`PaperRecord`] so the remaining rows still come through.

use crate::config::FetcherConfig;
use crate::efetch::parse_article;
use crate::error::{FetcherError, Result};
use crate::paper::PaperRecord;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// esearch JSON response
#[derive(Debug, Deserialize)]
struct ESearchResponse {
    esearchresult: ESearchResult,
}

#[derive(Debug, Deserialize)]
struct ESearchResult {
    idlist: Vec<String>,
}

/// Pull `esearchresult.idlist` out of an esearch JSON body
fn parse_search_response(body: &str) -> Result<Vec<String>> {
    let response: ESearchResponse = serde_json::from_str(body)?;
    Ok(response.esearchresult.idlist)
}

/// PubMed E-utilities client
#[derive(Debug, Clone)]
pub struct PubMedClient {
    client: Client,
    esearch_url: Url,
    efetch_url: Url,
}

impl PubMedClient {
    /// Create a new PubMedClient
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetcherError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            esearch_url: config.endpoint("esearch.fcgi")?,
            efetch_url: config.endpoint("efetch.fcgi")?,
        })
    }

    /// Search PubMed and return matching IDs in relevance order.
    ///
    /// The query is sent as-is. Any transport, status or body error is
    /// reported as [`FetcherError::Search`].
    pub async fn search_ids(&self, query: &str, retmax: u32) -> Result<Vec<String>> {
        if query.trim().is_empty() {
            return Err(FetcherError::Validation("query must not be empty".to_string()));
        }
        if retmax == 0 {
            return Err(FetcherError::Validation("retmax must be at least 1".to_string()));
        }

        info!(query = query, retmax = retmax, "Searching PubMed");

        let ids = self
            .do_search(query, retmax)
            .await
            .map_err(FetcherError::search)?;

        info!(count = ids.len(), "PubMed search complete");
        Ok(ids)
    }

    async fn do_search(&self, query: &str, retmax: u32) -> Result<Vec<String>> {
        let retmax = retmax.to_string();
        let body = self
            .get_text(
                &self.esearch_url,
                &[
                    ("db", "pubmed"),
                    ("term", query),
                    ("retmode", "json"),
                    ("retmax", retmax.as_str()),
                ],
            )
            .await?;

        parse_search_response(&body)
    }

    /// Fetch and classify one record.
    ///
    /// Never fails: request and parse errors produce
    /// [`PaperRecord::fetch_error`].
    pub async fn fetch_paper_details(&self, pmid: &str) -> PaperRecord {
        match self.fetch_details(pmid).await {
            Ok(record) => record,
            Err(e) => {
                warn!(pmid = pmid, error = %e, "Failed to fetch paper details");
                PaperRecord::fetch_error(pmid, &e)
            }
        }
    }

    async fn fetch_details(&self, pmid: &str) -> Result<PaperRecord> {
        let xml = self
            .get_text(
                &self.efetch_url,
                &[("db", "pubmed"), ("id", pmid), ("retmode", "xml")],
            )
            .await?;

        let details = parse_article(&xml)?;
        let record = PaperRecord::from_article(pmid, &details);

        debug!(
            pmid = pmid,
            authors = details.authors.len(),
            non_academic = record.non_academic_authors().len(),
            "Classified paper"
        );
        Ok(record)
    }

    /// Fetch and classify every ID with at most `concurrency` requests in flight.
    ///
    /// Output order matches `ids`.
    pub async fn fetch_all(&self, ids: &[String], concurrency: usize) -> Vec<PaperRecord> {
        let concurrency = concurrency.max(1);
        info!(
            count = ids.len(),
            concurrency = concurrency,
            "Fetching paper details"
        );

        let records: Vec<PaperRecord> = stream::iter(ids)
            .map(|pmid| self.fetch_paper_details(pmid))
            .buffered(concurrency)
            .collect()
            .await;

        let failed = records.iter().filter(|r| r.is_error()).count();
        info!(
            total = records.len(),
            failed = failed,
            "Detail fetch complete"
        );

        records
    }

    /// GET a URL and return the body, treating non-success statuses as errors
    async fn get_text(&self, url: &Url, params: &[(&str, &str)]) -> Result<String> {
        debug!(url = %url, params = ?params, "GET");

        let response = self.client.get(url.clone()).query(params).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetcherError::Api {
                code: status.as_u16(),
                message: format!("E-utilities returned {} for {}", status, url),
            });
        }

        Ok(response.text().await?)
    }
}
