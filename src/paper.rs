//! Paper records: one output row per PubMed identifier.

use crate::affiliation::{extract_email, is_non_academic};
use crate::efetch::ArticleDetails;
use std::fmt::Display;

/// Title used for records whose details could not be fetched
pub const ERROR_TITLE: &str = "Error fetching details";

/// Publication year used when the record carries none
pub const UNKNOWN_YEAR: &str = "Unknown";

/// Output columns, in order
pub const COLUMNS: [&str; 6] = [
    "PubmedID",
    "Title",
    "Publication Date",
    "Non-academic Author(s)",
    "Company Affiliation(s)",
    "Corresponding Author Email",
];

/// Separator for multi-value cells
const CELL_SEPARATOR: &str = ", ";

/// A classified PubMed paper.
///
/// `non_academic_authors` and `company_affiliations` run in parallel: the i-th
/// affiliation belongs to the i-th author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperRecord {
    pubmed_id: String,
    title: String,
    publication_year: String,
    non_academic_authors: Vec<String>,
    company_affiliations: Vec<String>,
    corresponding_email: String,
}

impl PaperRecord {
    /// Classify the authors of a parsed article and build its record
    pub fn from_article(pubmed_id: &str, details: &ArticleDetails) -> Self {
        let mut non_academic_authors = Vec::new();
        let mut company_affiliations = Vec::new();
        let mut email: Option<String> = None;

        for author in &details.authors {
            if is_non_academic(&author.affiliation) {
                non_academic_authors.push(author.full_name());
                company_affiliations.push(author.affiliation.clone());
            }
            if email.is_none() && author.affiliation.contains('@') {
                email = extract_email(&author.affiliation);
            }
        }

        let publication_year = details
            .publication_year
            .clone()
            .filter(|y| !y.is_empty())
            .unwrap_or_else(|| UNKNOWN_YEAR.to_string());

        Self {
            pubmed_id: pubmed_id.to_string(),
            title: details.title.clone().unwrap_or_default(),
            publication_year,
            non_academic_authors,
            company_affiliations,
            corresponding_email: email.unwrap_or_default(),
        }
    }

    /// Sentinel record for an identifier whose details could not be fetched
    pub fn fetch_error(pubmed_id: &str, error: impl Display) -> Self {
        Self {
            pubmed_id: pubmed_id.to_string(),
            title: ERROR_TITLE.to_string(),
            publication_year: String::new(),
            non_academic_authors: Vec::new(),
            company_affiliations: Vec::new(),
            corresponding_email: format!("Error: {}", error),
        }
    }

    pub fn pubmed_id(&self) -> &str {
        &self.pubmed_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn publication_year(&self) -> &str {
        &self.publication_year
    }

    pub fn non_academic_authors(&self) -> &[String] {
        &self.non_academic_authors
    }

    pub fn company_affiliations(&self) -> &[String] {
        &self.company_affiliations
    }

    pub fn corresponding_email(&self) -> &str {
        &self.corresponding_email
    }

    /// True for records built by [`PaperRecord::fetch_error`]
    pub fn is_error(&self) -> bool {
        self.title == ERROR_TITLE && self.corresponding_email.starts_with("Error:")
    }

    /// Cells in [`COLUMNS`] order, multi-value cells joined with `", "`
    pub fn to_row(&self) -> [String; 6] {
        [
            self.pubmed_id.clone(),
            self.title.clone(),
            self.publication_year.clone(),
            self.non_academic_authors.join(CELL_SEPARATOR),
            self.company_affiliations.join(CELL_SEPARATOR),
            self.corresponding_email.clone(),
        ]
    }
}
