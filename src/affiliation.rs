//! Affiliation classification heuristics.
//!
//! Decides from free-text affiliation strings whether an author works outside
//! academia, and pulls a contact email out of the same text.
//!
//! Matching is plain substring search over the lower-cased text with no word
//! boundaries, so `"inc"` also matches inside `"increase"`. Any academic
//! keyword vetoes a non-academic match.

/// Keywords suggesting a company or other industry affiliation
pub const NON_ACADEMIC_KEYWORDS: &[&str] = &[
    "pharma",
    "biotech",
    "inc",
    "ltd",
    "company",
    "corp",
    "gmbh",
    "s.a.",
    "llc",
    "plc",
    "co.",
    "industries",
];

/// Keywords suggesting an academic, clinical or research institution
pub const ACADEMIC_KEYWORDS: &[&str] = &[
    "university",
    "institute",
    "hospital",
    "college",
    "school",
    "center",
    "centre",
    "academy",
    "faculty",
    "department",
    "research foundation",
    "clinic",
];

/// Characters trimmed from both ends of an extracted email token
const EMAIL_TRIM_CHARS: &[char] = &[';', ',', '.', '(', ')', '[', ']'];

/// Returns true when the affiliation looks non-academic.
///
/// Requires at least one non-academic keyword and no academic keyword.
pub fn is_non_academic(affiliation: &str) -> bool {
    let lower = affiliation.to_lowercase();
    let has_company = NON_ACADEMIC_KEYWORDS.iter().any(|kw| lower.contains(kw));
    let has_academic = ACADEMIC_KEYWORDS.iter().any(|kw| lower.contains(kw));
    has_company && !has_academic
}

/// Extract the first email-looking token from affiliation text.
///
/// Takes the first whitespace-delimited token containing `@` and strips
/// surrounding punctuation.
pub fn extract_email(affiliation: &str) -> Option<String> {
    affiliation
        .split_whitespace()
        .find(|word| word.contains('@'))
        .map(|word| word.trim_matches(EMAIL_TRIM_CHARS).to_string())
}
