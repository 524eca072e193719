//! Parser for E-utilities efetch XML documents.
//!
//! Walks the document once with a streaming `quick_xml` reader and picks out
//! the fields a [`PaperRecord`](crate::paper::PaperRecord) needs:
//!
//! - the first `ArticleTitle` anywhere in the document
//! - the first `Year` directly under a `PubDate`
//! - every `Author`, with its direct `ForeName`/`LastName` children and the
//!   first `AffiliationInfo/Affiliation` below it
//!
//! A captured element's text ends at its first child element, so in
//! `<ArticleTitle>Role of <i>TP53</i> in cancer</ArticleTitle>` only
//! `"Role of "` is kept. The same cut applies to affiliations before they are
//! classified.

use crate::error::{FetcherError, OptionExt, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

/// One author entry as it appears in the record.
///
/// Missing elements are left as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorEntry {
    pub fore_name: String,
    pub last_name: String,
    pub affiliation: String,
}

impl AuthorEntry {
    /// `"{fore} {last}"` with surrounding whitespace removed
    pub fn full_name(&self) -> String {
        format!("{} {}", self.fore_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Structural content of one efetch document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleDetails {
    /// Text of the first `ArticleTitle`, `None` when the element is absent
    pub title: Option<String>,
    /// Text of the first `PubDate/Year`, `None` when the element is absent
    pub publication_year: Option<String>,
    /// Authors in document order
    pub authors: Vec<AuthorEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Year,
    ForeName,
    LastName,
    Affiliation,
}

/// Text being collected for one element
struct Capture {
    field: Field,
    depth: usize,
    text: String,
    /// Set once a child element opens; later text is not part of the value
    seen_child: bool,
}

/// Author whose end tag has not been seen yet
#[derive(Default)]
struct OpenAuthor {
    depth: usize,
    fore_name: Option<String>,
    last_name: Option<String>,
    affiliation: Option<String>,
}

impl OpenAuthor {
    fn finish(self) -> AuthorEntry {
        AuthorEntry {
            fore_name: self.fore_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            affiliation: self.affiliation.unwrap_or_default(),
        }
    }
}

#[derive(Default)]
struct DetailsBuilder {
    path: Vec<String>,
    root: Option<String>,
    capture: Option<Capture>,
    author: Option<OpenAuthor>,
    details: ArticleDetails,
}

impl DetailsBuilder {
    /// Which field, if any, an element opening at `depth` should fill
    fn field_for(&self, name: &str, depth: usize) -> Option<Field> {
        let parent = self.path.last().map(String::as_str);
        let author = self.author.as_ref();
        let direct_child = author.is_some_and(|a| depth == a.depth + 1);

        match name {
            "ArticleTitle" if self.details.title.is_none() => Some(Field::Title),
            "Year" if parent == Some("PubDate") && self.details.publication_year.is_none() => {
                Some(Field::Year)
            }
            "ForeName" if direct_child && author.is_some_and(|a| a.fore_name.is_none()) => {
                Some(Field::ForeName)
            }
            "LastName" if direct_child && author.is_some_and(|a| a.last_name.is_none()) => {
                Some(Field::LastName)
            }
            "Affiliation"
                if parent == Some("AffiliationInfo")
                    && author.is_some_and(|a| a.affiliation.is_none()) =>
            {
                Some(Field::Affiliation)
            }
            _ => None,
        }
    }

    fn store(&mut self, field: Field, text: String) {
        match field {
            Field::Title => self.details.title = Some(text),
            Field::Year => self.details.publication_year = Some(text),
            Field::ForeName | Field::LastName | Field::Affiliation => {
                if let Some(author) = self.author.as_mut() {
                    match field {
                        Field::ForeName => author.fore_name = Some(text),
                        Field::LastName => author.last_name = Some(text),
                        _ => author.affiliation = Some(text),
                    }
                }
            }
        }
    }

    fn open(&mut self, name: String) -> Result<()> {
        if self.path.is_empty() {
            if let Some(root) = &self.root {
                return Err(FetcherError::Parse(format!(
                    "junk after document element <{}>: <{}>",
                    root, name
                )));
            }
            self.root = Some(name.clone());
        }
        let depth = self.path.len() + 1;

        if let Some(capture) = self.capture.as_mut() {
            capture.seen_child = true;
        } else if let Some(field) = self.field_for(&name, depth) {
            self.capture = Some(Capture {
                field,
                depth,
                text: String::new(),
                seen_child: false,
            });
        }
        if name == "Author" && self.author.is_none() {
            self.author = Some(OpenAuthor {
                depth,
                ..Default::default()
            });
        }
        self.path.push(name);
        Ok(())
    }

    fn close(&mut self) {
        let depth = self.path.len();

        if self.capture.as_ref().is_some_and(|c| c.depth == depth) {
            if let Some(capture) = self.capture.take() {
                self.store(capture.field, capture.text);
            }
        }
        if self.author.as_ref().is_some_and(|a| a.depth == depth) {
            if let Some(author) = self.author.take() {
                self.details.authors.push(author.finish());
            }
        }
        self.path.pop();
    }

    fn text(&mut self, text: &str) -> Result<()> {
        if self.path.is_empty() {
            if text.trim().is_empty() {
                return Ok(());
            }
            return Err(FetcherError::Parse(match &self.root {
                Some(root) => format!("junk after document element <{}>", root),
                None => "text outside of the document element".to_string(),
            }));
        }
        if let Some(capture) = self.capture.as_mut() {
            if !capture.seen_child {
                capture.text.push_str(text);
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<ArticleDetails> {
        let root = self.root.ok_or_parse("document has no root element")?;
        if let Some(open) = self.path.last() {
            return Err(FetcherError::Parse(format!(
                "unexpected end of document inside <{}>",
                open
            )));
        }
        debug!(
            root = %root,
            authors = self.details.authors.len(),
            "Parsed efetch document"
        );
        Ok(self.details)
    }
}

/// Parse one efetch XML document.
///
/// Fails on malformed XML, mismatched or missing end tags, documents
/// without a root element, and content after the root element.
pub fn parse_article(xml: &str) -> Result<ArticleDetails> {
    let mut reader = Reader::from_str(xml);
    let mut builder = DetailsBuilder::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                builder.open(String::from_utf8_lossy(e.name().as_ref()).into_owned())?;
            }
            Event::Empty(e) => {
                builder.open(String::from_utf8_lossy(e.name().as_ref()).into_owned())?;
                builder.close();
            }
            Event::End(_) => builder.close(),
            Event::Text(e) => {
                let text = e
                    .unescape()
                    .map_err(|err| FetcherError::Parse(format!("invalid text content: {}", err)))?;
                builder.text(&text)?;
            }
            Event::CData(e) => builder.text(&String::from_utf8_lossy(&e))?,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    builder.finish()
}
