//! Tabular output: CSV files and console tables.
//!
//! Both renderers always emit the header, so an empty result set still yields
//! a well-formed table.

use crate::error::Result;
use crate::paper::{PaperRecord, COLUMNS};
use comfy_table::{presets, ContentArrangement, Table};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Write records as CSV to any writer
pub fn write_csv<W: Write>(writer: W, records: &[PaperRecord]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(COLUMNS)?;
    for record in records {
        wtr.write_record(record.to_row())?;
    }

    wtr.flush()?;
    Ok(())
}

/// Save records to a CSV file, replacing any existing file
pub fn save_csv(path: &Path, records: &[PaperRecord]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(file, records)?;
    info!(path = %path.display(), rows = records.len(), "Saved CSV");
    Ok(())
}

/// Build a console table of the records
pub fn render_table(records: &[PaperRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(COLUMNS);

    for record in records {
        table.add_row(record.to_row());
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::efetch::{ArticleDetails, AuthorEntry};
    use tempfile::NamedTempFile;

    const HEADER: &str = "PubmedID,Title,Publication Date,Non-academic Author(s),Company Affiliation(s),Corresponding Author Email";

    fn sample_records() -> Vec<PaperRecord> {
        let details = ArticleDetails {
            title: Some("Drug discovery, revisited".to_string()),
            publication_year: Some("2021".to_string()),
            authors: vec![
                AuthorEntry {
                    fore_name: "Jane".to_string(),
                    last_name: "Doe".to_string(),
                    affiliation: "Acme Pharma Inc, jane@acme.com".to_string(),
                },
                AuthorEntry {
                    fore_name: "Max".to_string(),
                    last_name: "Roe".to_string(),
                    affiliation: "Beta Ltd".to_string(),
                },
            ],
        };
        vec![
            PaperRecord::from_article("111", &details),
            PaperRecord::fetch_error("999", "timed out"),
        ]
    }

    #[test]
    fn test_csv_empty_has_header() -> Result<()> {
        let mut buf = Vec::new();
        write_csv(&mut buf, &[])?;
        assert_eq!(String::from_utf8_lossy(&buf).trim_end(), HEADER);
        Ok(())
    }

    #[test]
    fn test_csv_rows() -> Result<()> {
        let mut buf = Vec::new();
        write_csv(&mut buf, &sample_records())?;
        let text = String::from_utf8_lossy(&buf).into_owned();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert_eq!(
            lines[1],
            r#"111,"Drug discovery, revisited",2021,"Jane Doe, Max Roe","Acme Pharma Inc, jane@acme.com, Beta Ltd",jane@acme.com"#
        );
        assert_eq!(lines[2], "999,Error fetching details,,,,Error: timed out");
        Ok(())
    }

    #[test]
    fn test_save_csv() -> Result<()> {
        let temp = NamedTempFile::new()?;
        save_csv(temp.path(), &sample_records())?;

        let mut reader = csv::Reader::from_path(temp.path())?;
        let headers = reader.headers()?.clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), COLUMNS);

        let rows = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][3], "Jane Doe, Max Roe");
        assert_eq!(&rows[1][1], "Error fetching details");
        Ok(())
    }

    #[test]
    fn test_render_table() {
        let rendered = render_table(&sample_records()).to_string();
        assert!(rendered.contains("PubmedID"));
        assert!(rendered.contains("999"));

        let empty = render_table(&[]);
        assert_eq!(empty.row_iter().count(), 0);
        assert!(empty.to_string().contains("PubmedID"));
    }
}
