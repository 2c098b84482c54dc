//! CSV export parsing
//!
//! The header row names the fields. Recognized columns are picked out by
//! name; unknown columns are ignored and missing ones stay empty. When a
//! name appears more than once, the first column with that name wins.

use crate::{BlogError, Result};
use csv::StringRecord;

/// One data row of the spreadsheet, before normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetRow {
    pub id: Option<String>,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub image: Option<String>,
}

/// Positions of the recognized columns in the header row
#[derive(Debug, Clone, Copy)]
struct Columns {
    id: usize,
    title: Option<usize>,
    excerpt: Option<usize>,
    content: Option<usize>,
    category: Option<usize>,
    author: Option<usize>,
    date: Option<usize>,
    image: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Option<Self> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        Some(Self {
            id: position("ID")?,
            title: position("Title"),
            excerpt: position("Excerpt"),
            content: position("Content"),
            category: position("Category"),
            author: position("Author"),
            date: position("Date"),
            image: position("Image"),
        })
    }

    fn row(&self, record: &StringRecord) -> SheetRow {
        let field = |index: Option<usize>| {
            index
                .and_then(|i| record.get(i))
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        SheetRow {
            id: field(Some(self.id)),
            title: field(self.title),
            excerpt: field(self.excerpt),
            content: field(self.content),
            category: field(self.category),
            author: field(self.author),
            date: field(self.date),
            image: field(self.image),
        }
    }
}

/// Parse the CSV export into rows
///
/// Blank rows (every cell empty or whitespace) are skipped. A header row
/// without an `ID` column means the response is not the sheet export
/// (an HTML sign-in page, for instance) and fails the whole parse.
pub fn parse_sheet(text: &str) -> Result<Vec<SheetRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let columns = Columns::locate(&headers).ok_or_else(|| {
        BlogError::SourceUnavailable("response has no ID column; not a sheet export".to_string())
    })?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        rows.push(columns.row(&record));
    }

    tracing::debug!(rows = rows.len(), columns = headers.len(), "Parsed sheet export");
    Ok(rows)
}
