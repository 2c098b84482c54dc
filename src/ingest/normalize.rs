//! Row normalization
//!
//! Maps sheet rows to [`Post`] records: trims every cell, backfills
//! defaults, drops rows without an id and orders the result newest first.

use super::parser::SheetRow;
use crate::post::{parse_date, sort_newest_first, Post, PostDefaults, PostId};
use chrono::NaiveDate;

/// Aggregate outcome of normalizing one sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Data rows seen
    pub rows: usize,
    /// Rows that became posts
    pub kept: usize,
    /// Rows dropped for a missing id
    pub dropped: usize,
    /// Kept rows whose date was missing or unreadable and was set to today
    pub dated_today: usize,
}

fn cell(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Normalize one row, or `None` if it has no id
pub fn normalize_row(row: SheetRow, defaults: &PostDefaults, today: NaiveDate) -> Option<Post> {
    let id = PostId::new(cell(row.id)?);

    let date = match cell(row.date) {
        Some(raw) => match parse_date(&raw) {
            Some(date) => date,
            None => {
                tracing::debug!(id = %id, date = %raw, "Unreadable date, using today");
                today
            }
        },
        None => today,
    };

    Some(Post {
        link: defaults.link_for(&id),
        id,
        title: cell(row.title).unwrap_or_default(),
        excerpt: cell(row.excerpt).unwrap_or_default(),
        content: cell(row.content).unwrap_or_default(),
        category: cell(row.category).unwrap_or_else(|| defaults.category.clone()),
        author: cell(row.author).unwrap_or_else(|| defaults.author.clone()),
        date: date.format("%Y-%m-%d").to_string(),
        image: cell(row.image).unwrap_or_else(|| defaults.image.clone()),
    })
}

/// Normalize all rows and sort them newest first
pub fn normalize_rows(
    rows: Vec<SheetRow>,
    defaults: &PostDefaults,
    today: NaiveDate,
) -> (Vec<Post>, IngestReport) {
    let mut report = IngestReport {
        rows: rows.len(),
        ..Default::default()
    };

    let mut posts = Vec::with_capacity(rows.len());
    for row in rows {
        let had_date = row
            .date
            .as_deref()
            .and_then(parse_date)
            .is_some();

        match normalize_row(row, defaults, today) {
            Some(post) => {
                if !had_date {
                    report.dated_today += 1;
                }
                posts.push(post);
            }
            None => report.dropped += 1,
        }
    }
    report.kept = posts.len();

    sort_newest_first(&mut posts);
    (posts, report)
}
