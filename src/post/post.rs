//! Post data structure
//!
//! Represents a single normalized article from the published spreadsheet.
//! The serialized form is the one stored in the session cache.

use super::PostId;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Organization name used when a row has no author
pub const DEFAULT_AUTHOR: &str = "IPFO Team";

/// Category used when a row has no category
pub const DEFAULT_CATEGORY: &str = "General";

/// Placeholder image used when a row has no image
pub const DEFAULT_IMAGE: &str = "https://placehold.co/400x250/1e40af/ffffff?text=IPFO";

/// Detail page that article links point at
pub const DEFAULT_ARTICLE_BASE: &str = "blog-article.html";

/// Fallback values applied while normalizing rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDefaults {
    pub author: String,
    pub category: String,
    pub image: String,
    pub article_base: String,
}

impl Default for PostDefaults {
    fn default() -> Self {
        Self {
            author: DEFAULT_AUTHOR.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            image: DEFAULT_IMAGE.to_string(),
            article_base: DEFAULT_ARTICLE_BASE.to_string(),
        }
    }
}

impl PostDefaults {
    /// Detail-page link for an article id: `<base>?id=<ID>`
    pub fn link_for(&self, id: &PostId) -> String {
        format!("{}?id={}", self.article_base, urlencoding::encode(id.as_str()))
    }
}

/// A normalized blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier within a load
    pub id: PostId,

    pub title: String,

    /// Short teaser shown on listing cards
    pub excerpt: String,

    /// Article body; may contain HTML markup
    pub content: String,

    pub category: String,

    pub author: String,

    /// Publication date (YYYY-MM-DD)
    pub date: String,

    /// Card/hero image URL
    pub image: String,

    /// Detail-page link derived from the id
    pub link: String,
}

impl Post {
    /// Create a post with the standard defaults and today's date
    pub fn new(id: impl Into<PostId>, title: impl Into<String>) -> Self {
        let defaults = PostDefaults::default();
        let id = id.into();
        Self {
            link: defaults.link_for(&id),
            id,
            title: title.into(),
            excerpt: String::new(),
            content: String::new(),
            category: defaults.category,
            author: defaults.author,
            date: chrono::Local::now().date_naive().format("%Y-%m-%d").to_string(),
            image: defaults.image,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = excerpt.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Parsed publication date, if the stored string is a recognized format
    pub fn published_on(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Parse a spreadsheet date cell
///
/// Accepts ISO dates, RFC 3339 timestamps and the slash formats Google Sheets
/// emits depending on locale.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for format in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }

    // Full timestamps, or an ISO date followed by a time part
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Newest-first ordering by publication date
///
/// Unparseable dates compare as older than every valid date, so they sort
/// last; ties keep their relative order under a stable sort.
pub fn newest_first(a: &Post, b: &Post) -> Ordering {
    match (a.published_on(), b.published_on()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable in-place sort, newest first
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(newest_first);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_creation() {
        let post = Post::new("p1", "Budget Basics");

        assert_eq!(post.id.as_str(), "p1");
        assert_eq!(post.title, "Budget Basics");
        assert_eq!(post.category, "General");
        assert_eq!(post.author, "IPFO Team");
        assert_eq!(post.image, DEFAULT_IMAGE);
        assert_eq!(post.link, "blog-article.html?id=p1");
        assert!(post.published_on().is_some());
    }

    #[test]
    fn test_link_encodes_id() {
        let defaults = PostDefaults::default();
        assert_eq!(
            defaults.link_for(&PostId::new("a b&c")),
            "blog-article.html?id=a%20b%26c"
        );
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 6, 1);
        assert_eq!(parse_date("2024-06-01"), expected);
        assert_eq!(parse_date("2024/06/01"), expected);
        assert_eq!(parse_date("06/01/2024"), expected);
        assert_eq!(parse_date("2024-06-01T10:00:00Z"), expected);
        assert_eq!(parse_date("2024-06-01 10:00"), expected);
        assert_eq!(parse_date(" 2024-06-01 "), expected);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_sort_newest_first() {
        let mut posts = vec![
            Post::new("old", "Old").with_date("2024-01-01"),
            Post::new("new", "New").with_date("2024-06-01"),
        ];
        sort_newest_first(&mut posts);
        assert_eq!(posts[0].id.as_str(), "new");
        assert_eq!(posts[1].id.as_str(), "old");
    }

    #[test]
    fn test_invalid_dates_sort_last_and_stable() {
        let mut posts = vec![
            Post::new("bad1", "Bad").with_date("someday"),
            Post::new("ok", "Ok").with_date("2023-03-03"),
            Post::new("bad2", "Bad").with_date("later"),
        ];
        sort_newest_first(&mut posts);
        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["ok", "bad1", "bad2"]);
    }

    #[test]
    fn test_equal_dates_keep_source_order() {
        let mut posts = vec![
            Post::new("a", "A").with_date("2024-02-02"),
            Post::new("b", "B").with_date("2024-02-02"),
        ];
        sort_newest_first(&mut posts);
        assert_eq!(posts[0].id.as_str(), "a");
    }
}
