//! Category filter and free-text search

use crate::post::Post;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Category selection for the listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    /// Every category
    #[default]
    All,
    /// Exact, case-sensitive category name
    Only(String),
}

impl CategoryFilter {
    pub fn only(category: impl Into<String>) -> Self {
        CategoryFilter::Only(category.into())
    }

    pub fn matches(&self, post: &Post) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => post.category == *category,
        }
    }
}

impl From<&str> for CategoryFilter {
    /// `"all"` selects every category; anything else is a category name
    fn from(s: &str) -> Self {
        if s == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(s.to_string())
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CategoryFilter::from(s))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

/// Posts in the selected category, order preserved
pub fn filter_by_category<'a>(posts: &'a [Post], filter: &CategoryFilter) -> Vec<&'a Post> {
    posts.iter().filter(|p| filter.matches(p)).collect()
}

/// Normalized form of a search query
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Whether a post matches an already-normalized query
pub fn matches_query(post: &Post, needle: &str) -> bool {
    needle.is_empty()
        || post.title.to_lowercase().contains(needle)
        || post.excerpt.to_lowercase().contains(needle)
        || post.category.to_lowercase().contains(needle)
        || post.author.to_lowercase().contains(needle)
}

/// Posts whose title, excerpt, category or author contain `query`
/// (case-insensitive); an empty query keeps everything
pub fn search<'a, I>(posts: I, query: &str) -> Vec<&'a Post>
where
    I: IntoIterator<Item = &'a Post>,
{
    let needle = normalize_query(query);
    posts
        .into_iter()
        .filter(|p| matches_query(p, &needle))
        .collect()
}

/// Category filter then search, order preserved
pub fn apply<'a>(posts: &'a [Post], filter: &CategoryFilter, query: &str) -> Vec<&'a Post> {
    search(filter_by_category(posts, filter), query)
}

/// Post count per category over the full set
pub fn category_counts(posts: &[Post]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for post in posts {
        *counts.entry(post.category.clone()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn posts() -> Vec<Post> {
        vec![
            Post::new("1", "A").with_category("News"),
            Post::new("2", "B").with_category("Policy"),
        ]
    }

    fn ids(posts: &[&Post]) -> Vec<String> {
        posts.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_filter_all_is_passthrough() {
        let posts = posts();
        assert_eq!(filter_by_category(&posts, &CategoryFilter::All).len(), 2);
    }

    #[test]
    fn test_filter_is_exact_and_case_sensitive() {
        let posts = posts();
        assert_eq!(ids(&filter_by_category(&posts, &CategoryFilter::only("News"))), vec!["1"]);
        assert!(filter_by_category(&posts, &CategoryFilter::only("news")).is_empty());
        assert!(filter_by_category(&posts, &CategoryFilter::only("New")).is_empty());
    }

    #[test]
    fn test_filter_then_search() {
        let posts = posts();
        let filtered = filter_by_category(&posts, &CategoryFilter::only("News"));
        let result = search(filtered, "a");
        assert_eq!(ids(&result), vec!["1"]);
        assert_eq!(result[0].title, "A");
    }

    #[test]
    fn test_empty_query_is_noop() {
        let posts = posts();
        assert_eq!(search(&posts, "").len(), 2);
        assert_eq!(search(&posts, "   ").len(), 2);
    }

    #[test]
    fn test_search_fields_and_case() {
        let posts = vec![
            Post::new("1", "Tax Season").with_excerpt("Filing tips"),
            Post::new("2", "Other").with_author("Maria Lopez"),
            Post::new("3", "Misc").with_category("Investing"),
            Post::new("4", "Hidden").with_content("tax in body only"),
        ];

        assert_eq!(ids(&search(&posts, "  TAX ")), vec!["1"]);
        assert_eq!(ids(&search(&posts, "filing")), vec!["1"]);
        assert_eq!(ids(&search(&posts, "lopez")), vec!["2"]);
        assert_eq!(ids(&search(&posts, "invest")), vec!["3"]);
    }

    #[test]
    fn test_composition_order_independent() {
        let posts = vec![
            Post::new("1", "Budget news").with_category("News"),
            Post::new("2", "Budget policy").with_category("Policy"),
            Post::new("3", "Rates").with_category("News"),
        ];
        let filter = CategoryFilter::only("News");

        let filter_first = search(filter_by_category(&posts, &filter), "budget");
        let search_first: Vec<&Post> = search(&posts, "budget")
            .into_iter()
            .filter(|p| filter.matches(p))
            .collect();

        assert_eq!(ids(&filter_first), ids(&search_first));
        assert_eq!(ids(&apply(&posts, &filter, "budget")), vec!["1"]);
    }

    #[test]
    fn test_category_filter_parse_and_display() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "News".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::only("News")
        );
        assert_eq!(CategoryFilter::from("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::All.to_string(), "all");
        assert_eq!(CategoryFilter::only("News").to_string(), "News");
    }

    #[test]
    fn test_category_counts() {
        let mut posts = posts();
        posts.push(Post::new("3", "C").with_category("News"));

        let counts = category_counts(&posts);
        assert_eq!(counts.get("News"), Some(&2));
        assert_eq!(counts.get("Policy"), Some(&1));
        assert_eq!(counts.len(), 2);
    }
}
