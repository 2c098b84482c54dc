//! Single-article lookup and related posts

use super::read_time::read_time_minutes;
use crate::ingest::PostLoader;
use crate::post::Post;
use crate::{BlogError, Result};
use serde::Serialize;
use std::sync::Arc;

/// Related posts shown under an article
pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// Everything the detail view renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleView {
    pub post: Post,
    pub related: Vec<Post>,
    pub read_time_minutes: usize,
}

/// Extract the article id from a detail link (`<base>?id=<ID>`)
///
/// Accepts a bare query string (`?id=...`) as well. The value is
/// percent-decoded; a missing or empty `id` yields `None`.
pub fn article_id_from_link(link: &str) -> Option<String> {
    let query = match link.split_once('?') {
        Some((_, query)) => query,
        None => return None,
    };
    let query = query.split('#').next().unwrap_or_default();

    query
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(name, _)| *name == "id")
        .and_then(|(_, value)| {
            let value = value.replace('+', " ");
            urlencoding::decode(&value).ok().map(|v| v.into_owned())
        })
        .filter(|id| !id.trim().is_empty())
}

/// The trimmed id of a detail request; absent or blank is `NotFound`
pub fn requested_id(id: Option<&str>) -> Result<&str> {
    match id.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(BlogError::NotFound("no article id supplied".to_string())),
    }
}

/// First post with the given id
///
/// A missing (`None`) or blank id is `NotFound`, the same as an unknown one.
pub fn find_post<'a>(posts: &'a [Post], id: Option<&str>) -> Result<&'a Post> {
    let id = requested_id(id)?;

    posts
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| BlogError::NotFound(id.to_string()))
}

/// Up to `limit` posts in `category` other than `exclude_id`, in ingestion order
pub fn related<'a>(posts: &'a [Post], category: &str, exclude_id: &str, limit: usize) -> Vec<&'a Post> {
    posts
        .iter()
        .filter(|p| p.id != exclude_id && p.category == category)
        .take(limit)
        .collect()
}

/// Detail payload for a post found in `posts`
pub fn article_view(posts: &[Post], id: Option<&str>, related_limit: usize) -> Result<ArticleView> {
    let post = find_post(posts, id)?;
    let related = related(posts, &post.category, post.id.as_str(), related_limit)
        .into_iter()
        .cloned()
        .collect();

    Ok(ArticleView {
        read_time_minutes: read_time_minutes(&post.content),
        post: post.clone(),
        related,
    })
}

/// Resolves articles, loading the post set on demand
///
/// [`crate::session::BlogSession`] resolves through the same type against
/// its already-loaded posts with [`ArticleResolver::view_in`].
#[derive(Clone)]
pub struct ArticleResolver {
    loader: Arc<PostLoader>,
    related_limit: usize,
}

impl ArticleResolver {
    pub fn new(loader: Arc<PostLoader>) -> Self {
        Self {
            loader,
            related_limit: DEFAULT_RELATED_LIMIT,
        }
    }

    pub fn with_related_limit(mut self, limit: usize) -> Self {
        self.related_limit = limit;
        self
    }

    pub fn related_limit(&self) -> usize {
        self.related_limit
    }

    /// The post with `id`, loading posts first if needed
    pub async fn resolve(&self, id: Option<&str>) -> Result<Post> {
        requested_id(id)?;
        let posts = self.loader.load().await?;
        find_post(&posts, id).cloned()
    }

    /// The full detail view for `id`, loading posts first if needed
    pub async fn view(&self, id: Option<&str>) -> Result<ArticleView> {
        requested_id(id)?;
        let posts = self.loader.load().await?;
        self.view_in(&posts, id)
    }

    /// The full detail view for `id` within an already-loaded post set
    pub fn view_in(&self, posts: &[Post], id: Option<&str>) -> Result<ArticleView> {
        let view = article_view(posts, id, self.related_limit);

        if let Err(BlogError::NotFound(ref missing)) = view {
            tracing::warn!(id = %missing, "Article not found");
        }
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn posts() -> Vec<Post> {
        vec![
            Post::new("A", "Alpha").with_category("News"),
            Post::new("B", "Beta").with_category("News"),
            Post::new("C", "Gamma").with_category("Policy"),
            Post::new("D", "Delta").with_category("News"),
            Post::new("E", "Epsilon").with_category("News"),
            Post::new("F", "Zeta").with_category("News"),
        ]
    }

    fn ids(posts: &[&Post]) -> Vec<String> {
        posts.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_find_post() {
        let posts = posts();
        assert_eq!(find_post(&posts, Some("C")).unwrap().title, "Gamma");
        assert_eq!(find_post(&posts, Some(" C ")).unwrap().title, "Gamma");
    }

    #[test]
    fn test_missing_id_not_found() {
        let posts = posts();
        assert!(matches!(
            find_post(&posts, Some("missing-id")),
            Err(BlogError::NotFound(ref id)) if id == "missing-id"
        ));
        assert!(find_post(&posts, None).unwrap_err().is_not_found());
        assert!(find_post(&posts, Some("  ")).unwrap_err().is_not_found());
    }

    #[test]
    fn test_requested_id() {
        assert_eq!(requested_id(Some(" p1 ")).unwrap(), "p1");
        assert!(requested_id(Some("")).unwrap_err().is_not_found());
        assert!(requested_id(None).unwrap_err().is_not_found());
    }

    #[test]
    fn test_first_match_wins() {
        let posts = vec![Post::new("dup", "First"), Post::new("dup", "Second")];
        assert_eq!(find_post(&posts, Some("dup")).unwrap().title, "First");
    }

    #[test]
    fn test_related_excludes_current_and_limits() {
        let posts = posts();
        let result = related(&posts, "News", "A", 3);
        assert_eq!(ids(&result), vec!["B", "D", "E"]);
    }

    #[test]
    fn test_related_fewer_than_limit() {
        let posts = posts();
        assert!(related(&posts, "Policy", "C", 3).is_empty());
        assert_eq!(ids(&related(&posts, "Policy", "A", 3)), vec!["C"]);
    }

    #[test]
    fn test_article_view() {
        let posts = posts();
        let view = article_view(&posts, Some("B"), 2).unwrap();

        assert_eq!(view.post.id.as_str(), "B");
        assert_eq!(
            view.related.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
            vec!["A", "D"]
        );
        assert_eq!(view.read_time_minutes, 1);
    }

    #[test]
    fn test_article_id_from_link() {
        assert_eq!(
            article_id_from_link("blog-article.html?id=abc").as_deref(),
            Some("abc")
        );
        assert_eq!(
            article_id_from_link("https://ipfo.org/blog-article.html?ref=x&id=a%20b#top").as_deref(),
            Some("a b")
        );
        assert_eq!(article_id_from_link("?id=42").as_deref(), Some("42"));
        assert_eq!(article_id_from_link("blog-article.html"), None);
        assert_eq!(article_id_from_link("blog-article.html?id="), None);
        assert_eq!(article_id_from_link("blog-article.html?ref=1"), None);
    }

    #[test]
    fn test_link_roundtrip() {
        let defaults = crate::post::PostDefaults::default();
        let id = crate::post::PostId::new("tax & you");
        let link = defaults.link_for(&id);
        assert_eq!(article_id_from_link(&link).as_deref(), Some("tax & you"));
    }
}
