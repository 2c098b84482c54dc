//! Per-visitor blog session
//!
//! Owns the loaded post set and the listing's query state. User actions
//! (category click, search input, "load more") go through this type; views
//! are derived on demand and never modify the posts. The post set is
//! replaced once the cache TTL has passed and [`BlogSession::ensure_fresh`]
//! re-ingests.

use crate::article::{requested_id, ArticleResolver, ArticleView};
use crate::config::ListingConfig;
use crate::ingest::{LoadOrigin, PostLoader};
use crate::post::Post;
use crate::query::{self, CategoryFilter, Page, DEFAULT_PAGE_SIZE};
use crate::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

/// Listing query state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryState {
    pub category: CategoryFilter,
    pub search: String,
    /// 1-based
    pub page: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            category: CategoryFilter::All,
            search: String::new(),
            page: 1,
        }
    }
}

/// Whether the post set is available
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Ready(LoadOrigin),
    /// Source could not be reached or parsed; the listing shows its empty state
    Unavailable(String),
}

/// One visitor's view over the blog
pub struct BlogSession {
    loader: Arc<PostLoader>,
    resolver: ArticleResolver,
    all_posts: Arc<[Post]>,
    counts: BTreeMap<String, usize>,
    query: QueryState,
    state: LoadState,
    page_size: usize,
    /// When the current posts were fetched from the source; `None` when
    /// they came from the cache, whose entry age is unknown here
    fetched_at: Option<Instant>,
}

impl BlogSession {
    pub fn new(loader: Arc<PostLoader>) -> Self {
        Self {
            resolver: ArticleResolver::new(loader.clone()),
            loader,
            all_posts: Arc::from(Vec::new()),
            counts: BTreeMap::new(),
            query: QueryState::default(),
            state: LoadState::NotLoaded,
            page_size: DEFAULT_PAGE_SIZE,
            fetched_at: None,
        }
    }

    /// Apply page size and related-post count from configuration
    pub fn with_listing(mut self, listing: &ListingConfig) -> Self {
        self.page_size = listing.page_size.max(1);
        self.resolver = self.resolver.with_related_limit(listing.related_limit);
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Load posts through the cache
    ///
    /// On failure the session holds no posts and reports `Unavailable`.
    pub async fn load(&mut self) -> Result<usize> {
        let result = self.loader.load_with_origin().await;
        self.apply_load(result)
    }

    /// Re-fetch posts from the source, replacing the cached entry
    pub async fn reload(&mut self) -> Result<usize> {
        let result = self.loader.refresh().await.map(|p| (p, LoadOrigin::Source));
        self.apply_load(result)
    }

    /// Make sure the posts are loaded and within the cache TTL
    ///
    /// Posts fetched by this session are trusted until the TTL has passed.
    /// Otherwise the cache is consulted, which re-ingests when its entry
    /// has expired. Returns `true` when the post set was replaced by a new
    /// ingestion.
    pub async fn ensure_fresh(&mut self) -> Result<bool> {
        if !matches!(self.state, LoadState::Ready(_)) {
            return self.load().await.map(|_| true);
        }

        let ttl = self.loader.cache().ttl();
        if self.fetched_at.is_some_and(|at| at.elapsed() < ttl) {
            return Ok(false);
        }

        match self.loader.load_with_origin().await {
            Ok((posts, LoadOrigin::Cache)) => {
                // Same cache window; keep the reader's place in the listing
                self.counts = query::category_counts(&posts);
                self.all_posts = posts;
                Ok(false)
            }
            result => {
                tracing::debug!("Post set expired, re-ingested");
                self.apply_load(result).map(|_| true)
            }
        }
    }

    fn apply_load(&mut self, result: Result<(Arc<[Post]>, LoadOrigin)>) -> Result<usize> {
        match result {
            Ok((posts, origin)) => {
                self.counts = query::category_counts(&posts);
                self.all_posts = posts;
                self.fetched_at = (origin == LoadOrigin::Source).then(Instant::now);
                self.state = LoadState::Ready(origin);
                self.query.page = 1;
                Ok(self.all_posts.len())
            }
            Err(e) => {
                tracing::error!(error = %e, "Error loading posts");
                self.all_posts = Arc::from(Vec::new());
                self.counts.clear();
                self.fetched_at = None;
                self.state = LoadState::Unavailable(e.to_string());
                Err(e)
            }
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Every loaded post, newest first
    pub fn posts(&self) -> &[Post] {
        &self.all_posts
    }

    /// Post count per category over the unfiltered set
    pub fn category_counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    /// Select a category; resets to the first page
    pub fn set_category(&mut self, category: CategoryFilter) {
        tracing::debug!(%category, "Category filter changed");
        self.query.category = category;
        self.query.page = 1;
    }

    /// Apply a search query; resets to the first page
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
        self.query.page = 1;
    }

    /// Advance to the next page if there is one
    pub fn load_more(&mut self) -> bool {
        let total = self.results().len();
        if self.query.page.saturating_mul(self.page_size) < total {
            self.query.page += 1;
            true
        } else {
            false
        }
    }

    /// Jump to a page (1-based) of the current results
    pub fn set_page(&mut self, page: usize) {
        self.query.page = page.max(1);
    }

    /// Filtered and searched posts, ingestion order
    pub fn results(&self) -> Vec<&Post> {
        query::apply(&self.all_posts, &self.query.category, &self.query.search)
    }

    /// Only the current page of results
    pub fn current_page(&self) -> Page<Post> {
        let results: Vec<Post> = self.results().into_iter().cloned().collect();
        query::paginate(&results, self.query.page, self.page_size)
    }

    /// Results from the first page through the current one
    pub fn listing(&self) -> Page<Post> {
        let results: Vec<Post> = self.results().into_iter().cloned().collect();
        query::window(&results, self.query.page, self.page_size)
    }

    /// Detail view for `id`, loading or re-ingesting posts first if needed
    pub async fn article(&mut self, id: Option<&str>) -> Result<ArticleView> {
        requested_id(id)?;
        self.ensure_fresh().await?;
        self.resolver.view_in(&self.all_posts, id)
    }
}
