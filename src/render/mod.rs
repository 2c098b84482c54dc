//! Rendering adapters
//!
//! Consumers of the plain records produced by the query engine and the
//! article resolver. Nothing here touches session state; swapping the
//! terminal renderer for another front end needs no changes elsewhere.

mod share;
pub mod text;

pub use share::{share_links, ShareLinks};

use crate::article::ArticleView;
use crate::post::Post;
use crate::query::Page;
use crate::session::QueryState;
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// JSON payload for a listing consumer
pub fn listing_json(page: &Page<Post>, query: &QueryState, counts: &BTreeMap<String, usize>) -> Value {
    json!({
        "query": query,
        "categories": counts,
        "posts": page.items,
        "page": page.page,
        "hasMore": page.has_more,
        "shown": page.shown,
        "total": page.total,
    })
}

/// JSON payload for a detail consumer
pub fn article_json(view: &ArticleView, share: Option<&ShareLinks>) -> Value {
    json!({
        "post": view.post,
        "related": view.related,
        "readTimeMinutes": view.read_time_minutes,
        "share": share,
    })
}

/// JSON payload for a detail consumer that could not resolve an article
pub fn not_found_json(reason: &str) -> Value {
    json!({ "error": "not_found", "message": reason })
}

/// JSON payload for a listing whose source is unavailable
pub fn unavailable_json(reason: &str) -> Value {
    json!({ "error": "source_unavailable", "message": reason, "posts": [] })
}
