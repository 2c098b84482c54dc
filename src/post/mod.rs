//! Core post data structures
//!
//! Defines the normalized Post record and its id type.

mod ids;
#[allow(clippy::module_inception)]
mod post;

pub use ids::PostId;
pub use post::{
    newest_first, parse_date, sort_newest_first, Post, PostDefaults, DEFAULT_ARTICLE_BASE,
    DEFAULT_AUTHOR, DEFAULT_CATEGORY, DEFAULT_IMAGE,
};
