//! Article resolver
//!
//! Resolves a single post by id for the detail view, picks related posts
//! from the same category and estimates reading time.

mod read_time;
mod resolver;

pub use read_time::{read_time_minutes, strip_markup, word_count, WORDS_PER_MINUTE};
pub use resolver::{
    article_id_from_link, article_view, find_post, related, requested_id, ArticleResolver,
    ArticleView, DEFAULT_RELATED_LIMIT,
};
