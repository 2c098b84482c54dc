//! Blog session state
//!
//! [`BlogSession`] holds one visitor's loaded posts and listing state;
//! [`Debouncer`] delays search input until typing pauses.

mod blog_session;
mod debounce;

pub use blog_session::{BlogSession, LoadState, QueryState};
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
