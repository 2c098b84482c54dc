//! Terminal styling utilities
//!
//! Consistent color scheme for listing and article output.
//! Uses crossterm for cross-platform terminal colors.

use crossterm::style::{StyledContent, Stylize};

/// Category badge, colored by a stable hash of the name so a category keeps
/// its color across runs
pub fn category_style(category: &str) -> StyledContent<String> {
    let label = format!("[{}]", category);
    let hash = category.bytes().fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
    match hash % 6 {
        0 => label.cyan(),
        1 => label.green(),
        2 => label.magenta(),
        3 => label.blue(),
        4 => label.yellow(),
        _ => label.dark_cyan(),
    }
}

/// Active filter/selection marker
pub fn active(text: &str) -> StyledContent<String> {
    text.to_string().bold().underlined()
}

/// Section headers
pub fn header(text: &str) -> StyledContent<String> {
    text.to_string().bold()
}

/// Dim/muted text
pub fn dim(text: &str) -> StyledContent<String> {
    text.to_string().dark_grey()
}

/// Success text
pub fn success(text: &str) -> StyledContent<String> {
    text.to_string().green()
}

/// Warning text
pub fn warning(text: &str) -> StyledContent<String> {
    text.to_string().yellow()
}

/// Error text
pub fn error(text: &str) -> StyledContent<String> {
    text.to_string().red()
}

/// Post ID styling
pub fn post_id(id: &str) -> StyledContent<String> {
    id.to_string().cyan()
}

/// Link/URL styling
pub fn link(url: &str) -> StyledContent<String> {
    url.to_string().blue().underlined()
}

/// Count styling: dim when zero
pub fn count(n: usize) -> StyledContent<String> {
    if n == 0 {
        n.to_string().dark_grey()
    } else {
        n.to_string().white()
    }
}
