//! Plain-text rendering for the terminal

use super::share::ShareLinks;
use crate::article::{strip_markup, ArticleView};
use crate::post::{parse_date, Post};
use crate::query::{CategoryFilter, Page};
use crate::style;
use std::collections::BTreeMap;
use std::fmt::Write;

/// `Jun 1, 2024`; unreadable dates are shown as stored
pub fn format_short_date(date: &str) -> String {
    parse_date(date)
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| date.to_string())
}

/// `June 1, 2024`; unreadable dates are shown as stored
pub fn format_long_date(date: &str) -> String {
    parse_date(date)
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| date.to_string())
}

/// Listing card for one post
pub fn post_card(post: &Post) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} {}",
        style::category_style(&post.category),
        style::header(&post.title),
        style::dim(&format!("({})", post.id))
    );
    let _ = writeln!(
        out,
        "  {} · {}",
        format_short_date(&post.date),
        post.author
    );
    if !post.excerpt.is_empty() {
        let _ = writeln!(out, "  {}", post.excerpt);
    }
    let _ = writeln!(out, "  {}", style::link(&post.link));
    out
}

/// Category buttons with counts; the active one is highlighted
pub fn category_bar(counts: &BTreeMap<String, usize>, active: &CategoryFilter) -> String {
    let total: usize = counts.values().sum();
    let mut labels = Vec::with_capacity(counts.len() + 1);

    let all = format!("all ({})", total);
    labels.push(if *active == CategoryFilter::All {
        style::active(&all).to_string()
    } else {
        all
    });

    for (category, count) in counts {
        let label = format!("{} ({})", category, count);
        let selected = matches!(active, CategoryFilter::Only(c) if c == category);
        labels.push(if selected {
            style::active(&label).to_string()
        } else {
            label
        });
    }

    labels.join("  ")
}

/// Listing page with its footer
pub fn listing(page: &Page<Post>) -> String {
    if page.total == 0 {
        return empty_state(None);
    }

    let mut out = String::new();
    for post in &page.items {
        out.push_str(&post_card(post));
        out.push('\n');
    }

    let _ = write!(out, "Showing {} of {} posts", page.shown, page.total);
    if page.has_more {
        let _ = write!(out, " {}", style::dim(&format!("(more on page {})", page.page + 1)));
    }
    out.push('\n');
    out
}

/// Shown when there is nothing to list, or the source is unavailable
pub fn empty_state(reason: Option<&str>) -> String {
    match reason {
        Some(reason) => format!(
            "{}\n{}\n",
            style::warning("No posts available right now. Please try again later."),
            style::dim(reason)
        ),
        None => format!("{}\n", style::warning("No posts found.")),
    }
}

/// Full article with read time, related posts and optional share links
pub fn article(view: &ArticleView, share: Option<&ShareLinks>) -> String {
    let post = &view.post;
    let mut out = String::new();

    let _ = writeln!(out, "{}", style::category_style(&post.category));
    let _ = writeln!(out, "{}", style::header(&post.title));
    let _ = writeln!(
        out,
        "{} · {} · {} min read",
        format_long_date(&post.date),
        post.author,
        view.read_time_minutes
    );
    let _ = writeln!(out, "{}", style::dim(&post.image));
    out.push('\n');

    for paragraph in strip_markup(&post.content)
        .lines()
        .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|l| !l.is_empty())
    {
        let _ = writeln!(out, "{}\n", paragraph);
    }

    if !view.related.is_empty() {
        let _ = writeln!(out, "{}", style::header("Related articles"));
        for related in &view.related {
            let _ = writeln!(
                out,
                "  {} {}",
                style::post_id(related.id.as_str()),
                related.title
            );
            if !related.excerpt.is_empty() {
                let _ = writeln!(out, "    {}", style::dim(&related.excerpt));
            }
        }
    }

    if let Some(links) = share {
        out.push('\n');
        let _ = writeln!(out, "{}", style::header("Share"));
        for (name, url) in [
            ("Twitter", &links.twitter),
            ("LinkedIn", &links.linkedin),
            ("Facebook", &links.facebook),
            ("WhatsApp", &links.whatsapp),
            ("Email", &links.email),
        ] {
            let _ = writeln!(out, "  {:<9} {}", name, url);
        }
    }

    out
}

/// Shown when the detail view cannot resolve an article
pub fn not_found(reason: &str) -> String {
    format!(
        "{}\n{}\n",
        style::error("Article not found."),
        style::dim(reason)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::paginate;

    #[test]
    fn test_date_formats() {
        assert_eq!(format_short_date("2024-06-01"), "Jun 1, 2024");
        assert_eq!(format_long_date("2024-06-01"), "June 1, 2024");
        assert_eq!(format_short_date("soon"), "soon");
    }

    #[test]
    fn test_post_card_contents() {
        let post = Post::new("p1", "Budget Basics")
            .with_category("News")
            .with_author("Ana")
            .with_date("2024-06-01")
            .with_excerpt("Where the money goes");
        let card = post_card(&post);

        assert!(card.contains("Budget Basics"));
        assert!(card.contains("[News]"));
        assert!(card.contains("Jun 1, 2024 · Ana"));
        assert!(card.contains("Where the money goes"));
        assert!(card.contains("blog-article.html?id=p1"));
    }

    #[test]
    fn test_listing_footer() {
        let posts: Vec<Post> = (0..20).map(|i| Post::new(format!("p{}", i), "T")).collect();
        let out = listing(&paginate(&posts, 1, 9));
        assert!(out.contains("Showing 9 of 20 posts"));
        assert!(out.contains("more on page 2"));

        let out = listing(&paginate(&posts, 3, 9));
        assert!(out.contains("Showing 20 of 20 posts"));
        assert!(!out.contains("more on page"));
    }

    #[test]
    fn test_empty_listing() {
        let out = listing(&paginate::<Post>(&[], 1, 9));
        assert!(out.contains("No posts found."));
        assert!(empty_state(Some("HTTP 500")).contains("HTTP 500"));
    }

    #[test]
    fn test_category_bar() {
        let mut counts = BTreeMap::new();
        counts.insert("News".to_string(), 2);
        counts.insert("Policy".to_string(), 1);

        let bar = category_bar(&counts, &CategoryFilter::All);
        assert!(bar.contains("all (3)"));
        assert!(bar.contains("News (2)"));
        assert!(bar.contains("Policy (1)"));
    }

    #[test]
    fn test_article_render() {
        let view = ArticleView {
            post: Post::new("p1", "Budget Basics")
                .with_date("2024-06-01")
                .with_content("<p>First   paragraph.</p>\n<p>Second.</p>"),
            related: vec![Post::new("p2", "More on budgets")],
            read_time_minutes: 1,
        };
        let links = crate::render::share_links("https://ipfo.org/blog-article.html?id=p1", "Budget Basics");
        let out = article(&view, Some(&links));

        assert!(out.contains("June 1, 2024 · IPFO Team · 1 min read"));
        assert!(out.contains("First paragraph."));
        assert!(out.contains("Second."));
        assert!(!out.contains("<p>"));
        assert!(out.contains("More on budgets"));
        assert!(out.contains("twitter.com/intent/tweet"));
    }

    #[test]
    fn test_not_found() {
        assert!(not_found("missing-id").contains("missing-id"));
    }
}
