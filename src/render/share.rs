//! Social share links for an article

use serde::Serialize;
use urlencoding::encode;

/// Share targets for one article URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLinks {
    pub twitter: String,
    pub linkedin: String,
    pub facebook: String,
    pub whatsapp: String,
    pub email: String,
}

/// Build share links for `url` titled `title`
pub fn share_links(url: &str, title: &str) -> ShareLinks {
    let body = encode(&format!("Check out this article: {}", url)).into_owned();
    let url = encode(url);
    let text = encode(title);

    ShareLinks {
        twitter: format!("https://twitter.com/intent/tweet?text={}&url={}", text, url),
        linkedin: format!("https://www.linkedin.com/sharing/share-offsite/?url={}", url),
        facebook: format!("https://www.facebook.com/sharer/sharer.php?u={}", url),
        whatsapp: format!("https://wa.me/?text={}%20{}", text, url),
        email: format!("mailto:?subject={}&body={}", text, body),
    }
}
