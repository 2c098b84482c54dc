//! Reading-time estimate

use lazy_static::lazy_static;
use regex::Regex;

/// Reading speed used for the estimate
pub const WORDS_PER_MINUTE: usize = 200;

lazy_static! {
    /// Any HTML tag
    static ref MARKUP: Regex = Regex::new(r"<[^>]*>").expect("Failed to compile markup regex");
}

/// Content with `<...>` tags replaced by spaces
pub fn strip_markup(content: &str) -> String {
    MARKUP.replace_all(content, " ").into_owned()
}

/// Words in the content once markup is removed
pub fn word_count(content: &str) -> usize {
    strip_markup(content).split_whitespace().count()
}

/// Estimated minutes to read `content`, never less than one
pub fn read_time_minutes(content: &str) -> usize {
    word_count(content).div_ceil(WORDS_PER_MINUTE).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markup() {
        assert_eq!(
            strip_markup("<p>Hello <b>world</b></p>").split_whitespace().collect::<Vec<_>>(),
            vec!["Hello", "world"]
        );
    }

    #[test]
    fn test_adjacent_tags_do_not_merge_words() {
        assert_eq!(word_count("<p>one</p><p>two</p>"), 2);
    }

    #[test]
    fn test_read_time_rounds_up() {
        let words = |n: usize| vec!["word"; n].join(" ");

        assert_eq!(read_time_minutes(&words(200)), 1);
        assert_eq!(read_time_minutes(&words(201)), 2);
        assert_eq!(read_time_minutes(&words(400)), 2);
        assert_eq!(read_time_minutes(&format!("<div>{}</div>", words(401))), 3);
    }

    #[test]
    fn test_short_and_empty_content_is_one_minute() {
        assert_eq!(read_time_minutes(""), 1);
        assert_eq!(read_time_minutes("<img src='x'>"), 1);
        assert_eq!(read_time_minutes("a few words"), 1);
    }
}
