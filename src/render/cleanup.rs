//! Text cleanup pipeline for search indexing.

use regex::Regex;
use std::sync::OnceLock;

use crate::extract::DEFAULT_MAX_LENGTH;

/// Normalizes markup and whitespace and caps the length of indexable text.
///
/// The stages run in a fixed order:
///
/// 1. space before every `<`, so text on either side of a tag stays apart
/// 2. strip markup tags
/// 3. `&nbsp;` → space, `&amp;` → `&`
/// 4. collapse whitespace runs to a single space
/// 5. drop the space in front of `.`, `,` and `;`
/// 6. trim
/// 7. truncate to the character limit (no ellipsis)
///
/// For input free of tags and entities the pipeline is idempotent.
#[derive(Debug, Clone)]
pub struct TextCleaner {
    tag_regex: Regex,
    whitespace_regex: Regex,
}

impl TextCleaner {
    /// Create a new cleaner.
    pub fn new() -> Self {
        Self {
            // Comments end at `-->`. Inside a tag, quoted runs may hold `>`.
            // A `<` followed by whitespace is literal text, not a tag. An
            // unterminated tag or quote runs to the end of the input.
            tag_regex: Regex::new(
                r#"<(?:!--(?s:.*?)(?:-->|$)|(?:(?:[^\s>"']|"[^"]*(?:"|$)|'[^']*(?:'|$))(?:"[^"]*(?:"|$)|'[^']*(?:'|$)|[^"'>])*)?(?:>|$))"#,
            )
            .unwrap(),
            whitespace_regex: Regex::new(r"[ \t\n\r\x0B\x0C]+").unwrap(),
        }
    }

    /// Clean text and cap it at `max_length` characters.
    pub fn clean(&self, text: &str, max_length: usize) -> String {
        if text.is_empty() {
            return String::new();
        }

        let spaced = text.replace('<', " <");
        let stripped = self.tag_regex.replace_all(&spaced, "");
        let decoded = stripped.replace("&nbsp;", " ").replace("&amp;", "&");
        let collapsed = self.whitespace_regex.replace_all(&decoded, " ");
        let punctuated = collapsed
            .replace(" .", ".")
            .replace(" ,", ",")
            .replace(" ;", ";");

        truncate_chars(punctuated.trim(), max_length)
    }
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::new()
    }
}

/// Cut to at most `max_length` characters, dropping whitespace left dangling
/// at the cut.
fn truncate_chars(text: &str, max_length: usize) -> String {
    match text.char_indices().nth(max_length) {
        Some((cut, _)) => text[..cut].trim_end().to_string(),
        None => text.to_string(),
    }
}

fn shared_cleaner() -> &'static TextCleaner {
    static CLEANER: OnceLock<TextCleaner> = OnceLock::new();
    CLEANER.get_or_init(TextCleaner::new)
}

/// Clean text with the default length cap.
pub fn clean_text(text: &str) -> String {
    shared_cleaner().clean(text, DEFAULT_MAX_LENGTH)
}

/// Clean text with an explicit length cap.
pub fn clean_text_with_limit(text: &str, max_length: usize) -> String {
    shared_cleaner().clean(text, max_length)
}
