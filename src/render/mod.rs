//! Rendering and cleanup of extracted text.

mod cleanup;
mod markdown;

pub use cleanup::{clean_text, clean_text_with_limit, TextCleaner};
pub use markdown::{HtmlRenderer, MarkdownRenderer, PassthroughRenderer};
