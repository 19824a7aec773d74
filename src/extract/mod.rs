//! Extraction engine: walks a document and reduces it to text fragments.
//!
//! The walk is split along the shapes it meets:
//!
//! - [`Extractor::extract_content`] for the top-level document
//! - [`Extractor::extract_from_set`] for a set block's fields (depth-bounded)
//! - [`Extractor::extract_text_from_value`] for arbitrary field values
//! - [`Extractor::extract_from_bard_array`] for documents nested in fields
//! - [`Extractor::process_raw_content`] for the schema-agnostic fallback
//!
//! All of them thread an immutable [`ExtractionOptions`] down the recursion.

mod bard;
mod content;
pub mod events;
mod marks;
mod options;
mod raw;
mod set;
mod value;

pub use events::{ExtractionEvent, ExtractionListener, LogListener, NullListener};
pub use marks::{is_internal_link, sanitize_marks, INTERNAL_LINK_PREFIX};
pub use options::{
    ExtractionOptions, SetTypes, TransformOptions, DEFAULT_MAX_DEPTH, DEFAULT_MAX_LENGTH,
};

use crate::render::{MarkdownRenderer, TextCleaner};

/// Structural keys of a set that never contribute text.
pub const STRUCTURAL_KEYS: [&str; 3] = ["type", "id", "enabled"];

/// Borrowed collaborators for one extraction.
#[derive(Clone, Copy)]
pub struct Extractor<'a> {
    renderer: &'a dyn MarkdownRenderer,
    cleaner: &'a TextCleaner,
    listener: &'a dyn ExtractionListener,
}

impl<'a> Extractor<'a> {
    /// Create an extractor from its collaborators.
    pub fn new(
        renderer: &'a dyn MarkdownRenderer,
        cleaner: &'a TextCleaner,
        listener: &'a dyn ExtractionListener,
    ) -> Self {
        Self {
            renderer,
            cleaner,
            listener,
        }
    }

    /// Clean text with the options' length cap.
    pub fn clean(&self, text: &str, options: ExtractionOptions<'_>) -> String {
        self.cleaner.clean(text, options.max_length())
    }

    fn emit(&self, event: ExtractionEvent) {
        self.listener.on_event(&event);
    }
}

/// Join non-empty fragments with single spaces.
fn join_fragments<I>(fragments: I) -> String
where
    I: IntoIterator<Item = String>,
{
    fragments
        .into_iter()
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
