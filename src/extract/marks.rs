//! Redaction of internal-scheme links from inline marks.

use crate::model::Mark;

/// Scheme prefix of links that point at other content inside the CMS.
pub const INTERNAL_LINK_PREFIX: &str = "statamic://";

/// Check whether a mark is a link to internal content.
pub fn is_internal_link(mark: &Mark) -> bool {
    mark.is_link()
        && mark
            .href
            .as_deref()
            .is_some_and(|href| href.starts_with(INTERNAL_LINK_PREFIX))
}

/// Clear the href of every internal-scheme link mark.
///
/// Returns the sanitized marks and how many hrefs were removed. Marks of
/// other types, and links to anything else, pass through unchanged.
pub fn sanitize_marks(mut marks: Vec<Mark>) -> (Vec<Mark>, usize) {
    let mut redacted = 0;
    for mark in marks.iter_mut().filter(|mark| is_internal_link(mark)) {
        mark.href = None;
        redacted += 1;
    }
    (marks, redacted)
}
