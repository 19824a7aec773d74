//! Error types for bardtext library.

use std::io;
use thiserror::Error;

/// Result type alias for bardtext operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while flattening a document.
///
/// None of these ever reach the caller of [`crate::transform`]; they are
/// recovered at the top-level boundary by the raw-content fallback.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading blueprint or document files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON input.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The schema lookup itself failed (not the same as "field not found").
    #[error("Schema lookup error: {0}")]
    SchemaLookup(String),

    /// The markdown renderer rejected its input.
    #[error("Rendering error: {0}")]
    Render(String),

    /// A text node whose `text` cannot be coerced to a string.
    #[error("Malformed text node: {0}")]
    MalformedText(String),
}
