//! Extraction milestones and listeners.
//!
//! The extractor reports what it does through an [`ExtractionListener`].
//! The default [`LogListener`] forwards to the `log` facade, which stays
//! silent until the host installs a logger.

use crate::model::Mark;

/// Events emitted while flattening a document.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionEvent {
    /// The blueprint field was found; schema-aware extraction follows.
    SchemaResolved {
        /// Blueprint path
        path: String,
        /// Field handle
        field: String,
    },

    /// The blueprint or field was not found.
    SchemaUnavailable {
        /// Blueprint path
        path: String,
        /// Field handle
        field: String,
    },

    /// Schema-aware extraction failed and the raw fallback took over.
    FallbackTaken {
        /// Error message of the failure
        reason: String,
    },

    /// A top-level node that is not a mapping was skipped.
    NodeSkipped {
        /// Position in the document
        index: usize,
        /// Shape of the skipped value
        found: &'static str,
    },

    /// A set or mapping was not entered because the depth bound was hit.
    DepthLimitReached {
        /// Depth at which traversal stopped
        depth: usize,
    },

    /// Internal-scheme links were redacted from a nested text run.
    LinksRedacted {
        /// The run's marks after sanitizing
        marks: Vec<Mark>,
        /// Number of hrefs removed
        count: usize,
    },

    /// A fragment was dropped while processing raw content.
    FragmentDropped {
        /// Error message
        reason: String,
    },
}

impl ExtractionEvent {
    /// Check if this event signals a degraded result.
    pub fn is_degraded(&self) -> bool {
        matches!(
            self,
            ExtractionEvent::SchemaUnavailable { .. }
                | ExtractionEvent::FallbackTaken { .. }
                | ExtractionEvent::FragmentDropped { .. }
        )
    }
}

/// Receives extraction events.
///
/// Listeners are shared across worker threads when extraction runs in
/// parallel, so they take `&self`.
pub trait ExtractionListener: Send + Sync {
    /// Called for every event.
    fn on_event(&self, event: &ExtractionEvent);
}

/// Listener that forwards events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogListener;

impl ExtractionListener for LogListener {
    fn on_event(&self, event: &ExtractionEvent) {
        match event {
            ExtractionEvent::SchemaResolved { path, field } => {
                log::debug!("Blueprint {} has field {}, extracting by schema", path, field);
            }
            ExtractionEvent::SchemaUnavailable { path, field } => {
                log::debug!(
                    "Field {} not found in blueprint {}, processing raw content",
                    field,
                    path
                );
            }
            ExtractionEvent::FallbackTaken { reason } => {
                log::warn!("Extraction failed, processing raw content: {}", reason);
            }
            ExtractionEvent::NodeSkipped { index, found } => {
                log::debug!("Skipping node {}: expected mapping, found {}", index, found);
            }
            ExtractionEvent::DepthLimitReached { depth } => {
                log::debug!("Depth limit reached at depth {}", depth);
            }
            ExtractionEvent::LinksRedacted { count, .. } => {
                log::debug!("Redacted {} internal link(s)", count);
            }
            ExtractionEvent::FragmentDropped { reason } => {
                log::warn!("Dropping raw fragment: {}", reason);
            }
        }
    }
}

/// Listener that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullListener;

impl ExtractionListener for NullListener {
    fn on_event(&self, _event: &ExtractionEvent) {}
}
