//! Depth-bounded extraction over a set block's fields.

use crate::error::Result;
use crate::model::Mapping;

use super::{join_fragments, ExtractionEvent, ExtractionOptions, Extractor, STRUCTURAL_KEYS};

impl Extractor<'_> {
    /// Extract text from the named fields of a set.
    ///
    /// Returns an empty string once `current_depth` reaches `max_depth`.
    /// Structural keys and empty values are skipped; every other value is
    /// extracted one level deeper and the results are joined with spaces.
    pub fn extract_from_set(&self, fields: &Mapping, options: ExtractionOptions<'_>) -> Result<String> {
        if options.depth_exhausted() {
            self.emit(ExtractionEvent::DepthLimitReached {
                depth: options.current_depth(),
            });
            return Ok(String::new());
        }

        let child = options.descend();
        let mut fragments = Vec::new();
        for (key, value) in fields.iter() {
            if STRUCTURAL_KEYS.contains(&key) || value.is_empty() {
                continue;
            }
            fragments.push(self.extract_text_from_value(value, child)?);
        }

        Ok(join_fragments(fragments))
    }
}
