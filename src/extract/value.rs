//! Reduction of arbitrary field values to text.

use crate::error::Result;
use crate::model::{Mapping, Value};

use super::{join_fragments, ExtractionEvent, ExtractionOptions, Extractor};

impl Extractor<'_> {
    /// Extract text from a field value of any shape.
    ///
    /// - strings are cleaned
    /// - lists that look like a nested document go through
    ///   [`Extractor::extract_from_bard_array`]; other lists are reduced
    ///   item by item
    /// - mappings descend one level under the same depth bound as sets
    /// - lazy holders are unwrapped
    /// - opaque objects contribute their string form
    /// - null, booleans and numbers contribute nothing
    pub fn extract_text_from_value(
        &self,
        value: &Value,
        options: ExtractionOptions<'_>,
    ) -> Result<String> {
        match value {
            Value::String(s) => Ok(self.clean(s, options)),
            Value::List(items) if value.looks_like_document() => {
                self.extract_from_bard_array(items, options)
            }
            Value::List(items) => {
                let mut fragments = Vec::with_capacity(items.len());
                for item in items {
                    fragments.push(self.extract_text_from_value(item, options)?);
                }
                Ok(join_fragments(fragments))
            }
            Value::Mapping(map) => self.extract_from_mapping(map, options),
            Value::Lazy(inner) => self.extract_text_from_value(inner, options),
            Value::Opaque(s) => Ok(s.clone()),
            Value::Null | Value::Bool(_) | Value::Number(_) => Ok(String::new()),
        }
    }

    fn extract_from_mapping(&self, map: &Mapping, options: ExtractionOptions<'_>) -> Result<String> {
        if options.depth_exhausted() {
            self.emit(ExtractionEvent::DepthLimitReached {
                depth: options.current_depth(),
            });
            return Ok(String::new());
        }

        let child = options.descend();
        let mut fragments = Vec::with_capacity(map.len());
        for value in map.values() {
            fragments.push(self.extract_text_from_value(value, child)?);
        }
        Ok(join_fragments(fragments))
    }
}
