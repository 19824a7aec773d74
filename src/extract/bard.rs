//! Extraction from documents nested inside set fields.

use crate::error::Result;
use crate::model::{Node, TextNode, Value};

use super::{join_fragments, sanitize_marks, ExtractionEvent, ExtractionOptions, Extractor};

impl Extractor<'_> {
    /// Extract text from a nested document.
    ///
    /// Text runs have their internal-scheme links redacted before the text
    /// is rendered; every other mapping is treated as a set at the current
    /// depth. Non-mapping entries are skipped.
    pub fn extract_from_bard_array(
        &self,
        nodes: &[Value],
        options: ExtractionOptions<'_>,
    ) -> Result<String> {
        let mut fragments = Vec::with_capacity(nodes.len());
        for node in nodes {
            match Node::classify(node) {
                Node::Text(text) => fragments.push(self.extract_nested_text(text)?),
                Node::Set(set) => fragments.push(self.extract_from_set(set.fields(), options)?),
                Node::Opaque => {}
            }
        }
        Ok(join_fragments(fragments))
    }

    fn extract_nested_text(&self, node: TextNode<'_>) -> Result<String> {
        let (marks, count) = sanitize_marks(node.marks());
        if count > 0 {
            self.emit(ExtractionEvent::LinksRedacted { marks, count });
        }

        match node.text() {
            Some(text) if !text.is_empty() => self.renderer.render(&text.coerce_text()?),
            _ => Ok(String::new()),
        }
    }
}
