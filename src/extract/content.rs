//! Top-level walk over a document's nodes.

use rayon::prelude::*;

use crate::error::Result;
use crate::model::{Node, Value};

use super::{ExtractionEvent, ExtractionOptions, Extractor};

impl Extractor<'_> {
    /// Extract one text fragment per contributing top-level node.
    ///
    /// Text runs are rendered as markdown (their marks are left alone on
    /// this path); every other mapping is extracted as a set. A document
    /// that is not a list or mapping yields no fragments. Fragment order
    /// follows node order, also when extracting in parallel.
    pub fn extract_content(
        &self,
        document: &Value,
        options: ExtractionOptions<'_>,
    ) -> Result<Vec<String>> {
        let Some(children) = document.children() else {
            return Ok(Vec::new());
        };
        let nodes: Vec<&Value> = children.collect();

        let fragments: Vec<String> = if options.parallel() {
            nodes
                .par_iter()
                .enumerate()
                .map(|(index, node)| self.extract_node(index, node, options))
                .collect::<Result<Vec<_>>>()?
        } else {
            nodes
                .iter()
                .enumerate()
                .map(|(index, node)| self.extract_node(index, node, options))
                .collect::<Result<Vec<_>>>()?
        };

        Ok(fragments
            .into_iter()
            .filter(|fragment| !fragment.is_empty())
            .collect())
    }

    fn extract_node(
        &self,
        index: usize,
        node: &Value,
        options: ExtractionOptions<'_>,
    ) -> Result<String> {
        match Node::classify(node) {
            Node::Text(text) => match text.text() {
                Some(raw) if !raw.is_empty() => self.renderer.render(&raw.coerce_text()?),
                _ => Ok(String::new()),
            },
            Node::Set(set) => {
                // Membership does not change the outcome; undeclared types are
                // extracted like declared ones.
                let declared = set
                    .set_type()
                    .is_some_and(|t| options.set_types().contains(t));
                if !declared {
                    log::trace!("Node {} has undeclared set type {:?}", index, set.set_type());
                }
                self.extract_from_set(set.fields(), options)
            }
            Node::Opaque => {
                self.emit(ExtractionEvent::NodeSkipped {
                    index,
                    found: node.type_name(),
                });
                Ok(String::new())
            }
        }
    }
}
