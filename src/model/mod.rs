//! Document model types for Bard content representation.
//!
//! A document is an ordered list of nodes. Input arrives as loosely shaped
//! data (usually JSON), is converted once into the closed [`Value`] variant,
//! and is then read through the typed [`Node`] views by the extractors.

mod node;
mod value;

pub use node::{Mark, Node, SetNode, TextNode, LINK_MARK_TYPE, TEXT_NODE_TYPE};
pub use value::{Mapping, Value};
