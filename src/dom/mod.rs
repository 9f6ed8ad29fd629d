//! In-memory element tree: slotmap-backed arena, markup parsing, selector
//! queries, and the shared [`Document`] handle.

pub mod document;
pub mod markup;
pub mod node;
pub mod query;
pub mod tree;

pub use document::Document;
pub use node::{NodeData, NodeId, NodeKind};
pub use tree::Dom;
