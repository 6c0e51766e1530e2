//! DOM arena: slotmap-backed node tree with class/id queries and inline styles.

pub mod node;
pub mod query;
pub mod tree;

pub use node::{NodeData, NodeId};
pub use tree::Dom;
