//! Collaborator seams between a behavior and the page hosting it.
//!
//! A behavior never owns the document. It reads measurements through
//! [`Geometry`], resolves structure through [`Document`], and writes its
//! visual changes through [`VisualSink`]. [`Host`] bundles all three and is
//! implemented automatically for any type providing them, such as
//! [`Page`](crate::page::Page).

use crate::css::model::SelectorList;
use crate::css::style::StylePatch;
use crate::dom::node::{NodeData, NodeId};
use crate::geometry::{Offset, Px, Size};

/// Measurement provider.
pub trait Geometry {
    /// Document offset of a node's border box (jQuery `offset()`).
    fn offset(&self, node: NodeId) -> Option<Offset>;

    /// Outer size of a node (jQuery `outerWidth()` / `outerHeight()`).
    fn outer_size(&self, node: NodeId) -> Option<Size>;

    /// Height of the viewport, queried at computation time.
    fn viewport_height(&self) -> Px;

    /// Current vertical scroll offset of the window.
    fn scroll_top(&self) -> Px;
}

/// Structural queries.
pub trait Document {
    /// Whether the node is still part of the document.
    fn exists(&self, node: NodeId) -> bool;

    /// The node itself or its nearest ancestor matching `selectors`.
    fn closest(&self, node: NodeId, selectors: &SelectorList) -> Option<NodeId>;

    /// Whether `node` is `ancestor` or lies in its subtree.
    fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool;

    /// Whether subtree mutations can be observed in this environment.
    fn supports_mutation_observer(&self) -> bool;
}

/// Styling and DOM-mutation sink.
pub trait VisualSink {
    /// Patch a node's inline style.
    fn apply_style(&mut self, node: NodeId, patch: &StylePatch);

    fn add_class(&mut self, node: NodeId, class: &str);

    fn remove_class(&mut self, node: NodeId, class: &str);

    /// Insert a new node right after `anchor`, returning its id.
    fn insert_after(&mut self, anchor: NodeId, data: NodeData) -> Option<NodeId>;

    /// Show or hide a node without detaching it.
    fn set_visible(&mut self, node: NodeId, visible: bool);

    /// Detach a node permanently.
    fn remove(&mut self, node: NodeId);
}

/// Everything a behavior needs from its page.
pub trait Host: Geometry + Document + VisualSink {}

impl<T: Geometry + Document + VisualSink + ?Sized> Host for T {}
