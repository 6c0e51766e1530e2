//! In-memory page: a DOM plus laid-out boxes, viewport and scroll position.
//!
//! `Page` is the reference [`Host`](crate::host::Host). Layout is supplied by
//! the caller (`append` with a [`Rect`], `set_rect`) rather than computed, so
//! geometry stays deterministic. Structural changes (`append`, `insert_after`,
//! `remove`) are recorded as child-list mutations on the parent, the way a
//! mutation observer would see them, and can be drained with
//! [`take_mutations`](Page::take_mutations).

use slotmap::SecondaryMap;

use crate::css::model::SelectorList;
use crate::css::style::StylePatch;
use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;
use crate::geometry::{Offset, Px, Rect, Size};
use crate::host::{Document, Geometry, VisualSink};

/// A document with layout and scroll state.
#[derive(Debug, Clone)]
pub struct Page {
    dom: Dom,
    body: NodeId,
    layout: SecondaryMap<NodeId, Rect>,
    viewport: Size,
    scroll_top: Px,
    mutation_observer: bool,
    mutations: Vec<NodeId>,
}

impl Page {
    /// Create a page with an empty `body` filling the viewport.
    pub fn new(viewport: Size) -> Self {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::new("body"));
        let mut layout = SecondaryMap::new();
        layout.insert(body, Rect::new(0.0, 0.0, viewport.width, viewport.height));
        Self {
            dom,
            body,
            layout,
            viewport,
            scroll_top: 0.0,
            mutation_observer: true,
            mutations: Vec::new(),
        }
    }

    /// Simulate an environment without mutation observation (builder).
    pub fn without_mutation_observer(mut self) -> Self {
        self.mutation_observer = false;
        self
    }

    /// The `body` node.
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Append a laid-out child to `parent`.
    pub fn append(&mut self, parent: NodeId, data: NodeData, rect: Rect) -> NodeId {
        let id = self.dom.insert_child(parent, data);
        self.layout.insert(id, rect);
        self.mutations.push(parent);
        id
    }

    /// Replace a node's layout box.
    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        if self.dom.contains(node) {
            self.layout.insert(node, rect);
        }
    }

    /// A node's layout box.
    pub fn rect(&self, node: NodeId) -> Option<Rect> {
        self.layout.get(node).copied()
    }

    /// Scroll the window to `top`, clamped at zero.
    pub fn scroll_to(&mut self, top: Px) {
        self.scroll_top = top.max(0.0);
    }

    /// Resize the viewport.
    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Read access to the DOM.
    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    /// A node's data.
    pub fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.dom.get(id)
    }

    /// Drain the recorded child-list mutation targets.
    pub fn take_mutations(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.mutations)
    }
}

impl Geometry for Page {
    fn offset(&self, node: NodeId) -> Option<Offset> {
        self.rect(node).map(Rect::offset)
    }

    fn outer_size(&self, node: NodeId) -> Option<Size> {
        let laid_out = self.rect(node)?.size();
        let style = &self.dom.get(node)?.style;
        Some(Size::new(
            style.width.unwrap_or(laid_out.width),
            style.height.unwrap_or(laid_out.height),
        ))
    }

    fn viewport_height(&self) -> Px {
        self.viewport.height
    }

    fn scroll_top(&self) -> Px {
        self.scroll_top
    }
}

impl Document for Page {
    fn exists(&self, node: NodeId) -> bool {
        self.dom.contains(node)
    }

    fn closest(&self, node: NodeId, selectors: &SelectorList) -> Option<NodeId> {
        self.dom.closest(node, selectors)
    }

    fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool {
        self.dom.is_within(node, ancestor)
    }

    fn supports_mutation_observer(&self) -> bool {
        self.mutation_observer
    }
}

impl VisualSink for Page {
    fn apply_style(&mut self, node: NodeId, patch: &StylePatch) {
        if let Some(data) = self.dom.get_mut(node) {
            data.style.apply(patch);
        }
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(data) = self.dom.get_mut(node) {
            data.add_class(class);
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(data) = self.dom.get_mut(node) {
            data.remove_class(class);
        }
    }

    fn insert_after(&mut self, anchor: NodeId, data: NodeData) -> Option<NodeId> {
        let id = self.dom.insert_after(anchor, data)?;
        if let Some(parent) = self.dom.parent(id) {
            self.mutations.push(parent);
        }
        Some(id)
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) {
        if let Some(data) = self.dom.get_mut(node) {
            data.visible = visible;
        }
    }

    fn remove(&mut self, node: NodeId) {
        let parent = self.dom.parent(node);
        if self.dom.remove(node).is_some() {
            self.layout.remove(node);
            self.mutations.extend(parent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::parser::parse_selector_list;
    use crate::css::style::Position;

    fn page() -> (Page, NodeId, NodeId) {
        let mut page = Page::new(Size::new(1280.0, 800.0));
        let body = page.body();
        let context = page.append(
            body,
            NodeData::new("section").with_class("layout"),
            Rect::new(0.0, 0.0, 1280.0, 3000.0),
        );
        let elem = page.append(
            context,
            NodeData::new("aside"),
            Rect::new(20.0, 500.0, 300.0, 400.0),
        );
        (page, context, elem)
    }

    #[test]
    fn geometry_reads_layout() {
        let (mut page, context, elem) = page();
        assert_eq!(page.offset(elem), Some(Offset::new(20.0, 500.0)));
        assert_eq!(page.outer_size(context), Some(Size::new(1280.0, 3000.0)));
        assert_eq!(page.viewport_height(), 800.0);

        page.scroll_to(-5.0);
        assert_eq!(page.scroll_top(), 0.0);
        page.scroll_to(640.0);
        assert_eq!(page.scroll_top(), 640.0);
    }

    #[test]
    fn inline_size_overrides_layout() {
        let (mut page, _, elem) = page();
        page.apply_style(elem, &StylePatch::new().position(Position::Fixed).width(280.0));
        assert_eq!(page.outer_size(elem), Some(Size::new(280.0, 400.0)));
    }

    #[test]
    fn structure_changes_are_recorded() {
        let (mut page, context, elem) = page();
        let body = page.body();
        assert_eq!(page.take_mutations(), vec![body, context]);

        let mask = page.insert_after(elem, NodeData::new("div")).unwrap();
        assert_eq!(page.dom().next_sibling(elem), Some(mask));
        page.remove(mask);
        assert_eq!(page.take_mutations(), vec![context, context]);
        assert!(!page.exists(mask));
        assert!(page.take_mutations().is_empty());
    }

    #[test]
    fn document_queries() {
        let (page, context, elem) = page();
        let sel = parse_selector_list(".layout").unwrap();
        assert_eq!(page.closest(elem, &sel), Some(context));
        assert!(page.is_within(elem, context));
        assert!(page.supports_mutation_observer());
        assert!(!page.clone().without_mutation_observer().supports_mutation_observer());
    }

    #[test]
    fn sink_on_missing_node_is_noop() {
        let (mut page, _, elem) = page();
        page.remove(elem);
        page.add_class(elem, "stick");
        page.apply_style(elem, &StylePatch::clear());
        page.set_visible(elem, false);
        assert!(page.node(elem).is_none());
    }
}
