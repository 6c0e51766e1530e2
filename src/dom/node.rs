//! Node types: NodeId, NodeData.

use slotmap::new_key_type;

use crate::css::style::{InlineStyle, StylePatch};

new_key_type! {
    /// Unique identifier for a DOM node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Data associated with a single DOM node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    /// Tag name (e.g. "div", "aside").
    pub tag: String,
    /// Optional unique id (CSS #id selector).
    pub id: Option<String>,
    /// CSS classes, in insertion order.
    pub classes: Vec<String>,
    /// Inline style declarations.
    pub style: InlineStyle,
    /// Whether this node is displayed (`false` after `hide()`).
    pub visible: bool,
}

impl NodeData {
    /// Create a new `NodeData` with the given tag and no classes or inline style.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            style: InlineStyle::default(),
            visible: true,
        }
    }

    /// Set the CSS id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a single CSS class (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Apply an inline style patch (builder).
    pub fn with_style(mut self, patch: StylePatch) -> Self {
        self.style.apply(&patch);
        self
    }

    /// Check whether this node has a given CSS class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a CSS class. No-op if already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_owned());
        }
    }

    /// Remove a CSS class. No-op if not present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// The `class` attribute value, e.g. `"sidebar stick"`.
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::style::Position;

    #[test]
    fn new_defaults() {
        let data = NodeData::new("div");
        assert_eq!(data.tag, "div");
        assert!(data.id.is_none());
        assert!(data.classes.is_empty());
        assert!(data.style.is_empty());
        assert!(data.visible);
    }

    #[test]
    fn builder_with_class_dedup() {
        let data = NodeData::new("div").with_class("primary").with_class("primary");
        assert_eq!(data.classes, vec!["primary"]);
    }

    #[test]
    fn builder_with_style() {
        let data = NodeData::new("div").with_style(StylePatch::new().position(Position::Relative));
        assert_eq!(data.style.position, Some(Position::Relative));
    }

    #[test]
    fn add_class_idempotent() {
        let mut data = NodeData::new("div");
        data.add_class("stick");
        data.add_class("stick");
        assert_eq!(data.classes.len(), 1);
    }

    #[test]
    fn remove_class() {
        let mut data = NodeData::new("div").with_class("stick").with_class("bound");
        data.remove_class("stick");
        assert!(!data.has_class("stick"));
        assert!(data.has_class("bound"));
        data.remove_class("missing");
        assert_eq!(data.class_name(), "bound");
    }

    #[test]
    fn node_id_is_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<NodeId>();
    }
}
