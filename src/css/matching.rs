//! Selector matching against the DOM.

use crate::css::model::{
    Combinator, CompoundSelector, Selector, SelectorComponent, SelectorList, SelectorPart,
};
use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;

impl SelectorList {
    /// Whether any selector in the list matches `node_id`.
    pub fn matches(&self, node_id: NodeId, dom: &Dom) -> bool {
        self.selectors.iter().any(|sel| matches_selector(sel, node_id, dom))
    }
}

/// Check whether a full selector matches a given node.
///
/// Walks the selector parts from right to left, matching compound selectors
/// and navigating the DOM tree via combinators. A descendant combinator tries
/// every matching ancestor, nearest first, until the rest of the selector
/// matches.
pub fn matches_selector(selector: &Selector, node_id: NodeId, dom: &Dom) -> bool {
    let parts = &selector.parts;
    if parts.len() % 2 == 0 {
        // A combinator without a preceding compound.
        return false;
    }
    matches_from(parts, parts.len() - 1, node_id, dom)
}

/// Match `parts[..=idx]` with `parts[idx]` (a compound) anchored at `node_id`.
fn matches_from(parts: &[SelectorPart], idx: usize, node_id: NodeId, dom: &Dom) -> bool {
    let SelectorPart::Compound(compound) = &parts[idx] else {
        return false;
    };
    if !dom.get(node_id).is_some_and(|node| matches_compound(compound, node)) {
        return false;
    }
    if idx == 0 {
        return true;
    }
    let SelectorPart::Combinator(combinator) = &parts[idx - 1] else {
        return false;
    };

    match combinator {
        Combinator::Child => dom
            .parent(node_id)
            .is_some_and(|parent| matches_from(parts, idx - 2, parent, dom)),
        Combinator::Descendant => dom
            .ancestors(node_id)
            .into_iter()
            .any(|ancestor| matches_from(parts, idx - 2, ancestor, dom)),
    }
}

/// Check whether a compound selector matches a single node's data.
pub fn matches_compound(compound: &CompoundSelector, node: &NodeData) -> bool {
    compound.components.iter().all(|component| match component {
        SelectorComponent::Type(name) => node.tag.eq_ignore_ascii_case(name),
        SelectorComponent::Class(name) => node.has_class(name),
        SelectorComponent::Id(name) => node.id.as_deref() == Some(name.as_str()),
        SelectorComponent::Universal => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::parser::parse_selector_list;

    /// ```text
    ///        body
    ///          |
    ///     main #page
    ///      /        \
    ///  section      aside
    ///  .layout      .sidebar
    ///     |
    ///    div .sticky
    /// ```
    fn build_test_dom() -> (Dom, NodeId, NodeId, NodeId, NodeId) {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::new("body"));
        let main = dom.insert_child(body, NodeData::new("main").with_id("page"));
        let section = dom.insert_child(main, NodeData::new("section").with_class("layout"));
        let aside = dom.insert_child(main, NodeData::new("aside").with_class("sidebar"));
        let sticky = dom.insert_child(section, NodeData::new("div").with_class("sticky"));
        (dom, main, section, aside, sticky)
    }

    fn matches(sel: &str, node: NodeId, dom: &Dom) -> bool {
        parse_selector_list(sel).unwrap().matches(node, dom)
    }

    #[test]
    fn match_simple() {
        let (dom, main, section, _, sticky) = build_test_dom();
        assert!(matches("main", main, &dom));
        assert!(matches("MAIN", main, &dom));
        assert!(matches("#page", main, &dom));
        assert!(matches(".layout", section, &dom));
        assert!(matches("*", sticky, &dom));
        assert!(!matches(".layout", sticky, &dom));
    }

    #[test]
    fn match_compound() {
        let (dom, _, section, _, _) = build_test_dom();
        assert!(matches("section.layout", section, &dom));
        assert!(!matches("aside.layout", section, &dom));
    }

    #[test]
    fn match_descendant_skips_intermediate() {
        let (dom, _, _, _, sticky) = build_test_dom();
        assert!(matches("#page .sticky", sticky, &dom));
        assert!(matches("body div", sticky, &dom));
        assert!(!matches(".sidebar .sticky", sticky, &dom));
    }

    #[test]
    fn match_child() {
        let (dom, _, section, _, sticky) = build_test_dom();
        assert!(matches("main > section", section, &dom));
        assert!(matches("section > .sticky", sticky, &dom));
        assert!(!matches("main > .sticky", sticky, &dom));
    }

    #[test]
    fn match_list_any() {
        let (dom, _, _, aside, _) = build_test_dom();
        assert!(matches(".layout, .sidebar", aside, &dom));
        assert!(!matches(".layout, #page", aside, &dom));
    }

    #[test]
    fn match_descendant_backtracks_past_nearest_ancestor() {
        // body > section > section > main.layout > aside
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::new("body"));
        let outer = dom.insert_child(body, NodeData::new("section"));
        let inner = dom.insert_child(outer, NodeData::new("section"));
        let layout = dom.insert_child(inner, NodeData::new("main").with_class("layout"));
        let aside = dom.insert_child(layout, NodeData::new("aside"));

        // The nearest `section` is not a child of `body`; the outer one is.
        assert!(matches("body > section .layout", layout, &dom));
        assert!(matches("body > section main > aside", aside, &dom));
        assert!(matches("body section > section > .layout", layout, &dom));
        assert!(!matches("body > main .layout", layout, &dom));
        assert!(!matches("body > section > main", layout, &dom));
    }
}
