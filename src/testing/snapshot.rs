//! Snapshot rendering helpers.
//!
//! Functions for converting a page's document into plain text: one node per
//! line, indented two spaces per level, in the form
//! `tag#id.class1.class2 [inline css] (hidden)`.

use std::cell::RefCell;
use std::fmt::Write;
use std::rc::Rc;

use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;
use crate::page::Page;
use crate::sticky::{StickyConfig, StickyEvent};

// ---------------------------------------------------------------------------
// Document rendering
// ---------------------------------------------------------------------------

/// Render the whole page, starting at `body`. The final line has no trailing
/// newline.
pub fn page_to_string(page: &Page) -> String {
    let mut out = String::new();
    write_subtree(page.dom(), page.body(), 0, &mut out);
    out.truncate(out.trim_end().len());
    out
}

/// Render one node (no children).
pub fn node_to_string(data: &NodeData) -> String {
    let mut line = data.tag.clone();
    if let Some(id) = &data.id {
        let _ = write!(line, "#{id}");
    }
    for class in &data.classes {
        let _ = write!(line, ".{class}");
    }
    if !data.style.is_empty() {
        let _ = write!(line, " [{}]", data.style.css_text());
    }
    if !data.visible {
        line.push_str(" (hidden)");
    }
    line
}

fn write_subtree(dom: &Dom, id: NodeId, depth: usize, out: &mut String) {
    let Some(data) = dom.get(id) else {
        return;
    };
    let _ = writeln!(out, "{:indent$}{}", "", node_to_string(data), indent = depth * 2);
    for &child in dom.children(id) {
        write_subtree(dom, child, depth + 1, out);
    }
}

// ---------------------------------------------------------------------------
// Transition log
// ---------------------------------------------------------------------------

/// Shared record of fired lifecycle callbacks.
#[derive(Debug, Clone, Default)]
pub struct TransitionLog {
    events: Rc<RefCell<Vec<StickyEvent>>>,
}

impl TransitionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install all four callbacks on `config`, each appending to this log.
    pub fn attach(&self, config: StickyConfig) -> StickyConfig {
        let hook = |event: StickyEvent| {
            let events = Rc::clone(&self.events);
            move |_: NodeId| events.borrow_mut().push(event)
        };
        config
            .on_stick(hook(StickyEvent::Stick))
            .on_unstick(hook(StickyEvent::UnStick))
            .on_bound(hook(StickyEvent::Bound))
            .on_unbound(hook(StickyEvent::UnBound))
    }

    /// Events fired so far, in order.
    pub fn events(&self) -> Vec<StickyEvent> {
        self.events.borrow().clone()
    }

    /// Event names joined with `" -> "`, e.g. `"stick -> bound"`.
    pub fn trace(&self) -> String {
        self.events
            .borrow()
            .iter()
            .map(|event| event.name())
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}
