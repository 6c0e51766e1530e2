//! Sticky configuration: options, lifecycle callbacks, partial overrides.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::dom::node::NodeId;
use crate::geometry::Px;

/// Quiet window before a resize or mutation burst triggers `calculate()`.
pub const RECALC_DELAY: Duration = Duration::from_millis(200);

/// Class of the placeholder node that keeps the element's layout slot.
pub const MASK_CLASS: &str = "sticky-mask";
/// Class added while the element is stuck to the viewport.
pub const STICK_CLASS: &str = "stick";
/// Class added while the element is bound to the end of its context.
pub const BOUND_CLASS: &str = "bound";

/// Default minimum slack between element and context height.
pub const DEFAULT_SCROLL_SPACE: Px = 200.0;

// ---------------------------------------------------------------------------
// Callbacks
// ---------------------------------------------------------------------------

/// A lifecycle callback, invoked with the sticky element.
pub type Callback = Box<dyn FnMut(NodeId)>;

/// User-visible lifecycle transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StickyEvent {
    Stick,
    UnStick,
    Bound,
    UnBound,
}

impl StickyEvent {
    pub fn name(self) -> &'static str {
        match self {
            StickyEvent::Stick => "stick",
            StickyEvent::UnStick => "unStick",
            StickyEvent::Bound => "bound",
            StickyEvent::UnBound => "unBound",
        }
    }
}

impl fmt::Display for StickyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The four optional lifecycle hooks.
#[derive(Default)]
pub struct Callbacks {
    on_stick: Option<Callback>,
    on_unstick: Option<Callback>,
    on_bound: Option<Callback>,
    on_unbound: Option<Callback>,
}

impl Callbacks {
    /// Install the hook for `event`, replacing any previous one.
    pub fn set(&mut self, event: StickyEvent, callback: Callback) {
        *self.slot(event) = Some(callback);
    }

    /// Invoke the hook for `event`, if any.
    pub fn fire(&mut self, event: StickyEvent, elem: NodeId) {
        if let Some(callback) = self.slot(event) {
            callback(elem);
        }
    }

    fn slot(&mut self, event: StickyEvent) -> &mut Option<Callback> {
        match event {
            StickyEvent::Stick => &mut self.on_stick,
            StickyEvent::UnStick => &mut self.on_unstick,
            StickyEvent::Bound => &mut self.on_bound,
            StickyEvent::UnBound => &mut self.on_unbound,
        }
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_stick", &self.on_stick.is_some())
            .field("on_unstick", &self.on_unstick.is_some())
            .field("on_bound", &self.on_bound.is_some())
            .field("on_unbound", &self.on_unbound.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// ContextRef
// ---------------------------------------------------------------------------

/// How the bounding ancestor is designated: a selector resolved with
/// `closest()`, or the node itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextRef {
    Selector(String),
    Node(NodeId),
}

impl From<&str> for ContextRef {
    fn from(selector: &str) -> Self {
        ContextRef::Selector(selector.to_owned())
    }
}

impl From<String> for ContextRef {
    fn from(selector: String) -> Self {
        ContextRef::Selector(selector)
    }
}

impl From<NodeId> for ContextRef {
    fn from(node: NodeId) -> Self {
        ContextRef::Node(node)
    }
}

impl fmt::Display for ContextRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextRef::Selector(selector) => f.write_str(selector),
            ContextRef::Node(node) => write!(f, "{node:?}"),
        }
    }
}

// ---------------------------------------------------------------------------
// StickyConfig
// ---------------------------------------------------------------------------

/// Live configuration of a sticky instance.
#[derive(Debug)]
pub struct StickyConfig {
    /// The bounding ancestor (or the element itself).
    pub context: Option<ContextRef>,
    /// Reserve the element's layout slot while it is out of flow.
    pub mask: bool,
    /// Recalculate after subtree mutations of the element or its context.
    pub observe: bool,
    /// Distance from the viewport top while stuck.
    pub top_offset: Px,
    /// Distance from the context bottom while bound.
    pub bottom_offset: Px,
    /// Minimum slack between element and context height.
    pub scroll_space: Px,
    pub callbacks: Callbacks,
}

impl Default for StickyConfig {
    fn default() -> Self {
        Self {
            context: None,
            mask: true,
            observe: false,
            top_offset: 0.0,
            bottom_offset: 0.0,
            scroll_space: DEFAULT_SCROLL_SPACE,
            callbacks: Callbacks::default(),
        }
    }
}

impl StickyConfig {
    /// Default configuration for the given context selector or node.
    pub fn new(context: impl Into<ContextRef>) -> Self {
        Self { context: Some(context.into()), ..Self::default() }
    }

    pub fn mask(mut self, mask: bool) -> Self {
        self.mask = mask;
        self
    }

    pub fn observe(mut self, observe: bool) -> Self {
        self.observe = observe;
        self
    }

    pub fn top_offset(mut self, px: Px) -> Self {
        self.top_offset = px;
        self
    }

    pub fn bottom_offset(mut self, px: Px) -> Self {
        self.bottom_offset = px;
        self
    }

    pub fn scroll_space(mut self, px: Px) -> Self {
        self.scroll_space = px;
        self
    }

    pub fn on_stick(mut self, f: impl FnMut(NodeId) + 'static) -> Self {
        self.callbacks.set(StickyEvent::Stick, Box::new(f));
        self
    }

    pub fn on_unstick(mut self, f: impl FnMut(NodeId) + 'static) -> Self {
        self.callbacks.set(StickyEvent::UnStick, Box::new(f));
        self
    }

    pub fn on_bound(mut self, f: impl FnMut(NodeId) + 'static) -> Self {
        self.callbacks.set(StickyEvent::Bound, Box::new(f));
        self
    }

    pub fn on_unbound(mut self, f: impl FnMut(NodeId) + 'static) -> Self {
        self.callbacks.set(StickyEvent::UnBound, Box::new(f));
        self
    }

    /// Merge a partial override. Only the fields present in `settings` change.
    pub fn merge(&mut self, settings: StickySettings) {
        let StickySettings { context, mask, observe, top_offset, bottom_offset, scroll_space } =
            settings;
        if let Some(selector) = context {
            self.context = Some(ContextRef::Selector(selector));
        }
        if let Some(mask) = mask {
            self.mask = mask;
        }
        if let Some(observe) = observe {
            self.observe = observe;
        }
        if let Some(px) = top_offset {
            self.top_offset = px;
        }
        if let Some(px) = bottom_offset {
            self.bottom_offset = px;
        }
        if let Some(px) = scroll_space {
            self.scroll_space = px;
        }
    }
}

impl From<StickySettings> for StickyConfig {
    fn from(settings: StickySettings) -> Self {
        let mut config = StickyConfig::default();
        config.merge(settings);
        config
    }
}

// ---------------------------------------------------------------------------
// StickySettings
// ---------------------------------------------------------------------------

/// Partial configuration, as passed in a plugin option object.
///
/// Deserializes from camelCase JSON: `{"context": ".layout", "topOffset": 10}`.
/// Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StickySettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observe: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_offset: Option<Px>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_offset: Option<Px>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_space: Option<Px>,
}

impl StickySettings {
    /// Parse an option object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
