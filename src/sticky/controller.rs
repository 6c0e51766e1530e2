//! The sticky controller: one element, one context, one state machine.
//!
//! A `Sticky` is created when the behavior is applied to a node and stays
//! inert until the page load event. From then on three event sources drive
//! it: scroll events request an `update()` on the next frame, resize and
//! mutation events arm a debounced `calculate()`, and the host's frame tick
//! runs whatever became due. Faults are logged and recorded, never returned:
//! the element simply falls back to static behavior.

use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::css::parser::parse_selector_list;
use crate::css::style::{Patch, Position, StylePatch};
use crate::dom::node::{NodeData, NodeId};
use crate::geometry::Px;
use crate::host::Host;
use crate::schedule::{Debounce, FrameScheduler};

use super::calc::Calc;
use super::config::{
    ContextRef, StickyConfig, StickyEvent, StickySettings, BOUND_CLASS, MASK_CLASS, RECALC_DELAY,
    STICK_CLASS,
};
use super::error::StickyError;
use super::state::{decide, MaskAction, StickyState, Transition};

/// Where an instance is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, waiting for the page to finish loading.
    Pending,
    /// Initialization failed on configuration; the element stays static.
    Inert,
    /// Listening and tracking scroll position.
    Active,
    /// Torn down; every entry point is a no-op.
    Destroyed,
}

/// A sticky element bound to its scrolling context.
#[derive(Debug)]
pub struct Sticky {
    namespace: String,
    elem: NodeId,
    context: Result<NodeId, StickyError>,
    config: StickyConfig,
    calc: Calc,
    is_stick: bool,
    is_bound: bool,
    mask: Option<NodeId>,
    frame: FrameScheduler,
    recalc: Debounce,
    listening: bool,
    observing: bool,
    phase: Phase,
    fault: Option<StickyError>,
}

impl Sticky {
    /// Attach the behavior to `elem`. The context is resolved right away with
    /// `closest()`, but a missing one is only reported at load time.
    pub fn new<H: Host + ?Sized>(host: &H, elem: NodeId, config: StickyConfig, id: u64) -> Self {
        let context = resolve_context(host, elem, config.context.as_ref());
        Self {
            namespace: format!(".sticky.{id}"),
            elem,
            context,
            config,
            calc: Calc::default(),
            is_stick: false,
            is_bound: false,
            mask: None,
            frame: FrameScheduler::new(),
            recalc: Debounce::new(RECALC_DELAY),
            listening: false,
            observing: false,
            phase: Phase::Pending,
            fault: None,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// Listener namespace, unique per instance (e.g. `.sticky.3`).
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn element(&self) -> NodeId {
        self.elem
    }

    /// The resolved context, if any.
    pub fn context(&self) -> Option<NodeId> {
        self.context.as_ref().ok().copied()
    }

    pub fn config(&self) -> &StickyConfig {
        &self.config
    }

    /// The geometry cache from the last `calculate()`.
    pub fn calc(&self) -> &Calc {
        &self.calc
    }

    pub fn state(&self) -> StickyState {
        debug_assert!(!self.is_bound || self.is_stick, "bound without stick");
        StickyState::from_flags(self.is_stick, self.is_bound)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_destroyed(&self) -> bool {
        self.phase == Phase::Destroyed
    }

    /// The last reported fault.
    pub fn fault(&self) -> Option<&StickyError> {
        self.fault.as_ref()
    }

    /// The mask node, once created.
    pub fn mask_node(&self) -> Option<NodeId> {
        self.mask
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn is_observing(&self) -> bool {
        self.observing
    }

    /// Whether an `update()` is scheduled for the next frame.
    pub fn frame_pending(&self) -> bool {
        self.frame.is_pending()
    }

    /// When the debounced recalculation will fire, if armed.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.recalc.deadline()
    }

    // ── Event entry points ───────────────────────────────────────────

    /// The document and its content finished loading.
    pub fn on_load<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.phase == Phase::Pending {
            self.init(host);
        }
    }

    /// Window scrolled: evaluate on the next frame.
    pub fn on_scroll(&mut self) {
        if self.listening {
            self.frame.request();
        }
    }

    /// Window resized: recalculate once resizing settles.
    pub fn on_resize(&mut self, now: Instant) {
        if self.listening {
            self.recalc.trigger(now);
        }
    }

    /// A subtree mutation happened at `target`.
    pub fn on_mutation<H: Host + ?Sized>(&mut self, target: NodeId, now: Instant, host: &H) {
        if !self.observing {
            return;
        }
        let watched = host.is_within(target, self.elem)
            || self.context().is_some_and(|context| host.is_within(target, context));
        if watched {
            trace!(instance = %self.namespace, ?target, "mutation observed");
            self.recalc.trigger(now);
        }
    }

    /// Frame tick: run the debounced recalculation if due, then the pending update.
    pub fn tick<H: Host + ?Sized>(&mut self, now: Instant, host: &mut H) {
        if self.recalc.poll(now) {
            self.calculate(host);
        }
        if self.frame.take() {
            self.update(host);
        }
    }

    // ── Operations ───────────────────────────────────────────────────

    fn init<H: Host + ?Sized>(&mut self, host: &mut H) {
        let context = match &self.context {
            Ok(context) => *context,
            Err(err) => {
                let err = err.clone();
                self.phase = Phase::Inert;
                self.report(err);
                return;
            }
        };

        debug!(instance = %self.namespace, elem = ?self.elem, ?context, "sticky initialized");
        self.phase = Phase::Active;
        self.listening = true;
        self.observe(host);
        self.calculate(host);
    }

    /// Re-measure the element and context, recompute bounds, and schedule an
    /// update. Destroys the instance when there is not enough room to scroll.
    pub fn calculate<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.phase != Phase::Active {
            trace!(instance = %self.namespace, phase = ?self.phase, "calculate skipped");
            return;
        }
        let Some(context) = self.context() else {
            return;
        };

        // Measure from the element's in-flow position.
        if self.is_stick {
            self.make(Transition::UnStick, host);
        }

        if let Err(err) = self.measure(host, context) {
            self.report(err);
            self.destroy(host);
            return;
        }

        if !self.calc.has_scroll_space(self.config.scroll_space) {
            self.report(StickyError::InsufficientSpace {
                height: self.calc.elem_size.height,
                scroll_space: self.config.scroll_space,
                context_height: self.calc.context_height,
            });
            self.destroy(host);
            return;
        }

        self.set_bounds(host.viewport_height());
        debug!(
            instance = %self.namespace,
            top = self.calc.bounds.top,
            bottom = self.calc.bounds.bottom,
            over_sized = self.calc.over_sized,
            "bounds calculated"
        );
        self.frame.request();
    }

    fn measure<H: Host + ?Sized>(&mut self, host: &H, context: NodeId) -> Result<(), StickyError> {
        let elem = self.elem;
        self.calc.context_offset = host.offset(context).ok_or(StickyError::Detached(context))?;
        self.calc.context_height =
            host.outer_size(context).ok_or(StickyError::Detached(context))?.height;
        self.calc.elem_offset = host.offset(elem).ok_or(StickyError::Detached(elem))?;
        self.calc.elem_size = host.outer_size(elem).ok_or(StickyError::Detached(elem))?;
        Ok(())
    }

    /// Recompute the sticky boundaries from the cached measurements.
    pub fn set_bounds(&mut self, viewport_height: Px) {
        self.calc
            .set_bounds(self.config.top_offset, self.config.bottom_offset, viewport_height);
    }

    /// Evaluate the transition table against the live scroll position.
    pub fn update<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.phase != Phase::Active {
            return;
        }

        let scroll_top = host.scroll_top();
        let elem_bottom = self.calc.elem_bottom(scroll_top, self.config.top_offset);
        let Some(decision) = decide(self.state(), scroll_top, elem_bottom, self.calc.bounds) else {
            return;
        };

        trace!(instance = %self.namespace, scroll_top, ?decision, "state change");
        for &transition in decision.transitions() {
            self.make(transition, host);
        }
    }

    /// Apply one named transition.
    pub fn make<H: Host + ?Sized>(&mut self, transition: Transition, host: &mut H) {
        if self.phase == Phase::Destroyed {
            return;
        }
        let elem = self.elem;

        match transition {
            Transition::Fixed => {
                let patch = StylePatch {
                    position: Patch::Set(Position::Fixed),
                    top: Patch::Set(self.calc.fixed_top(self.config.top_offset)),
                    bottom: Patch::Unset,
                    width: Patch::Set(self.calc.elem_size.width),
                    height: Patch::Keep,
                };
                host.apply_style(elem, &patch);
                self.is_stick = true;
            }
            Transition::Stick => {
                self.make(Transition::Fixed, host);
                self.mask(MaskAction::Show, host);
                host.add_class(elem, STICK_CLASS);
                self.emit(StickyEvent::Stick);
            }
            Transition::UnStick => {
                self.clear(host);
                self.mask(MaskAction::Hide, host);
                self.is_bound = false;
                self.is_stick = false;
                self.emit(StickyEvent::UnStick);
            }
            Transition::Bound => {
                if !self.is_stick {
                    trace!(instance = %self.namespace, "bound ignored while unstuck");
                    return;
                }
                let patch = StylePatch::new()
                    .position(Position::Absolute)
                    .unset_top()
                    .bottom(self.config.bottom_offset);
                host.apply_style(elem, &patch);
                host.add_class(elem, BOUND_CLASS);
                self.is_bound = true;
                self.emit(StickyEvent::Bound);
            }
            Transition::UnBound => {
                self.make(Transition::Fixed, host);
                host.remove_class(elem, BOUND_CLASS);
                self.is_bound = false;
                self.emit(StickyEvent::UnBound);
            }
        }
    }

    /// Show, hide or remove the placeholder that keeps the element's slot.
    ///
    /// Only `Show` consults the `mask` option: a mask created before the
    /// option was turned off is still hidden and removed.
    pub fn mask<H: Host + ?Sized>(&mut self, action: MaskAction, host: &mut H) {
        let existing = self.mask.filter(|&mask| host.exists(mask));

        match action {
            MaskAction::Show => {
                if !self.config.mask {
                    return;
                }
                let size = self.calc.elem_size;
                let patch = StylePatch::new().width(size.width).height(size.height);
                match existing {
                    Some(mask) => {
                        host.apply_style(mask, &patch);
                        host.set_visible(mask, true);
                    }
                    None => {
                        let data = NodeData::new("div").with_class(MASK_CLASS).with_style(patch);
                        self.mask = host.insert_after(self.elem, data);
                    }
                }
            }
            MaskAction::Hide => {
                if let Some(mask) = existing {
                    host.set_visible(mask, false);
                }
            }
            MaskAction::Remove => {
                if let Some(mask) = self.mask.take() {
                    host.remove(mask);
                }
            }
        }
    }

    /// Drop sticky inline styles and classes.
    fn clear<H: Host + ?Sized>(&self, host: &mut H) {
        let patch = StylePatch {
            position: Patch::Unset,
            top: Patch::Unset,
            bottom: Patch::Unset,
            width: Patch::Unset,
            height: Patch::Keep,
        };
        host.apply_style(self.elem, &patch);
        host.remove_class(self.elem, STICK_CLASS);
        host.remove_class(self.elem, BOUND_CLASS);
    }

    /// Start watching the element and context subtrees, when enabled and supported.
    fn observe<H: Host + ?Sized>(&mut self, host: &H) {
        if !self.config.observe {
            return;
        }
        if !host.supports_mutation_observer() {
            debug!(instance = %self.namespace, "mutation observation unavailable, skipping");
            return;
        }
        self.observing = true;
    }

    /// Merge option overrides into the live config. Geometry is not
    /// recomputed; call [`calculate`](Self::calculate) afterwards if needed.
    /// The context stays the one resolved at construction.
    pub fn setting(&mut self, settings: StickySettings) {
        self.config.merge(settings);
    }

    /// Detach listeners and observers, restore the element, remove the mask.
    /// Safe to call repeatedly.
    pub fn destroy<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.phase == Phase::Destroyed {
            return;
        }

        self.observing = false;
        self.listening = false;
        self.recalc.cancel();

        if host.exists(self.elem) {
            self.clear(host);
        }
        self.mask(MaskAction::Remove, host);
        self.is_stick = false;
        self.is_bound = false;
        self.phase = Phase::Destroyed;
        debug!(instance = %self.namespace, elem = ?self.elem, "sticky destroyed");
    }

    // ── Helpers ──────────────────────────────────────────────────────

    fn emit(&mut self, event: StickyEvent) {
        debug!(instance = %self.namespace, %event, "transition");
        self.config.callbacks.fire(event, self.elem);
    }

    fn report(&mut self, err: StickyError) {
        warn!(instance = %self.namespace, elem = ?self.elem, "{err}");
        self.fault = Some(err);
    }
}

fn resolve_context<H: Host + ?Sized>(
    host: &H,
    elem: NodeId,
    context: Option<&ContextRef>,
) -> Result<NodeId, StickyError> {
    match context {
        None => Err(StickyError::UndefinedContext),
        Some(ContextRef::Selector(selector)) if selector.trim().is_empty() => {
            Err(StickyError::UndefinedContext)
        }
        Some(ContextRef::Selector(selector)) => {
            let selectors =
                parse_selector_list(selector).map_err(|source| StickyError::InvalidContext {
                    selector: selector.clone(),
                    source,
                })?;
            host.closest(elem, &selectors)
                .ok_or_else(|| StickyError::ContextNotFound(ContextRef::Selector(selector.clone())))
        }
        Some(&ContextRef::Node(node)) if host.is_within(elem, node) => Ok(node),
        Some(&ContextRef::Node(node)) => Err(StickyError::ContextNotFound(ContextRef::Node(node))),
    }
}
