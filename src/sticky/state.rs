//! The sticky state machine: states, transitions and the per-frame decision.

use std::fmt;

use crate::geometry::{Bounds, Px};

/// Layout state of a sticky element.
///
/// The "unbound" transition leads back to [`StickyState::Stuck`]; it is a
/// distinct action, not a distinct state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StickyState {
    /// In normal flow.
    Unstuck,
    /// Fixed to the viewport, mask holding its slot.
    Stuck,
    /// Absolutely positioned against the end of its context.
    Bound,
}

impl StickyState {
    /// Map the `(is_stick, is_bound)` flag pair onto a state.
    ///
    /// `is_bound` without `is_stick` is never produced; it reads as `Unstuck`.
    pub fn from_flags(is_stick: bool, is_bound: bool) -> Self {
        match (is_stick, is_bound) {
            (true, true) => StickyState::Bound,
            (true, false) => StickyState::Stuck,
            (false, _) => StickyState::Unstuck,
        }
    }

    /// Whether the element is out of normal flow.
    pub fn is_stick(self) -> bool {
        self != StickyState::Unstuck
    }

    pub fn is_bound(self) -> bool {
        self == StickyState::Bound
    }
}

impl fmt::Display for StickyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StickyState::Unstuck => "unstuck",
            StickyState::Stuck => "stuck",
            StickyState::Bound => "bound",
        })
    }
}

/// A named transition applied by `make()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Shared sub-action: fixed positioning at the computed top.
    Fixed,
    Stick,
    UnStick,
    Bound,
    UnBound,
}

/// Actions on the placeholder mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskAction {
    Show,
    Hide,
    Remove,
}

/// Outcome of one evaluation of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Passed the top boundary; `then_bound` when the bottom one is already
    /// passed too (right after a recalculation).
    Stick { then_bound: bool },
    UnStick,
    Bound,
    UnBound,
}

impl Decision {
    /// The transitions to apply, in order.
    pub fn transitions(self) -> &'static [Transition] {
        match self {
            Decision::Stick { then_bound: false } => &[Transition::Stick],
            Decision::Stick { then_bound: true } => &[Transition::Stick, Transition::Bound],
            Decision::UnStick => &[Transition::UnStick],
            Decision::Bound => &[Transition::Bound],
            Decision::UnBound => &[Transition::UnBound],
        }
    }
}

/// Evaluate the transition table. First matching row wins; `None` means the
/// element stays as it is.
pub fn decide(state: StickyState, scroll_top: Px, elem_bottom: Px, bounds: Bounds) -> Option<Decision> {
    let past_top = scroll_top >= bounds.top;
    let past_bottom = elem_bottom >= bounds.bottom;

    if !state.is_stick() && past_top {
        Some(Decision::Stick { then_bound: past_bottom })
    } else if state.is_stick() && !past_top {
        Some(Decision::UnStick)
    } else if !state.is_bound() && past_bottom {
        Some(Decision::Bound)
    } else if state.is_bound() && !past_bottom {
        Some(Decision::UnBound)
    } else {
        None
    }
}
