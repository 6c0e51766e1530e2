//! Sticky positioning: keep an element in view while its context scrolls past.
//!
//! - **[`controller`]** — [`Sticky`], the per-element state machine and its event wiring
//! - **[`calc`]** — geometry cache and boundary computation
//! - **[`state`]** — states, named transitions and the transition table
//! - **[`config`]** — options, callbacks, partial overrides
//! - **[`error`]** — faults reported (never thrown) by an instance

pub mod calc;
pub mod config;
pub mod controller;
pub mod error;
pub mod state;

pub use calc::Calc;
pub use config::{Callbacks, ContextRef, StickyConfig, StickyEvent, StickySettings};
pub use controller::{Phase, Sticky};
pub use error::StickyError;
pub use state::{MaskAction, StickyState, Transition};
