//! Snapshot helpers for tests.
//!
//! Use [`page_to_string`] to capture a page's document as indented text, and
//! [`TransitionLog`] to record lifecycle callbacks, both suited to
//! snapshot-style assertions.

pub mod snapshot;

pub use snapshot::{node_to_string, page_to_string, TransitionLog};
