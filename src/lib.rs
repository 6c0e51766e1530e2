//! # fundament
//!
//! A sticky positioning engine: keeps an element in view while the container
//! it belongs to scrolls past, then pins it to the end of that container.
//!
//! The engine is a scroll-driven state machine (`unstuck → stuck → bound`)
//! that reads geometry from, and writes inline styles to, an abstract host.
//! An in-memory [`page::Page`] is provided as the reference host, and a tokio
//! [`driver::Driver`] feeds it page events on an animation-frame cadence.
//!
//! ## Core Systems
//!
//! - **[`sticky`]** — Per-element controller, boundary math, transition table
//! - **[`plugin`]** — Instance registry and named commands
//! - **[`host`]** — Geometry, document and visual-sink traits the engine runs against
//! - **[`page`]** — In-memory host: DOM, layout boxes, viewport, scroll position
//! - **[`driver`]** — Async event loop with frame ticks
//! - **[`schedule`]** — Frame coalescing and debounce primitives
//! - **[`css`]** — Selector tokenizer, parser and matcher; inline style patches
//! - **[`dom`]** — Slotmap-backed DOM arena with tree operations and queries
//! - **[`geometry`]** — Offset, Size, Rect, Bounds primitives
//! - **[`testing`]** — Snapshot helpers

// Foundation
pub mod geometry;

// Document model
pub mod css;
pub mod dom;
pub mod host;
pub mod page;

// Engine
pub mod schedule;
pub mod sticky;
pub mod plugin;

// Runtime
pub mod driver;

// Testing support
pub mod testing;
