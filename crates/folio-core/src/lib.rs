#![forbid(unsafe_code)]

//! Core primitives for folio.
//!
//! - [`geometry`]: terminal-cell rectangles used for layout and hit testing.
//! - [`event`]: canonical input events (keys, mouse, resize, ticks).
//! - [`animation`]: the [`Animation`](animation::Animation) trait and the
//!   damped [`Spring`](animation::spring::Spring) that drives both the
//!   navigation marker and smooth scrolling.

pub mod animation;
pub mod event;
pub mod geometry;

pub use geometry::Rect;
