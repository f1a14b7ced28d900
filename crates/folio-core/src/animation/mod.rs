#![forbid(unsafe_code)]

//! Frame-driven animation.
//!
//! Animations are plain state advanced by the caller once per display frame
//! with the elapsed [`Duration`]. Nothing here owns a timer or a thread, so
//! the same values animate identically under the terminal runtime, the
//! headless simulator, and a browser host.

pub mod spring;

use std::time::Duration;

pub use spring::Spring;

/// Something that changes over time and eventually settles.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has settled and further ticks are no-ops.
    fn is_complete(&self) -> bool;

    /// Current value.
    fn value(&self) -> f64;
}
