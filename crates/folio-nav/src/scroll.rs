#![forbid(unsafe_code)]

//! Spring-driven scroll offset.
//!
//! [`SmoothScroll::scroll_to`] animates toward a destination row;
//! [`SmoothScroll::scroll_by`] jumps immediately and cancels any animation
//! in flight. The offset is always clamped to `[0, max]`.

use std::time::Duration;

use folio_core::animation::spring::{Spring, presets};
use tracing::trace;

#[derive(Debug, Clone)]
pub struct SmoothScroll {
    spring: Spring,
    max: f64,
}

impl Default for SmoothScroll {
    fn default() -> Self {
        Self::new()
    }
}

impl SmoothScroll {
    #[must_use]
    pub fn new() -> Self {
        Self {
            spring: presets::scroll(0.0),
            max: 0.0,
        }
    }

    /// Largest reachable offset. Clamps the current offset and target.
    pub fn set_max(&mut self, max: f64) {
        self.max = if max.is_finite() { max.max(0.0) } else { 0.0 };
        let target = self.spring.target();
        if target > self.max {
            if self.spring.is_at_rest() {
                self.spring.snap_to(self.max);
            } else {
                self.spring.set_target(self.max);
            }
        }
        if self.spring.position() > self.max {
            self.spring.snap_to(self.max);
        }
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Animate toward `destination`.
    pub fn scroll_to(&mut self, destination: f64) {
        let destination = self.clamp(destination);
        trace!(from = self.spring.position(), to = destination, "smooth scroll");
        self.spring.set_target(destination);
    }

    /// Move by `delta` rows immediately, cancelling any animation.
    pub fn scroll_by(&mut self, delta: f64) {
        let base = self.spring.position();
        self.jump_to(base + delta);
    }

    /// Jump to `offset` immediately, cancelling any animation.
    pub fn jump_to(&mut self, offset: f64) {
        let offset = self.clamp(offset);
        self.spring.snap_to(offset);
    }

    pub fn tick(&mut self, dt: Duration) {
        self.spring.advance(dt);
    }

    /// Current offset in rows, clamped to `[0, max]`.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.clamp(self.spring.position())
    }

    /// Current offset rounded to the nearest whole row.
    #[must_use]
    pub fn row(&self) -> usize {
        self.offset().round() as usize
    }

    /// Where the scroll will come to rest.
    #[must_use]
    pub fn destination(&self) -> f64 {
        self.spring.target()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.spring.is_at_rest()
    }

    fn clamp(&self, value: f64) -> f64 {
        if value.is_finite() { value.clamp(0.0, self.max) } else { 0.0 }
    }
}
