#![forbid(unsafe_code)]

//! Damped spring for interruptible motion.
//!
//! The spring keeps three pieces of state: `position`, `target`, and
//! `velocity`. Each frame applies
//!
//!   a = -stiffness × (position - target) - damping × velocity
//!
//! with semi-implicit Euler integration. Changing the target while the
//! spring is moving only reassigns `target`. Velocity is carried over, so
//! a burst of retargets bends one continuous motion toward the newest
//! target instead of queueing animations.
//!
//! # Invariants
//!
//! 1. `position()` is never NaN for finite inputs.
//! 2. A settled spring stays settled until `set_target` moves the target
//!    by more than the rest threshold, or `snap_to` is called.
//! 3. Stiffness is at least [`MIN_STIFFNESS`]; damping is non-negative.
//!
//! # Failure Modes
//!
//! - Large `dt`: subdivided into steps of at most 4ms. Frames longer than
//!   [`MAX_FRAME`] are clamped so a stalled event loop cannot fling the value.

use std::time::Duration;

use super::Animation;

const MAX_STEP_SECS: f64 = 0.004;

/// Longest frame the spring will integrate in one call.
pub const MAX_FRAME: Duration = Duration::from_millis(100);

/// Minimum stiffness. Below this the spring effectively never converges.
pub const MIN_STIFFNESS: f64 = 0.1;

const DEFAULT_REST_THRESHOLD: f64 = 0.01;
const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.05;

/// A damped harmonic oscillator tracking a movable target.
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    stiffness: f64,
    damping: f64,
    rest_threshold: f64,
    velocity_threshold: f64,
    at_rest: bool,
}

impl Spring {
    /// A spring resting at `position`.
    ///
    /// Defaults: stiffness 300, damping 30. That is slightly underdamped,
    /// so there is a small overshoot before it settles.
    #[must_use]
    pub fn at(position: f64) -> Self {
        Self {
            position,
            velocity: 0.0,
            target: position,
            stiffness: 300.0,
            damping: 30.0,
            rest_threshold: DEFAULT_REST_THRESHOLD,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            at_rest: true,
        }
    }

    #[must_use]
    pub fn with_stiffness(mut self, k: f64) -> Self {
        self.stiffness = if k.is_finite() { k.max(MIN_STIFFNESS) } else { MIN_STIFFNESS };
        self
    }

    #[must_use]
    pub fn with_damping(mut self, c: f64) -> Self {
        self.damping = if c.is_finite() { c.max(0.0) } else { 0.0 };
        self
    }

    #[must_use]
    pub fn with_rest_threshold(mut self, threshold: f64) -> Self {
        self.rest_threshold = threshold.abs();
        self
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[inline]
    #[must_use]
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    #[inline]
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Redirect the spring. Position and velocity are untouched.
    pub fn set_target(&mut self, target: f64) {
        if !target.is_finite() {
            return;
        }
        if (self.target - target).abs() > self.rest_threshold || !self.at_rest {
            self.target = target;
            self.at_rest = false;
        }
    }

    /// Jump to `position` and rest there.
    pub fn snap_to(&mut self, position: f64) {
        if !position.is_finite() {
            return;
        }
        self.position = position;
        self.target = position;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let acceleration = -self.stiffness * displacement - self.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Integrate `dt` of motion.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }
        let mut remaining = dt.min(MAX_FRAME).as_secs_f64();
        while remaining > 0.0 {
            let step = remaining.min(MAX_STEP_SECS);
            self.step(step);
            remaining -= step;
        }

        if (self.position - self.target).abs() < self.rest_threshold
            && self.velocity.abs() < self.velocity_threshold
        {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    fn value(&self) -> f64 {
        self.position
    }
}

/// Spring configurations used across folio.
pub mod presets {
    use super::Spring;

    /// Marker hop: lively, a little overshoot, settles in well under a second.
    #[must_use]
    pub fn marker(position: f64) -> Spring {
        Spring::at(position).with_stiffness(300.0).with_damping(24.0)
    }

    /// Smooth scroll: slightly overdamped so content never bounces past
    /// the destination row.
    #[must_use]
    pub fn scroll(position: f64) -> Spring {
        let k: f64 = 120.0;
        Spring::at(position)
            .with_stiffness(k)
            .with_damping(2.2 * k.sqrt())
            .with_rest_threshold(0.05)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn run(spring: &mut Spring, frames: usize) {
        for _ in 0..frames {
            spring.tick(FRAME);
        }
    }

    #[test]
    fn new_spring_is_at_rest() {
        let spring = Spring::at(4.0);
        assert!(spring.is_at_rest());
        assert_eq!(spring.position(), 4.0);
        assert_eq!(spring.target(), 4.0);
    }

    #[test]
    fn settles_on_target() {
        let mut spring = Spring::at(0.0);
        spring.set_target(12.0);
        run(&mut spring, 200);
        assert!(spring.is_complete());
        assert_eq!(spring.position(), 12.0);
        assert_eq!(spring.velocity(), 0.0);
    }

    #[test]
    fn underdamped_marker_overshoots_a_little() {
        let mut spring = presets::marker(0.0);
        spring.set_target(10.0);
        let mut peak = 0.0_f64;
        for _ in 0..200 {
            spring.tick(FRAME);
            peak = peak.max(spring.position());
        }
        assert!(peak > 10.0, "peak {peak}");
        assert!(peak < 12.0, "peak {peak}");
    }

    #[test]
    fn scroll_preset_does_not_overshoot() {
        let mut spring = presets::scroll(0.0);
        spring.set_target(40.0);
        for _ in 0..300 {
            spring.tick(FRAME);
            assert!(spring.position() <= 40.0 + 1e-6, "pos {}", spring.position());
        }
        assert!(spring.is_complete());
    }

    #[test]
    fn retarget_keeps_velocity() {
        let mut spring = Spring::at(0.0);
        spring.set_target(10.0);
        run(&mut spring, 5);
        let v = spring.velocity();
        let p = spring.position();
        spring.set_target(-10.0);
        assert_eq!(spring.velocity(), v);
        assert_eq!(spring.position(), p);
        assert!(!spring.is_at_rest());
    }

    #[test]
    fn snap_to_rests_immediately() {
        let mut spring = Spring::at(0.0);
        spring.set_target(20.0);
        run(&mut spring, 3);
        spring.snap_to(7.0);
        assert!(spring.is_at_rest());
        assert_eq!(spring.position(), 7.0);
        spring.tick(FRAME);
        assert_eq!(spring.position(), 7.0);
    }

    #[test]
    fn non_finite_target_ignored() {
        let mut spring = Spring::at(1.0);
        spring.set_target(f64::NAN);
        assert_eq!(spring.target(), 1.0);
        assert!(spring.is_at_rest());
    }

    #[test]
    fn huge_frame_is_clamped() {
        let mut a = Spring::at(0.0);
        let mut b = Spring::at(0.0);
        a.set_target(5.0);
        b.set_target(5.0);
        a.tick(Duration::from_secs(30));
        b.tick(MAX_FRAME);
        assert_eq!(a.position(), b.position());
    }

    #[test]
    fn stiffness_and_damping_clamped() {
        let s = Spring::at(0.0).with_stiffness(-5.0).with_damping(-1.0);
        assert_eq!(s.stiffness(), MIN_STIFFNESS);
        assert_eq!(s.damping(), 0.0);
    }

    #[test]
    fn small_retarget_on_rest_spring_is_ignored() {
        let mut spring = Spring::at(3.0);
        spring.set_target(3.001);
        assert!(spring.is_at_rest());
    }
}
