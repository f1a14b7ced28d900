#![forbid(unsafe_code)]

//! Navigation marker positioning.
//!
//! The marker sits beside the active nav entry, vertically centered on it.
//! Its target offset is a pure function of the active index and the live
//! geometry of the nav list; [`MarkerPositioner`] springs the rendered
//! offset toward that target.

use std::time::Duration;

use folio_core::animation::spring::{Spring, presets};
use tracing::debug;

/// Position of one nav entry relative to the top of the nav list.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntryGeometry {
    pub top: f64,
    pub height: f64,
}

impl EntryGeometry {
    #[must_use]
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }
}

/// Read access to the current nav-entry geometry.
///
/// `None` means the entry is not mounted (or the index is out of range).
pub trait NavGeometry {
    fn entry(&self, index: usize) -> Option<EntryGeometry>;
}

impl NavGeometry for [EntryGeometry] {
    fn entry(&self, index: usize) -> Option<EntryGeometry> {
        self.get(index).copied()
    }
}

impl NavGeometry for Vec<EntryGeometry> {
    fn entry(&self, index: usize) -> Option<EntryGeometry> {
        self.get(index).copied()
    }
}

/// Target offset for a marker of `marker_height` beside `entry`.
///
/// `top + height/2 - marker_height/2`, floored at zero. Missing or
/// non-finite geometry yields zero.
#[must_use]
pub fn marker_offset(entry: Option<EntryGeometry>, marker_height: f64) -> f64 {
    match entry {
        Some(g) => {
            let offset = g.top + g.height / 2.0 - marker_height / 2.0;
            if offset.is_finite() { offset.max(0.0) } else { 0.0 }
        }
        None => 0.0,
    }
}

/// Springs the marker toward the active entry.
///
/// Call [`sync`](Self::sync) every frame with the current active index;
/// it only recomputes when the index changed or the layout was
/// invalidated, so repeated calls are idempotent.
#[derive(Debug, Clone)]
pub struct MarkerPositioner {
    marker_height: f64,
    spring: Spring,
    synced: Option<usize>,
    placed: bool,
}

impl MarkerPositioner {
    #[must_use]
    pub fn new(marker_height: f64) -> Self {
        Self {
            marker_height: if marker_height.is_finite() {
                marker_height.max(0.0)
            } else {
                0.0
            },
            spring: presets::marker(0.0),
            synced: None,
            placed: false,
        }
    }

    #[must_use]
    pub fn marker_height(&self) -> f64 {
        self.marker_height
    }

    /// Bring the target in line with `active`.
    ///
    /// Returns the new target when a recomputation happened. The first
    /// placement against known geometry snaps; later ones retarget the
    /// spring and keep its velocity.
    pub fn sync<G: NavGeometry + ?Sized>(&mut self, active: usize, nav: &G) -> Option<f64> {
        if self.synced == Some(active) {
            return None;
        }
        let entry = nav.entry(active);
        let target = marker_offset(entry, self.marker_height);
        if self.placed {
            self.spring.set_target(target);
        } else {
            // Stays unplaced until real geometry arrives, so that first
            // real placement snaps too.
            self.spring.snap_to(target);
            self.placed = entry.is_some();
        }
        self.synced = Some(active);
        debug!(active, target, "marker retargeted");
        Some(target)
    }

    /// Force the next [`sync`](Self::sync) to re-read geometry.
    pub fn invalidate(&mut self) {
        self.synced = None;
    }

    pub fn tick(&mut self, dt: Duration) {
        self.spring.advance(dt);
    }

    /// Rendered offset, never negative.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.spring.position().max(0.0)
    }

    #[must_use]
    pub fn target(&self) -> f64 {
        self.spring.target()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.spring.is_at_rest()
    }
}
