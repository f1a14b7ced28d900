#![forbid(unsafe_code)]

//! Focal band geometry and the visibility-observer capability.
//!
//! A region "qualifies" when it intersects the focal band and its visible
//! fraction is at least [`MIN_VISIBLE_FRACTION`]. The band is the viewport
//! minus its top 30% and bottom 60%, so it sits a little above center.
//!
//! Platforms plug in through [`VisibilityObserver`]. The terminal uses
//! [`ViewportObserver`], which measures laid-out regions against the band
//! whenever the scroll offset or layout changes. The browser bridge queues
//! commands for a real `IntersectionObserver` instead. Both produce the
//! same [`IntersectionEntry`] stream.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::trace;

/// Fraction of the viewport height cut from the top of the focal band.
pub const FOCAL_BAND_TOP: f64 = 0.30;
/// Fraction of the viewport height cut from the bottom of the focal band.
pub const FOCAL_BAND_BOTTOM: f64 = 0.60;
/// Minimum visible fraction for a region to count as in the band.
pub const MIN_VISIBLE_FRACTION: f64 = 0.10;

/// A vertical interval in document rows.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub top: f64,
    pub height: f64,
}

impl Span {
    #[must_use]
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Length of the shared interval, zero when disjoint.
    #[must_use]
    pub fn overlap(&self, other: &Span) -> f64 {
        (self.bottom().min(other.bottom()) - self.top.max(other.top)).max(0.0)
    }
}

/// Insets that carve the focal band out of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocalBand {
    pub top_inset: f64,
    pub bottom_inset: f64,
}

impl Default for FocalBand {
    fn default() -> Self {
        Self {
            top_inset: FOCAL_BAND_TOP,
            bottom_inset: FOCAL_BAND_BOTTOM,
        }
    }
}

impl FocalBand {
    /// The band inside `viewport`, in the same coordinates.
    #[must_use]
    pub fn within(&self, viewport: Span) -> Span {
        let h = viewport.height.max(0.0);
        Span {
            top: viewport.top + h * self.top_inset,
            height: (h * (1.0 - self.top_inset - self.bottom_inset)).max(0.0),
        }
    }
}

/// Fixed observation parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityConfig {
    pub band: FocalBand,
    pub threshold: f64,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            band: FocalBand::default(),
            threshold: MIN_VISIBLE_FRACTION,
        }
    }
}

/// Portion of `region` considered visible in `band`, in `[0, 1]`.
///
/// The overlap is measured against the smaller of the two heights, so a
/// section taller than the band reads as fully visible once it covers the
/// band.
#[must_use]
pub fn visible_fraction(region: Span, band: Span) -> f64 {
    let denom = region.height.min(band.height);
    if denom <= 0.0 || !denom.is_finite() {
        return 0.0;
    }
    (region.overlap(&band) / denom).clamp(0.0, 1.0)
}

/// One visibility notification for an observed target.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct IntersectionEntry {
    pub target: String,
    pub is_intersecting: bool,
    #[cfg_attr(feature = "serde", serde(alias = "intersectionRatio"))]
    pub ratio: f64,
}

impl IntersectionEntry {
    pub fn new(target: impl Into<String>, is_intersecting: bool, ratio: f64) -> Self {
        Self {
            target: target.into(),
            is_intersecting,
            ratio,
        }
    }

    /// Whether this entry should move the active section.
    #[must_use]
    pub fn qualifies(&self, threshold: f64) -> bool {
        self.is_intersecting && self.ratio >= threshold
    }
}

/// Source of visibility notifications for a set of targets.
pub trait VisibilityObserver {
    /// Whether the platform can observe visibility at all.
    fn is_supported(&self) -> bool {
        true
    }

    fn observe(&mut self, target: &str);

    fn unobserve(&mut self, target: &str);

    /// Stop observing everything.
    fn disconnect(&mut self);

    fn is_observing(&self, target: &str) -> bool;
}

/// Always-unsupported observer.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedObserver;

impl VisibilityObserver for UnsupportedObserver {
    fn is_supported(&self) -> bool {
        false
    }

    fn observe(&mut self, _target: &str) {}

    fn unobserve(&mut self, _target: &str) {}

    fn disconnect(&mut self) {}

    fn is_observing(&self, _target: &str) -> bool {
        false
    }
}

/// Laid-out regions, looked up by target id.
pub trait RegionLayout {
    fn region(&self, id: &str) -> Option<Span>;
}

impl<S: AsRef<str>> RegionLayout for [(S, Span)] {
    fn region(&self, id: &str) -> Option<Span> {
        self.iter()
            .find(|(name, _)| name.as_ref() == id)
            .map(|(_, span)| *span)
    }
}

impl<S: AsRef<str>> RegionLayout for Vec<(S, Span)> {
    fn region(&self, id: &str) -> Option<Span> {
        self.as_slice().region(id)
    }
}

impl RegionLayout for HashMap<String, Span> {
    fn region(&self, id: &str) -> Option<Span> {
        self.get(id).copied()
    }
}

#[derive(Debug, Default)]
struct ViewportState {
    observed: Vec<String>,
    /// Last reported qualifying state per target. Absent means the target
    /// has not produced its initial entry yet.
    reported: HashMap<String, bool>,
}

/// Terminal-side observer that measures regions against the focal band.
///
/// Clones share state: the tracker owns one handle for observe/unobserve,
/// the shell keeps another to call [`measure`](Self::measure) after every
/// scroll or layout change.
#[derive(Debug, Clone)]
pub struct ViewportObserver {
    config: VisibilityConfig,
    state: Rc<RefCell<ViewportState>>,
}

impl Default for ViewportObserver {
    fn default() -> Self {
        Self::new(VisibilityConfig::default())
    }
}

impl ViewportObserver {
    #[must_use]
    pub fn new(config: VisibilityConfig) -> Self {
        Self {
            config,
            state: Rc::new(RefCell::new(ViewportState::default())),
        }
    }

    #[must_use]
    pub fn config(&self) -> VisibilityConfig {
        self.config
    }

    #[must_use]
    pub fn observed_count(&self) -> usize {
        self.state.borrow().observed.len()
    }

    /// Measure every observed target against the band of `viewport`.
    ///
    /// Returns entries for targets whose qualifying state changed since the
    /// last call, plus the initial entry of each newly observed target,
    /// ordered by region top. Targets missing from `layout` are skipped.
    pub fn measure<L: RegionLayout + ?Sized>(
        &self,
        layout: &L,
        viewport: Span,
    ) -> Vec<IntersectionEntry> {
        let band = self.config.band.within(viewport);
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;

        let mut changed: Vec<(f64, IntersectionEntry)> = Vec::new();
        for id in &state.observed {
            let Some(region) = layout.region(id) else {
                continue;
            };
            let ratio = visible_fraction(region, band);
            let entry = IntersectionEntry::new(id.clone(), region.overlap(&band) > 0.0, ratio);
            let qualifies = entry.qualifies(self.config.threshold);
            if state.reported.insert(id.clone(), qualifies) != Some(qualifies) {
                changed.push((region.top, entry));
            }
        }
        changed.sort_by(|a, b| a.0.total_cmp(&b.0));

        if !changed.is_empty() {
            trace!(
                band_top = band.top,
                band_height = band.height,
                entries = changed.len(),
                "viewport measured"
            );
        }
        changed.into_iter().map(|(_, entry)| entry).collect()
    }
}

impl VisibilityObserver for ViewportObserver {
    fn observe(&mut self, target: &str) {
        let mut state = self.state.borrow_mut();
        if !state.observed.iter().any(|t| t == target) {
            state.observed.push(target.to_string());
        }
    }

    fn unobserve(&mut self, target: &str) {
        let mut state = self.state.borrow_mut();
        state.observed.retain(|t| t != target);
        state.reported.remove(target);
    }

    fn disconnect(&mut self) {
        let mut state = self.state.borrow_mut();
        state.observed.clear();
        state.reported.clear();
    }

    fn is_observing(&self, target: &str) -> bool {
        self.state.borrow().observed.iter().any(|t| t == target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Vec<(&'static str, Span)> {
        vec![
            ("a", Span::new(0.0, 40.0)),
            ("b", Span::new(40.0, 40.0)),
            ("c", Span::new(80.0, 40.0)),
        ]
    }

    fn observer_on(ids: &[&str]) -> ViewportObserver {
        let mut obs = ViewportObserver::default();
        for id in ids {
            obs.observe(id);
        }
        obs
    }

    #[test]
    fn band_is_thirty_to_forty_percent() {
        let band = FocalBand::default().within(Span::new(100.0, 50.0));
        assert!((band.top - 115.0).abs() < 1e-9);
        assert!((band.height - 5.0).abs() < 1e-9);
    }

    #[test]
    fn fraction_uses_smaller_height() {
        let band = Span::new(30.0, 10.0);
        assert_eq!(visible_fraction(Span::new(0.0, 100.0), band), 1.0);
        assert_eq!(visible_fraction(Span::new(39.0, 100.0), band), 0.1);
        assert_eq!(visible_fraction(Span::new(50.0, 10.0), band), 0.0);
        assert_eq!(visible_fraction(Span::new(0.0, 0.0), band), 0.0);
    }

    #[test]
    fn denominator_follows_the_shorter_of_region_and_band() {
        let band = Span::new(30.0, 10.0);
        // Tall region: band height is the denominator.
        assert_eq!(visible_fraction(Span::new(35.0, 100.0), band), 0.5);
        // Short region: its own height is the denominator.
        assert_eq!(visible_fraction(Span::new(32.0, 4.0), band), 1.0);
        assert_eq!(visible_fraction(Span::new(38.0, 4.0), band), 0.5);
        // Same overlap, different verdicts.
        let tall = visible_fraction(Span::new(39.0, 50.0), band);
        let short = visible_fraction(Span::new(39.0, 2.0), band);
        assert_eq!(tall, 0.1);
        assert_eq!(short, 0.5);
    }

    #[test]
    fn initial_measure_reports_every_target_in_order() {
        let obs = observer_on(&["c", "a", "b"]);
        let entries = obs.measure(&layout(), Span::new(0.0, 100.0));
        let targets: Vec<&str> = entries.iter().map(|e| e.target.as_str()).collect();
        assert_eq!(targets, ["a", "b", "c"]);
        // Band is 30..40, entirely inside "a".
        assert!(entries[0].qualifies(MIN_VISIBLE_FRACTION));
        assert!(!entries[1].qualifies(MIN_VISIBLE_FRACTION));
    }

    #[test]
    fn only_changes_are_reported() {
        let obs = observer_on(&["a", "b", "c"]);
        let _ = obs.measure(&layout(), Span::new(0.0, 100.0));
        assert!(obs.measure(&layout(), Span::new(0.5, 100.0)).is_empty());

        // Band 50..60: "a" leaves, "b" enters.
        let entries = obs.measure(&layout(), Span::new(20.0, 100.0));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].target, "a");
        assert!(!entries[0].is_intersecting);
        assert_eq!(entries[1].target, "b");
        assert!(entries[1].qualifies(MIN_VISIBLE_FRACTION));
    }

    #[test]
    fn sliver_below_threshold_does_not_qualify() {
        let obs = observer_on(&["b"]);
        // Band is 39.5..49.5 with height 10; "b" overlaps 9.5 rows.
        let entries = obs.measure(&layout(), Span::new(9.5, 100.0));
        assert!(entries[0].qualifies(MIN_VISIBLE_FRACTION));

        let obs = observer_on(&["b"]);
        // Band is 30.5..40.5; "b" overlaps half a row: 5%.
        let entries = obs.measure(&layout(), Span::new(0.5, 100.0));
        assert!(entries[0].is_intersecting);
        assert!(!entries[0].qualifies(MIN_VISIBLE_FRACTION));
    }

    #[test]
    fn clones_share_observation_state() {
        let mut obs = ViewportObserver::default();
        let view = obs.clone();
        obs.observe("a");
        obs.observe("a");
        assert_eq!(view.observed_count(), 1);
        assert!(view.is_observing("a"));
        obs.unobserve("a");
        assert!(!view.is_observing("a"));
        assert!(view.measure(&layout(), Span::new(0.0, 100.0)).is_empty());
    }

    #[test]
    fn disconnect_forgets_everything() {
        let mut obs = observer_on(&["a", "b"]);
        let _ = obs.measure(&layout(), Span::new(0.0, 100.0));
        obs.disconnect();
        assert_eq!(obs.observed_count(), 0);
        obs.observe("a");
        // Re-observing yields a fresh initial entry.
        assert_eq!(obs.measure(&layout(), Span::new(0.0, 100.0)).len(), 1);
    }

    #[test]
    fn unsupported_observer_observes_nothing() {
        let mut obs = UnsupportedObserver;
        assert!(!obs.is_supported());
        obs.observe("a");
        assert!(!obs.is_observing("a"));
    }
}
