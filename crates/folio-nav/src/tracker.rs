#![forbid(unsafe_code)]

//! Section tracker: qualifying visibility entries become the active index.
//!
//! # Semantics
//!
//! - Every qualifying entry overwrites the active index. Entries are
//!   applied in delivery order; the last one wins.
//! - Entries naming an unknown id are ignored.
//! - Before [`attach`](SectionTracker::attach) and after
//!   [`detach`](SectionTracker::detach), entries are ignored.
//! - If the observer is unsupported, `attach` leaves the tracker detached
//!   and the active index untouched.

use std::fmt;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::section::SectionList;
use crate::visibility::{IntersectionEntry, VisibilityConfig, VisibilityObserver};

/// Write capability for the active index.
#[derive(Clone)]
pub struct ActiveSetter(Rc<dyn Fn(usize)>);

impl ActiveSetter {
    pub fn new(f: impl Fn(usize) + 'static) -> Self {
        Self(Rc::new(f))
    }

    #[inline]
    pub fn set(&self, index: usize) {
        (self.0)(index);
    }
}

impl fmt::Debug for ActiveSetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveSetter").finish_non_exhaustive()
    }
}

pub struct SectionTracker {
    sections: Rc<SectionList>,
    observer: Box<dyn VisibilityObserver>,
    setter: ActiveSetter,
    threshold: f64,
    attached: bool,
}

impl fmt::Debug for SectionTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionTracker")
            .field("sections", &self.sections.len())
            .field("threshold", &self.threshold)
            .field("attached", &self.attached)
            .finish_non_exhaustive()
    }
}

impl SectionTracker {
    pub fn new(
        sections: Rc<SectionList>,
        observer: Box<dyn VisibilityObserver>,
        setter: ActiveSetter,
        config: &VisibilityConfig,
    ) -> Self {
        Self {
            sections,
            observer,
            setter,
            threshold: config.threshold,
            attached: false,
        }
    }

    /// Start observing every section. Returns whether observation is live.
    ///
    /// Idempotent. With an unsupported observer this logs once per call and
    /// returns `false`.
    pub fn attach(&mut self) -> bool {
        if self.attached {
            return true;
        }
        if !self.observer.is_supported() {
            warn!("visibility observation unsupported; scroll-spy disabled");
            return false;
        }
        for id in self.sections.ids() {
            self.observer.observe(id);
        }
        self.attached = true;
        info!(sections = self.sections.len(), "section tracker attached");
        true
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Apply a batch of entries. Returns the index written last, if any.
    pub fn handle_entries(&self, entries: &[IntersectionEntry]) -> Option<usize> {
        if !self.attached {
            return None;
        }
        let mut applied = None;
        for entry in entries {
            if !entry.qualifies(self.threshold) {
                continue;
            }
            match self.sections.index_of(&entry.target) {
                Some(index) => {
                    debug!(target_id = %entry.target, index, ratio = entry.ratio, "section in focus");
                    self.setter.set(index);
                    applied = Some(index);
                }
                None => {
                    debug!(target_id = %entry.target, "ignoring entry for unknown section");
                }
            }
        }
        applied
    }

    /// Stop observing every section. Idempotent; also runs on drop.
    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        for id in self.sections.ids() {
            self.observer.unobserve(id);
        }
        self.observer.disconnect();
        self.attached = false;
        info!("section tracker detached");
    }

    #[must_use]
    pub fn sections(&self) -> &SectionList {
        &self.sections
    }
}

impl Drop for SectionTracker {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visibility::{UnsupportedObserver, ViewportObserver};
    use std::cell::Cell;

    fn sections() -> Rc<SectionList> {
        Rc::new(
            SectionList::from_pairs([
                ("about", "About"),
                ("experience", "Experience"),
                ("contact", "Contact"),
            ])
            .unwrap(),
        )
    }

    fn recording_setter() -> (ActiveSetter, Rc<Cell<usize>>, Rc<Cell<u32>>) {
        let active = Rc::new(Cell::new(0));
        let writes = Rc::new(Cell::new(0));
        let (a, w) = (Rc::clone(&active), Rc::clone(&writes));
        let setter = ActiveSetter::new(move |i| {
            a.set(i);
            w.set(w.get() + 1);
        });
        (setter, active, writes)
    }

    fn hit(id: &str) -> IntersectionEntry {
        IntersectionEntry::new(id, true, 0.5)
    }

    #[test]
    fn last_qualifying_entry_wins() {
        let (setter, active, _) = recording_setter();
        let mut tracker = SectionTracker::new(
            sections(),
            Box::new(ViewportObserver::default()),
            setter,
            &VisibilityConfig::default(),
        );
        assert!(tracker.attach());
        let applied = tracker.handle_entries(&[hit("contact"), hit("experience")]);
        assert_eq!(applied, Some(1));
        assert_eq!(active.get(), 1);
    }

    #[test]
    fn non_qualifying_and_unknown_entries_are_ignored() {
        let (setter, active, writes) = recording_setter();
        let mut tracker = SectionTracker::new(
            sections(),
            Box::new(ViewportObserver::default()),
            setter,
            &VisibilityConfig::default(),
        );
        tracker.attach();
        let applied = tracker.handle_entries(&[
            IntersectionEntry::new("contact", true, 0.05),
            IntersectionEntry::new("contact", false, 0.0),
            hit("blog"),
        ]);
        assert_eq!(applied, None);
        assert_eq!(active.get(), 0);
        assert_eq!(writes.get(), 0);
    }

    #[test]
    fn repeated_entries_always_overwrite() {
        let (setter, _, writes) = recording_setter();
        let mut tracker = SectionTracker::new(
            sections(),
            Box::new(ViewportObserver::default()),
            setter,
            &VisibilityConfig::default(),
        );
        tracker.attach();
        tracker.handle_entries(&[hit("about")]);
        tracker.handle_entries(&[hit("about")]);
        assert_eq!(writes.get(), 2);
    }

    #[test]
    fn unsupported_observer_keeps_tracker_detached() {
        let (setter, active, _) = recording_setter();
        let mut tracker = SectionTracker::new(
            sections(),
            Box::new(UnsupportedObserver),
            setter,
            &VisibilityConfig::default(),
        );
        assert!(!tracker.attach());
        assert!(!tracker.is_attached());
        assert_eq!(tracker.handle_entries(&[hit("contact")]), None);
        assert_eq!(active.get(), 0);
    }

    #[test]
    fn detach_and_drop_release_every_observation() {
        let observer = ViewportObserver::default();
        let (setter, _, _) = recording_setter();
        let mut tracker = SectionTracker::new(
            sections(),
            Box::new(observer.clone()),
            setter.clone(),
            &VisibilityConfig::default(),
        );
        tracker.attach();
        tracker.attach();
        assert_eq!(observer.observed_count(), 3);
        tracker.detach();
        assert_eq!(observer.observed_count(), 0);
        assert_eq!(tracker.handle_entries(&[hit("contact")]), None);

        let mut again = SectionTracker::new(
            sections(),
            Box::new(observer.clone()),
            setter,
            &VisibilityConfig::default(),
        );
        again.attach();
        assert!(observer.is_observing("experience"));
        drop(again);
        assert_eq!(observer.observed_count(), 0);
    }
}
