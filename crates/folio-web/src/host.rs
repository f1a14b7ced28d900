#![forbid(unsafe_code)]

//! Platform-independent scroll-spy host.
//!
//! No JS types here; the wasm exports and native tests both drive this.

use std::rc::Rc;
use std::time::Duration;

use folio_nav::{
    ActiveSetter, EntryGeometry, IntersectionEntry, MarkerPositioner, SectionDescriptor,
    SectionList, SectionListError, SectionTracker, VisibilityConfig,
};
use folio_runtime::Observable;
use thiserror::Error;
use tracing::{debug, info};

use crate::observer::{HostObserver, ObserverCommand};

/// Longest frame the host will integrate in one `tick`.
const MAX_TICK_MS: f64 = 1000.0;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("malformed JSON from host: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no section at index {index}")]
    UnknownIndex { index: usize },
    #[error(transparent)]
    Sections(#[from] SectionListError),
}

/// Scroll-spy state for one mounted page.
pub struct ScrollSpyHost {
    sections: Rc<SectionList>,
    observer: HostObserver,
    active: Observable<usize>,
    config: VisibilityConfig,
    tracker: Option<SectionTracker>,
    marker: MarkerPositioner,
    nav: Vec<EntryGeometry>,
}

impl ScrollSpyHost {
    /// Build from a JSON array of `{ "id", "label" }` descriptors.
    pub fn from_json(descriptors: &str, marker_height: f64) -> Result<Self, HostError> {
        let parsed: Vec<SectionDescriptor> = serde_json::from_str(descriptors)?;
        Ok(Self::new(SectionList::new(parsed)?, marker_height))
    }

    #[must_use]
    pub fn new(sections: SectionList, marker_height: f64) -> Self {
        Self {
            sections: Rc::new(sections),
            observer: HostObserver::new(),
            active: Observable::new(0),
            config: VisibilityConfig::default(),
            tracker: None,
            marker: MarkerPositioner::new(marker_height),
            nav: Vec::new(),
        }
    }

    /// Tell the host bridge whether `IntersectionObserver` exists.
    /// Only meaningful before [`mount`](Self::mount).
    pub fn set_supported(&mut self, supported: bool) {
        self.observer.set_supported(supported);
    }

    /// Attach the tracker to every section. Returns whether scroll-spy is
    /// live; when it is not, the active section stays at 0.
    pub fn mount(&mut self) -> bool {
        let tracker = self.tracker.get_or_insert_with(|| {
            let handle = self.active.clone();
            SectionTracker::new(
                Rc::clone(&self.sections),
                Box::new(self.observer.clone()),
                ActiveSetter::new(move |i| handle.set(i)),
                &self.config,
            )
        });
        let live = tracker.attach();
        self.marker.sync(self.active.get(), &self.nav);
        info!(live, sections = self.sections.len(), "scroll-spy mounted");
        live
    }

    /// Detach and drop the tracker. The resulting unobserve/disconnect
    /// commands are left in the queue for the host.
    pub fn unmount(&mut self) {
        if self.tracker.take().is_some() {
            info!("scroll-spy unmounted");
        }
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.tracker.is_some()
    }

    pub fn drain_commands(&mut self) -> Vec<ObserverCommand> {
        self.observer.drain()
    }

    pub fn drain_commands_json(&mut self) -> Result<String, HostError> {
        Ok(serde_json::to_string(&self.drain_commands())?)
    }

    /// Apply entries delivered by the host. Returns the active index.
    pub fn push_entries(&mut self, entries: &[IntersectionEntry]) -> usize {
        if let Some(tracker) = &self.tracker {
            tracker.handle_entries(entries);
        }
        let active = self.active.get();
        self.marker.sync(active, &self.nav);
        active
    }

    pub fn push_entries_json(&mut self, entries: &str) -> Result<usize, HostError> {
        let entries: Vec<IntersectionEntry> = serde_json::from_str(entries)?;
        Ok(self.push_entries(&entries))
    }

    /// Replace the nav-entry geometry. Counts as a layout invalidation.
    pub fn set_nav_geometry(&mut self, nav: Vec<EntryGeometry>) {
        self.nav = nav;
        self.marker.invalidate();
        self.marker.sync(self.active.get(), &self.nav);
    }

    pub fn set_nav_geometry_json(&mut self, nav: &str) -> Result<(), HostError> {
        let nav: Vec<EntryGeometry> = serde_json::from_str(nav)?;
        self.set_nav_geometry(nav);
        Ok(())
    }

    /// Advance the marker by `dt_ms` and return its offset.
    ///
    /// Non-finite or negative `dt_ms` advances nothing.
    pub fn tick(&mut self, dt_ms: f64) -> f64 {
        self.marker.sync(self.active.get(), &self.nav);
        if dt_ms.is_finite() && dt_ms > 0.0 {
            let dt = Duration::from_secs_f64(dt_ms.min(MAX_TICK_MS) / 1000.0);
            self.marker.tick(dt);
        } else if dt_ms != 0.0 {
            debug!(dt_ms, "ignoring invalid tick");
        }
        self.marker.offset()
    }

    #[must_use]
    pub fn active(&self) -> usize {
        self.active.get()
    }

    #[must_use]
    pub fn marker_offset(&self) -> f64 {
        self.marker.offset()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.marker.is_animating()
    }

    /// Element id the host should smooth-scroll to for nav entry `index`.
    pub fn scroll_target(&self, index: usize) -> Result<&str, HostError> {
        self.sections
            .get(index)
            .map(|s| s.id.as_str())
            .ok_or(HostError::UnknownIndex { index })
    }

    #[must_use]
    pub fn sections(&self) -> &SectionList {
        &self.sections
    }
}
