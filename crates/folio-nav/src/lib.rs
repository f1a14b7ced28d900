#![forbid(unsafe_code)]

//! Scroll-synchronized navigation.
//!
//! The pieces, in data-flow order:
//!
//! 1. [`section::SectionList`]: the ordered section descriptors. Navigation
//!    order and content order are the same list.
//! 2. [`visibility`]: the focal band, intersection entries, and the
//!    [`VisibilityObserver`](visibility::VisibilityObserver) capability that
//!    platforms implement.
//! 3. [`tracker::SectionTracker`]: turns qualifying entries into writes of
//!    the active index through an [`ActiveSetter`](tracker::ActiveSetter).
//! 4. [`marker::MarkerPositioner`]: maps the active index plus live nav
//!    geometry to a spring-animated marker offset.
//! 5. [`scroll::SmoothScroll`]: spring-driven scrolling for click-to-section
//!    navigation. It is independent of the tracker.

pub mod marker;
pub mod scroll;
pub mod section;
pub mod tracker;
pub mod visibility;

pub use marker::{EntryGeometry, MarkerPositioner, NavGeometry, marker_offset};
pub use scroll::SmoothScroll;
pub use section::{SectionDescriptor, SectionList, SectionListError};
pub use tracker::{ActiveSetter, SectionTracker};
pub use visibility::{
    FocalBand, IntersectionEntry, RegionLayout, Span, UnsupportedObserver, ViewportObserver,
    VisibilityConfig, VisibilityObserver,
};
