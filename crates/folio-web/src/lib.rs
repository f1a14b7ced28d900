#![forbid(unsafe_code)]

//! `folio-web` runs folio's scroll-spy navigation inside a browser page.
//!
//! Design goals:
//! - **Host-driven**: JS owns the DOM and the real `IntersectionObserver`.
//!   It drains observe/unobserve commands, pushes intersection entries, and
//!   reports nav geometry.
//! - **Deterministic time**: the host advances the marker spring with an
//!   explicit `dt` per animation frame.
//! - **JSON at the boundary**: every structured value crosses as JSON, so
//!   the same [`ScrollSpyHost`] is exercised by native tests.

mod host;
mod observer;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use host::{HostError, ScrollSpyHost};
pub use observer::{HostObserver, ObserverCommand};

#[cfg(target_arch = "wasm32")]
pub use wasm::ScrollSpy;
