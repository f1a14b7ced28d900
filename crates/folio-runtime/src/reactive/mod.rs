#![forbid(unsafe_code)]

//! Reactive state for single-threaded UIs.

pub mod observable;

pub use observable::{Observable, Subscription};
