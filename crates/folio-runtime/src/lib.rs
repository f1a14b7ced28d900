#![forbid(unsafe_code)]

//! folio runtime
//!
//! Ties input, model, and rendering together.
//!
//! - [`Model`] / [`Cmd`]: Elm-style state transitions with side effects as
//!   data.
//! - [`Program`]: the terminal event loop (feature `crossterm`).
//! - [`ProgramSimulator`]: the same loop, headless, with virtual time, for
//!   tests.
//! - [`reactive::Observable`]: shared single-writer state with change
//!   notification.

pub mod program;
pub mod reactive;
pub mod simulator;
#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
pub mod terminal;

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
pub use program::Program;
pub use program::{Cmd, Model, ProgramConfig};
pub use reactive::{Observable, Subscription};
pub use simulator::ProgramSimulator;
