#![forbid(unsafe_code)]

//! Render kernel for folio: cells, buffers, frames, and ANSI output.
//!
//! A model's `view` draws into a [`Frame`](frame::Frame). The runtime then
//! hands the frame's [`Buffer`](buffer::Buffer) to a
//! [`Presenter`](presenter::Presenter), which diffs it against the previous
//! frame and writes only changed cells.

pub mod buffer;
pub mod cell;
pub mod frame;
pub mod presenter;

pub use buffer::Buffer;
pub use cell::{Cell, Rgb, Style, StyleFlags};
pub use frame::{Frame, HitData, HitId};
