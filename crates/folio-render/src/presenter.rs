#![forbid(unsafe_code)]

//! Presenter: state-tracked ANSI emission.
//!
//! The presenter keeps the last buffer it wrote and, on each `present`,
//! emits only the cells that changed. Cursor moves are skipped for
//! contiguous runs and SGR sequences are only written when the style
//! actually changes. Each frame is wrapped in DEC 2026 synchronized output
//! and flushed once.

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::buffer::Buffer;
use crate::cell::{Style, StyleFlags};

const SYNC_BEGIN: &str = "\x1b[?2026h";
const SYNC_END: &str = "\x1b[?2026l";
const CLEAR_SCREEN: &str = "\x1b[2J";
const SGR_RESET: &str = "\x1b[0m";

/// Counters from the last `present` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PresentStats {
    pub cells_written: usize,
    pub full_repaint: bool,
    pub bytes: usize,
}

/// Writes buffers to a terminal-like sink.
pub struct Presenter<W: Write> {
    out: W,
    previous: Option<Buffer>,
    scratch: String,
    last_stats: PresentStats,
}

impl<W: Write> Presenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            previous: None,
            scratch: String::with_capacity(16 * 1024),
            last_stats: PresentStats::default(),
        }
    }

    /// Forget the previous frame so the next `present` repaints everything.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    #[must_use]
    pub fn last_stats(&self) -> PresentStats {
        self.last_stats
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Diff `next` against the previous frame and write the changes.
    pub fn present(&mut self, next: &Buffer) -> io::Result<PresentStats> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("present", width = next.width(), height = next.height())
            .entered();

        let full = self
            .previous
            .as_ref()
            .is_none_or(|prev| prev.width() != next.width() || prev.height() != next.height());

        self.scratch.clear();
        self.scratch.push_str(SYNC_BEGIN);
        if full {
            self.scratch.push_str(SGR_RESET);
            self.scratch.push_str(CLEAR_SCREEN);
        }

        let mut cursor: Option<(u16, u16)> = None;
        let mut pen: Option<Style> = None;
        let mut written = 0usize;

        for y in 0..next.height() {
            for x in 0..next.width() {
                let Some(cell) = next.get(x, y) else {
                    continue;
                };
                if cell.is_continuation() {
                    continue;
                }
                if !full
                    && let Some(prev) = &self.previous
                    && prev.get(x, y) == Some(cell)
                {
                    continue;
                }
                if cursor != Some((x, y)) {
                    // CUP is 1-indexed.
                    let _ = write!(self.scratch, "\x1b[{};{}H", y + 1, x + 1);
                }
                if pen != Some(cell.style) {
                    push_sgr(&mut self.scratch, cell.style);
                    pen = Some(cell.style);
                }
                self.scratch.push(cell.ch);
                written += 1;
                let advance = if next.get(x + 1, y).is_some_and(|c| c.is_continuation()) {
                    2
                } else {
                    1
                };
                cursor = Some((x + advance, y));
            }
        }

        self.scratch.push_str(SGR_RESET);
        self.scratch.push_str(SYNC_END);
        self.out.write_all(self.scratch.as_bytes())?;
        self.out.flush()?;

        self.previous = Some(next.clone());
        self.last_stats = PresentStats {
            cells_written: written,
            full_repaint: full,
            bytes: self.scratch.len(),
        };
        Ok(self.last_stats)
    }
}

fn push_sgr(out: &mut String, style: Style) {
    out.push_str("\x1b[0");
    let flags = [
        (StyleFlags::BOLD, ";1"),
        (StyleFlags::DIM, ";2"),
        (StyleFlags::ITALIC, ";3"),
        (StyleFlags::UNDERLINE, ";4"),
        (StyleFlags::REVERSE, ";7"),
    ];
    for (flag, code) in flags {
        if style.flags.contains(flag) {
            out.push_str(code);
        }
    }
    if let Some(c) = style.fg {
        let _ = write!(out, ";38;2;{};{};{}", c.0, c.1, c.2);
    }
    if let Some(c) = style.bg {
        let _ = write!(out, ";48;2;{};{};{}", c.0, c.1, c.2);
    }
    out.push('m');
}
