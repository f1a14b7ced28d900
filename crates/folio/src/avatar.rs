//! The single text-art asset.
//!
//! Line 1 is the mascot sprite drawn as the nav marker. The remaining
//! lines are the portrait in the header. A missing or unreadable asset is
//! replaced by a broken-image placeholder.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

const PLACEHOLDER_MARKER: &str = "▸";
const PLACEHOLDER_PORTRAIT: [&str; 3] = ["┌─╳─┐", "│ ? │", "└───┘"];

/// Tallest portrait drawn in the header.
pub const MAX_PORTRAIT_ROWS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar {
    marker: String,
    portrait: Vec<String>,
    placeholder: bool,
}

impl Avatar {
    /// Read the asset at `path`, falling back to the placeholder.
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(avatar) => {
                debug!(path = %path.display(), rows = avatar.portrait.len(), "avatar loaded");
                avatar
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "avatar asset unavailable; using placeholder");
                Self::placeholder()
            }
        }
    }

    fn read(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "avatar asset has no marker line"))
    }

    /// Split asset text into marker and portrait. `None` when the marker
    /// line is blank.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let mut lines = text.lines();
        let marker = lines.next()?.trim();
        if marker.is_empty() {
            return None;
        }
        let mut portrait: Vec<String> = lines
            .take(MAX_PORTRAIT_ROWS)
            .map(|l| l.trim_end().to_string())
            .collect();
        while portrait.last().is_some_and(|l| l.is_empty()) {
            portrait.pop();
        }
        Some(Self {
            marker: marker.to_string(),
            portrait,
            placeholder: false,
        })
    }

    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            marker: PLACEHOLDER_MARKER.to_string(),
            portrait: PLACEHOLDER_PORTRAIT.iter().map(|s| s.to_string()).collect(),
            placeholder: true,
        }
    }

    #[must_use]
    pub fn marker(&self) -> &str {
        &self.marker
    }

    #[must_use]
    pub fn portrait(&self) -> &[String] {
        &self.portrait
    }

    /// Display width of the widest portrait row.
    #[must_use]
    pub fn portrait_width(&self) -> u16 {
        self.portrait
            .iter()
            .map(|l| unicode_width::UnicodeWidthStr::width(l.as_str()))
            .max()
            .unwrap_or(0)
            .min(u16::MAX as usize) as u16
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }
}
