#![forbid(unsafe_code)]

//! Row-major cell grid.

use crate::cell::{Cell, Style};
use folio_core::geometry::Rect;
use unicode_width::UnicodeWidthChar;

/// A `width × height` grid of [`Cell`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; width as usize * height as usize],
        }
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    #[must_use]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Write one cell. Out-of-bounds writes are dropped.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Apply `style` to every cell in `area` (clipped), keeping glyphs.
    pub fn set_style(&mut self, area: Rect, style: Style) {
        let Some(area) = area.intersection(&self.bounds()) else {
            return;
        };
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if let Some(i) = self.index(x, y) {
                    self.cells[i].style = self.cells[i].style.patch(style);
                }
            }
        }
    }

    /// Draw `text` starting at `(x, y)`, stopping at `max_x` (exclusive) or
    /// the buffer edge. Control characters are skipped. A wide glyph that
    /// would straddle the limit is not drawn.
    ///
    /// Returns the column after the last drawn glyph.
    pub fn set_string(&mut self, x: u16, y: u16, text: &str, style: Style, max_x: u16) -> u16 {
        if y >= self.height {
            return x;
        }
        let limit = max_x.min(self.width);
        let mut col = x;
        for ch in text.chars() {
            let w = match ch.width() {
                Some(w) if w > 0 => w as u16,
                _ => continue,
            };
            if col.saturating_add(w) > limit {
                break;
            }
            self.set(col, y, Cell::new(ch, style));
            if w == 2 {
                self.set(col + 1, y, Cell::CONTINUATION);
            }
            col += w;
        }
        col
    }

    /// The glyphs of row `y` as a string, trailing blanks trimmed.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = y as usize * self.width as usize;
        let row: String = self.cells[start..start + self.width as usize]
            .iter()
            .filter(|c| !c.is_continuation())
            .map(|c| c.ch)
            .collect();
        row.trim_end().to_string()
    }

    /// Every row via [`row_text`](Self::row_text).
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        (0..self.height).map(|y| self.row_text(y)).collect()
    }

    /// Find the first `(x, y)` where `needle` starts, scanning row text.
    #[must_use]
    pub fn find(&self, needle: &str) -> Option<(u16, u16)> {
        for y in 0..self.height {
            let row = self.row_text(y);
            if let Some(byte_idx) = row.find(needle) {
                let col: usize = row[..byte_idx]
                    .chars()
                    .map(|c| c.width().unwrap_or(0))
                    .sum();
                return Some((col as u16, y));
            }
        }
        None
    }
}
