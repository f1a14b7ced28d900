#![forbid(unsafe_code)]

//! Geometric primitives.

/// A rectangle in terminal cells, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Overlap with another rectangle, or `None` when they are disjoint.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Split off `rows` from the top. Returns `(top, rest)`.
    ///
    /// `rows` is clamped to the rectangle's height.
    pub fn split_top(&self, rows: u16) -> (Rect, Rect) {
        let rows = rows.min(self.height);
        (
            Rect::new(self.x, self.y, self.width, rows),
            Rect::new(self.x, self.y + rows, self.width, self.height - rows),
        )
    }

    /// Split off `cols` from the left. Returns `(left, rest)`.
    pub fn split_left(&self, cols: u16) -> (Rect, Rect) {
        let cols = cols.min(self.width);
        (
            Rect::new(self.x, self.y, cols, self.height),
            Rect::new(self.x + cols, self.y, self.width - cols, self.height),
        )
    }

    /// Shrink by `margin` cells on every side.
    pub fn shrink(&self, margin: u16) -> Rect {
        let double = margin.saturating_mul(2);
        Rect::new(
            self.x.saturating_add(margin),
            self.y.saturating_add(margin),
            self.width.saturating_sub(double),
            self.height.saturating_sub(double),
        )
    }

    /// The single row at offset `dy` from the top, if inside.
    pub fn row(&self, dy: u16) -> Option<Rect> {
        (dy < self.height).then(|| Rect::new(self.x, self.y + dy, self.width, 1))
    }
}
