#![forbid(unsafe_code)]

//! Frame = Buffer + hit grid for one render pass.
//!
//! Views register clickable rectangles with a [`HitId`] and opaque
//! [`HitData`]. The model resolves mouse clicks against the hit grid of the
//! last rendered frame, so what you click is exactly what was drawn.

use crate::buffer::Buffer;
use folio_core::geometry::Rect;

/// Identifier for a clickable region kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HitId(pub u32);

impl HitId {
    #[inline]
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Opaque payload attached to a hit region (an index, usually).
pub type HitData = u64;

/// Cell-granular map from screen position to hit region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitGrid {
    width: u16,
    height: u16,
    cells: Vec<Option<(HitId, HitData)>>,
}

impl HitGrid {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Mark every cell of `rect` (clipped). Later registrations win.
    pub fn register(&mut self, rect: Rect, id: HitId, data: HitData) {
        let Some(rect) = rect.intersection(&Rect::from_size(self.width, self.height)) else {
            return;
        };
        for y in rect.y..rect.bottom() {
            let row = y as usize * self.width as usize;
            for x in rect.x..rect.right() {
                self.cells[row + x as usize] = Some((id, data));
            }
        }
    }

    #[must_use]
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitData)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y as usize * self.width as usize + x as usize]
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

/// Render target handed to `Model::view`.
#[derive(Debug, Clone)]
pub struct Frame {
    pub buffer: Buffer,
    hit_grid: HitGrid,
}

impl Frame {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            hit_grid: HitGrid::new(width, height),
        }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u16 {
        self.buffer.height()
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.buffer.bounds()
    }

    /// Clear cells and hit regions for a fresh pass.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.hit_grid.clear();
    }

    pub fn register_hit(&mut self, rect: Rect, id: HitId, data: HitData) {
        self.hit_grid.register(rect, id, data);
    }

    #[must_use]
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitData)> {
        self.hit_grid.hit_test(x, y)
    }

    #[must_use]
    pub fn hit_grid(&self) -> &HitGrid {
        &self.hit_grid
    }
}
