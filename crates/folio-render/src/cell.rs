#![forbid(unsafe_code)]

//! Cells and styles.

use bitflags::bitflags;

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b)
    }
}

bitflags! {
    /// Text attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        const BOLD      = 0b0000_0001;
        const DIM       = 0b0000_0010;
        const ITALIC    = 0b0000_0100;
        const UNDERLINE = 0b0000_1000;
        const REVERSE   = 0b0001_0000;
    }
}

/// Foreground, background, and attributes. `None` colors mean "terminal
/// default".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub flags: StyleFlags,
}

impl Style {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            flags: StyleFlags::empty(),
        }
    }

    #[must_use]
    pub const fn fg(mut self, color: Rgb) -> Self {
        self.fg = Some(color);
        self
    }

    #[must_use]
    pub const fn bg(mut self, color: Rgb) -> Self {
        self.bg = Some(color);
        self
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.flags |= StyleFlags::BOLD;
        self
    }

    #[must_use]
    pub fn dim(mut self) -> Self {
        self.flags |= StyleFlags::DIM;
        self
    }

    #[must_use]
    pub fn italic(mut self) -> Self {
        self.flags |= StyleFlags::ITALIC;
        self
    }

    #[must_use]
    pub fn underline(mut self) -> Self {
        self.flags |= StyleFlags::UNDERLINE;
        self
    }

    /// Overlay `other` on top of `self`: set colors win, flags combine.
    #[must_use]
    pub fn patch(self, other: Style) -> Style {
        Style {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            flags: self.flags | other.flags,
        }
    }
}

/// One terminal cell.
///
/// Wide glyphs occupy their own cell plus a trailing [`Cell::CONTINUATION`]
/// cell that the presenter skips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        ch: ' ',
        style: Style::new(),
    };

    /// Placeholder for the second column of a wide glyph.
    pub const CONTINUATION: Cell = Cell {
        ch: '\0',
        style: Style::new(),
    };

    #[must_use]
    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }

    #[must_use]
    pub const fn is_continuation(&self) -> bool {
        self.ch == '\0'
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}
