#![forbid(unsafe_code)]

//! Canonical input events.
//!
//! Everything the runtime hands to a model arrives as an [`Event`]. Backends
//! translate their native events into this shape so models stay
//! backend-agnostic and tests can build events by hand.
//!
//! Mouse coordinates are 0-indexed cells.

use bitflags::bitflags;
use std::time::Duration;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Terminal was resized.
    Resize { width: u16, height: u16 },
    /// A tick scheduled via `Cmd::Tick` fired. Carries the elapsed time
    /// since the tick was requested.
    Tick(Duration),
    /// Focus gained (`true`) or lost (`false`).
    Focus(bool),
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Key press with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Press or repeat; releases are filtered out by most handlers.
    #[must_use]
    pub const fn is_press(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }
}

/// Key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    BackTab,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    /// Function key `F(n)`.
    F(u8),
    /// Anything the backend reported that folio does not distinguish.
    Other,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Default when the terminal does not report kinds.
    #[default]
    Press,
    Repeat,
    Release,
}

bitflags! {
    /// Modifier keys.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const NONE  = 0b0000;
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
        const SUPER = 0b1000;
    }
}

/// A mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    /// Column (0-indexed).
    pub x: u16,
    /// Row (0-indexed).
    pub y: u16,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: u16, y: u16) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Left-button press at `(x, y)`.
    #[must_use]
    pub const fn click(x: u16, y: u16) -> Self {
        Self::new(MouseEventKind::Down(MouseButton::Left), x, y)
    }

    #[must_use]
    pub const fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }
}

/// The type of mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Down(MouseButton),
    Up(MouseButton),
    Drag(MouseButton),
    Moved,
    ScrollUp,
    ScrollDown,
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
mod crossterm_compat {
    use super::*;
    use crossterm::event as ct;

    impl Event {
        /// Translate a Crossterm event. Returns `None` for events folio has
        /// no use for (paste, unknown media keys).
        #[must_use]
        pub fn from_crossterm(event: ct::Event) -> Option<Self> {
            match event {
                ct::Event::Key(key) => Some(Event::Key(KeyEvent {
                    code: key_code(key.code),
                    modifiers: modifiers(key.modifiers),
                    kind: match key.kind {
                        ct::KeyEventKind::Press => KeyEventKind::Press,
                        ct::KeyEventKind::Repeat => KeyEventKind::Repeat,
                        ct::KeyEventKind::Release => KeyEventKind::Release,
                    },
                })),
                ct::Event::Mouse(mouse) => {
                    let kind = match mouse.kind {
                        ct::MouseEventKind::Down(b) => MouseEventKind::Down(button(b)),
                        ct::MouseEventKind::Up(b) => MouseEventKind::Up(button(b)),
                        ct::MouseEventKind::Drag(b) => MouseEventKind::Drag(button(b)),
                        ct::MouseEventKind::Moved => MouseEventKind::Moved,
                        ct::MouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
                        ct::MouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
                        _ => return None,
                    };
                    Some(Event::Mouse(MouseEvent {
                        kind,
                        x: mouse.column,
                        y: mouse.row,
                        modifiers: modifiers(mouse.modifiers),
                    }))
                }
                ct::Event::Resize(width, height) => Some(Event::Resize { width, height }),
                ct::Event::FocusGained => Some(Event::Focus(true)),
                ct::Event::FocusLost => Some(Event::Focus(false)),
                _ => None,
            }
        }
    }

    fn key_code(code: ct::KeyCode) -> KeyCode {
        match code {
            ct::KeyCode::Char(c) => KeyCode::Char(c),
            ct::KeyCode::Enter => KeyCode::Enter,
            ct::KeyCode::Esc => KeyCode::Escape,
            ct::KeyCode::Backspace => KeyCode::Backspace,
            ct::KeyCode::Tab => KeyCode::Tab,
            ct::KeyCode::BackTab => KeyCode::BackTab,
            ct::KeyCode::Home => KeyCode::Home,
            ct::KeyCode::End => KeyCode::End,
            ct::KeyCode::PageUp => KeyCode::PageUp,
            ct::KeyCode::PageDown => KeyCode::PageDown,
            ct::KeyCode::Up => KeyCode::Up,
            ct::KeyCode::Down => KeyCode::Down,
            ct::KeyCode::Left => KeyCode::Left,
            ct::KeyCode::Right => KeyCode::Right,
            ct::KeyCode::F(n) => KeyCode::F(n),
            _ => KeyCode::Other,
        }
    }

    fn modifiers(m: ct::KeyModifiers) -> Modifiers {
        let mut out = Modifiers::NONE;
        if m.contains(ct::KeyModifiers::SHIFT) {
            out |= Modifiers::SHIFT;
        }
        if m.contains(ct::KeyModifiers::ALT) {
            out |= Modifiers::ALT;
        }
        if m.contains(ct::KeyModifiers::CONTROL) {
            out |= Modifiers::CTRL;
        }
        if m.contains(ct::KeyModifiers::SUPER) {
            out |= Modifiers::SUPER;
        }
        out
    }

    fn button(b: ct::MouseButton) -> MouseButton {
        match b {
            ct::MouseButton::Left => MouseButton::Left,
            ct::MouseButton::Right => MouseButton::Right,
            ct::MouseButton::Middle => MouseButton::Middle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_defaults_to_press() {
        let key = KeyEvent::new(KeyCode::Char('q'));
        assert_eq!(key.kind, KeyEventKind::Press);
        assert!(key.is_char('q'));
        assert!(!key.ctrl());
        assert!(key.is_press());
    }

    #[test]
    fn release_is_not_press() {
        let key = KeyEvent::new(KeyCode::Enter).with_kind(KeyEventKind::Release);
        assert!(!key.is_press());
    }

    #[test]
    fn ctrl_modifier_detected() {
        let key = KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL);
        assert!(key.ctrl());
    }

    #[test]
    fn click_is_left_down() {
        let ev = MouseEvent::click(4, 9);
        assert_eq!(ev.kind, MouseEventKind::Down(MouseButton::Left));
        assert_eq!(ev.position(), (4, 9));
    }
}
