#![forbid(unsafe_code)]

//! Terminal session lifecycle (Crossterm backend).
//!
//! [`TerminalSession`] is an RAII guard: creating it enters raw mode and
//! the requested features, dropping it restores the terminal, and a panic
//! hook restores it too so a crash never leaves the shell in raw mode.

use std::io::{self, Write};
use std::sync::Once;
use std::time::Duration;

use crossterm::{cursor, event, execute, terminal};
use folio_core::event::Event;
use tracing::{info, warn};

/// Which terminal modes to enable.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    pub alternate_screen: bool,
    pub mouse_capture: bool,
}

/// Active terminal session. Restores the terminal on drop.
#[derive(Debug)]
pub struct TerminalSession {
    options: SessionOptions,
}

impl TerminalSession {
    /// Enter raw mode and enable the requested features.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        install_panic_hook();

        terminal::enable_raw_mode()?;
        // Constructed before the remaining toggles so Drop undoes raw mode
        // if any of them fail.
        let session = Self { options };

        let mut stdout = io::stdout();
        if options.alternate_screen {
            execute!(
                stdout,
                terminal::EnterAlternateScreen,
                terminal::Clear(terminal::ClearType::All),
                cursor::MoveTo(0, 0)
            )?;
        }
        execute!(stdout, cursor::Hide)?;
        if options.mouse_capture {
            execute!(stdout, event::EnableMouseCapture)?;
        }
        info!(
            alternate_screen = options.alternate_screen,
            mouse = options.mouse_capture,
            "terminal session started"
        );
        Ok(session)
    }

    /// Current size in (columns, rows). Falls back to 80×24 when the
    /// terminal reports something degenerate.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        let (w, h) = terminal::size()?;
        if w > 1 && h > 1 {
            Ok((w, h))
        } else {
            warn!(w, h, "degenerate terminal size, using 80x24");
            Ok((80, 24))
        }
    }

    /// Wait up to `timeout` for one input event.
    pub fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
        if event::poll(timeout)? {
            Ok(Event::from_crossterm(event::read()?))
        } else {
            Ok(None)
        }
    }

    fn cleanup(&self) {
        restore(self.options);
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
        info!("terminal session restored");
    }
}

fn restore(options: SessionOptions) {
    let mut stdout = io::stdout();
    if options.mouse_capture {
        let _ = execute!(stdout, event::DisableMouseCapture);
    }
    let _ = execute!(stdout, cursor::Show);
    if options.alternate_screen {
        let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    }
    let _ = terminal::disable_raw_mode();
    let _ = stdout.flush();
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore(SessionOptions {
                alternate_screen: true,
                mouse_capture: true,
            });
            previous(info);
        }));
    });
}
