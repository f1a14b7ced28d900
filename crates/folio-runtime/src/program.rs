#![forbid(unsafe_code)]

//! Elm-style runtime.
//!
//! A [`Model`] owns application state. The runtime feeds it messages
//! (converted from [`Event`]s), executes the [`Cmd`]s it returns, and asks
//! it to draw into a [`Frame`] whenever something changed.
//!
//! # Example
//!
//! ```ignore
//! use folio_core::event::Event;
//! use folio_render::frame::Frame;
//! use folio_runtime::{Cmd, Model};
//!
//! struct Counter(u32);
//!
//! impl Model for Counter {
//!     type Message = Event;
//!
//!     fn update(&mut self, msg: Event) -> Cmd<Event> {
//!         match msg {
//!             Event::Key(k) if k.is_char('q') => Cmd::quit(),
//!             Event::Key(_) => { self.0 += 1; Cmd::none() }
//!             _ => Cmd::none(),
//!         }
//!     }
//!
//!     fn view(&self, frame: &mut Frame) {
//!         let text = format!("pressed {} keys", self.0);
//!         frame.buffer.set_string(0, 0, &text, Default::default(), frame.width());
//!     }
//! }
//! ```

use std::time::Duration;

use folio_core::event::Event;
use folio_render::frame::Frame;

/// Application state and behavior.
pub trait Model: Sized {
    /// Messages that drive `update`. Terminal events convert into it.
    type Message: From<Event> + 'static;

    /// Called once before the first frame. The runtime follows it with an
    /// `Event::Resize` carrying the real screen size.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// Core state transition.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Draw the current state.
    fn view(&self, frame: &mut Frame);

    /// Called once when the loop exits. Release observers, handles, and
    /// anything else that must not outlive the view.
    fn on_shutdown(&mut self) {}
}

/// Side effects requested by a model.
#[derive(Debug)]
pub enum Cmd<M> {
    None,
    Quit,
    /// Run every command.
    Batch(Vec<Cmd<M>>),
    /// Feed a message straight back into `update`.
    Msg(M),
    /// Deliver `Event::Tick` after the duration. While a tick is pending,
    /// further requests keep the earliest deadline.
    Tick(Duration),
    /// Route a line to the log. The terminal runtime sends it to `tracing`
    /// because the alternate screen has no scrollback.
    Log(String),
}

impl<M> Cmd<M> {
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    #[inline]
    pub fn tick(after: Duration) -> Self {
        Self::Tick(after)
    }

    #[inline]
    pub fn log(line: impl Into<String>) -> Self {
        Self::Log(line.into())
    }

    /// Collapse a list of commands, dropping `None`s.
    pub fn batch(cmds: Vec<Self>) -> Self {
        let mut cmds: Vec<Self> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.pop().unwrap_or(Self::None),
            _ => Self::Batch(cmds),
        }
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl<M> Default for Cmd<M> {
    fn default() -> Self {
        Self::None
    }
}

/// Runtime knobs.
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// Use the alternate screen.
    pub alternate_screen: bool,
    /// Capture mouse clicks and wheel.
    pub mouse: bool,
    /// Upper bound on how long to block waiting for input when no tick is due.
    pub poll_timeout: Duration,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            mouse: true,
            poll_timeout: Duration::from_millis(250),
        }
    }
}

/// Result of draining one command tree.
#[derive(Debug, Default)]
pub(crate) struct Effects {
    pub(crate) quit: bool,
    pub(crate) tick: Option<Duration>,
    pub(crate) logs: Vec<String>,
}

impl Effects {
    fn request_tick(&mut self, after: Duration) {
        self.tick = Some(self.tick.map_or(after, |t| t.min(after)));
    }
}

/// Execute `cmd` against `model`, recursing through `Msg` and `Batch`.
pub(crate) fn execute<M: Model>(model: &mut M, cmd: Cmd<M::Message>, effects: &mut Effects) {
    match cmd {
        Cmd::None => {}
        Cmd::Quit => effects.quit = true,
        Cmd::Batch(cmds) => {
            for cmd in cmds {
                execute(model, cmd, effects);
                if effects.quit {
                    return;
                }
            }
        }
        Cmd::Msg(msg) => {
            let next = model.update(msg);
            execute(model, next, effects);
        }
        Cmd::Tick(after) => effects.request_tick(after),
        Cmd::Log(line) => effects.logs.push(line),
    }
}

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
pub use terminal_loop::Program;

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
mod terminal_loop {
    use std::io::{self, Stdout};

    use folio_core::event::Event;
    use folio_render::frame::Frame;
    use folio_render::presenter::Presenter;
    use tracing::{debug, info};
    use web_time::Instant;

    use super::{Effects, Model, ProgramConfig, execute};
    use crate::terminal::{SessionOptions, TerminalSession};

    /// The terminal event loop.
    pub struct Program<M: Model> {
        model: M,
        config: ProgramConfig,
        session: TerminalSession,
        presenter: Presenter<Stdout>,
        frame: Frame,
        dirty: bool,
        /// When the pending tick was requested, and when it is due.
        tick: Option<(Instant, Instant)>,
    }

    impl<M: Model> Program<M> {
        /// Enter raw mode and prepare the screen.
        pub fn with_config(model: M, config: ProgramConfig) -> io::Result<Self> {
            let session = TerminalSession::new(SessionOptions {
                alternate_screen: config.alternate_screen,
                mouse_capture: config.mouse,
            })?;
            let (width, height) = session.size()?;
            Ok(Self {
                model,
                config,
                session,
                presenter: Presenter::new(io::stdout()),
                frame: Frame::new(width, height),
                dirty: true,
                tick: None,
            })
        }

        /// Run until the model quits. The model's `on_shutdown` runs before
        /// the terminal is restored.
        pub fn run(mut self) -> io::Result<M> {
            info!(
                width = self.frame.width(),
                height = self.frame.height(),
                "program started"
            );
            let init = self.model.init();
            let mut quit = self.apply(init);
            if !quit {
                let (width, height) = (self.frame.width(), self.frame.height());
                quit = self.dispatch(Event::Resize { width, height });
            }

            while !quit {
                if self.dirty {
                    self.render()?;
                }

                let now = Instant::now();
                let timeout = match self.tick {
                    Some((_, due)) => due.saturating_duration_since(now),
                    None => self.config.poll_timeout,
                };

                if let Some(event) = self.session.poll_event(timeout)? {
                    if let Event::Resize { width, height } = event {
                        self.frame = Frame::new(width, height);
                        self.presenter.invalidate();
                    }
                    quit = self.dispatch(event);
                    if quit {
                        break;
                    }
                }

                if let Some((requested, due)) = self.tick
                    && Instant::now() >= due
                {
                    self.tick = None;
                    quit = self.dispatch(Event::Tick(requested.elapsed()));
                }
            }

            self.model.on_shutdown();
            info!("program stopped");
            drop(self.session);
            Ok(self.model)
        }

        fn dispatch(&mut self, event: Event) -> bool {
            let cmd = self.model.update(M::Message::from(event));
            self.apply(cmd)
        }

        fn apply(&mut self, cmd: super::Cmd<M::Message>) -> bool {
            let mut effects = Effects::default();
            execute(&mut self.model, cmd, &mut effects);
            self.dirty = true;
            for line in effects.logs {
                info!(target: "folio::log", "{line}");
            }
            if let Some(after) = effects.tick {
                let now = Instant::now();
                let due = now + after;
                self.tick = Some(match self.tick {
                    Some((req, old_due)) if old_due <= due => (req, old_due),
                    _ => (now, due),
                });
            }
            effects.quit
        }

        fn render(&mut self) -> io::Result<()> {
            self.frame.clear();
            self.model.view(&mut self.frame);
            let stats = self.presenter.present(&self.frame.buffer)?;
            debug!(
                cells = stats.cells_written,
                full = stats.full_repaint,
                bytes = stats.bytes,
                "frame presented"
            );
            self.dirty = false;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Echo {
        seen: Vec<String>,
    }

    enum Msg {
        Event(Event),
        Note(&'static str),
    }

    impl From<Event> for Msg {
        fn from(e: Event) -> Self {
            Self::Event(e)
        }
    }

    impl Model for Echo {
        type Message = Msg;

        fn update(&mut self, msg: Msg) -> Cmd<Msg> {
            match msg {
                Msg::Note(n) => {
                    self.seen.push(n.to_string());
                    Cmd::none()
                }
                Msg::Event(_) => Cmd::batch(vec![
                    Cmd::msg(Msg::Note("a")),
                    Cmd::tick(Duration::from_millis(50)),
                    Cmd::tick(Duration::from_millis(10)),
                    Cmd::log("hello"),
                ]),
            }
        }

        fn view(&self, _frame: &mut Frame) {}
    }

    #[test]
    fn batch_of_one_unwraps() {
        let cmd: Cmd<()> = Cmd::batch(vec![Cmd::None, Cmd::Quit]);
        assert!(matches!(cmd, Cmd::Quit));
        let empty: Cmd<()> = Cmd::batch(vec![]);
        assert!(empty.is_none());
    }

    #[test]
    fn execute_runs_messages_and_keeps_earliest_tick() {
        let mut model = Echo::default();
        let mut effects = Effects::default();
        let cmd = model.update(Msg::Event(Event::Focus(true)));
        execute(&mut model, cmd, &mut effects);
        assert_eq!(model.seen, vec!["a"]);
        assert_eq!(effects.tick, Some(Duration::from_millis(10)));
        assert_eq!(effects.logs, vec!["hello"]);
        assert!(!effects.quit);
    }

    #[test]
    fn quit_stops_batch() {
        let mut model = Echo::default();
        let mut effects = Effects::default();
        execute(
            &mut model,
            Cmd::Batch(vec![Cmd::Quit, Cmd::msg(Msg::Note("late"))]),
            &mut effects,
        );
        assert!(effects.quit);
        assert!(model.seen.is_empty());
    }
}
