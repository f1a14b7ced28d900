#![forbid(unsafe_code)]

//! Headless program runner with virtual time.
//!
//! [`ProgramSimulator`] drives a [`Model`] exactly like the terminal loop
//! does (init, update, command execution, view) but without a terminal.
//! Time only moves when the test calls [`advance`](ProgramSimulator::advance),
//! so animation-driven scenarios are fully deterministic.

use std::time::Duration;

use folio_core::event::Event;
use folio_render::frame::Frame;

use crate::program::{Cmd, Effects, Model, execute};

/// Runs a model headlessly.
pub struct ProgramSimulator<M: Model> {
    model: M,
    frame: Frame,
    /// Interval of the pending tick and virtual time accumulated toward it.
    tick: Option<(Duration, Duration)>,
    logs: Vec<String>,
    quit: bool,
    frames_rendered: u64,
    shut_down: bool,
}

impl<M: Model> ProgramSimulator<M> {
    /// Create a simulator with a `width × height` screen, run `init`,
    /// report the screen size, and render the first frame.
    pub fn new(model: M, width: u16, height: u16) -> Self {
        let mut sim = Self {
            model,
            frame: Frame::new(width, height),
            tick: None,
            logs: Vec::new(),
            quit: false,
            frames_rendered: 0,
            shut_down: false,
        };
        let init = sim.model.init();
        sim.apply(init);
        if !sim.quit {
            let sized = sim.model.update(M::Message::from(Event::Resize { width, height }));
            sim.apply(sized);
        }
        sim.render();
        sim
    }

    /// Deliver an input event and re-render.
    pub fn send(&mut self, event: Event) {
        if self.quit {
            return;
        }
        if let Event::Resize { width, height } = event {
            self.frame = Frame::new(width, height);
        }
        let cmd = self.model.update(M::Message::from(event));
        self.apply(cmd);
        self.render();
    }

    /// Resize the virtual screen.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.send(Event::Resize { width, height });
    }

    /// Move virtual time forward by `dt`, firing the pending tick if it
    /// comes due. At most one tick fires per call, mirroring one
    /// display frame. Returns whether a tick fired.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Some((interval, waited)) = self.tick else {
            return false;
        };
        let waited = waited + dt;
        if waited < interval {
            self.tick = Some((interval, waited));
            return false;
        }
        self.tick = None;
        self.send(Event::Tick(waited));
        true
    }

    /// Advance frame by frame until no tick is pending or `max_frames`
    /// elapse. Returns the number of frames that fired a tick.
    pub fn settle(&mut self, frame: Duration, max_frames: usize) -> usize {
        let mut fired = 0;
        for _ in 0..max_frames {
            if self.tick.is_none() || self.quit {
                break;
            }
            if self.advance(frame) {
                fired += 1;
            }
        }
        fired
    }

    /// Whether a tick is waiting to fire.
    #[must_use]
    pub fn has_pending_tick(&self) -> bool {
        self.tick.is_some()
    }

    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// The most recently rendered frame.
    #[must_use]
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Rendered rows of the last frame.
    #[must_use]
    pub fn screen_lines(&self) -> Vec<String> {
        self.frame.buffer.lines()
    }

    #[must_use]
    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    #[must_use]
    pub fn is_quit(&self) -> bool {
        self.quit
    }

    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Run the model's shutdown hook (once) and return the model.
    pub fn shutdown(mut self) -> M {
        self.run_shutdown();
        self.model
    }

    fn run_shutdown(&mut self) {
        if !self.shut_down {
            self.shut_down = true;
            self.model.on_shutdown();
        }
    }

    fn apply(&mut self, cmd: Cmd<M::Message>) {
        let mut effects = Effects::default();
        execute(&mut self.model, cmd, &mut effects);
        self.logs.extend(effects.logs);
        if let Some(after) = effects.tick {
            self.tick = Some(match self.tick {
                Some((interval, waited)) if interval.saturating_sub(waited) <= after => {
                    (interval, waited)
                }
                _ => (after, Duration::ZERO),
            });
        }
        if effects.quit {
            self.quit = true;
            self.run_shutdown();
        }
    }

    fn render(&mut self) {
        self.frame.clear();
        self.model.view(&mut self.frame);
        self.frames_rendered += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::event::{KeyCode, KeyEvent};

    /// Counts ticks until it reaches a limit, re-arming itself each time.
    struct Ticker {
        ticks: u32,
        limit: u32,
        shutdown_calls: u32,
    }

    impl Model for Ticker {
        type Message = Event;

        fn init(&mut self) -> Cmd<Event> {
            Cmd::tick(Duration::from_millis(16))
        }

        fn update(&mut self, msg: Event) -> Cmd<Event> {
            match msg {
                Event::Tick(_) => {
                    self.ticks += 1;
                    if self.ticks < self.limit {
                        Cmd::tick(Duration::from_millis(16))
                    } else {
                        Cmd::log("done")
                    }
                }
                Event::Key(k) if k.is_char('q') => Cmd::quit(),
                _ => Cmd::none(),
            }
        }

        fn view(&self, frame: &mut Frame) {
            let text = format!("ticks={}", self.ticks);
            let width = frame.width();
            frame.buffer.set_string(0, 0, &text, Default::default(), width);
        }

        fn on_shutdown(&mut self) {
            self.shutdown_calls += 1;
        }
    }

    fn ticker(limit: u32) -> Ticker {
        Ticker {
            ticks: 0,
            limit,
            shutdown_calls: 0,
        }
    }

    #[test]
    fn ticks_fire_only_when_due() {
        let mut sim = ProgramSimulator::new(ticker(10), 20, 2);
        assert!(!sim.advance(Duration::from_millis(10)));
        assert!(sim.advance(Duration::from_millis(10)));
        assert_eq!(sim.model().ticks, 1);
        assert_eq!(sim.screen_lines()[0], "ticks=1");
    }

    #[test]
    fn settle_runs_until_idle() {
        let mut sim = ProgramSimulator::new(ticker(5), 20, 2);
        let fired = sim.settle(Duration::from_millis(16), 100);
        assert_eq!(fired, 5);
        assert!(!sim.has_pending_tick());
        assert_eq!(sim.logs(), &["done".to_string()]);
    }

    #[test]
    fn quit_runs_shutdown_once() {
        let mut sim = ProgramSimulator::new(ticker(5), 20, 2);
        sim.send(Event::Key(KeyEvent::new(KeyCode::Char('q'))));
        assert!(sim.is_quit());
        let model = sim.shutdown();
        assert_eq!(model.shutdown_calls, 1);
    }

    #[test]
    fn resize_reallocates_frame() {
        let mut sim = ProgramSimulator::new(ticker(1), 20, 2);
        sim.resize(30, 4);
        assert_eq!(sim.frame().width(), 30);
        assert_eq!(sim.frame().height(), 4);
    }
}
