//! The interactive shell driven headlessly with virtual time.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use folio::avatar::Avatar;
use folio::content::{PORTFOLIO, sections};
use folio::links::LinkOpener;
use folio::{Shell, ShellOptions};
use folio_core::event::{Event, KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use folio_runtime::ProgramSimulator;
use pretty_assertions::assert_eq;

const FRAME: Duration = Duration::from_millis(16);
const MAX_FRAMES: usize = 600;
const CONTACT: usize = 5;

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<String>>>);

impl LinkOpener for Recorder {
    fn open(&self, url: &str) -> io::Result<()> {
        self.0.borrow_mut().push(url.to_string());
        Ok(())
    }
}

fn shell_with(options: ShellOptions, opener: Recorder) -> Shell {
    Shell::new(
        &PORTFOLIO,
        sections().unwrap(),
        Avatar::placeholder(),
        Box::new(opener),
        options,
    )
}

fn sim() -> ProgramSimulator<Shell> {
    ProgramSimulator::new(shell_with(ShellOptions::default(), Recorder::default()), 80, 24)
}

fn key(sim: &mut ProgramSimulator<Shell>, code: KeyCode) {
    sim.send(Event::Key(KeyEvent::new(code)));
}

fn click_text(sim: &mut ProgramSimulator<Shell>, needle: &str) {
    let (x, y) = sim
        .frame()
        .buffer
        .find(needle)
        .unwrap_or_else(|| panic!("{needle:?} not on screen"));
    sim.send(Event::Mouse(MouseEvent::click(x, y)));
}

fn nav_top(index: usize) -> f64 {
    1.0 + 2.0 * index as f64
}

#[test]
fn starts_on_first_section_with_marker_beside_it() {
    let sim = sim();
    let shell = sim.model();
    assert_eq!(shell.active(), 0);
    assert_eq!(shell.observed_sections(), 6);
    assert_eq!(shell.marker_offset(), nav_top(0));
    assert!(!sim.has_pending_tick());

    let lines = sim.screen_lines();
    let nav_y = usize::from(shell.nav_row(0).unwrap());
    assert!(lines[nav_y].starts_with('▸'), "{:?}", lines[nav_y]);
    assert!(lines[nav_y].contains("About"));
    assert!(lines.iter().any(|l| l.contains("ABOUT")));
    assert!(lines[0].contains(PORTFOLIO.profile.name));
}

#[test]
fn line_and_page_keys_scroll_immediately() {
    let mut sim = sim();
    key(&mut sim, KeyCode::Char('j'));
    assert_eq!(sim.model().scroll_offset(), 1.0);
    key(&mut sim, KeyCode::Down);
    assert_eq!(sim.model().scroll_offset(), 2.0);
    key(&mut sim, KeyCode::Char('k'));
    assert_eq!(sim.model().scroll_offset(), 1.0);

    key(&mut sim, KeyCode::Home);
    key(&mut sim, KeyCode::PageDown);
    let page = f64::from(sim.model().viewport_rows() - 1);
    assert_eq!(sim.model().scroll_offset(), page);

    key(&mut sim, KeyCode::Up);
    key(&mut sim, KeyCode::Home);
    assert_eq!(sim.model().scroll_offset(), 0.0);
    key(&mut sim, KeyCode::Up);
    assert_eq!(sim.model().scroll_offset(), 0.0);
}

#[test]
fn wheel_scrolls_three_rows() {
    let mut sim = sim();
    sim.send(Event::Mouse(MouseEvent::new(MouseEventKind::ScrollDown, 40, 12)));
    assert_eq!(sim.model().scroll_offset(), 3.0);
    sim.send(Event::Mouse(MouseEvent::new(MouseEventKind::ScrollUp, 40, 12)));
    assert_eq!(sim.model().scroll_offset(), 0.0);
}

#[test]
fn digit_key_smooth_scrolls_and_active_follows() {
    let mut sim = sim();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let _sub = sim
        .model()
        .active_state()
        .subscribe(move |&index| sink.borrow_mut().push(index));

    key(&mut sim, KeyCode::Char('6'));
    let target = sim.model().document().section_top(CONTACT);
    assert_eq!(sim.model().scroll_destination(), target);
    assert!(sim.has_pending_tick());

    sim.settle(FRAME, MAX_FRAMES);
    let shell = sim.model();
    assert!(!shell.is_animating());
    assert_eq!(shell.scroll_offset(), target);
    assert_eq!(shell.active(), CONTACT);
    assert_eq!(shell.marker_offset(), nav_top(CONTACT));

    let seen = seen.borrow();
    assert_eq!(seen.last(), Some(&CONTACT));
    assert!(seen.windows(2).all(|w| w[0] < w[1]), "{seen:?}");
}

#[test]
fn clicking_contact_waits_for_the_band() {
    let mut sim = sim();
    click_text(&mut sim, "[c] contact");
    let target = sim.model().document().section_top(CONTACT);
    assert_eq!(sim.model().scroll_destination(), target);
    assert_eq!(sim.model().active(), 0);

    sim.advance(FRAME);
    assert!(sim.model().active() < CONTACT);

    sim.settle(FRAME, MAX_FRAMES);
    assert_eq!(sim.model().active(), CONTACT);
}

#[test]
fn clicking_a_nav_entry_scrolls_to_its_section() {
    let mut sim = sim();
    let y = sim.model().nav_row(2).unwrap();
    sim.send(Event::Mouse(MouseEvent::click(4, y)));
    let target = sim.model().document().section_top(2);
    assert_eq!(sim.model().scroll_destination(), target);

    sim.settle(FRAME, MAX_FRAMES);
    assert_eq!(sim.model().active(), 2);
    assert_eq!(sim.model().marker_offset(), nav_top(2));
    let lines = sim.screen_lines();
    let nav_y = usize::from(sim.model().nav_row(2).unwrap());
    assert!(lines[nav_y].starts_with('▸'), "{:?}", lines[nav_y]);
}

#[test]
fn tab_steps_relative_to_active() {
    let mut sim = sim();
    key(&mut sim, KeyCode::Tab);
    assert_eq!(sim.model().scroll_destination(), sim.model().document().section_top(1));
    sim.settle(FRAME, MAX_FRAMES);
    assert_eq!(sim.model().active(), 1);

    key(&mut sim, KeyCode::BackTab);
    assert_eq!(sim.model().scroll_destination(), 0.0);
    sim.settle(FRAME, MAX_FRAMES);
    assert_eq!(sim.model().active(), 0);
}

#[test]
fn links_open_through_the_opener() {
    let opener = Recorder::default();
    let mut sim = ProgramSimulator::new(shell_with(ShellOptions::default(), opener.clone()), 80, 24);

    key(&mut sim, KeyCode::Char('e'));
    key(&mut sim, KeyCode::Char('l'));
    key(&mut sim, KeyCode::Char('6'));
    sim.settle(FRAME, MAX_FRAMES);
    click_text(&mut sim, PORTFOLIO.contact.email);

    let email = format!("mailto:{}", PORTFOLIO.contact.email);
    assert_eq!(
        *opener.0.borrow(),
        [email.clone(), PORTFOLIO.contact.profile_url.to_string(), email]
    );
}

#[test]
fn without_scroll_spy_only_scrolling_works() {
    let options = ShellOptions {
        scroll_spy: false,
        ..ShellOptions::default()
    };
    let mut sim = ProgramSimulator::new(shell_with(options, Recorder::default()), 80, 24);
    assert_eq!(sim.model().observed_sections(), 0);

    key(&mut sim, KeyCode::Char('6'));
    sim.settle(FRAME, MAX_FRAMES);
    let shell = sim.model();
    assert_eq!(shell.scroll_offset(), shell.document().section_top(CONTACT));
    assert_eq!(shell.active(), 0);
    assert_eq!(shell.marker_offset(), nav_top(0));
}

#[test]
fn resize_reflows_and_realigns_the_marker() {
    let mut sim = sim();
    let wide_rows = sim.model().document().len();
    key(&mut sim, KeyCode::Char('4'));
    sim.settle(FRAME, MAX_FRAMES);
    assert_eq!(sim.model().active(), 3);

    sim.resize(50, 30);
    sim.settle(FRAME, MAX_FRAMES);
    let shell = sim.model();
    assert_eq!(shell.document().width(), 31);
    assert!(shell.document().len() > wide_rows);
    assert_eq!(shell.marker_offset(), nav_top(shell.active()));
    assert_eq!(sim.screen_lines().len(), 30);
}

#[test]
fn resize_during_smooth_scroll_still_lands_on_section() {
    let mut sim = ProgramSimulator::new(shell_with(ShellOptions::default(), Recorder::default()), 120, 24);
    key(&mut sim, KeyCode::Char('5'));
    sim.advance(FRAME);
    sim.advance(FRAME);
    assert!(sim.model().is_animating());

    sim.resize(40, 24);
    sim.settle(FRAME, MAX_FRAMES);
    let shell = sim.model();
    assert_eq!(shell.scroll_offset(), shell.document().section_top(4));
    assert_eq!(shell.active(), 4);
    assert_eq!(shell.marker_offset(), nav_top(4));
}

fn scroll_limit(sim: &ProgramSimulator<Shell>) -> f64 {
    let shell = sim.model();
    let doc = shell.document();
    let fill = doc.len() as f64 - f64::from(shell.viewport_rows());
    doc.section_top(CONTACT).max(fill)
}

#[test]
fn end_key_keeps_last_section_in_view() {
    let mut sim = sim();
    key(&mut sim, KeyCode::End);
    assert_eq!(sim.model().scroll_offset(), scroll_limit(&sim));
    assert_eq!(sim.model().active(), CONTACT);

    let lines = sim.screen_lines();
    assert!(lines.iter().any(|l| l.contains("CONTACT")), "{lines:#?}");
    assert!(lines.iter().any(|l| l.contains(PORTFOLIO.contact.email)));

    key(&mut sim, KeyCode::Down);
    assert_eq!(sim.model().scroll_offset(), scroll_limit(&sim));
}

#[test]
fn initial_section_depends_on_viewport_height() {
    let short = sim();
    assert_eq!(short.model().active(), 0);

    let tall = ProgramSimulator::new(shell_with(ShellOptions::default(), Recorder::default()), 80, 60);
    let shell = tall.model();
    let rows = f64::from(shell.viewport_rows());
    let about = shell.document().section_span(0).unwrap();
    // About ends above the focal band, so the next section is the one read.
    assert!(about.bottom() <= rows * 0.3, "{about:?} in {rows} rows");
    assert_eq!(shell.active(), 1);
    assert_eq!(shell.marker_offset(), nav_top(1));
}

#[test]
fn quit_and_shutdown_release_observation() {
    let mut sim = sim();
    key(&mut sim, KeyCode::Char('q'));
    assert!(sim.is_quit());
    let shell = sim.shutdown();
    assert_eq!(shell.observed_sections(), 0);
}

#[test]
fn ctrl_c_quits() {
    use folio_core::event::Modifiers;
    let mut sim = sim();
    sim.send(Event::Key(
        KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL),
    ));
    assert!(sim.is_quit());
}

mod logs {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing_subscriber::layer::{Context, SubscriberExt};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<(tracing::Level, String)>>>);

    struct Message(String);

    impl Visit for Message {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{value:?}");
            }
        }
    }

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for Capture {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let mut message = Message(String::new());
            event.record(&mut message);
            self.0
                .lock()
                .unwrap()
                .push((*event.metadata().level(), message.0));
        }
    }

    fn captured<R>(f: impl FnOnce() -> R) -> (R, Vec<(tracing::Level, String)>) {
        let capture = Capture::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        let result = tracing::subscriber::with_default(subscriber, f);
        let events = capture.0.lock().unwrap().clone();
        (result, events)
    }

    #[test]
    fn active_changes_are_logged() {
        let (_, events) = captured(|| {
            let mut sim = sim();
            key(&mut sim, KeyCode::Char('6'));
            sim.settle(FRAME, MAX_FRAMES);
        });
        let changes = events
            .iter()
            .filter(|(level, msg)| *level == tracing::Level::INFO && msg == "active section changed")
            .count();
        assert!(changes >= 1, "{events:?}");
    }

    #[test]
    fn unsupported_observer_warns_on_mount() {
        let options = ShellOptions {
            scroll_spy: false,
            ..ShellOptions::default()
        };
        let (_, events) = captured(|| {
            ProgramSimulator::new(shell_with(options, Recorder::default()), 80, 24);
        });
        assert!(
            events.iter().any(|(level, _)| *level == tracing::Level::WARN),
            "{events:?}"
        );
    }

    #[test]
    fn missing_avatar_warns_and_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let (avatar, events) = captured(|| Avatar::load(&dir.path().join("missing.txt")));
        assert!(avatar.is_placeholder());
        assert!(events.iter().any(|(level, msg)| {
            *level == tracing::Level::WARN && msg.contains("placeholder")
        }));
    }

    #[test]
    fn shipped_avatar_parses() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets/avatar.txt");
        let avatar = Avatar::load(&path);
        assert!(!avatar.is_placeholder());
        assert_eq!(avatar.marker(), "◆");
    }
}
