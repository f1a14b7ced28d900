//! End-to-end: an Observable owned by a model, written through a setter
//! capability, observed by the view.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use folio_core::event::{Event, KeyCode, KeyEvent};
use folio_render::frame::Frame;
use folio_runtime::{Cmd, Model, Observable, ProgramSimulator, Subscription};

struct Selector {
    selected: Observable<usize>,
    setter: Rc<dyn Fn(usize)>,
    history: Rc<RefCell<Vec<usize>>>,
    _watch: Subscription,
}

impl Selector {
    fn new() -> Self {
        let selected = Observable::new(0usize);
        let history = Rc::new(RefCell::new(Vec::new()));
        let h = Rc::clone(&history);
        let watch = selected.subscribe(move |v| h.borrow_mut().push(*v));
        let handle = selected.clone();
        Self {
            selected,
            setter: Rc::new(move |i| handle.set(i)),
            history,
            _watch: watch,
        }
    }
}

impl Model for Selector {
    type Message = Event;

    fn update(&mut self, msg: Event) -> Cmd<Event> {
        match msg {
            Event::Key(KeyEvent {
                code: KeyCode::Char(c),
                ..
            }) if c.is_ascii_digit() => {
                (self.setter)(c as usize - '0' as usize);
                Cmd::tick(Duration::from_millis(16))
            }
            _ => Cmd::none(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let width = frame.width();
        let text = format!("selected {}", self.selected.get());
        frame
            .buffer
            .set_string(0, 0, &text, Default::default(), width);
    }
}

fn key(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c)))
}

#[test]
fn setter_updates_view_and_notifies_once_per_change() {
    let mut sim = ProgramSimulator::new(Selector::new(), 20, 1);
    assert_eq!(sim.screen_lines(), vec!["selected 0"]);

    sim.send(key('3'));
    sim.send(key('3'));
    sim.send(key('5'));

    assert_eq!(sim.screen_lines(), vec!["selected 5"]);
    assert_eq!(*sim.model().history.borrow(), vec![3, 5]);
    assert_eq!(sim.model().selected.version(), 2);
}
