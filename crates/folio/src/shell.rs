//! The interactive portfolio.
//!
//! # Layout
//!
//! ```text
//! ┌ header: portrait │ name / title / shortcuts ──────────────┐
//! │ ◆ About        │ ABOUT                                    │
//! │                │ ─────                                    │
//! │   Experience   │ ...document rows, scrolled...            │
//! │   ...          │                                          │
//! ```
//!
//! # Data flow
//!
//! Every update ends in [`Shell::refresh`]: the visible document window
//! is measured against the focal band, qualifying entries go through the
//! tracker into the active-section [`Observable`], and the marker
//! positioner picks up any change. Clicks and shortcuts only move the
//! scroll; the active section follows once the target enters the band.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use folio_core::Rect;
use folio_core::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use folio_nav::{
    ActiveSetter, EntryGeometry, MarkerPositioner, SectionList, SectionTracker, SmoothScroll,
    Span, UnsupportedObserver, ViewportObserver, VisibilityConfig, VisibilityObserver,
};
use folio_render::frame::{Frame, HitGrid, HitId};
use folio_runtime::{Cmd, Model, Observable, Subscription};
use tracing::{debug, info};

use crate::avatar::{Avatar, MAX_PORTRAIT_ROWS};
use crate::content::Portfolio;
use crate::document::Document;
use crate::links::{Link, LinkOpener, open_logged};
use crate::theme::Theme;

/// Width of the navigation column, marker gutter included.
pub const NAV_WIDTH: u16 = 16;
const MARKER_COLS: u16 = 2;
/// Nav entries sit on every other row, starting one row down.
const NAV_ROW_STEP: usize = 2;
const HEADER_TEXT_ROWS: u16 = 3;
const WHEEL_ROWS: f64 = 3.0;
const INITIAL_SIZE: (u16, u16) = (80, 24);

const HIT_NAV: HitId = HitId::new(1);
const HIT_LINK: HitId = HitId::new(2);

#[derive(Debug, Clone)]
pub struct ShellOptions {
    /// Track the section in the focal band.
    pub scroll_spy: bool,
    pub frame_interval: Duration,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            scroll_spy: true,
            frame_interval: Duration::from_millis(16),
        }
    }
}

pub struct Shell {
    portfolio: &'static Portfolio,
    sections: Rc<SectionList>,
    avatar: Avatar,
    theme: Theme,
    opener: Box<dyn LinkOpener>,
    active: Observable<usize>,
    _active_log: Subscription,
    observer: ViewportObserver,
    tracker: SectionTracker,
    marker: MarkerPositioner,
    scroll: SmoothScroll,
    document: Document,
    nav: Vec<EntryGeometry>,
    width: u16,
    height: u16,
    frame_interval: Duration,
    /// Section the smooth scroll is heading for.
    pending: Option<usize>,
    /// Hit regions registered by the last `view`.
    hits: RefCell<HitGrid>,
}

impl Shell {
    pub fn new(
        portfolio: &'static Portfolio,
        sections: SectionList,
        avatar: Avatar,
        opener: Box<dyn LinkOpener>,
        options: ShellOptions,
    ) -> Self {
        let sections = Rc::new(sections);
        let active = Observable::new(0usize);

        let names = Rc::clone(&sections);
        let active_log = active.subscribe(move |&index| {
            let id = names.get(index).map_or("?", |s| s.id.as_str());
            info!(active = index, section = id, "active section changed");
        });

        let config = VisibilityConfig::default();
        let observer = ViewportObserver::new(config);
        let platform: Box<dyn VisibilityObserver> = if options.scroll_spy {
            Box::new(observer.clone())
        } else {
            Box::new(UnsupportedObserver)
        };
        let handle = active.clone();
        let tracker = SectionTracker::new(
            Rc::clone(&sections),
            platform,
            ActiveSetter::new(move |index| handle.set(index)),
            &config,
        );

        let nav = (0..sections.len())
            .map(|i| EntryGeometry::new((1 + i * NAV_ROW_STEP) as f64, 1.0))
            .collect();

        let (width, height) = INITIAL_SIZE;
        let mut shell = Self {
            portfolio,
            document: Document::build(portfolio, &sections, 0),
            sections,
            avatar,
            theme: Theme::default(),
            opener,
            active,
            _active_log: active_log,
            observer,
            tracker,
            marker: MarkerPositioner::new(1.0),
            scroll: SmoothScroll::new(),
            nav,
            width,
            height,
            frame_interval: options.frame_interval,
            pending: None,
            hits: RefCell::new(HitGrid::new(width, height)),
        };
        shell.relayout();
        shell
    }

    /// Current active section index.
    #[must_use]
    pub fn active(&self) -> usize {
        self.active.get()
    }

    /// The active-section state itself, for subscribers.
    #[must_use]
    pub fn active_state(&self) -> &Observable<usize> {
        &self.active
    }

    #[must_use]
    pub fn sections(&self) -> &SectionList {
        &self.sections
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Document row at the top of the content viewport.
    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.scroll.offset()
    }

    #[must_use]
    pub fn scroll_destination(&self) -> f64 {
        self.scroll.destination()
    }

    #[must_use]
    pub fn marker_offset(&self) -> f64 {
        self.marker.offset()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.scroll.is_animating() || self.marker.is_animating()
    }

    /// Sections the viewport observer is currently watching.
    #[must_use]
    pub fn observed_sections(&self) -> usize {
        self.observer.observed_count()
    }

    #[must_use]
    pub fn header_height(&self) -> u16 {
        let portrait = self.avatar.portrait().len().min(MAX_PORTRAIT_ROWS) as u16;
        portrait.max(HEADER_TEXT_ROWS) + 1
    }

    /// Screen row of nav entry `index`.
    #[must_use]
    pub fn nav_row(&self, index: usize) -> Option<u16> {
        self.nav
            .get(index)
            .map(|g| self.header_height() + g.top as u16)
    }

    #[must_use]
    pub fn viewport_rows(&self) -> u16 {
        self.height.saturating_sub(self.header_height())
    }

    fn nav_rect(&self) -> Rect {
        let top = self.header_height().min(self.height);
        Rect::new(0, top, NAV_WIDTH.min(self.width), self.height - top)
    }

    fn content_rect(&self) -> Rect {
        let top = self.header_height().min(self.height);
        let left = (NAV_WIDTH + 1).min(self.width);
        Rect::new(left, top, self.width - left, self.height - top)
    }

    /// Re-wrap the document for the current size.
    fn relayout(&mut self) {
        let doc_width = self.content_rect().width.saturating_sub(2);
        self.document = Document::build(self.portfolio, &self.sections, doc_width);
        self.scroll.set_max(self.scroll_limit());
        // Row targets are stale after a re-wrap; aim at the section again.
        if let Some(index) = self.pending
            && self.scroll.is_animating()
        {
            self.scroll.scroll_to(self.document.section_top(index));
        }
        self.marker.invalidate();
        debug!(
            width = self.width,
            height = self.height,
            rows = self.document.len(),
            "document laid out"
        );
    }

    /// Largest scroll offset: the last section's top may reach the top of
    /// the viewport, but the view never runs past it into blank rows.
    fn scroll_limit(&self) -> f64 {
        let last_top = self
            .sections
            .len()
            .checked_sub(1)
            .map_or(0.0, |last| self.document.section_top(last));
        let fill = self.document.len() as f64 - f64::from(self.viewport_rows());
        last_top.max(fill).max(0.0)
    }

    /// Measure, track, and reposition the marker.
    fn refresh(&mut self) {
        let viewport = Span::new(self.scroll.row() as f64, f64::from(self.viewport_rows()));
        let entries = self.observer.measure(&self.document, viewport);
        if !entries.is_empty() {
            self.tracker.handle_entries(&entries);
        }
        self.marker.sync(self.active.get(), &self.nav);
    }

    fn animate(&self) -> Cmd<Event> {
        if self.is_animating() {
            Cmd::tick(self.frame_interval)
        } else {
            Cmd::none()
        }
    }

    /// Smooth-scroll so section `index` starts at the top of the viewport.
    fn go_to(&mut self, index: usize) {
        if index >= self.sections.len() {
            return;
        }
        let top = self.document.section_top(index);
        debug!(index, top, "navigating to section");
        self.pending = Some(index);
        self.scroll.scroll_to(top);
    }

    fn go_to_id(&mut self, id: &str) {
        if let Some(index) = self.sections.index_of(id) {
            self.go_to(index);
        }
    }

    fn open(&self, link: Link) {
        let url = link.url(&self.portfolio.contact);
        open_logged(self.opener.as_ref(), &url);
    }

    /// Returns `true` when the key asks to quit.
    fn on_key(&mut self, key: KeyEvent) -> bool {
        let page = f64::from(self.viewport_rows().saturating_sub(1).max(1));
        let active = self.active.get();
        match key.code {
            KeyCode::Char('c') if key.ctrl() => return true,
            KeyCode::Char('q') | KeyCode::Escape => return true,
            KeyCode::Char('j') | KeyCode::Down => self.scroll.scroll_by(1.0),
            KeyCode::Char('k') | KeyCode::Up => self.scroll.scroll_by(-1.0),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll.scroll_by(page),
            KeyCode::PageUp => self.scroll.scroll_by(-page),
            KeyCode::Home => self.scroll.jump_to(0.0),
            KeyCode::End => self.scroll.jump_to(self.scroll.max()),
            KeyCode::Char(digit @ '1'..='9') => self.go_to(digit as usize - '1' as usize),
            KeyCode::Tab => self.go_to((active + 1).min(self.sections.len() - 1)),
            KeyCode::BackTab => self.go_to(active.saturating_sub(1)),
            KeyCode::Char('c') => self.go_to_id("contact"),
            KeyCode::Char('e') => self.open(Link::Email),
            KeyCode::Char('l') => self.open(Link::Profile),
            _ => {}
        }
        false
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll.scroll_by(WHEEL_ROWS),
            MouseEventKind::ScrollUp => self.scroll.scroll_by(-WHEEL_ROWS),
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = self.hits.borrow().hit_test(mouse.x, mouse.y);
                match hit {
                    Some((id, index)) if id == HIT_NAV => self.go_to(index as usize),
                    Some((id, data)) if id == HIT_LINK => {
                        if let Some(link) = Link::from_hit(data) {
                            self.open(link);
                        }
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        if area.is_empty() {
            return;
        }
        let right = area.right();
        for (row, line) in self.avatar.portrait().iter().enumerate() {
            let y = area.y + row as u16;
            if y + 1 >= area.bottom() {
                break;
            }
            frame.buffer.set_string(1, y, line, self.theme.marker(), right);
        }

        let x = match self.avatar.portrait_width() {
            0 => 1,
            w => w + 3,
        };
        let profile = &self.portfolio.profile;
        frame.buffer.set_string(x, area.y, profile.name, self.theme.name(), right);
        let subtitle = format!("{} · {}", profile.title, profile.location);
        frame.buffer.set_string(x, area.y + 1, &subtitle, self.theme.subtitle(), right);

        let y = area.y + 2;
        let mut col = x;
        let contact = self.sections.index_of("contact");
        let shortcuts = [
            ("[c] contact", contact.map(|i| (HIT_NAV, i as u64))),
            ("[e] email", Some((HIT_LINK, Link::Email.to_hit()))),
            ("[l] linkedin", Some((HIT_LINK, Link::Profile.to_hit()))),
        ];
        for (label, hit) in shortcuts {
            let end = frame.buffer.set_string(col, y, label, self.theme.shortcut(), right);
            if let Some((id, data)) = hit
                && end > col
            {
                frame.register_hit(Rect::new(col, y, end - col, 1), id, data);
            }
            col = end.saturating_add(2);
        }

        let rule = "─".repeat(usize::from(area.width));
        frame
            .buffer
            .set_string(area.x, area.bottom() - 1, &rule, self.theme.rule(), right);
    }

    fn draw_nav(&self, frame: &mut Frame, area: Rect) {
        if area.is_empty() {
            return;
        }
        let active = self.active.get();
        for (index, section) in self.sections.iter().enumerate() {
            let Some(geometry) = self.nav.get(index) else {
                break;
            };
            let y = area.y + geometry.top as u16;
            if y >= area.bottom() {
                break;
            }
            let style = if index == active {
                self.theme.nav_active()
            } else {
                self.theme.nav()
            };
            frame
                .buffer
                .set_string(area.x + MARKER_COLS + 1, y, &section.label, style, area.right());
            frame.register_hit(Rect::new(area.x, y, area.width, 1), HIT_NAV, index as u64);
        }

        let marker_y = area.y + self.marker.offset().round() as u16;
        if marker_y < area.bottom() {
            frame.buffer.set_string(
                area.x,
                marker_y,
                self.avatar.marker(),
                self.theme.marker(),
                area.x + MARKER_COLS,
            );
        }

        let sep_x = area.right();
        for y in area.y..area.bottom() {
            frame
                .buffer
                .set_string(sep_x, y, "│", self.theme.rule(), sep_x.saturating_add(1));
        }
    }

    fn draw_content(&self, frame: &mut Frame, area: Rect) {
        let first = self.scroll.row();
        for dy in 0..area.height {
            let Some(line) = self.document.line(first + usize::from(dy)) else {
                break;
            };
            let y = area.y + dy;
            let mut x = area.x + 1;
            for segment in &line.segments {
                x = frame.buffer.set_string(
                    x,
                    y,
                    &segment.text,
                    self.theme.role(segment.role),
                    area.right(),
                );
            }
            if let Some(link) = line.link {
                frame.register_hit(Rect::new(area.x, y, area.width, 1), HIT_LINK, link.to_hit());
            }
        }
    }
}

impl Model for Shell {
    type Message = Event;

    fn init(&mut self) -> Cmd<Event> {
        self.tracker.attach();
        self.refresh();
        self.animate()
    }

    fn update(&mut self, event: Event) -> Cmd<Event> {
        match event {
            Event::Key(key) if key.is_press() => {
                if self.on_key(key) {
                    return Cmd::quit();
                }
            }
            Event::Mouse(mouse) => self.on_mouse(mouse),
            Event::Resize { width, height } => {
                self.width = width;
                self.height = height;
                self.relayout();
            }
            Event::Tick(dt) => {
                self.scroll.tick(dt);
                self.marker.tick(dt);
                if !self.scroll.is_animating() {
                    self.pending = None;
                }
            }
            _ => {}
        }
        self.refresh();
        self.animate()
    }

    fn view(&self, frame: &mut Frame) {
        let header = Rect::new(0, 0, frame.width(), self.header_height().min(frame.height()));
        self.draw_header(frame, header);
        self.draw_nav(frame, self.nav_rect());
        self.draw_content(frame, self.content_rect());
        *self.hits.borrow_mut() = frame.hit_grid().clone();
    }

    fn on_shutdown(&mut self) {
        self.tracker.detach();
    }
}
