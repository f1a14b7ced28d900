#![forbid(unsafe_code)]

//! Visibility observer backed by the JS host.

use std::cell::RefCell;
use std::rc::Rc;

use folio_nav::VisibilityObserver;
use serde::{Deserialize, Serialize};

/// An instruction for the host's `IntersectionObserver`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ObserverCommand {
    Observe { target: String },
    Unobserve { target: String },
    Disconnect,
}

#[derive(Debug)]
struct HostState {
    supported: bool,
    observing: Vec<String>,
    pending: Vec<ObserverCommand>,
}

/// Queues observer commands until the host drains them.
///
/// Clones share the queue: the tracker owns one handle, the
/// [`ScrollSpyHost`](crate::ScrollSpyHost) keeps another to drain it.
#[derive(Debug, Clone)]
pub struct HostObserver {
    state: Rc<RefCell<HostState>>,
}

impl Default for HostObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl HostObserver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(HostState {
                supported: true,
                observing: Vec::new(),
                pending: Vec::new(),
            })),
        }
    }

    /// Record whether the host has an `IntersectionObserver`.
    pub fn set_supported(&self, supported: bool) {
        self.state.borrow_mut().supported = supported;
    }

    /// Take every queued command, oldest first.
    pub fn drain(&self) -> Vec<ObserverCommand> {
        std::mem::take(&mut self.state.borrow_mut().pending)
    }

    #[must_use]
    pub fn observing_count(&self) -> usize {
        self.state.borrow().observing.len()
    }
}

impl VisibilityObserver for HostObserver {
    fn is_supported(&self) -> bool {
        self.state.borrow().supported
    }

    fn observe(&mut self, target: &str) {
        let mut state = self.state.borrow_mut();
        if state.observing.iter().any(|t| t == target) {
            return;
        }
        state.observing.push(target.to_string());
        state.pending.push(ObserverCommand::Observe {
            target: target.to_string(),
        });
    }

    fn unobserve(&mut self, target: &str) {
        let mut state = self.state.borrow_mut();
        let before = state.observing.len();
        state.observing.retain(|t| t != target);
        if state.observing.len() != before {
            state.pending.push(ObserverCommand::Unobserve {
                target: target.to_string(),
            });
        }
    }

    fn disconnect(&mut self) {
        let mut state = self.state.borrow_mut();
        state.observing.clear();
        state.pending.push(ObserverCommand::Disconnect);
    }

    fn is_observing(&self, target: &str) -> bool {
        self.state.borrow().observing.iter().any(|t| t == target)
    }
}
