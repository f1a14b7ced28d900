#![forbid(unsafe_code)]

//! Observable value with change notification and version tracking.
//!
//! # Design
//!
//! [`Observable<T>`] keeps a value in shared `Rc<RefCell<..>>` storage.
//! Clones are handles to the same value. `set` compares with `PartialEq`;
//! only a real change bumps the version and notifies subscribers, in
//! registration order.
//!
//! Folio's Active State is an `Observable<usize>` owned by the shell. The
//! shell hands a setter closure over a clone to the section tracker and
//! reads `get()` when positioning the marker and drawing the highlight.
//!
//! # Failure Modes
//!
//! - **Re-entrant set**: a subscriber may call `set` on the same
//!   observable. The borrow is released before callbacks run, so this
//!   recurses instead of panicking. Cycles are the caller's problem.
//! - **Subscriber leak**: dropping the [`Subscription`] guard unsubscribes.
//!   Dead entries are pruned on the next notify.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, debug_span};
use web_time::Instant;

type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

struct Inner<T> {
    value: T,
    version: u64,
    subscribers: Vec<CallbackWeak<T>>,
}

/// A shared, version-tracked value.
///
/// # Invariants
///
/// 1. `version` increments by exactly 1 per value-changing mutation.
/// 2. `set(v)` with `v == current` is a no-op.
/// 3. Subscribers run in registration order.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + fmt::Debug + 'static> Observable<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the value without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value. Notifies subscribers only if it changed.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Mutate in place. Notifies subscribers only if the value changed.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            let before = inner.value.clone();
            f(&mut inner.value);
            if inner.value != before {
                inner.version += 1;
                true
            } else {
                false
            }
        };
        if changed {
            self.notify();
        }
    }

    /// Register `callback` for future changes. Dropping the returned guard
    /// unsubscribes.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Registered subscribers, including dead ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn notify(&self) {
        let (callbacks, value, version) = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            let live: Vec<CallbackRc<T>> =
                inner.subscribers.iter().filter_map(|w| w.upgrade()).collect();
            (live, inner.value.clone(), inner.version)
        };
        if callbacks.is_empty() {
            return;
        }

        let started = Instant::now();
        let _span = debug_span!("observable.notify", version, subscribers = callbacks.len())
            .entered();
        for cb in &callbacks {
            cb(&value);
        }
        debug!(
            ?value,
            duration_us = started.elapsed().as_micros() as u64,
            "observable propagated"
        );
    }
}

/// RAII guard for a subscriber callback.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    _guard: Box<dyn Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
