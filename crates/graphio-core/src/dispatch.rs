//! Ordered listener registry shared by all readers
//!
//! Listeners are shared handles: the registry references them, callers keep
//! their own handle to inspect the listener after parsing. A listener must
//! not touch the reader it is registered with from inside a callback; a
//! listener that is re-entered during dispatch fails the event instead.

use std::cell::RefCell;
use std::rc::Rc;

use crate::event::Event;
use crate::listener::{
    deliver, deliver_extended, ExtendedGraphListener, GraphListener, ListenerError,
    ListenerResult,
};

/// Shared handle to a basic listener
pub type SharedListener = Rc<RefCell<dyn GraphListener>>;

/// Shared handle to an extended listener
pub type SharedExtendedListener = Rc<RefCell<dyn ExtendedGraphListener>>;

/// One registered listener of either generation
#[derive(Clone)]
pub enum Subscriber {
    Basic(SharedListener),
    Extended(SharedExtendedListener),
}

impl Subscriber {
    fn address(&self) -> *const () {
        match self {
            Self::Basic(l) => Rc::as_ptr(l) as *const (),
            Self::Extended(l) => Rc::as_ptr(l) as *const (),
        }
    }

    fn receive(&self, event: &Event) -> ListenerResult {
        match self {
            Self::Basic(l) => {
                let mut listener = l
                    .try_borrow_mut()
                    .map_err(|_| ListenerError::new("listener re-entered during dispatch"))?;
                deliver(&mut *listener, event)
            }
            Self::Extended(l) => {
                let mut listener = l
                    .try_borrow_mut()
                    .map_err(|_| ListenerError::new("listener re-entered during dispatch"))?;
                deliver_extended(&mut *listener, event)
            }
        }
    }
}

/// Listeners of both generations, in registration order
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    subscribers: Vec<Subscriber>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: SharedListener) {
        self.subscribers.push(Subscriber::Basic(listener));
    }

    pub fn add_extended_listener(&mut self, listener: SharedExtendedListener) {
        self.subscribers.push(Subscriber::Extended(listener));
    }

    /// Remove a basic listener by handle. Returns false if it was not registered.
    pub fn remove_listener(&mut self, listener: &SharedListener) -> bool {
        self.remove_address(Rc::as_ptr(listener) as *const ())
    }

    /// Remove an extended listener by handle. Returns false if it was not registered.
    pub fn remove_extended_listener(&mut self, listener: &SharedExtendedListener) -> bool {
        self.remove_address(Rc::as_ptr(listener) as *const ())
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Deliver an event to every subscriber; stops at the first rejection
    pub fn dispatch(&self, event: &Event) -> ListenerResult {
        tracing::trace!(event = event.kind(), listeners = self.len(), "dispatch");
        for subscriber in &self.subscribers {
            subscriber.receive(event)?;
        }
        Ok(())
    }

    fn remove_address(&mut self, address: *const ()) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.address() != address);
        self.subscribers.len() != before
    }
}
