//! Listener traits receiving graph events from readers
//!
//! Two generations coexist. [`GraphListener`] only ever adds or replaces
//! attributes. [`ExtendedGraphListener`] additionally receives attribute
//! removals. A reader delivers every event to listeners of both kinds, in
//! registration order, before it reads any further input.
//!
//! Any callback may reject an event by returning a [`ListenerError`]. The
//! error aborts the running parse and reaches the reader's caller as
//! [`Error::Listener`](crate::Error::Listener). Events already delivered are
//! not rolled back.

use thiserror::Error;

use crate::attributes::AttributeMap;
use crate::event::Event;

/// Result type of listener callbacks
pub type ListenerResult = std::result::Result<(), ListenerError>;

/// A listener rejected the content of an event
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Listener error: {message}")]
pub struct ListenerError {
    pub message: String,
}

impl ListenerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Basic listener generation: no attribute removal
///
/// All callbacks default to accepting the event and doing nothing.
pub trait GraphListener {
    /// Graph attributes were read
    fn graph_changed(&mut self, _attributes: Option<&AttributeMap>) -> ListenerResult {
        Ok(())
    }

    fn node_added(&mut self, _id: &str, _attributes: Option<&AttributeMap>) -> ListenerResult {
        Ok(())
    }

    fn node_changed(&mut self, _id: &str, _attributes: Option<&AttributeMap>) -> ListenerResult {
        Ok(())
    }

    fn node_removed(&mut self, _id: &str) -> ListenerResult {
        Ok(())
    }

    /// An edge was read; endpoints may not have been announced as nodes yet
    fn edge_added(
        &mut self,
        _id: &str,
        _from: &str,
        _to: &str,
        _directed: bool,
        _attributes: Option<&AttributeMap>,
    ) -> ListenerResult {
        Ok(())
    }

    fn edge_changed(&mut self, _id: &str, _attributes: Option<&AttributeMap>) -> ListenerResult {
        Ok(())
    }

    fn edge_removed(&mut self, _id: &str) -> ListenerResult {
        Ok(())
    }

    /// A new group of events begins at `time`
    fn step_begins(&mut self, _time: f64) -> ListenerResult {
        Ok(())
    }

    /// The reader met something it could not interpret
    fn unknown_event_detected(&mut self, _raw: &str) -> ListenerResult {
        Ok(())
    }
}

/// Extended listener generation, adds attribute removal
pub trait ExtendedGraphListener: GraphListener {
    fn graph_attribute_removed(&mut self, _name: &str) -> ListenerResult {
        Ok(())
    }

    fn node_attribute_removed(&mut self, _id: &str, _name: &str) -> ListenerResult {
        Ok(())
    }

    fn edge_attribute_removed(&mut self, _id: &str, _name: &str) -> ListenerResult {
        Ok(())
    }
}

/// Deliver an event to a basic listener. Attribute removals are not part
/// of the basic generation and are skipped.
pub fn deliver<L: GraphListener + ?Sized>(listener: &mut L, event: &Event) -> ListenerResult {
    match event {
        Event::GraphChanged { attributes } => listener.graph_changed(attributes.as_ref()),
        Event::NodeAdded { id, attributes } => listener.node_added(id, attributes.as_ref()),
        Event::NodeChanged { id, attributes } => listener.node_changed(id, attributes.as_ref()),
        Event::NodeRemoved { id } => listener.node_removed(id),
        Event::EdgeAdded {
            id,
            from,
            to,
            directed,
            attributes,
        } => listener.edge_added(id, from, to, *directed, attributes.as_ref()),
        Event::EdgeChanged { id, attributes } => listener.edge_changed(id, attributes.as_ref()),
        Event::EdgeRemoved { id } => listener.edge_removed(id),
        Event::StepBegins { time } => listener.step_begins(*time),
        Event::Unknown { raw } => listener.unknown_event_detected(raw),
        Event::GraphAttributeRemoved { .. }
        | Event::NodeAttributeRemoved { .. }
        | Event::EdgeAttributeRemoved { .. } => Ok(()),
    }
}

/// Deliver an event to an extended listener
pub fn deliver_extended<L: ExtendedGraphListener + ?Sized>(
    listener: &mut L,
    event: &Event,
) -> ListenerResult {
    match event {
        Event::GraphAttributeRemoved { name } => listener.graph_attribute_removed(name),
        Event::NodeAttributeRemoved { id, name } => listener.node_attribute_removed(id, name),
        Event::EdgeAttributeRemoved { id, name } => listener.edge_attribute_removed(id, name),
        other => deliver(listener, other),
    }
}

/// Receives events as values instead of per-kind callbacks
///
/// Every `EventReceiver` is a listener of both generations.
pub trait EventReceiver {
    fn receive(&mut self, event: Event) -> ListenerResult;
}

impl<T: EventReceiver> GraphListener for T {
    fn graph_changed(&mut self, attributes: Option<&AttributeMap>) -> ListenerResult {
        self.receive(Event::GraphChanged {
            attributes: attributes.cloned(),
        })
    }

    fn node_added(&mut self, id: &str, attributes: Option<&AttributeMap>) -> ListenerResult {
        self.receive(Event::NodeAdded {
            id: id.to_string(),
            attributes: attributes.cloned(),
        })
    }

    fn node_changed(&mut self, id: &str, attributes: Option<&AttributeMap>) -> ListenerResult {
        self.receive(Event::NodeChanged {
            id: id.to_string(),
            attributes: attributes.cloned(),
        })
    }

    fn node_removed(&mut self, id: &str) -> ListenerResult {
        self.receive(Event::NodeRemoved { id: id.to_string() })
    }

    fn edge_added(
        &mut self,
        id: &str,
        from: &str,
        to: &str,
        directed: bool,
        attributes: Option<&AttributeMap>,
    ) -> ListenerResult {
        self.receive(Event::EdgeAdded {
            id: id.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            directed,
            attributes: attributes.cloned(),
        })
    }

    fn edge_changed(&mut self, id: &str, attributes: Option<&AttributeMap>) -> ListenerResult {
        self.receive(Event::EdgeChanged {
            id: id.to_string(),
            attributes: attributes.cloned(),
        })
    }

    fn edge_removed(&mut self, id: &str) -> ListenerResult {
        self.receive(Event::EdgeRemoved { id: id.to_string() })
    }

    fn step_begins(&mut self, time: f64) -> ListenerResult {
        self.receive(Event::StepBegins { time })
    }

    fn unknown_event_detected(&mut self, raw: &str) -> ListenerResult {
        self.receive(Event::Unknown {
            raw: raw.to_string(),
        })
    }
}

impl<T: EventReceiver> ExtendedGraphListener for T {
    fn graph_attribute_removed(&mut self, name: &str) -> ListenerResult {
        self.receive(Event::GraphAttributeRemoved {
            name: name.to_string(),
        })
    }

    fn node_attribute_removed(&mut self, id: &str, name: &str) -> ListenerResult {
        self.receive(Event::NodeAttributeRemoved {
            id: id.to_string(),
            name: name.to_string(),
        })
    }

    fn edge_attribute_removed(&mut self, id: &str, name: &str) -> ListenerResult {
        self.receive(Event::EdgeAttributeRemoved {
            id: id.to_string(),
            name: name.to_string(),
        })
    }
}

/// Listener that records every event it receives
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    pub events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventReceiver for EventLog {
    fn receive(&mut self, event: Event) -> ListenerResult {
        self.events.push(event);
        Ok(())
    }
}
