//! Listener registry for expedition events.

use std::fmt;

use super::{ExpeditionEvent, Topic};

/// Consumer of expedition events (presentation, progression, rewards).
///
/// Listeners run after the controller operation that produced the event has
/// finished, and receive only the event. They cannot reach back into the
/// controller, so there is no reentrant path from a notification into the
/// state machine.
pub trait ExpeditionListener {
    /// Returns a human-readable name for this listener (used in logging and debugging).
    fn name(&self) -> &'static str;

    /// Lower values receive events first. Defaults to 0.
    fn priority(&self) -> i32 {
        0
    }

    /// Topics this listener wants. Defaults to all of them.
    fn topics(&self) -> &[Topic] {
        Topic::ALL
    }

    fn on_event(&mut self, event: &ExpeditionEvent);
}

/// Registry that delivers events to listeners in priority order.
///
/// Listeners with equal priority are called in registration order.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Vec<Box<dyn ExpeditionListener>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, listener: Box<dyn ExpeditionListener>) {
        tracing::debug!(
            listener = listener.name(),
            priority = listener.priority(),
            "registered expedition listener"
        );
        self.listeners.push(listener);
        // Stable sort keeps registration order within a priority.
        self.listeners.sort_by_key(|l| l.priority());
    }

    /// Delivers `event` to every listener subscribed to its topic.
    pub fn dispatch(&mut self, event: &ExpeditionEvent) {
        let topic = event.topic();
        for listener in &mut self.listeners {
            if listener.topics().contains(&topic) {
                listener.on_event(event);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Returns an iterator over listener names and priorities (for debugging).
    pub fn listeners(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.listeners.iter().map(|l| (l.name(), l.priority()))
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.listeners()).finish()
    }
}
