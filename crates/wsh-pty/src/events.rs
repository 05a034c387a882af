//! Listener registry for out-of-band control events.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::Value;

type Listener = Rc<dyn Fn(&Value)>;

/// Push-only pub/sub registry: event name to ordered listener list.
///
/// Registration is additive; no removal or priorities are exposed.
/// Emitting an event nobody listens to is a no-op, never an error.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: RefCell<BTreeMap<String, Vec<Listener>>>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for an event name, after any already present.
    pub fn on(&self, event: &str, callback: impl Fn(&Value) + 'static) {
        self.listeners
            .borrow_mut()
            .entry(String::from(event))
            .or_default()
            .push(Rc::new(callback));
    }

    /// Invoke every listener for `event` in registration order.
    pub fn emit(&self, event: &str, payload: &Value) {
        // Snapshot outside the borrow so a listener may register more
        // listeners without re-entering the registry mid-iteration
        let snapshot: Vec<Listener> = match self.listeners.borrow().get(event) {
            Some(listeners) => listeners.clone(),
            None => return,
        };
        for listener in snapshot {
            listener(payload);
        }
    }

    /// Number of listeners registered for an event name.
    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners
            .borrow()
            .get(event)
            .map(Vec::len)
            .unwrap_or(0)
    }
}
