//! An observer that records resolution events for assertions.

use parking_lot::Mutex;

use linkscope::ide::{ResolveEvent, ResolveObserver};

#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<String>>,
    visited: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Variant names of all events, in order.
    pub fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }

    /// Ids of the units dequeued by the dependency search, in order.
    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().clone()
    }

    pub fn saw(&self, event: &str) -> bool {
        self.events.lock().iter().any(|e| e == event)
    }
}

impl ResolveObserver for RecordingObserver {
    fn on_event(&self, event: &ResolveEvent<'_>) {
        if let ResolveEvent::UnitVisited { id } = event {
            self.visited.lock().push(id.to_string());
        }
        let name: String = format!("{event:?}")
            .chars()
            .take_while(|c| c.is_alphanumeric())
            .collect();
        self.events.lock().push(name);
    }
}
