//! # Event Bus
//!
//! Fan-out of row model events to subscribers outside the editor. View
//! events stay on the editor's pending queue and are not published here.

use super::model_events::ModelEvent;

/// Type alias for model event handlers to reduce complexity
pub type ModelEventHandler = Box<dyn Fn(&ModelEvent) + Send + Sync>;

pub trait EventBus: Send + Sync {
    fn publish_model_event(&mut self, event: ModelEvent);

    fn subscribe_to_model_events(&mut self, handler: ModelEventHandler);
}

/// In-memory bus calling subscribers in subscription order
#[derive(Default)]
pub struct SimpleEventBus {
    handlers: Vec<ModelEventHandler>,
}

impl SimpleEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }
}

impl EventBus for SimpleEventBus {
    fn publish_model_event(&mut self, event: ModelEvent) {
        for handler in &self.handlers {
            handler(&event);
        }
    }

    fn subscribe_to_model_events(&mut self, handler: ModelEventHandler) {
        self.handlers.push(handler);
    }
}
