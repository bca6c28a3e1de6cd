//! # Events Module
//!
//! Re-exports all event system components organized by category.

pub mod event_bus;
pub mod model_events;
pub mod types;
pub mod view_events;

pub use event_bus::{EventBus, ModelEventHandler, SimpleEventBus};
pub use model_events::ModelEvent;
pub use types::{Cursor, EditKey, RowInput};
pub use view_events::{InputEvent, ViewEvent};
