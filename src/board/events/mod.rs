//! # Events Module
//!
//! Shared enums and event types for the board: update granularity,
//! model notifications, and the typed view intents presenters consume.

pub mod model_events;
pub mod types;
pub mod view_events;

pub use model_events::ModelEvent;
pub use types::{EditMode, FilterType, SortType, UpdateType, UserAction};
pub use view_events::{PendingAction, ViewAction};
