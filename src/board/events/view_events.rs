//! # View Events
//!
//! Typed intents views derive from key input, and the action envelope
//! presenters hand to the board's dispatch choke-point.

use super::types::{SortType, UpdateType, UserAction};
use crate::board::models::Point;

/// Intent a view produced from a key press
///
/// Views never mutate models; they translate raw input into one of
/// these values and let the owning presenter decide what to do.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    /// Swap the read row for the edit form
    OpenEditor,
    /// Leave the edit form without saving
    CloseEditor,
    /// Submit the form with the collected point data
    Submit(Point),
    /// Delete the point shown in the form
    Delete(Point),
    /// Switch the list order
    SortChanged(SortType),
    /// A form field changed; the view's element needs refreshing
    FieldEdited,
}

/// A state-changing request bubbling up to the board dispatcher
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAction {
    pub action: UserAction,
    pub update: UpdateType,
    pub point: Point,
}
