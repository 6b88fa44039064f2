//! # Model Events
//!
//! Notifications models emit after confirmed state changes. Observers
//! receive them synchronously, in registration order.

use super::types::{FilterType, UpdateType};
use crate::board::models::Point;

/// Events emitted when models change
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    /// The point collection changed. `point` carries the affected point
    /// for row-level (`Patch`) updates; list-level updates rebuild from
    /// model state and carry no payload for deletions.
    PointsChanged {
        update: UpdateType,
        point: Option<Point>,
    },

    /// The active filter changed
    FilterChanged {
        update: UpdateType,
        filter: FilterType,
    },
}

impl ModelEvent {
    /// The rebuild granularity this event asks of the board
    pub fn update_type(&self) -> UpdateType {
        match self {
            ModelEvent::PointsChanged { update, .. } => *update,
            ModelEvent::FilterChanged { update, .. } => *update,
        }
    }
}
