//! # Presenters
//!
//! The orchestration layer: one presenter per rendered point row, the
//! new-point form presenter, and the top-level board presenter that
//! owns them all and reconciles the list on model notifications.

pub mod board_presenter;
pub mod new_point_presenter;
pub mod point_presenter;

pub use board_presenter::BoardPresenter;
pub use new_point_presenter::NewPointPresenter;
pub use point_presenter::{PointPresenter, RowEvent};
