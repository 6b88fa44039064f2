//! # Models
//!
//! Observable data models: the point collection with its reference
//! data, and the active filter. Models own their subscriber lists and
//! notify synchronously after confirmed changes.

pub mod filter_model;
pub mod point;
pub mod points_model;

pub use filter_model::FilterModel;
pub use point::{Destination, Offer, OfferGroup, Picture, Point, PointType};
pub use points_model::{ModelObserver, TripPointsModel};
