//! # Point Data Types
//!
//! Wire-compatible data types for trip points and their reference data.
//! Field names serialize in camelCase to match the backend contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of travel event a point represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PointType {
    Taxi,
    Bus,
    Train,
    Ship,
    Drive,
    #[default]
    Flight,
    #[serde(rename = "check-in")]
    CheckIn,
    Sightseeing,
    Restaurant,
}

impl PointType {
    /// All types in the order the edit form cycles through them
    pub fn all() -> [PointType; 9] {
        [
            PointType::Taxi,
            PointType::Bus,
            PointType::Train,
            PointType::Ship,
            PointType::Drive,
            PointType::Flight,
            PointType::CheckIn,
            PointType::Sightseeing,
            PointType::Restaurant,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            PointType::Taxi => "taxi",
            PointType::Bus => "bus",
            PointType::Train => "train",
            PointType::Ship => "ship",
            PointType::Drive => "drive",
            PointType::Flight => "flight",
            PointType::CheckIn => "check-in",
            PointType::Sightseeing => "sightseeing",
            PointType::Restaurant => "restaurant",
        }
    }

    /// The next type in cycle order, wrapping around
    pub fn next(self) -> PointType {
        let all = PointType::all();
        let index = all.iter().position(|t| *t == self).unwrap_or(0);
        all[(index + 1) % all.len()]
    }

    /// The previous type in cycle order, wrapping around
    pub fn prev(self) -> PointType {
        let all = PointType::all();
        let index = all.iter().position(|t| *t == self).unwrap_or(0);
        all[(index + all.len() - 1) % all.len()]
    }
}

/// A single trip point (event)
///
/// Points are treated as immutable values: every edit produces a new
/// `Point`, the collection is only rewritten by the model. Display order
/// is always computed by the active sort, never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    pub id: String,
    #[serde(rename = "type")]
    pub point_type: PointType,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub base_price: u32,
    pub destination: Option<String>,
    pub offers: Vec<String>,
}

impl Point {
    /// Blank draft used by the new-point form: default type, no dates,
    /// no destination, no offers. The id is assigned by the backend.
    pub fn draft() -> Self {
        Self {
            id: String::new(),
            point_type: PointType::default(),
            date_from: None,
            date_to: None,
            base_price: 0,
            destination: None,
            offers: Vec::new(),
        }
    }
}

/// A place a point can refer to by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub description: String,
    pub pictures: Vec<Picture>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Picture {
    pub src: String,
    pub description: String,
}

/// An extra service a point of a given type can include
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: String,
    pub title: String,
    pub price: u32,
}

/// Offers available for one point type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferGroup {
    #[serde(rename = "type")]
    pub point_type: PointType,
    pub offers: Vec<Offer>,
}
