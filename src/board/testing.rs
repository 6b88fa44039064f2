//! # Test Support
//!
//! In-memory stand-ins for the remote API plus point builders, shared
//! by unit and integration tests.

use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::board::models::{Destination, Offer, OfferGroup, Point, PointType};
use crate::board::services::PointsApi;

/// In-memory [`PointsApi`] with per-operation failure switches
pub struct StubApi {
    points: Mutex<Vec<Point>>,
    destinations: Vec<Destination>,
    offer_groups: Vec<OfferGroup>,
    next_id: Mutex<u32>,
    pub fail_load: bool,
    pub fail_update: bool,
    pub fail_add: bool,
    pub fail_delete: bool,
}

impl StubApi {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points: Mutex::new(points),
            destinations: sample_destinations(),
            offer_groups: sample_offer_groups(),
            next_id: Mutex::new(100),
            fail_load: false,
            fail_update: false,
            fail_add: false,
            fail_delete: false,
        }
    }

    pub fn failing_updates(points: Vec<Point>) -> Self {
        Self {
            fail_update: true,
            ..Self::new(points)
        }
    }
}

#[async_trait]
impl PointsApi for StubApi {
    async fn points(&self) -> Result<Vec<Point>> {
        if self.fail_load {
            bail!("backend unavailable");
        }
        Ok(self.points.lock().unwrap().clone())
    }

    async fn destinations(&self) -> Result<Vec<Destination>> {
        Ok(self.destinations.clone())
    }

    async fn offers(&self) -> Result<Vec<OfferGroup>> {
        Ok(self.offer_groups.clone())
    }

    async fn update_point(&self, point: &Point) -> Result<Point> {
        if self.fail_update {
            bail!("update rejected");
        }
        Ok(point.clone())
    }

    async fn add_point(&self, point: &Point) -> Result<Point> {
        if self.fail_add {
            bail!("add rejected");
        }
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        Ok(Point {
            id: next_id.to_string(),
            ..point.clone()
        })
    }

    async fn delete_point(&self, _id: &str) -> Result<()> {
        if self.fail_delete {
            bail!("delete rejected");
        }
        Ok(())
    }
}

pub fn date(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 3, day, hour, 0, 0).unwrap()
}

/// A fully-populated point for list scenarios
pub fn sample_point(id: &str, price: u32, day: u32) -> Point {
    Point {
        id: id.to_string(),
        point_type: PointType::Flight,
        date_from: Some(date(day, 10)),
        date_to: Some(date(day, 12)),
        base_price: price,
        destination: Some("geneva".to_string()),
        offers: vec!["upgrade".to_string()],
    }
}

pub fn sample_destinations() -> Vec<Destination> {
    vec![
        Destination {
            id: "geneva".to_string(),
            name: "Geneva".to_string(),
            description: "A city on the shore of Lake Geneva".to_string(),
            pictures: Vec::new(),
        },
        Destination {
            id: "chamonix".to_string(),
            name: "Chamonix".to_string(),
            description: "A resort at the base of Mont Blanc".to_string(),
            pictures: Vec::new(),
        },
    ]
}

pub fn sample_offer_groups() -> Vec<OfferGroup> {
    vec![OfferGroup {
        point_type: PointType::Flight,
        offers: vec![
            Offer {
                id: "upgrade".to_string(),
                title: "Upgrade".to_string(),
                price: 50,
            },
            Offer {
                id: "meal".to_string(),
                title: "Meal".to_string(),
                price: 15,
            },
        ],
    }]
}
