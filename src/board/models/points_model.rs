//! # Trip Points Model
//!
//! Owns the in-memory point collection and its reference data
//! (destinations, offer groups). All CRUD goes through the remote API;
//! the local collection only changes after the backend confirms, and
//! observers are notified synchronously, in registration order, after
//! each confirmed mutation and once at initial load.

use anyhow::{bail, Result};

use crate::board::events::{ModelEvent, UpdateType};
use crate::board::services::PointsApi;
use crate::board::utils::update_item;

use super::{Destination, OfferGroup, Point};

/// Synchronous model-change subscriber
pub type ModelObserver = Box<dyn Fn(&ModelEvent)>;

pub struct TripPointsModel {
    api: Box<dyn PointsApi>,
    points: Vec<Point>,
    destinations: Vec<Destination>,
    offer_groups: Vec<OfferGroup>,
    observers: Vec<ModelObserver>,
}

impl TripPointsModel {
    pub fn new(api: Box<dyn PointsApi>) -> Self {
        Self {
            api,
            points: Vec::new(),
            destinations: Vec::new(),
            offer_groups: Vec::new(),
            observers: Vec::new(),
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn offers(&self) -> &[OfferGroup] {
        &self.offer_groups
    }

    pub fn add_observer(&mut self, observer: ModelObserver) {
        self.observers.push(observer);
    }

    fn notify(&self, event: &ModelEvent) {
        for observer in &self.observers {
            observer(event);
        }
    }

    /// Fetch everything from the backend. A failed load degrades to an
    /// empty collection; either way observers get the Init event.
    pub async fn init(&mut self) {
        match self.load().await {
            Ok((points, destinations, offer_groups)) => {
                tracing::info!(points = points.len(), "initial load complete");
                self.points = points;
                self.destinations = destinations;
                self.offer_groups = offer_groups;
            }
            Err(error) => {
                tracing::warn!("initial load failed: {error:#}");
                self.points = Vec::new();
            }
        }
        self.notify(&ModelEvent::PointsChanged {
            update: UpdateType::Init,
            point: None,
        });
    }

    async fn load(&self) -> Result<(Vec<Point>, Vec<Destination>, Vec<OfferGroup>)> {
        let points = self.api.points().await?;
        let destinations = self.api.destinations().await?;
        let offer_groups = self.api.offers().await?;
        Ok((points, destinations, offer_groups))
    }

    pub async fn update_point(&mut self, update: UpdateType, point: Point) -> Result<()> {
        if !self.points.iter().any(|p| p.id == point.id) {
            bail!("can't update an unknown point");
        }

        let stored = self.api.update_point(&point).await?;
        self.points = update_item(&self.points, stored.clone());
        self.notify(&ModelEvent::PointsChanged {
            update,
            point: Some(stored),
        });
        Ok(())
    }

    pub async fn add_point(&mut self, update: UpdateType, point: Point) -> Result<()> {
        let created = self.api.add_point(&point).await?;
        self.points.insert(0, created.clone());
        self.notify(&ModelEvent::PointsChanged {
            update,
            point: Some(created),
        });
        Ok(())
    }

    pub async fn delete_point(&mut self, update: UpdateType, point: Point) -> Result<()> {
        if !self.points.iter().any(|p| p.id == point.id) {
            bail!("can't delete an unknown point");
        }

        self.api.delete_point(&point.id).await?;
        self.points.retain(|p| p.id != point.id);
        self.notify(&ModelEvent::PointsChanged {
            update,
            point: None,
        });
        Ok(())
    }
}
