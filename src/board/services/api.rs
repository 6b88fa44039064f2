//! # Remote Points API
//!
//! REST client for the trip backend. The [`PointsApi`] trait is the
//! seam the models depend on; tests drive them with an in-memory
//! implementation instead.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;

use crate::board::models::{Destination, OfferGroup, Point};

use super::profile::ConnectionProfile;

/// Remote source of points and their reference data
#[async_trait]
pub trait PointsApi {
    async fn points(&self) -> Result<Vec<Point>>;

    async fn destinations(&self) -> Result<Vec<Destination>>;

    async fn offers(&self) -> Result<Vec<OfferGroup>>;

    /// Update an existing point; returns the authoritative stored point
    async fn update_point(&self, point: &Point) -> Result<Point>;

    /// Create a point; returns it with its server-assigned id
    async fn add_point(&self, point: &Point) -> Result<Point>;

    async fn delete_point(&self, id: &str) -> Result<()>;
}

/// reqwest-backed implementation of [`PointsApi`]
pub struct ApiService {
    client: reqwest::Client,
    base_url: String,
    authorization: String,
}

impl ApiService {
    pub fn new(profile: &ConnectionProfile) -> Result<Self> {
        tracing::debug!("creating api service for {}", profile.base_url());
        let client = reqwest::Client::builder()
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: profile.base_url().trim_end_matches('/').to_string(),
            authorization: profile.authorization().to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        tracing::debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, &self.authorization)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()
            .with_context(|| format!("{url} answered with an error status"))?;
        response
            .json()
            .await
            .with_context(|| format!("{url} returned malformed JSON"))
    }
}

#[async_trait]
impl PointsApi for ApiService {
    async fn points(&self) -> Result<Vec<Point>> {
        self.get_json("points").await
    }

    async fn destinations(&self) -> Result<Vec<Destination>> {
        self.get_json("destinations").await
    }

    async fn offers(&self) -> Result<Vec<OfferGroup>> {
        self.get_json("offers").await
    }

    async fn update_point(&self, point: &Point) -> Result<Point> {
        let url = self.url(&format!("points/{}", point.id));
        tracing::debug!("PUT {url}");
        let response = self
            .client
            .put(&url)
            .header(AUTHORIZATION, &self.authorization)
            .json(point)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()
            .with_context(|| format!("{url} rejected the update"))?;
        response
            .json()
            .await
            .with_context(|| format!("{url} returned malformed JSON"))
    }

    async fn add_point(&self, point: &Point) -> Result<Point> {
        let url = self.url("points");
        tracing::debug!("POST {url}");
        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, &self.authorization)
            .json(point)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()
            .with_context(|| format!("{url} rejected the new point"))?;
        response
            .json()
            .await
            .with_context(|| format!("{url} returned malformed JSON"))
    }

    async fn delete_point(&self, id: &str) -> Result<()> {
        let url = self.url(&format!("points/{id}"));
        tracing::debug!("DELETE {url}");
        self.client
            .delete(&url)
            .header(AUTHORIZATION, &self.authorization)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()
            .with_context(|| format!("{url} rejected the deletion"))?;
        Ok(())
    }
}
