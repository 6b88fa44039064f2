//! # Point Row View
//!
//! Read-only single-row rendering of a trip point: dates, type,
//! destination, price, and the selected offers.

use crossterm::event::{KeyCode, KeyEvent};

use crate::board::events::ViewAction;
use crate::board::models::{Offer, Point};
use crate::board::utils::{clock_time, short_date};

use super::{NodeId, View};

#[derive(Debug)]
pub struct PointView {
    point: Point,
    destination_name: Option<String>,
    offers: Vec<Offer>,
    selected: bool,
    pending: bool,
    error: bool,
    node: Option<NodeId>,
}

impl PointView {
    /// `destination_name` and `offers` are the point's references
    /// resolved against the model's current reference data.
    pub fn new(point: Point, destination_name: Option<String>, offers: Vec<Offer>) -> Self {
        Self {
            point,
            destination_name,
            offers,
            selected: false,
            pending: false,
            error: false,
            node: None,
        }
    }

    pub fn point(&self) -> &Point {
        &self.point
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Mark the row while its mutation is in flight
    pub fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    /// Mark the row after a rejected mutation
    pub fn set_error(&mut self, error: bool) {
        self.error = error;
        if error {
            self.pending = false;
        }
    }

    pub fn on_key(&self, key: KeyEvent) -> Option<ViewAction> {
        match key.code {
            KeyCode::Enter => Some(ViewAction::OpenEditor),
            _ => None,
        }
    }

    fn date_span(&self) -> String {
        match (self.point.date_from, self.point.date_to) {
            (Some(from), Some(to)) => format!(
                "{}  {}-{}",
                short_date(from),
                clock_time(from),
                clock_time(to)
            ),
            (Some(from), None) => format!("{}  {}", short_date(from), clock_time(from)),
            _ => "(no dates)".to_string(),
        }
    }
}

impl View for PointView {
    fn template(&self) -> String {
        let cursor = if self.selected { ">" } else { " " };
        let destination = self
            .destination_name
            .as_deref()
            .unwrap_or("(no destination)");

        let mut line = format!(
            "{} {:<18} {:<11} -> {:<16} EUR {:>5}",
            cursor,
            self.date_span(),
            self.point.point_type.label(),
            destination,
            self.point.base_price,
        );

        if !self.offers.is_empty() {
            let extras: Vec<String> = self
                .offers
                .iter()
                .map(|offer| format!("{} +{}", offer.title, offer.price))
                .collect();
            line.push_str(&format!("  ({})", extras.join(", ")));
        }
        if self.pending {
            line.push_str("  ...");
        }
        if self.error {
            line.push_str("  [failed]");
        }
        line
    }

    fn node(&self) -> Option<NodeId> {
        self.node
    }

    fn set_node(&mut self, node: Option<NodeId>) {
        self.node = node;
    }
}
