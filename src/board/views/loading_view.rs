//! # Loading View
//!
//! Placeholder shown while the initial load is in flight.

use super::{NodeId, View};

#[derive(Debug, Default)]
pub struct LoadingView {
    node: Option<NodeId>,
}

impl LoadingView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl View for LoadingView {
    fn template(&self) -> String {
        "Loading...".to_string()
    }

    fn node(&self) -> Option<NodeId> {
        self.node
    }

    fn set_node(&mut self, node: Option<NodeId>) {
        self.node = node;
    }
}
