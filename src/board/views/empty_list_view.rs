//! # Empty List View
//!
//! Shown when the active filter leaves the board without points. The
//! message depends on which filter produced the empty list.

use crate::board::events::FilterType;

use super::{NodeId, View};

#[derive(Debug)]
pub struct EmptyListView {
    filter: FilterType,
    node: Option<NodeId>,
}

impl EmptyListView {
    pub fn new(filter: FilterType) -> Self {
        Self { filter, node: None }
    }
}

impl View for EmptyListView {
    fn template(&self) -> String {
        self.filter.empty_message().to_string()
    }

    fn node(&self) -> Option<NodeId> {
        self.node
    }

    fn set_node(&mut self, node: Option<NodeId>) {
        self.node = node;
    }
}
