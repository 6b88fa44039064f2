//! # Filter Bar View
//!
//! Shows the four date-window filters with the active one marked.

use crate::board::events::FilterType;

use super::{NodeId, View};

#[derive(Debug)]
pub struct FilterView {
    active: FilterType,
    node: Option<NodeId>,
}

impl FilterView {
    pub fn new(active: FilterType) -> Self {
        Self { active, node: None }
    }

    pub fn active(&self) -> FilterType {
        self.active
    }

    pub fn set_active(&mut self, filter: FilterType) {
        self.active = filter;
    }
}

impl View for FilterView {
    fn template(&self) -> String {
        let items: Vec<String> = FilterType::all()
            .into_iter()
            .map(|filter| {
                if filter == self.active {
                    format!("[{}]", filter.label())
                } else {
                    format!(" {} ", filter.label())
                }
            })
            .collect();
        format!("Filters: {}   (f to cycle)", items.join(" "))
    }

    fn node(&self) -> Option<NodeId> {
        self.node
    }

    fn set_node(&mut self, node: Option<NodeId>) {
        self.node = node;
    }
}
