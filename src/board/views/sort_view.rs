//! # Sort Bar View
//!
//! Shows the active list order and produces the sort-switch intent.

use crossterm::event::{KeyCode, KeyEvent};

use crate::board::events::{SortType, ViewAction};

use super::{NodeId, View};

#[derive(Debug)]
pub struct SortView {
    active: SortType,
    node: Option<NodeId>,
}

impl SortView {
    pub fn new(active: SortType) -> Self {
        Self { active, node: None }
    }

    pub fn active(&self) -> SortType {
        self.active
    }

    /// Translate a key into a sort-switch intent
    pub fn on_key(&self, key: KeyEvent) -> Option<ViewAction> {
        match key.code {
            KeyCode::Char('s') => Some(ViewAction::SortChanged(self.active.toggled())),
            _ => None,
        }
    }
}

impl View for SortView {
    fn template(&self) -> String {
        let mark = |sort: SortType| {
            if sort == self.active {
                format!("[{}]", sort.label())
            } else {
                format!(" {} ", sort.label())
            }
        };
        format!("Sort by: {} {}   (s to switch)", mark(SortType::Day), mark(SortType::Price))
    }

    fn node(&self) -> Option<NodeId> {
        self.node
    }

    fn set_node(&mut self, node: Option<NodeId>) {
        self.node = node;
    }
}
