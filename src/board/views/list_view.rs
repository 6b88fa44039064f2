//! # Point List View
//!
//! Container element the point rows mount into. Renders no content of
//! its own.

use super::{NodeId, View};

#[derive(Debug, Default)]
pub struct ListView {
    node: Option<NodeId>,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl View for ListView {
    fn template(&self) -> String {
        String::new()
    }

    fn node(&self) -> Option<NodeId> {
        self.node
    }

    fn set_node(&mut self, node: Option<NodeId>) {
        self.node = node;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_view_should_render_no_lines_of_its_own() {
        assert!(ListView::new().template().is_empty());
    }
}
