//! # Surface Tree
//!
//! Retained element tree the views mount into. Each element is a block
//! of display lines; the painter flattens the tree depth-first into the
//! final frame. The free functions mirror the mount/swap/detach
//! operations presenters perform when toggling between read and edit
//! views.

use anyhow::{bail, Result};

use super::View;

/// Handle to an element in the surface tree
pub type NodeId = usize;

/// Where to mount a new element relative to its parent's children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPosition {
    /// Before all existing children
    AfterBegin,
    /// After all existing children
    BeforeEnd,
}

#[derive(Debug)]
struct Node {
    lines: Vec<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    freed: bool,
}

/// The element tree for one screen
#[derive(Debug)]
pub struct Surface {
    nodes: Vec<Node>,
}

impl Surface {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                lines: Vec::new(),
                parent: None,
                children: Vec::new(),
                freed: false,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        0
    }

    /// Add an empty container under the root (a mount region)
    pub fn add_region(&mut self) -> NodeId {
        let region = self.alloc(Vec::new());
        self.attach(region, self.root(), RenderPosition::BeforeEnd);
        region
    }

    fn alloc(&mut self, lines: Vec<String>) -> NodeId {
        self.nodes.push(Node {
            lines,
            parent: None,
            children: Vec::new(),
            freed: false,
        });
        self.nodes.len() - 1
    }

    /// Whether the element is reachable from the root
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if self.nodes[current].freed {
                return false;
            }
            match self.nodes[current].parent {
                Some(parent) => current = parent,
                None => return current == self.root(),
            }
        }
    }

    fn attach(&mut self, id: NodeId, parent: NodeId, position: RenderPosition) {
        match position {
            RenderPosition::AfterBegin => self.nodes[parent].children.insert(0, id),
            RenderPosition::BeforeEnd => self.nodes[parent].children.push(id),
        }
        self.nodes[id].parent = Some(parent);
    }

    fn attach_at(&mut self, id: NodeId, parent: NodeId, index: usize) {
        self.nodes[parent].children.insert(index, id);
        self.nodes[id].parent = Some(parent);
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id].parent.take() {
            self.nodes[parent].children.retain(|child| *child != id);
        }
    }

    fn free(&mut self, id: NodeId) {
        self.detach(id);
        let node = &mut self.nodes[id];
        node.lines.clear();
        node.children.clear();
        node.freed = true;
    }

    fn set_lines(&mut self, id: NodeId, lines: Vec<String>) {
        self.nodes[id].lines = lines;
    }

    /// Flatten the tree to display lines, depth-first
    pub fn lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect(self.root(), &mut out);
        out
    }

    fn collect(&self, id: NodeId, out: &mut Vec<String>) {
        let node = &self.nodes[id];
        out.extend(node.lines.iter().cloned());
        for child in &node.children {
            self.collect(*child, out);
        }
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

fn template_lines(view: &dyn View) -> Vec<String> {
    let template = view.template();
    template.lines().map(str::to_string).collect()
}

/// Mount a view's element under `parent`.
///
/// The element is constructed lazily from the view's template on first
/// mount; a detached element from an earlier `replace` is reused as-is.
pub fn render(
    surface: &mut Surface,
    view: &mut dyn View,
    parent: NodeId,
    position: RenderPosition,
) -> Result<()> {
    let id = match view.node() {
        Some(id) => {
            if surface.is_attached(id) {
                bail!("element is already mounted");
            }
            id
        }
        None => {
            let id = surface.alloc(template_lines(view));
            view.set_node(Some(id));
            id
        }
    };
    surface.attach(id, parent, position);
    Ok(())
}

/// Swap one mounted element for another in place.
///
/// Errors if the old element is not mounted or the new one already is.
/// After success the old element is detached (its view keeps the
/// element for remounting) and the new one occupies its former
/// position.
pub fn replace(surface: &mut Surface, new_view: &mut dyn View, old_view: &mut dyn View) -> Result<()> {
    let old_id = match old_view.node() {
        Some(id) if surface.is_attached(id) => id,
        _ => bail!("can't replace an unmounted element"),
    };

    let new_id = match new_view.node() {
        Some(id) => {
            if surface.is_attached(id) {
                bail!("replacement element is already mounted");
            }
            id
        }
        None => {
            let id = surface.alloc(template_lines(new_view));
            new_view.set_node(Some(id));
            id
        }
    };

    let Some(parent) = surface.nodes[old_id].parent else {
        bail!("can't replace the root element");
    };
    let Some(index) = surface.nodes[parent]
        .children
        .iter()
        .position(|child| *child == old_id)
    else {
        bail!("element tree is out of step with its parent");
    };

    surface.detach(old_id);
    surface.attach_at(new_id, parent, index);
    Ok(())
}

/// Detach a view's element and release it.
///
/// Safe to call on a view that was never mounted or was already
/// removed; that case is a no-op.
pub fn remove(surface: &mut Surface, view: &mut dyn View) {
    if let Some(id) = view.node() {
        surface.free(id);
        view.set_node(None);
    }
}

/// Re-derive a mounted element's lines from the view's current template
pub fn refresh(surface: &mut Surface, view: &dyn View) -> Result<()> {
    match view.node() {
        Some(id) => {
            surface.set_lines(id, template_lines(view));
            Ok(())
        }
        None => bail!("can't refresh an element that was never rendered"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TextView {
        text: String,
        node: Option<NodeId>,
    }

    impl TextView {
        fn new(text: &str) -> Self {
            Self {
                text: text.to_string(),
                node: None,
            }
        }
    }

    impl View for TextView {
        fn template(&self) -> String {
            self.text.clone()
        }

        fn node(&self) -> Option<NodeId> {
            self.node
        }

        fn set_node(&mut self, node: Option<NodeId>) {
            self.node = node;
        }
    }

    #[test]
    fn render_should_mount_lazily_at_the_requested_position() {
        let mut surface = Surface::new();
        let region = surface.add_region();

        let mut first = TextView::new("first");
        let mut second = TextView::new("second");
        let mut header = TextView::new("header");

        render(&mut surface, &mut first, region, RenderPosition::BeforeEnd).unwrap();
        render(&mut surface, &mut second, region, RenderPosition::BeforeEnd).unwrap();
        render(&mut surface, &mut header, region, RenderPosition::AfterBegin).unwrap();

        assert_eq!(surface.lines(), ["header", "first", "second"]);
    }

    #[test]
    fn render_should_reject_an_already_mounted_element() {
        let mut surface = Surface::new();
        let region = surface.add_region();
        let mut view = TextView::new("once");

        render(&mut surface, &mut view, region, RenderPosition::BeforeEnd).unwrap();
        let again = render(&mut surface, &mut view, region, RenderPosition::BeforeEnd);
        assert!(again.is_err());
    }

    #[test]
    fn replace_should_swap_in_place() {
        let mut surface = Surface::new();
        let region = surface.add_region();

        let mut before = TextView::new("before");
        let mut after = TextView::new("after");
        let mut footer = TextView::new("footer");

        render(&mut surface, &mut before, region, RenderPosition::BeforeEnd).unwrap();
        render(&mut surface, &mut footer, region, RenderPosition::BeforeEnd).unwrap();

        replace(&mut surface, &mut after, &mut before).unwrap();

        assert_eq!(surface.lines(), ["after", "footer"]);
        assert!(!surface.is_attached(before.node().unwrap()));
        assert!(surface.is_attached(after.node().unwrap()));
    }

    #[test]
    fn replace_should_fail_when_the_old_element_is_unmounted() {
        let mut surface = Surface::new();
        let mut never_mounted = TextView::new("old");
        let mut new_view = TextView::new("new");

        let result = replace(&mut surface, &mut new_view, &mut never_mounted);
        assert!(result.is_err());
    }

    #[test]
    fn replace_should_fail_when_the_new_element_is_already_mounted() {
        let mut surface = Surface::new();
        let region = surface.add_region();
        let mut mounted_a = TextView::new("a");
        let mut mounted_b = TextView::new("b");

        render(&mut surface, &mut mounted_a, region, RenderPosition::BeforeEnd).unwrap();
        render(&mut surface, &mut mounted_b, region, RenderPosition::BeforeEnd).unwrap();

        let result = replace(&mut surface, &mut mounted_a, &mut mounted_b);
        assert!(result.is_err());
    }

    #[test]
    fn detached_element_should_remount_at_the_swap_position() {
        let mut surface = Surface::new();
        let region = surface.add_region();

        let mut row = TextView::new("row");
        let mut editor = TextView::new("editor");
        render(&mut surface, &mut row, region, RenderPosition::BeforeEnd).unwrap();

        replace(&mut surface, &mut editor, &mut row).unwrap();
        assert_eq!(surface.lines(), ["editor"]);

        replace(&mut surface, &mut row, &mut editor).unwrap();
        assert_eq!(surface.lines(), ["row"]);
    }

    #[test]
    fn remove_should_be_a_no_op_on_an_unmounted_view() {
        let mut surface = Surface::new();
        let mut view = TextView::new("ghost");

        remove(&mut surface, &mut view);
        assert!(view.node().is_none());
        assert!(surface.lines().is_empty());
    }

    #[test]
    fn remove_should_detach_and_release_the_element() {
        let mut surface = Surface::new();
        let region = surface.add_region();
        let mut view = TextView::new("gone");

        render(&mut surface, &mut view, region, RenderPosition::BeforeEnd).unwrap();
        remove(&mut surface, &mut view);

        assert!(view.node().is_none());
        assert!(surface.lines().is_empty());

        // a removed view mounts fresh afterwards
        render(&mut surface, &mut view, region, RenderPosition::BeforeEnd).unwrap();
        assert_eq!(surface.lines(), ["gone"]);
    }

    #[test]
    fn refresh_should_rewrite_lines_from_the_current_template() {
        let mut surface = Surface::new();
        let region = surface.add_region();
        let mut view = TextView::new("old text");

        render(&mut surface, &mut view, region, RenderPosition::BeforeEnd).unwrap();
        view.text = "new text".to_string();
        refresh(&mut surface, &view).unwrap();

        assert_eq!(surface.lines(), ["new text"]);
    }

    #[test]
    fn refresh_should_fail_for_a_never_rendered_view() {
        let mut surface = Surface::new();
        let view = TextView::new("nothing");
        assert!(refresh(&mut surface, &view).is_err());
    }

    #[test]
    fn multi_line_templates_should_flatten_in_order() {
        let mut surface = Surface::new();
        let region = surface.add_region();
        let mut view = TextView::new("one\ntwo\nthree");

        render(&mut surface, &mut view, region, RenderPosition::BeforeEnd).unwrap();
        assert_eq!(surface.lines(), ["one", "two", "three"]);
    }
}
