//! # View Layer
//!
//! Views turn data into a text template and own at most one element in
//! the surface tree, constructed lazily on first mount. Interactive
//! views also translate key input into typed [`ViewAction`] intents;
//! they never touch models directly.
//!
//! [`ViewAction`]: crate::board::events::ViewAction

pub mod empty_list_view;
pub mod filter_view;
pub mod list_view;
pub mod loading_view;
pub mod point_edit_view;
pub mod point_view;
pub mod renderer;
pub mod sort_view;
pub mod surface;

pub use empty_list_view::EmptyListView;
pub use filter_view::FilterView;
pub use list_view::ListView;
pub use loading_view::LoadingView;
pub use point_edit_view::PointEditView;
pub use point_view::PointView;
pub use renderer::TerminalRenderer;
pub use sort_view::SortView;
pub use surface::{refresh, remove, render, replace, NodeId, RenderPosition, Surface};

/// A component owning one lazily-constructed element
pub trait View {
    /// The element content: one display row per line
    fn template(&self) -> String;

    /// The element, if one has been constructed
    fn node(&self) -> Option<NodeId>;

    /// Adopt or release the element handle
    fn set_node(&mut self, node: Option<NodeId>);
}
