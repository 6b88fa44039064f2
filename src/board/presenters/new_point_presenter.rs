//! # New Point Presenter
//!
//! Drives the transient draft form at the top of the list. Unlike a row
//! presenter there is no prior point: submit bubbles an add action, and
//! cancelling just unmounts the form with no model interaction.

use anyhow::Result;
use crossterm::event::KeyEvent;

use crate::board::events::{PendingAction, UpdateType, UserAction, ViewAction};
use crate::board::models::{Destination, OfferGroup};
use crate::board::views::{refresh, remove, render, NodeId, PointEditView, RenderPosition, Surface};

#[derive(Default)]
pub struct NewPointPresenter {
    edit_view: Option<PointEditView>,
}

impl NewPointPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.edit_view.is_some()
    }

    /// Open a blank form at the top of the list
    pub fn init(
        &mut self,
        surface: &mut Surface,
        list_node: NodeId,
        destinations: Vec<Destination>,
        offer_groups: Vec<OfferGroup>,
    ) -> Result<()> {
        self.destroy(surface);

        let mut form = PointEditView::blank(destinations, offer_groups);
        render(surface, &mut form, list_node, RenderPosition::AfterBegin)?;
        self.edit_view = Some(form);
        Ok(())
    }

    pub fn handle_key(
        &mut self,
        surface: &mut Surface,
        key: KeyEvent,
    ) -> Result<Option<PendingAction>> {
        let Some(form) = self.edit_view.as_mut() else {
            return Ok(None);
        };

        match form.on_key(key) {
            Some(ViewAction::Submit(draft)) => Ok(Some(PendingAction {
                action: UserAction::AddPoint,
                update: UpdateType::Minor,
                point: draft,
            })),
            Some(ViewAction::CloseEditor) => {
                self.destroy(surface);
                Ok(None)
            }
            Some(ViewAction::FieldEdited) => {
                if let Some(form) = self.edit_view.as_ref() {
                    refresh(surface, form)?;
                }
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    pub fn set_saving(&mut self, surface: &mut Surface) -> Result<()> {
        if let Some(form) = self.edit_view.as_mut() {
            form.set_saving();
            refresh(surface, form)?;
        }
        Ok(())
    }

    pub fn set_aborting(&mut self, surface: &mut Surface) -> Result<()> {
        if let Some(form) = self.edit_view.as_mut() {
            form.set_aborting();
            refresh(surface, form)?;
        }
        Ok(())
    }

    /// Unmount the form; safe to call when it is not open
    pub fn destroy(&mut self, surface: &mut Surface) {
        if let Some(form) = self.edit_view.as_mut() {
            remove(surface, form);
        }
        self.edit_view = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn init_should_mount_the_blank_form_at_the_top() {
        let mut surface = Surface::new();
        let list_node = surface.add_region();
        let mut presenter = NewPointPresenter::new();

        presenter
            .init(&mut surface, list_node, Vec::new(), Vec::new())
            .unwrap();

        assert!(presenter.is_open());
        assert!(surface.lines().join("\n").contains("New point"));
    }

    #[test]
    fn submit_should_bubble_a_minor_add_action() {
        let mut surface = Surface::new();
        let list_node = surface.add_region();
        let mut presenter = NewPointPresenter::new();
        presenter
            .init(&mut surface, list_node, Vec::new(), Vec::new())
            .unwrap();

        let pending = presenter
            .handle_key(&mut surface, key(KeyCode::Enter))
            .unwrap()
            .expect("submit should produce an action");

        assert_eq!(pending.action, UserAction::AddPoint);
        assert_eq!(pending.update, UpdateType::Minor);
        assert!(pending.point.id.is_empty());
    }

    #[test]
    fn escape_should_close_without_any_action() {
        let mut surface = Surface::new();
        let list_node = surface.add_region();
        let mut presenter = NewPointPresenter::new();
        presenter
            .init(&mut surface, list_node, Vec::new(), Vec::new())
            .unwrap();

        let pending = presenter
            .handle_key(&mut surface, key(KeyCode::Esc))
            .unwrap();

        assert!(pending.is_none());
        assert!(!presenter.is_open());
        assert!(surface.lines().is_empty());
    }

    #[test]
    fn destroy_should_be_idempotent() {
        let mut surface = Surface::new();
        let mut presenter = NewPointPresenter::new();

        presenter.destroy(&mut surface);
        presenter.destroy(&mut surface);
        assert!(!presenter.is_open());
    }

    #[test]
    fn aborting_should_re_enable_the_form() {
        let mut surface = Surface::new();
        let list_node = surface.add_region();
        let mut presenter = NewPointPresenter::new();
        presenter
            .init(&mut surface, list_node, Vec::new(), Vec::new())
            .unwrap();

        presenter.set_saving(&mut surface).unwrap();
        assert!(surface.lines().join("\n").contains("Saving..."));

        presenter.set_aborting(&mut surface).unwrap();
        assert!(surface.lines().join("\n").contains("Failed"));

        // the form accepts input again
        let pending = presenter
            .handle_key(&mut surface, key(KeyCode::Enter))
            .unwrap();
        assert!(pending.is_some());
    }
}
