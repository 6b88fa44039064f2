//! # Point Row Presenter
//!
//! Manages one point's pair of views: the read row and the inline edit
//! form, with an explicit edit-mode flag deciding which of the two is
//! mounted. Edits bubble up as typed actions; the board decides what to
//! do with them.

use anyhow::Result;
use crossterm::event::KeyEvent;

use crate::board::events::{EditMode, PendingAction, UpdateType, UserAction, ViewAction};
use crate::board::models::{Destination, Offer, OfferGroup, Point};
use crate::board::views::{
    refresh, remove, render, replace, NodeId, PointEditView, PointView, RenderPosition, Surface,
    View,
};

/// What a routed key press turned into
#[derive(Debug)]
pub enum RowEvent {
    None,
    /// The row wants to open its editor; the board must close every
    /// other editor first
    EditorRequested,
    /// A state-changing action for the dispatch choke-point
    Action(PendingAction),
}

pub struct PointPresenter {
    point: Point,
    destinations: Vec<Destination>,
    offer_groups: Vec<OfferGroup>,
    row_view: Option<PointView>,
    edit_view: Option<PointEditView>,
    mode: EditMode,
    list_node: NodeId,
    selected: bool,
}

impl PointPresenter {
    pub fn new(
        list_node: NodeId,
        destinations: Vec<Destination>,
        offer_groups: Vec<OfferGroup>,
        point: Point,
    ) -> Self {
        Self {
            point,
            destinations,
            offer_groups,
            row_view: None,
            edit_view: None,
            mode: EditMode::Default,
            list_node,
            selected: false,
        }
    }

    pub fn point(&self) -> &Point {
        &self.point
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditMode::Editing
    }

    fn destination_name(&self) -> Option<String> {
        let id = self.point.destination.as_deref()?;
        self.destinations
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.name.clone())
    }

    fn selected_offers(&self) -> Vec<Offer> {
        self.offer_groups
            .iter()
            .find(|group| group.point_type == self.point.point_type)
            .map(|group| {
                group
                    .offers
                    .iter()
                    .filter(|offer| self.point.offers.contains(&offer.id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// (Re)build both views from `point` and mount the one matching the
    /// current mode, replacing the previous generation in place.
    pub fn init(&mut self, surface: &mut Surface, point: Point) -> Result<()> {
        self.point = point;

        let prev_row = self.row_view.take();
        let prev_edit = self.edit_view.take();

        let mut row = PointView::new(
            self.point.clone(),
            self.destination_name(),
            self.selected_offers(),
        );
        row.set_selected(self.selected);
        let mut edit = PointEditView::edit(
            &self.point,
            self.destinations.clone(),
            self.offer_groups.clone(),
        );

        match (prev_row, prev_edit) {
            (Some(mut old_row), Some(mut old_edit)) => {
                match self.mode {
                    EditMode::Default => replace(surface, &mut row, &mut old_row)?,
                    EditMode::Editing => replace(surface, &mut edit, &mut old_edit)?,
                }
                remove(surface, &mut old_row);
                remove(surface, &mut old_edit);
            }
            _ => {
                render(surface, &mut row, self.list_node, RenderPosition::BeforeEnd)?;
            }
        }

        self.row_view = Some(row);
        self.edit_view = Some(edit);
        Ok(())
    }

    /// Swap the read row for the edit form. The board is responsible
    /// for resetting every other row first.
    pub fn begin_editing(&mut self, surface: &mut Surface) -> Result<()> {
        if self.mode == EditMode::Editing {
            return Ok(());
        }
        let (Some(row), Some(edit)) = (self.row_view.as_mut(), self.edit_view.as_mut()) else {
            return Ok(());
        };
        replace(surface, edit, row)?;
        self.mode = EditMode::Editing;
        Ok(())
    }

    fn switch_to_row(&mut self, surface: &mut Surface) -> Result<()> {
        let (Some(row), Some(edit)) = (self.row_view.as_mut(), self.edit_view.as_mut()) else {
            return Ok(());
        };
        replace(surface, row, edit)?;
        self.mode = EditMode::Default;
        Ok(())
    }

    /// Force the row back to its read view, discarding form edits
    pub fn reset_view(&mut self, surface: &mut Surface) -> Result<()> {
        if self.mode != EditMode::Editing {
            return Ok(());
        }
        if let Some(edit) = self.edit_view.as_mut() {
            let point = self.point.clone();
            edit.reset(&point);
        }
        self.switch_to_row(surface)
    }

    /// Route a key press to whichever view is active
    pub fn handle_key(&mut self, surface: &mut Surface, key: KeyEvent) -> Result<RowEvent> {
        match self.mode {
            EditMode::Default => {
                let action = self.row_view.as_ref().and_then(|row| row.on_key(key));
                match action {
                    Some(ViewAction::OpenEditor) => Ok(RowEvent::EditorRequested),
                    _ => Ok(RowEvent::None),
                }
            }
            EditMode::Editing => {
                let action = self.edit_view.as_mut().and_then(|edit| edit.on_key(key));
                match action {
                    Some(ViewAction::CloseEditor) => {
                        self.reset_view(surface)?;
                        Ok(RowEvent::None)
                    }
                    Some(ViewAction::Submit(update)) => {
                        // a changed end date or price reorders the list
                        let update_type = if self.point.date_to != update.date_to
                            || self.point.base_price != update.base_price
                        {
                            UpdateType::Minor
                        } else {
                            UpdateType::Patch
                        };
                        self.reset_view(surface)?;
                        Ok(RowEvent::Action(PendingAction {
                            action: UserAction::UpdatePoint,
                            update: update_type,
                            point: update,
                        }))
                    }
                    Some(ViewAction::Delete(point)) => Ok(RowEvent::Action(PendingAction {
                        action: UserAction::DeletePoint,
                        update: UpdateType::Minor,
                        point,
                    })),
                    Some(ViewAction::FieldEdited) => {
                        if let Some(edit) = self.edit_view.as_ref() {
                            refresh(surface, edit)?;
                        }
                        Ok(RowEvent::None)
                    }
                    _ => Ok(RowEvent::None),
                }
            }
        }
    }

    pub fn set_selected(&mut self, surface: &mut Surface, selected: bool) -> Result<()> {
        self.selected = selected;
        if let Some(row) = self.row_view.as_mut() {
            row.set_selected(selected);
            if row.node().is_some() {
                refresh(surface, row)?;
            }
        }
        Ok(())
    }

    /// Disable the active view while its update is in flight
    pub fn set_saving(&mut self, surface: &mut Surface) -> Result<()> {
        match self.mode {
            EditMode::Editing => {
                if let Some(edit) = self.edit_view.as_mut() {
                    edit.set_saving();
                    refresh(surface, edit)?;
                }
            }
            EditMode::Default => {
                if let Some(row) = self.row_view.as_mut() {
                    row.set_pending(true);
                    refresh(surface, row)?;
                }
            }
        }
        Ok(())
    }

    /// Disable the form while its deletion is in flight
    pub fn set_deleting(&mut self, surface: &mut Surface) -> Result<()> {
        match self.mode {
            EditMode::Editing => {
                if let Some(edit) = self.edit_view.as_mut() {
                    edit.set_deleting();
                    refresh(surface, edit)?;
                }
            }
            EditMode::Default => {
                if let Some(row) = self.row_view.as_mut() {
                    row.set_pending(true);
                    refresh(surface, row)?;
                }
            }
        }
        Ok(())
    }

    /// Restore interactivity with an error indication after a rejected
    /// mutation
    pub fn set_aborting(&mut self, surface: &mut Surface) -> Result<()> {
        match self.mode {
            EditMode::Editing => {
                if let Some(edit) = self.edit_view.as_mut() {
                    edit.set_aborting();
                    refresh(surface, edit)?;
                }
            }
            EditMode::Default => {
                if let Some(row) = self.row_view.as_mut() {
                    row.set_error(true);
                    refresh(surface, row)?;
                }
            }
        }
        Ok(())
    }

    /// Remove both views from the surface
    pub fn destroy(&mut self, surface: &mut Surface) {
        if let Some(row) = self.row_view.as_mut() {
            remove(surface, row);
        }
        if let Some(edit) = self.edit_view.as_mut() {
            remove(surface, edit);
        }
        self.row_view = None;
        self.edit_view = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::models::PointType;
    use chrono::{TimeZone, Utc};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn sample_point() -> Point {
        Point {
            id: "1".to_string(),
            point_type: PointType::Flight,
            date_from: Some(Utc.with_ymd_and_hms(2023, 3, 18, 10, 30, 0).unwrap()),
            date_to: Some(Utc.with_ymd_and_hms(2023, 3, 18, 11, 45, 0).unwrap()),
            base_price: 160,
            destination: None,
            offers: Vec::new(),
        }
    }

    fn presenter_on(surface: &mut Surface) -> PointPresenter {
        let list_node = surface.add_region();
        let mut presenter =
            PointPresenter::new(list_node, Vec::new(), Vec::new(), sample_point());
        presenter.init(surface, sample_point()).unwrap();
        presenter
    }

    #[test]
    fn init_should_mount_the_read_row() {
        let mut surface = Surface::new();
        let presenter = presenter_on(&mut surface);

        assert_eq!(presenter.mode(), EditMode::Default);
        let frame = surface.lines().join("\n");
        assert!(frame.contains("flight"));
        assert!(!frame.contains("Edit point"));
    }

    #[test]
    fn begin_editing_should_swap_in_the_form() {
        let mut surface = Surface::new();
        let mut presenter = presenter_on(&mut surface);

        presenter.begin_editing(&mut surface).unwrap();

        assert!(presenter.is_editing());
        assert!(surface.lines().join("\n").contains("Edit point"));
    }

    #[test]
    fn reset_view_should_return_to_the_read_row() {
        let mut surface = Surface::new();
        let mut presenter = presenter_on(&mut surface);
        presenter.begin_editing(&mut surface).unwrap();

        presenter.reset_view(&mut surface).unwrap();

        assert!(!presenter.is_editing());
        assert!(!surface.lines().join("\n").contains("Edit point"));
    }

    #[test]
    fn reset_view_in_default_mode_should_do_nothing() {
        let mut surface = Surface::new();
        let mut presenter = presenter_on(&mut surface);
        let before = surface.lines();

        presenter.reset_view(&mut surface).unwrap();
        assert_eq!(surface.lines(), before);
    }

    #[test]
    fn submit_without_reordering_changes_should_be_a_patch() {
        let mut surface = Surface::new();
        let mut presenter = presenter_on(&mut surface);
        presenter.begin_editing(&mut surface).unwrap();

        // cycling the type changes neither the end date nor the price
        presenter.handle_key(&mut surface, key(KeyCode::Right)).unwrap();
        let event = presenter.handle_key(&mut surface, key(KeyCode::Enter)).unwrap();

        match event {
            RowEvent::Action(pending) => {
                assert_eq!(pending.action, UserAction::UpdatePoint);
                assert_eq!(pending.update, UpdateType::Patch);
                assert_eq!(pending.point.point_type, PointType::CheckIn);
            }
            other => panic!("expected an action, got {other:?}"),
        }
        assert!(!presenter.is_editing());
    }

    #[test]
    fn submit_with_a_price_change_should_be_minor() {
        let mut surface = Surface::new();
        let mut presenter = presenter_on(&mut surface);
        presenter.begin_editing(&mut surface).unwrap();

        // navigate to the price field and append a digit
        for _ in 0..4 {
            presenter.handle_key(&mut surface, key(KeyCode::Tab)).unwrap();
        }
        presenter
            .handle_key(&mut surface, key(KeyCode::Char('0')))
            .unwrap();
        let event = presenter.handle_key(&mut surface, key(KeyCode::Enter)).unwrap();

        match event {
            RowEvent::Action(pending) => {
                assert_eq!(pending.update, UpdateType::Minor);
                assert_eq!(pending.point.base_price, 1600);
            }
            other => panic!("expected an action, got {other:?}"),
        }
    }

    #[test]
    fn delete_from_the_form_should_bubble_a_minor_delete() {
        let mut surface = Surface::new();
        let mut presenter = presenter_on(&mut surface);
        presenter.begin_editing(&mut surface).unwrap();

        let event = presenter
            .handle_key(&mut surface, key(KeyCode::Delete))
            .unwrap();
        match event {
            RowEvent::Action(pending) => {
                assert_eq!(pending.action, UserAction::DeletePoint);
                assert_eq!(pending.update, UpdateType::Minor);
                assert_eq!(pending.point.id, "1");
            }
            other => panic!("expected an action, got {other:?}"),
        }
    }

    #[test]
    fn enter_on_the_read_row_should_request_the_editor() {
        let mut surface = Surface::new();
        let mut presenter = presenter_on(&mut surface);

        let event = presenter
            .handle_key(&mut surface, key(KeyCode::Enter))
            .unwrap();
        assert!(matches!(event, RowEvent::EditorRequested));
        // the presenter itself must not switch yet
        assert!(!presenter.is_editing());
    }

    #[test]
    fn escape_should_discard_edits_and_close_the_form() {
        let mut surface = Surface::new();
        let mut presenter = presenter_on(&mut surface);
        presenter.begin_editing(&mut surface).unwrap();

        presenter.handle_key(&mut surface, key(KeyCode::Right)).unwrap();
        presenter.handle_key(&mut surface, key(KeyCode::Esc)).unwrap();

        assert!(!presenter.is_editing());
        // re-entering shows the saved point again
        presenter.begin_editing(&mut surface).unwrap();
        assert!(surface.lines().join("\n").contains("flight"));
    }

    #[test]
    fn aborting_in_edit_mode_should_show_the_error_state() {
        let mut surface = Surface::new();
        let mut presenter = presenter_on(&mut surface);
        presenter.begin_editing(&mut surface).unwrap();

        presenter.set_deleting(&mut surface).unwrap();
        assert!(surface.lines().join("\n").contains("Deleting..."));

        presenter.set_aborting(&mut surface).unwrap();
        assert!(surface.lines().join("\n").contains("Failed"));
    }

    #[test]
    fn destroy_should_clear_the_surface() {
        let mut surface = Surface::new();
        let mut presenter = presenter_on(&mut surface);

        presenter.destroy(&mut surface);
        assert!(surface.lines().is_empty());
    }

    #[test]
    fn reinit_should_swap_the_row_in_place() {
        let mut surface = Surface::new();
        let mut presenter = presenter_on(&mut surface);

        let updated = Point {
            base_price: 777,
            ..sample_point()
        };
        presenter.init(&mut surface, updated).unwrap();

        let frame = surface.lines().join("\n");
        assert!(frame.contains("777"));
        assert!(!frame.contains("160"));
    }
}
