//! # Board Presenter
//!
//! Top-level orchestrator for the point list: derives the display list
//! from the models (filter, then sort), owns one row presenter per
//! point plus the new-point form, funnels every mutation through a
//! single dispatch choke-point guarded by the UI gate, and reconciles
//! the board on model notifications.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use anyhow::{anyhow, Result};
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent};

use crate::board::events::{
    FilterType, ModelEvent, PendingAction, SortType, UpdateType, UserAction, ViewAction,
};
use crate::board::models::{Destination, FilterModel, OfferGroup, Point, TripPointsModel};
use crate::board::ui_blocker::UiBlocker;
use crate::board::utils::{filter_points, sort_days, sort_prices};
use crate::board::views::{
    remove, render, EmptyListView, ListView, LoadingView, NodeId, RenderPosition, SortView,
    Surface, View,
};

use super::new_point_presenter::NewPointPresenter;
use super::point_presenter::{PointPresenter, RowEvent};

pub struct BoardPresenter {
    points_model: Rc<RefCell<TripPointsModel>>,
    filter_model: Rc<RefCell<FilterModel>>,
    pending_events: Rc<RefCell<VecDeque<ModelEvent>>>,
    container: NodeId,
    list_view: ListView,
    loading_view: LoadingView,
    sort_view: Option<SortView>,
    empty_view: Option<EmptyListView>,
    presenters: HashMap<String, PointPresenter>,
    row_order: Vec<String>,
    new_point: NewPointPresenter,
    ui_blocker: UiBlocker,
    is_loading: bool,
    sort_type: SortType,
    filter_type: FilterType,
    selected: usize,
}

impl BoardPresenter {
    /// Wires itself as an observer of both models; their notifications
    /// queue up until [`drain_model_events`] runs them.
    ///
    /// [`drain_model_events`]: BoardPresenter::drain_model_events
    pub fn new(
        points_model: Rc<RefCell<TripPointsModel>>,
        filter_model: Rc<RefCell<FilterModel>>,
        container: NodeId,
    ) -> Self {
        let pending_events = Rc::new(RefCell::new(VecDeque::new()));

        let sink = pending_events.clone();
        points_model
            .borrow_mut()
            .add_observer(Box::new(move |event| {
                sink.borrow_mut().push_back(event.clone());
            }));
        let sink = pending_events.clone();
        filter_model
            .borrow_mut()
            .add_observer(Box::new(move |event| {
                sink.borrow_mut().push_back(event.clone());
            }));

        Self {
            points_model,
            filter_model,
            pending_events,
            container,
            list_view: ListView::new(),
            loading_view: LoadingView::new(),
            sort_view: None,
            empty_view: None,
            presenters: HashMap::new(),
            row_order: Vec::new(),
            new_point: NewPointPresenter::new(),
            ui_blocker: UiBlocker::default(),
            is_loading: true,
            sort_type: SortType::Day,
            filter_type: FilterType::Everything,
            selected: 0,
        }
    }

    /// Mount the list container and the loading indicator
    pub fn init(&mut self, surface: &mut Surface) -> Result<()> {
        render(
            surface,
            &mut self.list_view,
            self.container,
            RenderPosition::BeforeEnd,
        )?;
        if self.is_loading {
            let list_node = self.list_node()?;
            render(
                surface,
                &mut self.loading_view,
                list_node,
                RenderPosition::AfterBegin,
            )?;
        }
        Ok(())
    }

    fn list_node(&self) -> Result<NodeId> {
        self.list_view
            .node()
            .ok_or_else(|| anyhow!("point list is not mounted"))
    }

    /// The display list: the model's points filtered by the active
    /// filter, then ordered by the active sort. Pure and recomputed on
    /// every call.
    pub fn points(&mut self) -> Vec<Point> {
        self.filter_type = self.filter_model.borrow().filter();
        let points = self.points_model.borrow().points().to_vec();
        let mut visible = filter_points(&points, self.filter_type, Utc::now());
        match self.sort_type {
            SortType::Day => visible.sort_by(sort_days),
            SortType::Price => visible.sort_by(sort_prices),
        }
        visible
    }

    pub fn sort_type(&self) -> SortType {
        self.sort_type
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn selected_point_id(&self) -> Option<&str> {
        self.row_order.get(self.selected).map(String::as_str)
    }

    fn editing_row_id(&self) -> Option<String> {
        self.presenters
            .iter()
            .find(|(_, presenter)| presenter.is_editing())
            .map(|(id, _)| id.clone())
    }

    /// Whether any editor (row or new-point form) is open
    pub fn is_editing(&self) -> bool {
        self.new_point.is_open() || self.editing_row_id().is_some()
    }

    /// Whether the action gate is still dropping input
    pub fn ui_blocked(&self) -> bool {
        self.ui_blocker.is_blocked()
    }

    fn reference_data(&self) -> (Vec<Destination>, Vec<OfferGroup>) {
        let model = self.points_model.borrow();
        (model.destinations().to_vec(), model.offers().to_vec())
    }

    fn render_point(
        &mut self,
        surface: &mut Surface,
        point: &Point,
        destinations: &[Destination],
        offer_groups: &[OfferGroup],
    ) -> Result<()> {
        let list_node = self.list_node()?;
        let mut presenter = PointPresenter::new(
            list_node,
            destinations.to_vec(),
            offer_groups.to_vec(),
            point.clone(),
        );
        presenter.init(surface, point.clone())?;
        self.presenters.insert(point.id.clone(), presenter);
        Ok(())
    }

    fn render_sort(&mut self, surface: &mut Surface) -> Result<()> {
        let mut sort_view = SortView::new(self.sort_type);
        render(surface, &mut sort_view, self.container, RenderPosition::AfterBegin)?;
        self.sort_view = Some(sort_view);
        Ok(())
    }

    fn render_empty_list(&mut self, surface: &mut Surface) -> Result<()> {
        let mut empty_view = EmptyListView::new(self.filter_type);
        render(surface, &mut empty_view, self.container, RenderPosition::BeforeEnd)?;
        self.empty_view = Some(empty_view);
        Ok(())
    }

    /// Decide what the board shows: loading indicator, the
    /// filter-specific empty state, or the sort bar with one row per
    /// point.
    pub fn render_board(&mut self, surface: &mut Surface) -> Result<()> {
        if self.is_loading {
            if self.loading_view.node().is_none() {
                let list_node = self.list_node()?;
                render(
                    surface,
                    &mut self.loading_view,
                    list_node,
                    RenderPosition::AfterBegin,
                )?;
            }
            return Ok(());
        }

        let points = self.points();
        if points.is_empty() {
            self.row_order.clear();
            return self.render_empty_list(surface);
        }

        self.render_sort(surface)?;

        let (destinations, offer_groups) = self.reference_data();
        for point in &points {
            self.render_point(surface, point, &destinations, &offer_groups)?;
        }
        self.row_order = points.iter().map(|point| point.id.clone()).collect();
        self.selected = self.selected.min(self.row_order.len() - 1);
        self.apply_selection(surface, true)?;
        Ok(())
    }

    fn apply_selection(&mut self, surface: &mut Surface, selected: bool) -> Result<()> {
        if let Some(id) = self.row_order.get(self.selected).cloned() {
            if let Some(presenter) = self.presenters.get_mut(&id) {
                presenter.set_selected(surface, selected)?;
            }
        }
        Ok(())
    }

    /// Tear down every rendered piece except the list container
    pub fn clear_board(&mut self, surface: &mut Surface, reset_sort: bool) {
        self.new_point.destroy(surface);
        for presenter in self.presenters.values_mut() {
            presenter.destroy(surface);
        }
        self.presenters.clear();
        self.row_order.clear();

        if let Some(mut sort_view) = self.sort_view.take() {
            remove(surface, &mut sort_view);
        }
        if let Some(mut empty_view) = self.empty_view.take() {
            remove(surface, &mut empty_view);
        }
        remove(surface, &mut self.loading_view);

        if reset_sort {
            self.sort_type = SortType::Day;
        }
    }

    /// Run queued model notifications through the reconciler
    pub fn drain_model_events(&mut self, surface: &mut Surface) -> Result<()> {
        loop {
            let next = self.pending_events.borrow_mut().pop_front();
            match next {
                Some(event) => self.handle_model_event(surface, &event)?,
                None => return Ok(()),
            }
        }
    }

    /// Reconcile the board with one model notification
    pub fn handle_model_event(&mut self, surface: &mut Surface, event: &ModelEvent) -> Result<()> {
        tracing::debug!("model event: {event:?}");
        match event.update_type() {
            UpdateType::Patch => {
                if let ModelEvent::PointsChanged {
                    point: Some(point), ..
                } = event
                {
                    if let Some(presenter) = self.presenters.get_mut(&point.id) {
                        presenter.init(surface, point.clone())?;
                    }
                }
                Ok(())
            }
            UpdateType::Minor => {
                self.clear_board(surface, false);
                self.render_board(surface)
            }
            UpdateType::Major => {
                self.clear_board(surface, true);
                self.render_board(surface)
            }
            UpdateType::Init => {
                self.is_loading = false;
                remove(surface, &mut self.loading_view);
                self.render_board(surface)
            }
        }
    }

    /// Close every open editor: the single-editor invariant
    pub fn handle_mode_change(&mut self, surface: &mut Surface) -> Result<()> {
        self.new_point.destroy(surface);
        for presenter in self.presenters.values_mut() {
            presenter.reset_view(surface)?;
        }
        Ok(())
    }

    /// Re-sort the board; a no-op when the order is already active
    pub fn handle_sort_type_change(&mut self, surface: &mut Surface, sort: SortType) -> Result<()> {
        if self.sort_type == sort {
            return Ok(());
        }
        self.sort_type = sort;
        self.clear_board(surface, false);
        self.render_board(surface)
    }

    /// Open the new-point flow: day order, no filter, blank form on top
    pub fn create_point(&mut self, surface: &mut Surface) -> Result<()> {
        self.sort_type = SortType::Day;
        self.filter_model
            .borrow_mut()
            .set_filter(UpdateType::Major, FilterType::Everything);
        self.drain_model_events(surface)?;

        let (destinations, offer_groups) = self.reference_data();
        let list_node = self.list_node()?;
        self.new_point
            .init(surface, list_node, destinations, offer_groups)
    }

    fn move_selection(&mut self, surface: &mut Surface, delta: isize) -> Result<()> {
        if self.row_order.is_empty() {
            return Ok(());
        }
        let last = self.row_order.len() as isize - 1;
        let target = (self.selected as isize + delta).clamp(0, last) as usize;
        if target == self.selected {
            return Ok(());
        }
        self.apply_selection(surface, false)?;
        self.selected = target;
        self.apply_selection(surface, true)
    }

    /// Route a key press: an open editor first, then list navigation
    pub async fn handle_key(&mut self, surface: &mut Surface, key: KeyEvent) -> Result<()> {
        if self.is_loading {
            return Ok(());
        }

        if self.new_point.is_open() {
            if let Some(pending) = self.new_point.handle_key(surface, key)? {
                self.handle_view_action(surface, pending).await?;
            }
            return Ok(());
        }

        if let Some(id) = self.editing_row_id() {
            let row_event = match self.presenters.get_mut(&id) {
                Some(presenter) => presenter.handle_key(surface, key)?,
                None => RowEvent::None,
            };
            if let RowEvent::Action(pending) = row_event {
                self.handle_view_action(surface, pending).await?;
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(surface, -1)?,
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(surface, 1)?,
            KeyCode::Enter => {
                if let Some(id) = self.row_order.get(self.selected).cloned() {
                    let row_event = match self.presenters.get_mut(&id) {
                        Some(presenter) => presenter.handle_key(surface, key)?,
                        None => RowEvent::None,
                    };
                    if matches!(row_event, RowEvent::EditorRequested) {
                        self.handle_mode_change(surface)?;
                        if let Some(presenter) = self.presenters.get_mut(&id) {
                            presenter.begin_editing(surface)?;
                        }
                    }
                }
            }
            KeyCode::Char('n') => self.create_point(surface)?,
            KeyCode::Char('s') => {
                let requested = self.sort_view.as_ref().and_then(|view| view.on_key(key));
                if let Some(ViewAction::SortChanged(sort)) = requested {
                    self.handle_sort_type_change(surface, sort)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Single choke-point for every mutation: gate the UI, flag the
    /// affected row or form, await the model, flag the failure.
    pub async fn handle_view_action(
        &mut self,
        surface: &mut Surface,
        pending: PendingAction,
    ) -> Result<()> {
        tracing::debug!(
            "dispatching {:?} ({:?}) for '{}'",
            pending.action,
            pending.update,
            pending.point.id
        );
        self.ui_blocker.block();

        match pending.action {
            UserAction::UpdatePoint => {
                if let Some(presenter) = self.presenters.get_mut(&pending.point.id) {
                    presenter.set_saving(surface)?;
                }
                let result = self
                    .points_model
                    .borrow_mut()
                    .update_point(pending.update, pending.point.clone())
                    .await;
                if let Err(error) = result {
                    tracing::warn!("update rejected: {error:#}");
                    if let Some(presenter) = self.presenters.get_mut(&pending.point.id) {
                        presenter.set_aborting(surface)?;
                    }
                }
            }
            UserAction::AddPoint => {
                self.new_point.set_saving(surface)?;
                let result = self
                    .points_model
                    .borrow_mut()
                    .add_point(pending.update, pending.point.clone())
                    .await;
                if let Err(error) = result {
                    tracing::warn!("add rejected: {error:#}");
                    self.new_point.set_aborting(surface)?;
                }
            }
            UserAction::DeletePoint => {
                if let Some(presenter) = self.presenters.get_mut(&pending.point.id) {
                    presenter.set_deleting(surface)?;
                }
                let result = self
                    .points_model
                    .borrow_mut()
                    .delete_point(pending.update, pending.point.clone())
                    .await;
                if let Err(error) = result {
                    tracing::warn!("delete rejected: {error:#}");
                    if let Some(presenter) = self.presenters.get_mut(&pending.point.id) {
                        presenter.set_aborting(surface)?;
                    }
                }
            }
        }

        self.ui_blocker.unblock().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::testing::{sample_point, StubApi};

    fn setup(api: StubApi) -> (Surface, BoardPresenter, Rc<RefCell<TripPointsModel>>) {
        let mut surface = Surface::new();
        let container = surface.add_region();
        let points_model = Rc::new(RefCell::new(TripPointsModel::new(Box::new(api))));
        let filter_model = Rc::new(RefCell::new(FilterModel::new()));
        let mut board = BoardPresenter::new(points_model.clone(), filter_model, container);
        board.init(&mut surface).unwrap();
        (surface, board, points_model)
    }

    async fn setup_loaded(
        api: StubApi,
    ) -> (Surface, BoardPresenter, Rc<RefCell<TripPointsModel>>) {
        let (mut surface, mut board, points_model) = setup(api);
        points_model.borrow_mut().init().await;
        board.drain_model_events(&mut surface).unwrap();
        (surface, board, points_model)
    }

    #[test]
    fn board_should_start_with_the_loading_indicator() {
        let (surface, board, _) = setup(StubApi::new(Vec::new()));
        assert!(board.is_loading());
        assert_eq!(surface.lines(), ["Loading..."]);
    }

    #[tokio::test]
    async fn init_event_should_swap_loading_for_sort_and_rows() {
        let api = StubApi::new(vec![sample_point("1", 100, 10), sample_point("2", 200, 12)]);
        let (surface, board, _) = setup_loaded(api).await;

        assert!(!board.is_loading());
        let frame = surface.lines().join("\n");
        assert!(!frame.contains("Loading..."));
        assert!(frame.contains("Sort by:"));
        assert_eq!(
            surface
                .lines()
                .iter()
                .filter(|line| line.contains("Geneva"))
                .count(),
            2
        );
    }

    #[tokio::test]
    async fn empty_everything_filter_should_show_the_create_hint_without_sort() {
        let (surface, _, _) = setup_loaded(StubApi::new(Vec::new())).await;

        let frame = surface.lines().join("\n");
        assert!(frame.contains("Click New Event to create your first point"));
        assert!(!frame.contains("Sort by:"));
    }

    #[tokio::test]
    async fn day_sort_should_order_rows_by_end_date() {
        let api = StubApi::new(vec![sample_point("late", 1, 20), sample_point("early", 2, 10)]);
        let (_surface, mut board, _) = setup_loaded(api).await;

        assert_eq!(board.points()[0].id, "early");
        assert_eq!(board.points()[1].id, "late");
    }

    #[tokio::test]
    async fn price_sort_should_order_rows_descending() {
        let api = StubApi::new(vec![sample_point("cheap", 10, 10), sample_point("dear", 900, 12)]);
        let (mut surface, mut board, _) = setup_loaded(api).await;

        board
            .handle_sort_type_change(&mut surface, SortType::Price)
            .unwrap();
        assert_eq!(board.points()[0].id, "dear");
    }

    #[tokio::test]
    async fn repeating_the_active_sort_should_not_rerender() {
        let api = StubApi::new(vec![sample_point("1", 100, 10)]);
        let (mut surface, mut board, _) = setup_loaded(api).await;
        let before = surface.lines();

        board
            .handle_sort_type_change(&mut surface, SortType::Day)
            .unwrap();
        assert_eq!(surface.lines(), before);
    }

    #[tokio::test]
    async fn only_one_row_should_ever_be_editing() {
        let api = StubApi::new(vec![sample_point("1", 100, 10), sample_point("2", 200, 12)]);
        let (mut surface, mut board, _) = setup_loaded(api).await;

        let enter = KeyEvent::new(KeyCode::Enter, crossterm::event::KeyModifiers::NONE);
        board.handle_key(&mut surface, enter).await.unwrap();
        assert!(board.is_editing());

        // leave the editor, move to the other row, edit it
        let esc = KeyEvent::new(KeyCode::Esc, crossterm::event::KeyModifiers::NONE);
        board.handle_key(&mut surface, esc).await.unwrap();
        let down = KeyEvent::new(KeyCode::Down, crossterm::event::KeyModifiers::NONE);
        board.handle_key(&mut surface, down).await.unwrap();
        board.handle_key(&mut surface, enter).await.unwrap();

        let editing: Vec<&String> = board
            .presenters
            .iter()
            .filter(|(_, presenter)| presenter.is_editing())
            .map(|(id, _)| id)
            .collect();
        assert_eq!(editing.len(), 1);
    }

    #[tokio::test]
    async fn mode_change_should_reset_every_row_and_close_the_form() {
        let api = StubApi::new(vec![sample_point("1", 100, 10)]);
        let (mut surface, mut board, _) = setup_loaded(api).await;

        let enter = KeyEvent::new(KeyCode::Enter, crossterm::event::KeyModifiers::NONE);
        board.handle_key(&mut surface, enter).await.unwrap();
        assert!(board.is_editing());

        board.handle_mode_change(&mut surface).unwrap();
        assert!(!board.is_editing());
    }

    #[tokio::test]
    async fn create_point_should_force_day_sort_and_everything_filter() {
        let api = StubApi::new(vec![sample_point("1", 100, 10)]);
        let (mut surface, mut board, _) = setup_loaded(api).await;
        board
            .handle_sort_type_change(&mut surface, SortType::Price)
            .unwrap();

        board.create_point(&mut surface).unwrap();

        assert_eq!(board.sort_type(), SortType::Day);
        assert_eq!(board.filter_type, FilterType::Everything);
        assert!(board.new_point.is_open());
        assert!(surface.lines().join("\n").contains("New point"));
    }

    #[tokio::test]
    async fn rejected_update_should_mark_the_row_and_keep_data() {
        let api = StubApi::failing_updates(vec![sample_point("1", 100, 10)]);
        let (mut surface, mut board, points_model) = setup_loaded(api).await;

        let pending = PendingAction {
            action: UserAction::UpdatePoint,
            update: UpdateType::Patch,
            point: sample_point("1", 999, 10),
        };
        tokio::time::pause();
        board.handle_view_action(&mut surface, pending).await.unwrap();

        // data unchanged, row restored with the failure marker
        assert_eq!(points_model.borrow().points()[0].base_price, 100);
        assert!(surface.lines().join("\n").contains("[failed]"));
    }

    #[tokio::test]
    async fn successful_delete_should_drop_the_row() {
        let api = StubApi::new(vec![sample_point("1", 100, 10), sample_point("2", 200, 12)]);
        let (mut surface, mut board, _) = setup_loaded(api).await;

        let pending = PendingAction {
            action: UserAction::DeletePoint,
            update: UpdateType::Minor,
            point: sample_point("1", 100, 10),
        };
        tokio::time::pause();
        board.handle_view_action(&mut surface, pending).await.unwrap();
        board.drain_model_events(&mut surface).unwrap();

        assert_eq!(board.row_order, vec!["2".to_string()]);
    }

    #[tokio::test]
    async fn dispatch_should_close_the_gate_for_the_minimum_window() {
        let api = StubApi::new(vec![sample_point("1", 100, 10)]);
        let (mut surface, mut board, _) = setup_loaded(api).await;

        let pending = PendingAction {
            action: UserAction::UpdatePoint,
            update: UpdateType::Patch,
            point: sample_point("1", 101, 10),
        };
        tokio::time::pause();
        let started = tokio::time::Instant::now();
        board.handle_view_action(&mut surface, pending).await.unwrap();
        assert!(started.elapsed() >= std::time::Duration::from_millis(350));
        assert!(!board.ui_blocked());
    }
}
