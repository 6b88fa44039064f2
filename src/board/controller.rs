//! # Application Controller
//!
//! Owns the event loop: polls the input stream, routes key presses to
//! the board, drains queued model notifications into the reconciler,
//! and repaints the surface. I/O streams are injected so tests can run
//! the whole loop against scripted input and a recording render target.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::board::events::UpdateType;
use crate::board::io::{
    EventStream, RenderStream, TerminalEventStream, TerminalRenderStream,
};
use crate::board::models::{FilterModel, TripPointsModel};
use crate::board::presenters::BoardPresenter;
use crate::board::services::{ApiService, IniProfileStore, PointsApi};
use crate::board::views::{refresh, render, FilterView, RenderPosition, Surface, TerminalRenderer};
use crate::cmd_args::CommandLineArgs;
use crate::config;

pub struct AppController<ES: EventStream, RS: RenderStream> {
    board: BoardPresenter,
    filter_view: FilterView,
    points_model: Rc<RefCell<TripPointsModel>>,
    filter_model: Rc<RefCell<FilterModel>>,
    surface: Surface,
    renderer: TerminalRenderer<RS>,
    event_stream: ES,
    should_quit: bool,
}

impl AppController<TerminalEventStream, TerminalRenderStream> {
    /// Wire up the real terminal and the backend named by the profile
    pub fn new(args: &CommandLineArgs) -> Result<Self> {
        let profile_path = config::get_profile_path();
        let store = IniProfileStore::new(profile_path.clone());
        let profile = store
            .get_profile(args.profile())
            .with_context(|| format!("failed to load profiles from '{profile_path}'"))?
            .ok_or_else(|| {
                anyhow!("profile '{}' not found in '{profile_path}'", args.profile())
            })?;
        let api = ApiService::new(&profile)?;

        Self::with_io_streams(
            Box::new(api),
            TerminalEventStream::new(),
            TerminalRenderStream::new(),
        )
    }
}

impl<ES: EventStream, RS: RenderStream> AppController<ES, RS> {
    /// Construct with injected I/O streams and API (dependency
    /// injection seam for tests)
    pub fn with_io_streams(
        api: Box<dyn PointsApi>,
        event_stream: ES,
        render_stream: RS,
    ) -> Result<Self> {
        let renderer = TerminalRenderer::new(render_stream)?;

        let mut surface = Surface::new();
        let controls = surface.add_region();
        let board_region = surface.add_region();

        let points_model = Rc::new(RefCell::new(TripPointsModel::new(api)));
        let filter_model = Rc::new(RefCell::new(FilterModel::new()));
        let mut board =
            BoardPresenter::new(points_model.clone(), filter_model.clone(), board_region);

        let mut filter_view = FilterView::new(filter_model.borrow().filter());
        render(&mut surface, &mut filter_view, controls, RenderPosition::BeforeEnd)?;
        board.init(&mut surface)?;

        Ok(Self {
            board,
            filter_view,
            points_model,
            filter_model,
            surface,
            renderer,
            event_stream,
            should_quit: false,
        })
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn board(&self) -> &BoardPresenter {
        &self.board
    }

    pub fn renderer(&self) -> &TerminalRenderer<RS> {
        &self.renderer
    }

    /// Run until the user quits. The initial load happens first; the
    /// board shows the loading indicator while it is in flight.
    pub async fn run(&mut self) -> Result<()> {
        self.renderer.initialize()?;
        self.renderer.paint(&self.surface)?;

        self.points_model.borrow_mut().init().await;
        self.board.drain_model_events(&mut self.surface)?;
        self.sync_filter_view()?;
        self.renderer.paint(&self.surface)?;

        while !self.should_quit {
            if self.event_stream.poll(Duration::from_millis(100))? {
                match self.event_stream.read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key).await?;
                    }
                    Event::Resize(width, height) => {
                        self.renderer.handle_resize(width, height);
                    }
                    _ => {}
                }
            }
            self.board.drain_model_events(&mut self.surface)?;
            self.sync_filter_view()?;
            self.renderer.paint(&self.surface)?;
        }

        self.renderer.cleanup()
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.board.ui_blocked() {
            tracing::debug!("dropping input while the action gate is closed");
            return Ok(());
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Ok(());
        }

        if !self.board.is_editing() {
            match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return Ok(());
                }
                KeyCode::Char('f') => {
                    let next = self.filter_model.borrow().filter().next();
                    self.filter_model
                        .borrow_mut()
                        .set_filter(UpdateType::Major, next);
                    return Ok(());
                }
                _ => {}
            }
        }

        self.board.handle_key(&mut self.surface, key).await
    }

    /// Keep the filter bar in step with the filter model
    fn sync_filter_view(&mut self) -> Result<()> {
        let active = self.filter_model.borrow().filter();
        if self.filter_view.active() != active {
            self.filter_view.set_active(active);
            refresh(&mut self.surface, &self.filter_view)?;
        }
        Ok(())
    }
}
