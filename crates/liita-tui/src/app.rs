//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.
//!
//! [`AppState`] never performs I/O. State transitions queue [`Request`]s;
//! the loop hands them to background tasks on the tokio runtime and feeds
//! each [`Outcome`] back through [`AppState::apply`]. Search outcomes carry
//! the [`RequestTicket`] they were issued with and are dropped unless that
//! ticket is still the latest.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent},
    opener,
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        detail::{DetailPopup, DetailRows, DetailState},
        filter_bar::{FilterAction, FilterBar, FilterBarState, FIELDS},
        help::HelpPopup,
        option_picker::{OptionPicker, OptionPickerState, PickerAction},
        results_table::{ResultsTable, ResultsTableState},
        status_bar::{Status, StatusBar},
    },
};
use chrono::Local;
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use liita_client::Catalog;
use liita_core::{
    config::Config,
    links::{csv_export_url, deep_link},
    Debouncer, FilterCategory, FilterField, FilterSet, OptionRecord, PredicateRow, QueryError,
    RequestSequencer, RequestTicket, ResultRecord, SearchQuery,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{
    collections::HashMap,
    io,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::{runtime::Handle, sync::mpsc};

// ---------------------------------------------------------------------------
// Focus, requests, outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Filters,
    Results,
    /// Vim-style `:` command line is active.
    Command,
}

/// Work the state machine wants done outside the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Search { ticket: RequestTicket, filters: FilterSet },
    Options(FilterCategory),
    Describe(String),
    /// Hand a URL to the system opener.
    Open(String),
}

/// A finished [`Request`], delivered back to the UI thread.
#[derive(Debug)]
pub enum Outcome {
    Search { ticket: RequestTicket, result: Result<Vec<ResultRecord>, QueryError> },
    Options { category: FilterCategory, options: Vec<OptionRecord> },
    Describe { subject: String, result: Result<Vec<PredicateRow>, QueryError> },
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub filters: FilterBarState,
    pub results: ResultsTableState,
    pub picker: Option<OptionPickerState>,
    pub detail: Option<DetailState>,
    /// Option lists by category, as last loaded.
    pub options: HashMap<FilterCategory, Vec<OptionRecord>>,
    pub status: Status,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    pub quit: bool,
    debounce: Debouncer,
    sequencer: RequestSequencer,
    outbox: Vec<Request>,
}

impl AppState {
    /// Fresh state; queues the option-list loads and, when `initial` is not
    /// empty, a search for it.
    pub fn new(config: Config, theme: Theme, initial: &FilterSet) -> Self {
        let mut state = AppState {
            focus: if initial.is_empty() { Focus::Filters } else { Focus::Results },
            prev_focus: Focus::Results,
            filters: FilterBarState::from_filters(initial),
            results: ResultsTableState::new(config.ui.show_lexicons),
            picker: None,
            detail: None,
            options: HashMap::new(),
            status: Status::Idle,
            theme,
            debounce: Debouncer::new(config.search.debounce()),
            config,
            show_help: false,
            command_bar: CommandBarState::default(),
            quit: false,
            sequencer: RequestSequencer::new(),
            outbox: Vec::new(),
        };
        state.load_options();
        if !initial.is_empty() {
            state.start_search();
        }
        state
    }

    /// Take the queued requests.
    pub fn drain_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.outbox)
    }

    pub fn current_filters(&self) -> FilterSet {
        self.filters.to_filter_set()
    }

    /// True when a text widget has the keyboard, meaning alphabetic keys
    /// should produce characters rather than trigger shortcuts.
    pub fn is_insert_mode(&self) -> bool {
        !self.show_help
            && self.detail.is_none()
            && (self.picker.is_some() || matches!(self.focus, Focus::Filters | Focus::Command))
    }

    // ── Event handling ─────────────────────────────────────────────────────

    pub fn handle(&mut self, event: AppEvent, now: Instant) {
        // Terminal resize is handled automatically by ratatui
        if let AppEvent::Resize(_, _) = event {
            return;
        }

        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            if matches!(event, AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                self.show_help = false;
            }
            return;
        }

        if let Some(picker) = self.picker.as_mut() {
            if event == AppEvent::Quit {
                self.quit = true;
                return;
            }
            match picker.handle(&event) {
                PickerAction::Choose(option) => {
                    let field = picker.field;
                    self.picker = None;
                    self.filters.select(field, Some(option));
                    self.filters_changed(now);
                }
                PickerAction::Cancel => self.picker = None,
                PickerAction::None => {}
            }
            return;
        }

        if let Some(detail) = self.detail.as_mut() {
            if event == AppEvent::Open {
                let subject = detail.subject.clone();
                self.outbox.push(Request::Open(subject));
            } else if detail.handle(&event) {
                self.detail = None;
            }
            return;
        }

        match self.focus {
            Focus::Command => self.handle_command_bar(event),
            Focus::Filters => self.handle_filters(event, now),
            Focus::Results => self.handle_results(event),
        }
    }

    fn handle_command_bar(&mut self, event: AppEvent) {
        match event {
            AppEvent::Quit => self.quit = true,
            AppEvent::Escape => {
                tracing::debug!("command bar cancelled");
                self.command_bar.clear();
                self.focus = self.prev_focus;
            }
            AppEvent::Enter => {
                let input = self.command_bar.input.as_str().to_string();
                match Command::parse(&input) {
                    Ok(cmd) => {
                        tracing::debug!(command = ?cmd, "executing command");
                        self.command_bar.clear();
                        self.focus = self.prev_focus;
                        execute_command(self, cmd);
                    }
                    Err(msg) if msg.is_empty() => {
                        // Empty input, just close
                        self.command_bar.clear();
                        self.focus = self.prev_focus;
                    }
                    Err(msg) => {
                        // Show the error; bar stays open
                        self.command_bar.error = Some(msg);
                    }
                }
            }
            other => self.command_bar.handle(&other),
        }
    }

    fn handle_filters(&mut self, event: AppEvent, now: Instant) {
        match event {
            AppEvent::Quit => self.quit = true,
            AppEvent::Escape => self.focus = Focus::Results,
            AppEvent::FocusNext => {
                if !self.filters.next_field() {
                    self.focus = Focus::Results;
                }
            }
            AppEvent::FocusPrev => {
                if !self.filters.prev_field() {
                    self.focus = Focus::Results;
                }
            }
            AppEvent::Refresh => self.refresh(),
            other => match self.filters.handle(&other) {
                FilterAction::Changed => self.filters_changed(now),
                FilterAction::SearchNow => {
                    self.debounce.cancel();
                    self.start_search();
                }
                FilterAction::OpenPicker { field, seed } => self.open_picker(field, seed),
                FilterAction::None => {}
            },
        }
    }

    fn handle_results(&mut self, event: AppEvent) {
        match event {
            AppEvent::Char('?') => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }
            AppEvent::Char(':') => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }
            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }
            AppEvent::FilterFocus => {
                self.filters.active = FilterField::Lemma;
                self.focus = Focus::Filters;
            }
            AppEvent::FocusNext => {
                self.filters.active = FIELDS[0];
                self.focus = Focus::Filters;
            }
            AppEvent::FocusPrev => {
                self.filters.active = FIELDS[FIELDS.len() - 1];
                self.focus = Focus::Filters;
            }
            AppEvent::Enter => self.open_detail(),
            AppEvent::Open => self.open_selected(),
            AppEvent::Export => self.export(),
            AppEvent::ClearFilters => self.clear_filters(),
            AppEvent::Refresh => self.refresh(),
            other => self.results.handle(&other),
        }
    }

    /// Fire the debounced search once the quiet period has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if self.debounce.fire(now) {
            self.start_search();
        }
    }

    // ── Outcomes ───────────────────────────────────────────────────────────

    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Search { ticket, result } => {
                if !self.sequencer.is_current(ticket) {
                    tracing::warn!(%ticket, "stale search response dropped");
                    return;
                }
                let status = match result {
                    Ok(records) => {
                        tracing::info!(%ticket, rows = records.len(), "search finished");
                        let status = Status::Results { count: records.len(), at: Local::now() };
                        self.results.set_records(records);
                        status
                    }
                    Err(err) => {
                        tracing::error!(%ticket, error = %err, "search failed");
                        self.results.set_records(Vec::new());
                        Status::Failed(err.to_string())
                    }
                };
                // An edit made since this search still owes a search of its own.
                if !self.debounce.is_pending() {
                    self.status = status;
                }
            }
            Outcome::Options { category, options } => {
                tracing::debug!(%category, count = options.len(), "options loaded");
                if let Some(picker) = self.picker.as_mut().filter(|p| p.category == category) {
                    picker.set_options(options.clone());
                }
                self.options.insert(category, options);
            }
            Outcome::Describe { subject, result } => {
                let Some(detail) = self.detail.as_mut().filter(|d| d.subject == subject) else {
                    return;
                };
                detail.rows = match result {
                    Ok(rows) => DetailRows::Loaded(rows),
                    Err(err) => {
                        tracing::error!(%subject, error = %err, "describe failed");
                        DetailRows::Failed(err.to_string())
                    }
                };
            }
        }
    }

    // ── Transitions ────────────────────────────────────────────────────────

    fn filters_changed(&mut self, now: Instant) {
        if self.current_filters().is_empty() {
            self.debounce.cancel();
            self.start_search();
        } else {
            self.debounce.touch(now);
            self.status = Status::Pending;
        }
    }

    /// Issue a search for the current filters. An empty filter set clears
    /// the results instead and makes any in-flight search stale.
    fn start_search(&mut self) {
        let filters = self.current_filters();
        if filters.is_empty() {
            self.sequencer.invalidate();
            self.results.set_records(Vec::new());
            self.status = Status::Idle;
            return;
        }
        let ticket = self.sequencer.issue();
        tracing::debug!(%ticket, filters = ?filters, "search issued");
        self.status = Status::Searching(ticket);
        self.outbox.push(Request::Search { ticket, filters });
    }

    fn load_options(&mut self) {
        self.outbox.extend(FilterCategory::ALL.into_iter().map(Request::Options));
    }

    fn open_picker(&mut self, field: FilterField, seed: Option<char>) {
        let Some(category) = field.category() else {
            return;
        };
        // An empty list usually means the earlier load failed; ask again.
        let cached = self.options.get(&category).filter(|o| !o.is_empty()).cloned();
        if cached.is_none() {
            self.outbox.push(Request::Options(category));
        }
        let mut picker = OptionPickerState::new(field, category, cached);
        if let Some(c) = seed {
            picker.handle(&AppEvent::Char(c));
        }
        tracing::debug!(%category, "picker opened");
        self.picker = Some(picker);
    }

    fn open_detail(&mut self) {
        let Some(record) = self.results.selected() else {
            return;
        };
        let detail = DetailState::new(record.subject.clone(), record.wrs.clone());
        self.outbox.push(Request::Describe(detail.subject.clone()));
        self.detail = Some(detail);
    }

    pub fn clear_filters(&mut self) {
        tracing::debug!("filters cleared");
        self.filters.clear();
        self.debounce.cancel();
        self.start_search();
    }

    pub fn refresh(&mut self) {
        self.options.clear();
        self.load_options();
        self.debounce.cancel();
        self.start_search();
    }

    /// Show the CSV export URL of the current search and open it.
    pub fn export(&mut self) {
        let filters = self.current_filters();
        if filters.is_empty() {
            self.status = Status::Message("nothing to export: set a filter first".to_string());
            return;
        }
        let query = SearchQuery::new(&filters).with_limit(self.config.search.limit()).build();
        match csv_export_url(&self.config.endpoint.url, &query) {
            Ok(url) => {
                self.status = Status::Message(format!("export: {url}"));
                self.outbox.push(Request::Open(url.to_string()));
            }
            Err(err) => self.status = Status::Failed(format!("bad endpoint url: {err}")),
        }
    }

    /// Show the web interface link for the current filters.
    pub fn show_link(&mut self) {
        match deep_link(&self.config.ui.link_base, &self.current_filters()) {
            Ok(url) => self.status = Status::Message(url.to_string()),
            Err(err) => self.status = Status::Failed(format!("bad link base: {err}")),
        }
    }

    pub fn open_selected(&mut self) {
        if let Some(record) = self.results.selected() {
            self.outbox.push(Request::Open(record.subject.clone()));
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
    catalog: Arc<Catalog>,
    runtime: Handle,
    tx: mpsc::UnboundedSender<Outcome>,
    rx: mpsc::UnboundedReceiver<Outcome>,
}

impl App {
    pub fn new(config: Config, theme: Theme, catalog: Catalog, runtime: Handle, initial: &FilterSet) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        App {
            state: AppState::new(config, theme, initial),
            catalog: Arc::new(catalog),
            runtime,
            tx,
            rx,
        }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            for request in self.state.drain_requests() {
                self.dispatch(request);
            }
            while let Ok(outcome) = self.rx.try_recv() {
                self.state.apply(outcome);
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping when a text widget is focused
                        let app_event = if self.state.is_insert_mode() {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.state.handle(ev, Instant::now());
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.state.handle(ev, Instant::now());
                        }
                    }
                }
            }

            self.state.tick(Instant::now());
        }
        Ok(())
    }

    fn dispatch(&mut self, request: Request) {
        let catalog = Arc::clone(&self.catalog);
        let tx = self.tx.clone();
        match request {
            Request::Search { ticket, filters } => {
                tracing::info!(%ticket, "search dispatched");
                self.runtime.spawn(async move {
                    let result = catalog.try_search(&filters).await;
                    let _ = tx.send(Outcome::Search { ticket, result });
                });
            }
            Request::Options(category) => {
                self.runtime.spawn(async move {
                    let options = catalog.options(category).await;
                    let _ = tx.send(Outcome::Options { category, options });
                });
            }
            Request::Describe(subject) => {
                self.runtime.spawn(async move {
                    let result = catalog.try_describe(&subject).await;
                    let _ = tx.send(Outcome::Describe { subject, result });
                });
            }
            Request::Open(url) => {
                if let Err(err) = opener::open_url(&url, self.state.config.ui.opener.as_deref()) {
                    tracing::warn!(%url, error = %err, "opener failed");
                    self.state.status = Status::Failed(format!("could not open {url}: {err}"));
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line status bar | 3-line filter bar | results
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(3), Constraint::Fill(1)])
        .split(area);

    frame.render_widget(
        StatusBar::new(
            &state.status,
            &state.config.endpoint.url,
            &state.config.ui.timestamp_format,
            &state.theme,
        ),
        vert[0],
    );
    let filter_bar = FilterBar::new(&state.filters, state.focus == Focus::Filters, &state.theme);
    let lemma_cursor = filter_bar.cursor_position(vert[1]);
    frame.render_widget(filter_bar, vert[1]);
    frame.render_widget(
        ResultsTable::new(
            &state.results,
            state.focus == Focus::Results,
            &state.theme,
            state.status.empty_hint(),
        ),
        vert[2],
    );

    if let Some(detail) = &state.detail {
        frame.render_widget(DetailPopup::new(detail, &state.theme), area);
    }
    if let Some(picker) = &state.picker {
        let popup = OptionPicker::new(picker, &state.theme);
        let (cx, cy) = popup.cursor_position(area);
        frame.render_widget(popup, area);
        frame.set_cursor_position((cx, cy));
    }
    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom() - 1, height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    // Position the terminal cursor in the lemma box while it is being edited
    if state.is_insert_mode()
        && state.picker.is_none()
        && state.focus == Focus::Filters
        && state.filters.active == FilterField::Lemma
    {
        frame.set_cursor_position(lemma_cursor);
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
