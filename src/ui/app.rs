//! Ratatui event loop for the promotion editor

use super::error::Result;
use super::events::poll_and_handle;
use super::state::{AppState, Mode};
use super::theme::Theme;
use super::widgets::{HelpBar, LineList, PickerDialog, StatusBar, hints_for};
use crate::catalog::Catalog;
use crate::config::PickerConfig;
use crate::editor::PromoEditor;
use crate::list::ListModel;
use crate::picker::{PageLoaded, SearchRequest, run_search};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Interactive editor bound to a catalog
pub struct EditorApp {
    catalog: Arc<dyn Catalog>,
    runtime: Handle,
    picker: PickerConfig,
    theme: Theme,
}

impl EditorApp {
    /// Fetches are spawned on `runtime`
    #[must_use]
    pub fn new(catalog: Arc<dyn Catalog>, runtime: Handle, picker: PickerConfig) -> Self {
        Self {
            catalog,
            runtime,
            picker,
            theme: Theme::default(),
        }
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Run the editor until the user quits and return the final list
    ///
    /// # Errors
    ///
    /// Returns `UiError::Terminal` on terminal I/O failure.
    pub fn run(&self, editor: PromoEditor) -> Result<ListModel> {
        let mut terminal = Self::setup_terminal()?;
        let result = self.run_loop(&mut terminal, editor);
        Self::cleanup_terminal()?;
        result
    }

    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    fn cleanup_terminal() -> Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        Ok(())
    }

    fn spawn_fetch(&self, request: SearchRequest, results: UnboundedSender<PageLoaded>) {
        debug!(
            ticket = request.ticket.0,
            query = %request.query,
            page = request.page,
            "starting catalog fetch"
        );
        let catalog = Arc::clone(&self.catalog);
        self.runtime.spawn(async move {
            let loaded = run_search(catalog.as_ref(), request).await;
            // receiver gone means the editor already exited
            let _ = results.send(loaded);
        });
    }

    fn run_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        editor: PromoEditor,
    ) -> Result<ListModel> {
        let (tx, mut rx) = unbounded_channel();
        let mut state = AppState::new(editor, &self.picker);

        loop {
            for request in state.take_requests() {
                self.spawn_fetch(request, tx.clone());
            }

            terminal.draw(|frame| self.render(frame, &state))?;

            poll_and_handle(&mut state, POLL_INTERVAL)?;
            if state.should_exit {
                break;
            }

            while let Ok(loaded) = rx.try_recv() {
                state.page_loaded(loaded);
            }
            state.poll_debounce(Instant::now());
            state.expire_messages();
        }

        Ok(state.list().clone())
    }

    fn render(&self, frame: &mut Frame, state: &AppState) {
        let theme = &self.theme;
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),    // Lines
                Constraint::Length(3), // Status bar
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        frame.render_widget(LineList::new(state, theme), layout[0]);

        let messages = state.active_messages();
        let summary = format!("{} line(s)", state.list().len());
        let status = StatusBar::new(&messages, theme).with_summary(Some(&summary));
        frame.render_widget(status, layout[1]);

        let hints = hints_for(&state.mode);
        frame.render_widget(HelpBar::new(&hints, theme), layout[2]);

        if state.mode == Mode::Picker
            && let Some(session) = state.picker()
        {
            let rows = state.picker_rows();
            let area = PickerDialog::centered(frame.area());
            let dialog = PickerDialog::new(session, &rows, state.picker_cursor, &state.picker_query, theme)
                .search_pending(state.search_due.is_some());
            frame.render_widget(dialog, area);
        }
    }
}
