//! Interactive dashboard renderer.
//!
//! The renderer owns UI state (selected city, last notice) and nothing else.
//! Data comes from the coordinators' watch channels, read fresh on every
//! frame; key presses that need the service are handed back to the caller
//! as [`Action`]s.

mod app;
mod components;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use smartinvo_runtime::{Dashboard, RecommendationSnapshot, SequencerSnapshot, StatisticsSnapshot};
use smartinvo_types::ModelInfo;
use std::io;
use std::sync::mpsc::Receiver;
use std::time::Duration;
use tokio::sync::watch;

use app::AppState;

/// Redraw cadence; faster than the typewriter so every character shows
const FRAME_INTERVAL: Duration = Duration::from_millis(20);

/// Messages from background work back to the screen
#[derive(Debug, Clone)]
pub enum TuiEvent {
    Notice(String),
    Error(String),
}

/// Work a key press asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    TriggerTrace,
    RefreshStore,
    SelectCity(String),
    Submit { city: String },
}

/// Read side of every coordinator the dashboard shows
pub struct DashboardFeed {
    statistics: watch::Receiver<StatisticsSnapshot>,
    model: watch::Receiver<Option<ModelInfo>>,
    recommendation: watch::Receiver<RecommendationSnapshot>,
    trace: watch::Receiver<SequencerSnapshot>,
}

impl DashboardFeed {
    pub fn subscribe(dashboard: &Dashboard) -> Self {
        Self {
            statistics: dashboard.statistics().subscribe(),
            model: dashboard.model_info().subscribe(),
            recommendation: dashboard.recommendation().subscribe(),
            trace: dashboard.sequencer().subscribe(),
        }
    }
}

pub struct TuiRenderer {
    feed: DashboardFeed,
    state: AppState,
}

impl TuiRenderer {
    /// `cities` must not be empty; the first one is selected.
    pub fn new(feed: DashboardFeed, cities: Vec<String>, form_ready: bool) -> Self {
        Self {
            feed,
            state: AppState::new(cities, form_ready),
        }
    }

    pub fn run(mut self, rx: Receiver<TuiEvent>, mut dispatch: impl FnMut(Action)) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal, &rx, &mut dispatch);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        rx: &Receiver<TuiEvent>,
        dispatch: &mut impl FnMut(Action),
    ) -> Result<()> {
        loop {
            self.state.refresh(&self.feed);
            terminal.draw(|f| ui::draw(f, &self.state))?;

            if event::poll(FRAME_INTERVAL)?
                && let Event::Key(key) = event::read()?
                && let Some(action) = self.handle_key_event(key)
            {
                dispatch(action);
            }

            while let Ok(tui_event) = rx.try_recv() {
                match tui_event {
                    TuiEvent::Notice(text) => self.state.set_notice(text, false),
                    TuiEvent::Error(text) => self.state.set_notice(text, true),
                }
            }

            if self.state.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        // Only handle key press events, not release
        if key.kind != KeyEventKind::Press {
            return None;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.state.should_quit = true;
                None
            }
            KeyCode::Char('t') => Some(Action::TriggerTrace),
            KeyCode::Char('r') => Some(Action::RefreshStore),
            KeyCode::Char(']') => self.state.cycle_city(1).map(Action::SelectCity),
            KeyCode::Char('[') => self.state.cycle_city(-1).map(Action::SelectCity),
            KeyCode::Char('s') => {
                if self.state.form_ready {
                    Some(Action::Submit {
                        city: self.state.current_city().to_string(),
                    })
                } else {
                    self.state.set_notice(
                        "start with --item, --category and --arrival-date to submit".to_string(),
                        true,
                    );
                    None
                }
            }
            _ => None,
        }
    }
}
