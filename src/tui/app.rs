//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Service integration
//! - Async prediction via background worker

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::HttpPredictionClient;
use crate::application::{write_export, PredictionService, SessionState};

use super::ui::{
    dashboard::{render_dashboard, DashboardState, ServiceStatus},
    form::{render_form, CustomerFormState},
    prediction::{render_prediction, PredictionState},
    render_disclaimer,
};
use super::worker::{PredictionProgress, PredictionWorker, PredictionWorkerHandle};

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Current screen/view in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    CustomerForm,
    Prediction,
}

/// Main application state
pub struct App {
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// HTTP backend (also used directly for the wake probe)
    backend: Arc<HttpPredictionClient>,

    /// Prediction service
    service: Arc<PredictionService<HttpPredictionClient>>,

    /// Session-scoped prediction state
    session: SessionState,

    /// Dashboard state
    dashboard_state: DashboardState,

    /// Customer form state
    form_state: CustomerFormState,

    /// Prediction state
    prediction_state: PredictionState,

    /// Pending prediction worker (if running)
    pending_worker: Option<PredictionWorkerHandle>,

    /// When the in-flight request started (for the progress animation)
    waiting_since: Option<Instant>,
}

impl App {
    /// Create a new application instance using the configured service URL.
    ///
    /// The URL comes from `CHURNSCOPE_API_URL`, defaulting to a local server.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be constructed.
    pub fn new() -> Result<Self> {
        let base_url =
            std::env::var("CHURNSCOPE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let backend = Arc::new(HttpPredictionClient::new(base_url)?);
        Self::with_backend(backend)
    }

    /// Create application with an injected backend (Composition Root pattern).
    ///
    /// # Errors
    /// Returns error if initialization fails.
    pub fn with_backend(backend: Arc<HttpPredictionClient>) -> Result<Self> {
        let service = Arc::new(PredictionService::new(backend.clone()));

        let dashboard_state = DashboardState {
            service_url: backend.base_url().to_string(),
            ..DashboardState::default()
        };

        Ok(Self {
            screen: Screen::Dashboard,
            should_quit: false,
            backend,
            service,
            session: SessionState::new(),
            dashboard_state,
            form_state: CustomerFormState::default(),
            prediction_state: PredictionState::default(),
            pending_worker: None,
            waiting_since: None,
        })
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // One-shot best-effort wake probe; cold-started services get a head
        // start while the user fills in the form. Outcome is discarded.
        self.backend.wake_in_background();

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main loop
        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            // Poll pending worker for progress updates
            self.poll_worker();

            // Animate the in-flight progress bar
            self.tick_progress();

            // Draw current screen
            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(2)])
                    .split(area);

                let content_area = chunks[0];
                let disclaimer_area = chunks[1];

                match self.screen {
                    Screen::Dashboard => render_dashboard(f, content_area, &self.dashboard_state),
                    Screen::CustomerForm => render_form(f, content_area, &self.form_state),
                    Screen::Prediction => {
                        render_prediction(f, content_area, &self.prediction_state)
                    }
                }

                render_disclaimer(f, disclaimer_area);
            })?;

            // Handle input (short poll to stay responsive)
            if event::poll(std::time::Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Poll the background worker for progress updates.
    fn poll_worker(&mut self) {
        if self.pending_worker.is_none() {
            return;
        }

        loop {
            let progress = match self
                .pending_worker
                .as_ref()
                .and_then(|worker| worker.try_recv())
            {
                Some(p) => p,
                None => break,
            };

            match progress {
                PredictionProgress::Contacting => {
                    if self.waiting_since.is_none() {
                        self.waiting_since = Some(Instant::now());
                    }
                }
                PredictionProgress::Complete(assessment) => {
                    // The single place session state advances: exactly once
                    // per successful prediction.
                    self.session.record_prediction((*assessment).clone());
                    self.prediction_state = PredictionState::Complete { assessment };
                    self.pending_worker = None;
                    self.waiting_since = None;
                    break;
                }
                PredictionProgress::Error(message) => {
                    self.prediction_state = PredictionState::Error { message };
                    self.pending_worker = None;
                    self.waiting_since = None;
                    break;
                }
            }
        }
    }

    fn tick_progress(&mut self) {
        if self.pending_worker.is_none() {
            return;
        }
        let Some(started_at) = self.waiting_since else {
            return;
        };

        let current = match &self.prediction_state {
            PredictionState::Waiting { progress } => *progress,
            _ => return,
        };

        // Smooth, monotonic fake progress: asymptotically approaches 90%
        // while the request is in flight.
        let elapsed = Instant::now().saturating_duration_since(started_at).as_secs_f64();
        let desired = 0.9 * (1.0 - (-elapsed / 4.0).exp());
        self.prediction_state = PredictionState::Waiting {
            progress: desired.max(current).min(0.9),
        };
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Dashboard => self.handle_dashboard_key(key),
            Screen::CustomerForm => self.handle_form_key(key),
            Screen::Prediction => self.handle_prediction_key(key),
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.form_state = CustomerFormState::default();
                self.screen = Screen::CustomerForm;
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                self.run_health_check();
            }
            KeyCode::Char('e') | KeyCode::Char('E') => {
                self.export_last_result();
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.update_dashboard_state();
                self.screen = Screen::Dashboard;
            }
            KeyCode::Up => {
                self.form_state.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.form_state.next_field();
            }
            KeyCode::Left => {
                self.form_state.cycle_prev();
            }
            KeyCode::Right => {
                self.form_state.cycle_next();
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.form_state.load_sample_data();
            }
            KeyCode::Char(c) => {
                self.form_state.input_char(c);
            }
            KeyCode::Backspace => {
                self.form_state.delete_char();
            }
            KeyCode::Delete => {
                self.form_state.clear_field();
            }
            KeyCode::Enter => {
                self.submit_form();
            }
            _ => {}
        }
    }

    fn handle_prediction_key(&mut self, key: KeyCode) {
        match &self.prediction_state {
            PredictionState::Complete { .. } => match key {
                KeyCode::Enter | KeyCode::Esc => {
                    self.update_dashboard_state();
                    self.screen = Screen::Dashboard;
                }
                KeyCode::Char('n') | KeyCode::Char('N') => {
                    self.form_state = CustomerFormState::default();
                    self.screen = Screen::CustomerForm;
                }
                KeyCode::Char('e') | KeyCode::Char('E') => {
                    self.export_last_result();
                }
                _ => {}
            },
            PredictionState::Error { .. } => match key {
                KeyCode::Enter => {
                    // Retry: back to the form with the inputs intact.
                    self.screen = Screen::CustomerForm;
                }
                KeyCode::Esc => {
                    self.update_dashboard_state();
                    self.screen = Screen::Dashboard;
                }
                _ => {}
            },
            // While waiting there is no cancel; timeouts are the sole
            // cancellation mechanism.
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        // Refuse to start a second in-flight request.
        if self.pending_worker.is_some() {
            return;
        }

        match self.form_state.to_customer_record() {
            Ok(record) => {
                // Validate before any network call.
                let errors = record.validate();
                if !errors.is_empty() {
                    self.form_state.error_message = Some(errors.join(", "));
                    return;
                }

                self.screen = Screen::Prediction;
                self.prediction_state = PredictionState::Waiting { progress: 0.0 };
                self.waiting_since = Some(Instant::now());

                let worker = PredictionWorker::spawn(self.service.clone(), record);
                self.pending_worker = Some(worker);
            }
            Err(e) => {
                self.form_state.error_message = Some(e);
            }
        }
    }

    fn run_health_check(&mut self) {
        self.dashboard_state.notice = None;
        match self.service.check_ready() {
            Ok(()) => {
                self.dashboard_state.service_status = ServiceStatus::Healthy;
                self.dashboard_state.notice = Some("Prediction service is healthy".to_string());
            }
            Err(e) => {
                self.dashboard_state.service_status = ServiceStatus::Unhealthy(e.to_string());
            }
        }
    }

    fn export_last_result(&mut self) {
        match self.session.last_assessment() {
            Some(assessment) => match write_export(assessment, Path::new(".")) {
                Ok(path) => {
                    self.dashboard_state.notice =
                        Some(format!("Exported to {}", path.display()));
                }
                Err(e) => {
                    tracing::error!("Export failed: {e}");
                    self.dashboard_state.notice = Some(format!("Export failed: {e}"));
                }
            },
            None => {
                self.dashboard_state.notice =
                    Some("Make a prediction first to export results".to_string());
            }
        }
    }

    fn update_dashboard_state(&mut self) {
        self.dashboard_state.predictions_count = self.session.predictions_count();
        if let Some(assessment) = self.session.last_assessment() {
            self.dashboard_state.last_probability = Some(assessment.result.probability);
            self.dashboard_state.last_tier = Some(assessment.risk_tier);
        }
    }
}
