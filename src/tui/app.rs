//! Main TUI application state machine.
//!
//! The current screen is derived from the [`Session`]: welcome until
//! dismissed, then the login gate, then the prediction form once
//! authenticated.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::adapters::{FlatFileCredentialStore, LinearModelClassifier};
use crate::application::{AuthError, AuthService, PredictionError, PredictionService};
use crate::config::AppConfig;
use crate::domain::{Assessment, Session, View};
use crate::ports::{Classifier, CredentialStore};

use super::styles::LOGO_SMALL;
use super::ui::{
    auth::{render_auth_form, AuthFormState, AuthMode},
    prediction::{render_prediction_form, PredictionFormState},
    render_disclaimer, render_header, render_status,
    result::render_result,
    welcome::render_welcome,
    StatusMessage,
};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Login,
    Register,
    PredictionForm,
    Result,
}

/// Main application state
pub struct App<S = FlatFileCredentialStore, C = LinearModelClassifier>
where
    S: CredentialStore,
    C: Classifier,
{
    session: Session,
    auth: AuthService<S>,
    prediction: PredictionService<C>,
    auth_form: AuthFormState,
    prediction_form: PredictionFormState,
    /// Last assessment; `Some` shows the result screen
    assessment: Option<Assessment>,
    status: Option<StatusMessage>,
    should_quit: bool,
}

impl App {
    /// Build the application from configuration using the default adapters.
    ///
    /// # Errors
    /// Returns error if the model cannot be loaded or verified.
    pub fn from_config(config: &AppConfig) -> crate::Result<Self> {
        let store = Arc::new(FlatFileCredentialStore::new(&config.users_file));

        let options = config.model_load_options()?;
        let classifier = Arc::new(LinearModelClassifier::load(&config.model_path, &options)?);

        Ok(Self::with_dependencies(
            Session::new(config.show_welcome),
            AuthService::new(store),
            PredictionService::new(classifier),
        ))
    }
}

impl<S, C> App<S, C>
where
    S: CredentialStore,
    C: Classifier,
{
    /// Create application with injected dependencies (Composition Root pattern).
    pub fn with_dependencies(
        session: Session,
        auth: AuthService<S>,
        prediction: PredictionService<C>,
    ) -> Self {
        Self {
            session,
            auth,
            prediction,
            auth_form: AuthFormState::default(),
            prediction_form: PredictionFormState::default(),
            assessment: None,
            status: None,
            should_quit: false,
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        match self.session.view() {
            View::Welcome => Screen::Welcome,
            View::Gate => match self.auth_form.mode {
                AuthMode::Login => Screen::Login,
                AuthMode::Register => Screen::Register,
            },
            View::Prediction if self.assessment.is_some() => Screen::Result,
            View::Prediction => Screen::PredictionForm,
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Top bar
                Constraint::Min(0),    // Screen
                Constraint::Length(1), // Status
                Constraint::Length(3), // Disclaimer
            ])
            .split(f.area());

        let user = match self.session.username() {
            Some(name) => format!("Logged in as {name}"),
            None => "Not logged in".to_string(),
        };
        render_header(f, chunks[0], LOGO_SMALL, &user);

        match self.screen() {
            Screen::Welcome => {
                render_welcome(f, chunks[1], &self.prediction.model_description())
            }
            Screen::Login | Screen::Register => render_auth_form(f, chunks[1], &self.auth_form),
            Screen::PredictionForm => {
                render_prediction_form(f, chunks[1], &self.prediction_form)
            }
            Screen::Result => {
                if let Some(assessment) = &self.assessment {
                    render_result(f, chunks[1], assessment);
                }
            }
        }

        render_status(f, chunks[2], self.status.as_ref());
        render_disclaimer(f, chunks[3]);
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('l') => {
                    self.logout();
                    return;
                }
                // Other Ctrl+letter combos are not text input.
                KeyCode::Char(_) => return,
                _ => {}
            }
        }

        match self.screen() {
            Screen::Welcome => self.handle_welcome_key(key),
            Screen::Login | Screen::Register => self.handle_auth_key(key),
            Screen::PredictionForm => self.handle_prediction_key(key),
            Screen::Result => self.handle_result_key(key),
        }
    }

    fn handle_welcome_key(&mut self, key: KeyCode) {
        if key == KeyCode::Enter {
            self.session.dismiss_welcome();
        }
    }

    fn handle_auth_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Tab | KeyCode::Down => self.auth_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.auth_form.prev_field(),
            KeyCode::F(2) => {
                self.auth_form.toggle_mode();
                self.status = None;
            }
            KeyCode::Char(c) => self.auth_form.input_char(c),
            KeyCode::Backspace => self.auth_form.delete_char(),
            KeyCode::Enter => match self.auth_form.mode {
                AuthMode::Login => self.submit_login(),
                AuthMode::Register => self.submit_register(),
            },
            _ => {}
        }
    }

    fn handle_prediction_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::BackTab => self.prediction_form.prev_field(),
            KeyCode::Down | KeyCode::Tab => self.prediction_form.next_field(),
            KeyCode::Left => self.prediction_form.cycle_choice(-1),
            KeyCode::Right => self.prediction_form.cycle_choice(1),
            KeyCode::Char('s') | KeyCode::Char('S') => self.prediction_form.load_sample_data(),
            KeyCode::Char(c) => self.prediction_form.input_char(c),
            KeyCode::Backspace => self.prediction_form.delete_char(),
            KeyCode::Delete => self.prediction_form.clear_field(),
            KeyCode::Enter => self.submit_prediction(),
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        if matches!(key, KeyCode::Enter | KeyCode::Esc) {
            self.assessment = None;
            self.status = None;
        }
    }

    fn submit_login(&mut self) {
        let result = self.auth.login(
            &mut self.session,
            &self.auth_form.username,
            &self.auth_form.password,
        );
        self.auth_form.clear_sensitive();

        match result {
            Ok(()) => {
                self.auth_form.reset();
                self.prediction_form = PredictionFormState::default();
                self.status = None;
            }
            Err(AuthError::InvalidCredentials) => {
                self.status = Some(StatusMessage::error("Invalid credentials"));
            }
            Err(e) => {
                tracing::error!("Login failed: {}", e);
                self.status = Some(StatusMessage::error(e.to_string()));
            }
        }
    }

    fn submit_register(&mut self) {
        let result = self.auth.register(
            &self.auth_form.username,
            &self.auth_form.password,
            &self.auth_form.email,
        );
        self.auth_form.clear_sensitive();

        match result {
            Ok(()) => {
                // Back to login with the username kept.
                self.auth_form.toggle_mode();
                self.status = Some(StatusMessage::success("User created successfully!"));
            }
            Err(e) => {
                if !matches!(e, AuthError::UsernameTaken | AuthError::InvalidField(_)) {
                    tracing::error!("Registration failed: {}", e);
                }
                self.status = Some(StatusMessage::error(e.to_string()));
            }
        }
    }

    fn submit_prediction(&mut self) {
        let record = match self.prediction_form.to_record() {
            Ok(r) => r,
            Err(e) => {
                self.prediction_form.error_message = Some(e);
                return;
            }
        };

        match self.prediction.assess(&self.session, &record) {
            Ok(assessment) => {
                self.assessment = Some(assessment);
                self.prediction_form.clear_sensitive();
            }
            Err(PredictionError::InvalidInput(errors)) => {
                self.prediction_form.error_message = Some(errors.join(", "));
            }
            Err(e) => {
                tracing::error!("Prediction failed: {}", e);
                self.prediction_form.error_message = Some(e.to_string());
            }
        }
    }

    fn logout(&mut self) {
        if !self.session.is_authenticated() {
            return;
        }

        self.auth.logout(&mut self.session);
        self.auth_form = AuthFormState::default();
        self.prediction_form.clear_sensitive();
        self.assessment = None;
        self.status = Some(StatusMessage::info("You have been logged out."));
    }
}
