//! Login and registration form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::tui::styles::MedicalTheme;

use super::{render_header, render_key_hints};

/// Which gate form is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

/// Input focus within the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Username,
    Password,
    Email,
}

/// Gate form state.
pub struct AuthFormState {
    pub mode: AuthMode,
    pub username: String,
    pub password: String,
    pub email: String,
    pub focus: AuthField,
}

impl Default for AuthFormState {
    fn default() -> Self {
        Self {
            mode: AuthMode::Login,
            username: String::new(),
            password: String::new(),
            email: String::new(),
            focus: AuthField::Username,
        }
    }
}

impl AuthFormState {
    fn fields(&self) -> &'static [AuthField] {
        match self.mode {
            AuthMode::Login => &[AuthField::Username, AuthField::Password],
            AuthMode::Register => &[AuthField::Username, AuthField::Password, AuthField::Email],
        }
    }

    fn focus_index(&self) -> usize {
        self.fields()
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0)
    }

    pub fn next_field(&mut self) {
        let fields = self.fields();
        self.focus = fields[(self.focus_index() + 1) % fields.len()];
    }

    pub fn prev_field(&mut self) {
        let fields = self.fields();
        let idx = self.focus_index();
        self.focus = fields[(idx + fields.len() - 1) % fields.len()];
    }

    /// Switch between Login and Register, keeping the username.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        self.password.zeroize();
        self.email.clear();
        self.focus = AuthField::Username;
    }

    fn focused_value(&mut self) -> &mut String {
        match self.focus {
            AuthField::Username => &mut self.username,
            AuthField::Password => &mut self.password,
            AuthField::Email => &mut self.email,
        }
    }

    pub fn input_char(&mut self, c: char) {
        if !c.is_control() {
            self.focused_value().push(c);
        }
    }

    pub fn delete_char(&mut self) {
        self.focused_value().pop();
    }

    /// Wipe the password buffer. Called after every submit.
    pub fn clear_sensitive(&mut self) {
        self.password.zeroize();
    }

    /// Reset every field.
    pub fn reset(&mut self) {
        self.username.clear();
        self.password.zeroize();
        self.email.clear();
        self.focus = AuthField::Username;
    }
}

pub fn render_auth_form(f: &mut Frame, area: Rect, state: &AuthFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer
        ])
        .split(area);

    let (title, other) = match state.mode {
        AuthMode::Login => ("Login", "Register"),
        AuthMode::Register => ("Register", "Login"),
    };
    render_header(f, chunks[0], title, "Access to the prediction form");

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(50),
            Constraint::Percentage(25),
        ])
        .split(chunks[1]);

    let fields = state.fields();
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(columns[1]);

    for (i, field) in fields.iter().enumerate() {
        let (label, value) = match field {
            AuthField::Username => ("Username", state.username.clone()),
            AuthField::Password => ("Password", "•".repeat(state.password.chars().count())),
            AuthField::Email => ("Email", state.email.clone()),
        };
        render_input(f, rows[i], label, &value, *field == state.focus);
    }

    let toggle = format!("Switch to {other}");
    render_key_hints(
        f,
        chunks[2],
        &[
            ("Tab/↑↓", "Navigate"),
            ("Enter", title),
            ("F2", toggle.as_str()),
            ("Ctrl+Q", "Quit"),
        ],
        None,
    );
}

fn render_input(f: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let (border_style, title_style) = if focused {
        (MedicalTheme::border_focused(), MedicalTheme::focused())
    } else {
        (MedicalTheme::border(), MedicalTheme::text_secondary())
    };

    let block = Block::default()
        .title(Span::styled(format!(" {label} "), title_style))
        .borders(Borders::ALL)
        .border_style(border_style);

    let content = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(value.to_string(), MedicalTheme::text()),
        if focused {
            Span::styled("▌", MedicalTheme::cursor())
        } else {
            Span::raw("")
        },
    ]))
    .block(block);

    f.render_widget(content, area);
}
