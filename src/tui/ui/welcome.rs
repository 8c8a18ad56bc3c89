//! Welcome view: introductory screen shown before the login gate.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::{MedicalTheme, LOGO};

use super::{render_header, render_key_hints};

pub fn render_welcome(f: &mut Frame, area: Rect, model_description: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_header(f, chunks[0], "Welcome", "Heart Disease Prediction");

    let mut lines: Vec<Line> = LOGO
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), MedicalTheme::subtitle())))
        .collect();
    lines.extend([
        Line::from(""),
        Line::from(Span::styled(
            "Enter thirteen clinical measurements and a trained classifier",
            MedicalTheme::text(),
        )),
        Line::from(Span::styled(
            "predicts whether they indicate heart disease.",
            MedicalTheme::text(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Log in or register to continue.",
            MedicalTheme::text_secondary(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Model: ", MedicalTheme::text_muted()),
            Span::styled(model_description.to_string(), MedicalTheme::text_muted()),
        ]),
    ]);

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        );
    f.render_widget(body, chunks[1]);

    render_key_hints(
        f,
        chunks[2],
        &[("Enter", "Continue"), ("Ctrl+Q", "Quit")],
        None,
    );
}
