//! Prediction result view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::domain::Assessment;
use crate::tui::styles::MedicalTheme;

use super::{render_header, render_key_hints};

pub fn render_result(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(5), // Verdict
            Constraint::Min(0),    // Precautions
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_header(f, chunks[0], "Prediction Result", "Classifier output");

    let verdict = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            assessment.message(),
            MedicalTheme::label(assessment.label),
        )),
        Line::from(Span::styled(
            format!(
                "Assessed {}",
                assessment.created_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            MedicalTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(verdict, chunks[1]);

    let items: Vec<ListItem> = assessment
        .precautions()
        .iter()
        .enumerate()
        .map(|(i, p)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {}. ", i + 1), MedicalTheme::key_hint()),
                Span::styled(*p, MedicalTheme::text()),
            ]))
        })
        .collect();

    let precautions = List::new(items).block(
        Block::default()
            .title(Span::styled(" Precautions ", MedicalTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(precautions, chunks[2]);

    render_key_hints(
        f,
        chunks[3],
        &[
            ("Enter", "New Prediction"),
            ("Ctrl+L", "Logout"),
            ("Ctrl+Q", "Quit"),
        ],
        None,
    );
}
