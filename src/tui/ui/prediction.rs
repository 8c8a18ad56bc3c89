//! Clinical data entry form.
//!
//! Fields are generated from the feature catalogue: numeric features take
//! typed input, coded features cycle through their choices with ←/→.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::{ClinicalRecord, FeatureKind, FeatureSpec, FEATURES};
use crate::tui::styles::MedicalTheme;

use super::{render_header, render_key_hints};

/// One form field bound to a catalogue entry.
#[derive(Debug, Clone)]
pub struct FormField {
    pub feature: &'static FeatureSpec,
    /// Typed text for numeric features
    pub value: String,
    /// Selected option index for coded features
    pub choice: usize,
}

impl FormField {
    fn new(feature: &'static FeatureSpec) -> Self {
        Self {
            feature,
            value: String::new(),
            choice: 0,
        }
    }

    fn options(&self) -> Option<&'static [(f64, &'static str)]> {
        match self.feature.kind {
            FeatureKind::Choice(options) => Some(options),
            FeatureKind::Numeric { .. } => None,
        }
    }

    fn parse(&self) -> Result<f64, String> {
        match self.options() {
            Some(options) => options
                .get(self.choice)
                .map(|(v, _)| *v)
                .ok_or_else(|| format!("{}: No option selected", self.feature.label)),
            None => self
                .value
                .trim()
                .parse()
                .map_err(|_| format!("{}: Invalid number", self.feature.label)),
        }
    }

    fn display(&self) -> (String, bool) {
        match self.options() {
            Some(options) => {
                let label = options.get(self.choice).map_or("", |(_, l)| *l);
                (format!("◂ {label} ▸"), true)
            }
            None if self.value.is_empty() => (self.feature.hint.to_string(), false),
            None => (self.value.clone(), true),
        }
    }
}

/// Prediction form state
pub struct PredictionFormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl Default for PredictionFormState {
    fn default() -> Self {
        Self {
            fields: FEATURES.iter().map(FormField::new).collect(),
            selected_field: 0,
            error_message: None,
        }
    }
}

impl PredictionFormState {
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Type into the current numeric field.
    pub fn input_char(&mut self, c: char) {
        let field = &mut self.fields[self.selected_field];
        if field.options().is_none() && (c.is_ascii_digit() || c == '.' || c == '-') {
            field.value.push(c);
            self.error_message = None;
        }
    }

    pub fn delete_char(&mut self) {
        self.fields[self.selected_field].value.pop();
    }

    pub fn clear_field(&mut self) {
        self.fields[self.selected_field].value.clear();
    }

    /// Step the current coded field forward (`+1`) or back (`-1`).
    pub fn cycle_choice(&mut self, step: isize) {
        let field = &mut self.fields[self.selected_field];
        if let Some(options) = field.options() {
            let n = options.len() as isize;
            field.choice = (field.choice as isize + step).rem_euclid(n) as usize;
            self.error_message = None;
        }
    }

    /// Wipe typed values after a prediction.
    pub fn clear_sensitive(&mut self) {
        for field in self.fields.iter_mut() {
            field.value.zeroize();
            field.choice = 0;
        }
        self.error_message = None;
        self.selected_field = 0;
    }

    /// Convert the form into a record. Range checks happen in the service.
    ///
    /// # Errors
    /// Returns the first field that is empty or not a number.
    pub fn to_record(&self) -> Result<ClinicalRecord, String> {
        let values = self
            .fields
            .iter()
            .map(FormField::parse)
            .collect::<Result<Vec<f64>, String>>()?;
        ClinicalRecord::from_vec(&values)
    }

    /// Fill in a typical patient.
    pub fn load_sample_data(&mut self) {
        let sample = [63.0, 1.0, 3.0, 145.0, 233.0, 1.0, 0.0, 150.0, 0.0, 2.3, 0.0, 0.0, 1.0];
        for (field, value) in self.fields.iter_mut().zip(sample) {
            match field.options() {
                Some(options) => {
                    field.choice = options.iter().position(|(v, _)| *v == value).unwrap_or(0);
                }
                None => field.value = value.to_string(),
            }
        }
        self.error_message = None;
    }
}

/// Render the clinical data form
pub fn render_prediction_form(f: &mut Frame, area: Rect, state: &PredictionFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_header(f, chunks[0], "Clinical Data Entry", "13 features");
    render_form_fields(f, chunks[1], state);
    render_key_hints(
        f,
        chunks[2],
        &[
            ("↑↓", "Navigate"),
            ("←→", "Choose"),
            ("Enter", "Predict"),
            ("S", "Sample Data"),
            ("Ctrl+L", "Logout"),
        ],
        state.error_message.as_deref(),
    );
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &PredictionFormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = state.fields.len().div_ceil(2);

    render_field_column(f, columns[0], &state.fields[..mid], 0, state.selected_field);
    render_field_column(
        f,
        columns[1],
        &state.fields[mid..],
        mid,
        state.selected_field,
    );
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let (border_style, title_style) = if is_selected {
            (MedicalTheme::border_focused(), MedicalTheme::focused())
        } else {
            (MedicalTheme::border(), MedicalTheme::text_secondary())
        };

        let mut block = Block::default()
            .title(Span::styled(format!(" {} ", field.feature.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);
        if is_selected && field.options().is_some() && !field.feature.hint.is_empty() {
            block = block.title_bottom(Span::styled(
                format!(" {} ", field.feature.hint),
                MedicalTheme::text_muted(),
            ));
        }

        let (text, filled) = field.display();
        let value_style = if filled {
            MedicalTheme::text()
        } else {
            MedicalTheme::text_muted()
        };

        let content = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            Span::styled(text, value_style),
            if is_selected {
                Span::styled("▌", MedicalTheme::cursor())
            } else {
                Span::raw("")
            },
        ]))
        .block(block);

        f.render_widget(content, chunks[i]);
    }
}
