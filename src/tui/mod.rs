//! TUI module: Terminal User Interface using Ratatui.
//!
//! Screens:
//! - Welcome
//! - Login / registration gate
//! - Clinical data entry
//! - Prediction result with precautions

mod app;
mod styles;
mod ui;

pub use app::{App, Screen};
pub use styles::MedicalTheme;
pub use ui::{StatusKind, StatusMessage};
