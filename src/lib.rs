//! # Cardiogate
//!
//! Local heart disease screening behind a minimal login.
//!
//! This crate provides:
//! - A flat-file credential store with Argon2id password hashes
//! - A session gate deciding which screen a user may see
//! - A prediction adapter over an exported, optionally signed, linear model
//! - Terminal UI for local use
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (clinical record, label, credential record, session)
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (flat file, JSON model, log sanitizer)
//! - `application`: Use cases orchestrating domain and ports
//! - `config`: Environment-driven configuration
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{Assessment, ClinicalRecord, Label};

/// Result type for Cardiogate operations
pub type Result<T> = std::result::Result<T, CardiogateError>;

/// Main error type for Cardiogate
#[derive(Debug, thiserror::Error)]
pub enum CardiogateError {
    #[error("Credential store operation failed: {0}")]
    Store(#[from] adapters::StoreError),

    #[error("Model could not be loaded: {0}")]
    Model(#[from] adapters::ModelError),

    #[error("Classifier error: {0}")]
    Classifier(#[from] ports::ClassifierError),

    #[error("Password hashing failed: {0}")]
    Password(#[from] domain::password::PasswordError),

    #[error(transparent)]
    Auth(#[from] application::AuthError),

    #[error(transparent)]
    Prediction(#[from] application::PredictionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
