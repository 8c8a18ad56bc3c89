//! Adapters layer: Concrete implementations of ports.
//!
//! - `flatfile`: comma-separated credential file
//! - `model`: exported linear classifier with signed manifest checks
//! - `sanitize`: credential and PII filtering for logs

pub mod flatfile;
pub mod model;
pub mod sanitize;

pub use flatfile::{FlatFileCredentialStore, StoreError};
pub use model::{LinearModelClassifier, ModelError, ModelLoadOptions};
