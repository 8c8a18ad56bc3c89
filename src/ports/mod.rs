//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and external systems (credential file, trained model).

mod classifier;
mod credential_store;

pub use classifier::{Classifier, ClassifierError};
pub use credential_store::CredentialStore;
