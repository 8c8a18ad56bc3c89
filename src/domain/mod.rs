//! Domain layer: Core types and logic.
//!
//! Pure Rust types with no I/O. Password hashing lives here because the
//! hash format is part of the credential record.

mod clinical;
mod credential;
mod diagnosis;
pub(crate) mod digest;
pub mod password;
mod session;

pub use clinical::{ClinicalRecord, FeatureKind, FeatureSpec, FEATURES, FEATURE_COUNT, FEATURE_NAMES};
pub use credential::{validate_field, CredentialRecord};
pub use diagnosis::{Assessment, Label, PRECAUTIONS};
pub use session::{Session, View};
