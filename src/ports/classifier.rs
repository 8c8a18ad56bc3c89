//! Classifier port: Trait for the externally trained prediction model.

use crate::domain::{ClinicalRecord, Label};

/// Errors raised while evaluating a model.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClassifierError {
    #[error("Feature count mismatch: got {got}, expected {expected}")]
    FeatureMismatch { got: usize, expected: usize },

    #[error("Model produced a non-finite score")]
    NonFiniteScore,
}

/// Opaque binary classifier: one clinical record in, one label out.
///
/// Implementations must be deterministic for identical input.
pub trait Classifier: Send + Sync {
    /// Predict the label for a single record.
    ///
    /// # Errors
    /// Returns error if the model cannot evaluate the record.
    fn predict(&self, record: &ClinicalRecord) -> Result<Label, ClassifierError>;

    /// Short description for logs and the UI status line.
    fn describe(&self) -> String;
}
