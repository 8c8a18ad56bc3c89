//! Prediction label and the assessment shown to the user.

use serde::{Deserialize, Serialize};

/// Precautionary advice shown with every assessment, in display order.
pub const PRECAUTIONS: [&str; 7] = [
    "Maintain a healthy diet rich in fruits and vegetables.",
    "Engage in regular physical activity.",
    "Avoid smoking and excessive alcohol consumption.",
    "Regular check-ups with your healthcare provider.",
    "Control your cholesterol, blood glucose (sugar), and blood pressure.",
    "Drink alcohol only in moderation.",
    "Get enough sleep.",
];

/// Binary classifier output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    /// Class 0: no heart disease predicted
    Absent,
    /// Class 1: heart disease predicted
    Present,
}

impl Label {
    /// Map a class index to a label. Any non-zero class counts as disease.
    #[must_use]
    pub fn from_class(class: u8) -> Self {
        if class == 0 {
            Self::Absent
        } else {
            Self::Present
        }
    }

    /// Class index as used by the trained model.
    #[must_use]
    pub fn class(&self) -> u8 {
        match self {
            Self::Absent => 0,
            Self::Present => 1,
        }
    }

    /// Sentence shown to the user.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Absent => "You do not have heart disease.",
            Self::Present => "You have heart disease.",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Absent => write!(f, "ABSENT"),
            Self::Present => write!(f, "PRESENT"),
        }
    }
}

/// Outcome of one prediction request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    /// The classifier label
    pub label: Label,

    /// When the prediction was made
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Assessment {
    /// Wrap a label produced just now.
    #[must_use]
    pub fn new(label: Label) -> Self {
        Self {
            label,
            created_at: chrono::Utc::now(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &'static str {
        self.label.message()
    }

    #[must_use]
    pub fn precautions(&self) -> &'static [&'static str] {
        &PRECAUTIONS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_class() {
        assert_eq!(Label::from_class(0), Label::Absent);
        assert_eq!(Label::from_class(1), Label::Present);
        assert_eq!(Label::Present.class(), 1);
        assert_eq!(Label::Absent.class(), 0);
    }

    #[test]
    fn test_messages() {
        assert_eq!(Label::Present.message(), "You have heart disease.");
        assert_eq!(Label::Absent.message(), "You do not have heart disease.");
    }

    #[test]
    fn test_assessment_carries_precautions() {
        let assessment = Assessment::new(Label::Absent);
        assert_eq!(assessment.precautions().len(), 7);
        assert_eq!(assessment.precautions()[6], "Get enough sleep.");
        assert_eq!(assessment.message(), "You do not have heart disease.");
    }
}
