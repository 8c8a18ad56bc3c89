//! Clinical input record for heart disease prediction.
//!
//! Thirteen features in the column order the classifier was trained on
//! (UCI Cleveland heart disease dataset naming).

use serde::{Deserialize, Serialize};

/// Number of features expected by the classifier.
pub const FEATURE_COUNT: usize = 13;

/// Feature names in classifier column order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalach", "exang", "oldpeak",
    "slope", "ca", "thal",
];

/// How a feature is entered and which values it accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureKind {
    /// Free numeric entry within an inclusive range.
    Numeric { min: f64, max: f64, integer: bool },
    /// One of a fixed set of coded values, each with a display label.
    Choice(&'static [(f64, &'static str)]),
}

/// Static description of one clinical feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub hint: &'static str,
    pub kind: FeatureKind,
}

impl FeatureSpec {
    /// Check a value against this feature's constraints.
    ///
    /// # Errors
    /// Returns a human-readable message naming the feature.
    pub fn check(&self, value: f64) -> Result<(), String> {
        if !value.is_finite() {
            return Err(format!("{} must be a finite number", self.label));
        }

        match self.kind {
            FeatureKind::Numeric { min, max, integer } => {
                if !(min..=max).contains(&value) {
                    return Err(format!(
                        "{} {} out of range [{}, {}]",
                        self.label, value, min, max
                    ));
                }
                if integer && value.fract() != 0.0 {
                    return Err(format!("{} must be a whole number", self.label));
                }
            }
            FeatureKind::Choice(options) => {
                if !options.iter().any(|(v, _)| *v == value) {
                    let allowed: Vec<String> =
                        options.iter().map(|(v, _)| format!("{v}")).collect();
                    return Err(format!(
                        "{} {} must be one of {}",
                        self.label,
                        value,
                        allowed.join("/")
                    ));
                }
            }
        }

        Ok(())
    }
}

const SEX: &[(f64, &str)] = &[(1.0, "Male"), (0.0, "Female")];

const CHEST_PAIN: &[(f64, &str)] = &[
    (0.0, "Typical angina"),
    (1.0, "Atypical angina"),
    (2.0, "Non-anginal pain"),
    (3.0, "Asymptomatic"),
];

const FASTING_SUGAR: &[(f64, &str)] = &[(0.0, "<= 120 mg/dl (normal)"), (1.0, "> 120 mg/dl (high)")];

const RESTING_ECG: &[(f64, &str)] = &[
    (0.0, "Normal"),
    (1.0, "ST-T wave abnormality"),
    (2.0, "Left ventricular hypertrophy"),
];

const ANGINA: &[(f64, &str)] = &[(0.0, "No"), (1.0, "Yes")];

const SLOPE: &[(f64, &str)] = &[(0.0, "Upsloping"), (1.0, "Flat"), (2.0, "Downsloping")];

const VESSELS: &[(f64, &str)] = &[
    (0.0, "None"),
    (1.0, "One vessel"),
    (2.0, "Two vessels"),
    (3.0, "Three vessels"),
];

const THAL: &[(f64, &str)] = &[
    (0.0, "Normal"),
    (1.0, "Fixed defect"),
    (2.0, "Reversible defect"),
    (3.0, "Severe defect"),
];

/// Feature catalogue, in classifier column order.
///
/// Ranges mirror the bounds of the original entry form.
pub static FEATURES: [FeatureSpec; FEATURE_COUNT] = [
    FeatureSpec {
        name: "age",
        label: "Age",
        hint: "years (1-120)",
        kind: FeatureKind::Numeric { min: 1.0, max: 120.0, integer: true },
    },
    FeatureSpec {
        name: "sex",
        label: "Sex",
        hint: "biological sex",
        kind: FeatureKind::Choice(SEX),
    },
    FeatureSpec {
        name: "cp",
        label: "Chest Pain Type",
        hint: "angina = pain from reduced blood flow to the heart",
        kind: FeatureKind::Choice(CHEST_PAIN),
    },
    FeatureSpec {
        name: "trestbps",
        label: "Resting Blood Pressure",
        hint: "mmHg (50-200)",
        kind: FeatureKind::Numeric { min: 50.0, max: 200.0, integer: true },
    },
    FeatureSpec {
        name: "chol",
        label: "Serum Cholesterol",
        hint: "mg/dl (100-600)",
        kind: FeatureKind::Numeric { min: 100.0, max: 600.0, integer: true },
    },
    FeatureSpec {
        name: "fbs",
        label: "Fasting Blood Sugar",
        hint: "fasting blood sugar > 120 mg/dl",
        kind: FeatureKind::Choice(FASTING_SUGAR),
    },
    FeatureSpec {
        name: "restecg",
        label: "Resting ECG",
        hint: "hypertrophy per Estes' criteria",
        kind: FeatureKind::Choice(RESTING_ECG),
    },
    FeatureSpec {
        name: "thalach",
        label: "Max Heart Rate",
        hint: "bpm achieved (60-220)",
        kind: FeatureKind::Numeric { min: 60.0, max: 220.0, integer: true },
    },
    FeatureSpec {
        name: "exang",
        label: "Exercise Angina",
        hint: "angina induced by exercise",
        kind: FeatureKind::Choice(ANGINA),
    },
    FeatureSpec {
        name: "oldpeak",
        label: "ST Depression",
        hint: "0-6; 0-1 normal, 1-2 possible ischemia, >2 higher risk",
        kind: FeatureKind::Numeric { min: 0.0, max: 6.0, integer: false },
    },
    FeatureSpec {
        name: "slope",
        label: "ST Slope",
        hint: "peak exercise ST segment",
        kind: FeatureKind::Choice(SLOPE),
    },
    FeatureSpec {
        name: "ca",
        label: "Major Vessels",
        hint: "colored by fluoroscopy",
        kind: FeatureKind::Choice(VESSELS),
    },
    FeatureSpec {
        name: "thal",
        label: "Thalassemia",
        hint: "thallium stress test result",
        kind: FeatureKind::Choice(THAL),
    },
];

/// One patient's measurements as fed to the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ClinicalRecord {
    /// Age in years
    pub age: f64,
    /// 1 = male, 0 = female
    pub sex: f64,
    /// Chest pain type (0-3)
    pub cp: f64,
    /// Resting blood pressure in mmHg
    pub trestbps: f64,
    /// Serum cholesterol in mg/dl
    pub chol: f64,
    /// Fasting blood sugar > 120 mg/dl (0/1)
    pub fbs: f64,
    /// Resting electrocardiographic result (0-2)
    pub restecg: f64,
    /// Maximum heart rate achieved
    pub thalach: f64,
    /// Exercise induced angina (0/1)
    pub exang: f64,
    /// ST depression induced by exercise relative to rest
    pub oldpeak: f64,
    /// Slope of the peak exercise ST segment (0-2)
    pub slope: f64,
    /// Number of major vessels colored by fluoroscopy (0-3)
    pub ca: f64,
    /// Thalassemia code (0-3)
    pub thal: f64,
}

impl ClinicalRecord {
    /// Convert to a row in classifier column order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        vec![
            self.age,
            self.sex,
            self.cp,
            self.trestbps,
            self.chol,
            self.fbs,
            self.restecg,
            self.thalach,
            self.exang,
            self.oldpeak,
            self.slope,
            self.ca,
            self.thal,
        ]
    }

    /// Build a record from a row in classifier column order.
    ///
    /// # Errors
    /// Returns error if the row does not have exactly 13 values.
    pub fn from_vec(v: &[f64]) -> Result<Self, String> {
        if v.len() != FEATURE_COUNT {
            return Err(format!(
                "Expected {FEATURE_COUNT} features, got {}",
                v.len()
            ));
        }

        Ok(Self {
            age: v[0],
            sex: v[1],
            cp: v[2],
            trestbps: v[3],
            chol: v[4],
            fbs: v[5],
            restecg: v[6],
            thalach: v[7],
            exang: v[8],
            oldpeak: v[9],
            slope: v[10],
            ca: v[11],
            thal: v[12],
        })
    }

    /// Validate every feature against the catalogue.
    ///
    /// # Errors
    /// Returns all violations, one message per feature.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let errors: Vec<String> = FEATURES
            .iter()
            .zip(self.to_vec())
            .filter_map(|(feature, value)| feature.check(value).err())
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typical() -> ClinicalRecord {
        ClinicalRecord {
            age: 54.0,
            sex: 1.0,
            cp: 0.0,
            trestbps: 130.0,
            chol: 246.0,
            fbs: 0.0,
            restecg: 1.0,
            thalach: 150.0,
            exang: 0.0,
            oldpeak: 1.0,
            slope: 1.0,
            ca: 0.0,
            thal: 2.0,
        }
    }

    #[test]
    fn test_catalogue_matches_feature_names() {
        for (feature, name) in FEATURES.iter().zip(FEATURE_NAMES) {
            assert_eq!(feature.name, name);
            assert!(!feature.hint.is_empty(), "{name} has no hint");
        }
    }

    #[test]
    fn test_vec_order() {
        let record = typical();
        let v = record.to_vec();
        assert_eq!(v.len(), FEATURE_COUNT);
        assert!((v[3] - 130.0).abs() < f64::EPSILON);
        assert!((v[12] - 2.0).abs() < f64::EPSILON);

        let back = ClinicalRecord::from_vec(&v).expect("Should parse");
        assert_eq!(back, record);
    }

    #[test]
    fn test_from_vec_wrong_length() {
        let err = ClinicalRecord::from_vec(&[1.0, 2.0]).expect_err("Should fail");
        assert!(err.contains("Expected 13"));
    }

    #[test]
    fn test_validation() {
        assert!(typical().validate().is_ok());

        let invalid = ClinicalRecord {
            age: 0.0,
            cp: 4.0,
            oldpeak: 6.5,
            ..typical()
        };
        let errors = invalid.validate().expect_err("Should fail");
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_fractional_age_rejected() {
        let record = ClinicalRecord {
            age: 40.5,
            ..typical()
        };
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let record = ClinicalRecord {
            chol: f64::NAN,
            ..typical()
        };
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_fractional_vitals_rejected() {
        for record in [
            ClinicalRecord { trestbps: 120.5, ..typical() },
            ClinicalRecord { chol: 233.3, ..typical() },
            ClinicalRecord { thalach: 150.2, ..typical() },
        ] {
            assert!(record.validate().is_err());
        }
        assert!(ClinicalRecord { oldpeak: 2.3, ..typical() }.validate().is_ok());
    }
}
