//! Prediction service: Runs the injected classifier for authenticated users.

use std::sync::Arc;

use crate::domain::{Assessment, ClinicalRecord, Session};
use crate::ports::{Classifier, ClassifierError};

/// Errors from the prediction use case.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PredictionError {
    #[error("Please log in to use the prediction form")]
    NotAuthenticated,

    #[error("Invalid clinical input: {}", .0.join("; "))]
    InvalidInput(Vec<String>),

    #[error("Prediction failed: {0}")]
    Classifier(#[from] ClassifierError),
}

/// Service wrapping the classifier loaded at startup.
pub struct PredictionService<C>
where
    C: Classifier,
{
    classifier: Arc<C>,
}

impl<C> Clone for PredictionService<C>
where
    C: Classifier,
{
    fn clone(&self) -> Self {
        Self {
            classifier: Arc::clone(&self.classifier),
        }
    }
}

impl<C> PredictionService<C>
where
    C: Classifier,
{
    pub fn new(classifier: Arc<C>) -> Self {
        Self { classifier }
    }

    /// Classify one record.
    ///
    /// Input values are never logged, only the resulting label.
    ///
    /// # Errors
    /// Returns error if the session is anonymous, the record is out of
    /// range, or the classifier fails.
    pub fn assess(
        &self,
        session: &Session,
        record: &ClinicalRecord,
    ) -> Result<Assessment, PredictionError> {
        if !session.is_authenticated() {
            return Err(PredictionError::NotAuthenticated);
        }

        record.validate().map_err(PredictionError::InvalidInput)?;

        let label = self.classifier.predict(record)?;
        tracing::info!("Prediction completed: {}", label);

        Ok(Assessment::new(label))
    }

    /// Description of the loaded model.
    #[must_use]
    pub fn model_description(&self) -> String {
        self.classifier.describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Label, PRECAUTIONS};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Present when age is 60 or above; counts calls.
    struct AgeThreshold {
        calls: AtomicUsize,
    }

    impl Classifier for AgeThreshold {
        fn predict(&self, record: &ClinicalRecord) -> Result<Label, ClassifierError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(if record.age >= 60.0 {
                Label::Present
            } else {
                Label::Absent
            })
        }

        fn describe(&self) -> String {
            "age-threshold stub".into()
        }
    }

    fn service() -> (Arc<AgeThreshold>, PredictionService<AgeThreshold>) {
        let classifier = Arc::new(AgeThreshold {
            calls: AtomicUsize::new(0),
        });
        (Arc::clone(&classifier), PredictionService::new(classifier))
    }

    fn record(age: f64) -> ClinicalRecord {
        ClinicalRecord {
            age,
            sex: 1.0,
            cp: 2.0,
            trestbps: 130.0,
            chol: 250.0,
            fbs: 0.0,
            restecg: 1.0,
            thalach: 150.0,
            exang: 0.0,
            oldpeak: 1.4,
            slope: 1.0,
            ca: 0.0,
            thal: 2.0,
        }
    }

    fn logged_in() -> Session {
        let mut session = Session::new(false);
        session.authenticate("alice");
        session
    }

    #[test]
    fn test_requires_authentication() {
        let (classifier, svc) = service();
        let err = svc
            .assess(&Session::new(false), &record(50.0))
            .expect_err("anonymous must fail");
        assert!(matches!(err, PredictionError::NotAuthenticated));
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_assessment_message_and_precautions() {
        let (classifier, svc) = service();
        let session = logged_in();

        let present = svc.assess(&session, &record(70.0)).expect("assess");
        assert_eq!(present.label, Label::Present);
        assert_eq!(present.message(), "You have heart disease.");
        assert_eq!(present.precautions(), &PRECAUTIONS);

        let absent = svc.assess(&session, &record(40.0)).expect("assess");
        assert_eq!(absent.message(), "You do not have heart disease.");
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_invalid_input_not_sent_to_classifier() {
        let (classifier, svc) = service();
        let mut bad = record(50.0);
        bad.cp = 7.0;
        bad.chol = f64::NAN;

        let err = svc.assess(&logged_in(), &bad).expect_err("must fail");
        match err {
            PredictionError::InvalidInput(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_repeated_predictions_identical() {
        let (_classifier, svc) = service();
        let session = logged_in();
        let input = record(61.0);

        let first = svc.assess(&session, &input).expect("assess").label;
        for _ in 0..5 {
            assert_eq!(svc.assess(&session, &input).expect("assess").label, first);
        }
    }

    #[test]
    fn test_classifier_error_surfaces() {
        struct Broken;
        impl Classifier for Broken {
            fn predict(&self, _: &ClinicalRecord) -> Result<Label, ClassifierError> {
                Err(ClassifierError::NonFiniteScore)
            }
            fn describe(&self) -> String {
                "broken".into()
            }
        }

        let svc = PredictionService::new(Arc::new(Broken));
        let err = svc.assess(&logged_in(), &record(50.0)).expect_err("must fail");
        assert!(matches!(err, PredictionError::Classifier(_)));
        assert_eq!(svc.model_description(), "broken");
    }
}
