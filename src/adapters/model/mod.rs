//! Model adapter: Implementation of Classifier over an exported linear model.
//!
//! The classifier is trained offline and exported as JSON (coefficients,
//! intercept, optional standard-scaler parameters). It is loaded once at
//! startup and injected into the prediction service.
//!
//! # Integrity
//!
//! When a verifying key is configured, the model directory must carry a
//! `manifest.json` binding every model file by SHA-256, and a `model.sig`
//! Ed25519 signature over the manifest bytes. Only files bound by a valid
//! manifest are loaded. Without a verifying key the model is loaded
//! unsigned, unless signed models are required.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};

use crate::domain::digest::{constant_time_eq_str, sha256_hex};
use crate::domain::{ClinicalRecord, Label, FEATURE_COUNT, FEATURE_NAMES};
use crate::ports::{Classifier, ClassifierError};

/// Preferred model file name inside a model directory.
pub const MODEL_FILE: &str = "heart_disease_model.json";

/// Fallback model file name.
const FALLBACK_MODEL_FILE: &str = "model.json";

pub const MANIFEST_FILE: &str = "manifest.json";
pub const SIGNATURE_FILE: &str = "model.sig";

const MANIFEST_VERSION: u32 = 1;

/// Allowed clock skew for manifest timestamps, in seconds.
const MAX_FUTURE_SKEW_SECS: i64 = 300;

/// Errors while loading a model artifact.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Model artifact not found at {0:?}")]
    NotFound(PathBuf),

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid model format: {0}")]
    Format(String),

    #[error("Model integrity check failed: {0}")]
    Integrity(String),

    #[error("Refusing to load unsigned model from {0:?}")]
    Unsigned(PathBuf),
}

fn read_file(path: &Path) -> Result<Vec<u8>, ModelError> {
    fs::read(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn default_threshold() -> f64 {
    0.5
}

/// Linear model parameters as exported by the training pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedLinearModel {
    pub model_type: String,
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub scaler_mean: Option<Vec<f64>>,
    #[serde(default)]
    pub scaler_scale: Option<Vec<f64>>,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl ExportedLinearModel {
    /// Check that the parameters fit the 13-feature clinical record.
    ///
    /// # Errors
    /// Returns `ModelError::Format` describing the first problem found.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.model_type != "logistic_regression" {
            return Err(ModelError::Format(format!(
                "Unsupported model_type {:?} (expected \"logistic_regression\")",
                self.model_type
            )));
        }

        if self.feature_names.len() != FEATURE_COUNT
            || self
                .feature_names
                .iter()
                .zip(FEATURE_NAMES)
                .any(|(got, want)| got != want)
        {
            return Err(ModelError::Format(format!(
                "feature_names must be {:?} in this order",
                FEATURE_NAMES
            )));
        }

        if self.coefficients.len() != FEATURE_COUNT {
            return Err(ModelError::Format(format!(
                "Expected {FEATURE_COUNT} coefficients, got {}",
                self.coefficients.len()
            )));
        }

        match (&self.scaler_mean, &self.scaler_scale) {
            (None, None) => {}
            (Some(mean), Some(scale)) => {
                if mean.len() != FEATURE_COUNT || scale.len() != FEATURE_COUNT {
                    return Err(ModelError::Format(
                        "Scaler parameter lengths do not match feature count".into(),
                    ));
                }
                if scale.iter().any(|s| !s.is_finite() || *s == 0.0) {
                    return Err(ModelError::Format(
                        "scaler_scale values must be finite and non-zero".into(),
                    ));
                }
            }
            _ => {
                return Err(ModelError::Format(
                    "scaler_mean and scaler_scale must be given together".into(),
                ))
            }
        }

        let all_params = self
            .coefficients
            .iter()
            .chain(std::iter::once(&self.intercept))
            .chain(self.scaler_mean.iter().flatten());
        if all_params.into_iter().any(|v| !v.is_finite()) {
            return Err(ModelError::Format("Model parameters must be finite".into()));
        }

        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ModelError::Format(format!(
                "threshold {} out of range [0, 1]",
                self.threshold
            )));
        }

        Ok(())
    }

    /// Probability of the positive class for a raw feature row.
    ///
    /// # Errors
    /// Returns error on feature count mismatch or a non-finite score.
    pub fn probability(&self, raw: &[f64]) -> Result<f64, ClassifierError> {
        if raw.len() != self.coefficients.len() {
            return Err(ClassifierError::FeatureMismatch {
                got: raw.len(),
                expected: self.coefficients.len(),
            });
        }

        let mut score = self.intercept;
        for (i, (x, w)) in raw.iter().zip(&self.coefficients).enumerate() {
            let x = match (&self.scaler_mean, &self.scaler_scale) {
                (Some(mean), Some(scale)) => (x - mean[i]) / scale[i],
                _ => *x,
            };
            score += w * x;
        }

        if !score.is_finite() {
            return Err(ClassifierError::NonFiniteScore);
        }

        Ok(sigmoid(score))
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Signed manifest binding model files by SHA-256.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedModelManifest {
    pub version: u32,
    #[serde(default)]
    pub serial: u64,
    pub created_at: i64,
    pub files: BTreeMap<String, String>,
}

/// How strictly a model artifact is checked on load.
#[derive(Debug, Clone, Default)]
pub struct ModelLoadOptions {
    /// Verifying key for signed manifests. `Some` makes signatures mandatory.
    pub verifying_key: Option<VerifyingKey>,
    /// Refuse unsigned models even without a verifying key.
    pub require_signed: bool,
    /// Lowest acceptable manifest serial. Older signed manifests are refused.
    pub min_serial: u64,
}

/// Classifier backed by an exported logistic regression model.
#[derive(Debug, Clone)]
pub struct LinearModelClassifier {
    model: ExportedLinearModel,
    source: PathBuf,
    signed: bool,
}

impl LinearModelClassifier {
    /// Build a classifier from in-memory parameters.
    ///
    /// # Errors
    /// Returns error if the parameters are invalid.
    pub fn from_model(model: ExportedLinearModel) -> Result<Self, ModelError> {
        model.validate()?;
        Ok(Self {
            model,
            source: PathBuf::from("<memory>"),
            signed: false,
        })
    }

    /// Load a model from a directory or a JSON file.
    ///
    /// # Errors
    /// Returns `ModelError::NotFound` if no artifact exists, and integrity or
    /// format errors otherwise. A missing model is fatal for the application.
    pub fn load(path: &Path, options: &ModelLoadOptions) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::NotFound(path.to_path_buf()));
        }

        let base_dir = if path.is_dir() {
            path
        } else {
            path.parent().unwrap_or(path)
        };

        let (model_path, signed) = match &options.verifying_key {
            Some(key) => {
                let manifest = verify_manifest(base_dir, key)?;
                if manifest.serial < options.min_serial {
                    return Err(ModelError::Integrity(format!(
                        "Refusing to load older signed manifest (serial {} < minimum {})",
                        manifest.serial, options.min_serial
                    )));
                }
                (select_bound_model(path, base_dir, &manifest)?, true)
            }
            None => {
                if options.require_signed {
                    return Err(ModelError::Unsigned(path.to_path_buf()));
                }
                tracing::warn!(
                    "No model verifying key configured; loading model from {:?} without signature check",
                    path
                );
                (discover_model(path, base_dir)?, false)
            }
        };

        let content = read_file(&model_path)?;
        let model: ExportedLinearModel = serde_json::from_slice(&content)
            .map_err(|e| ModelError::Format(format!("{model_path:?}: {e}")))?;
        model.validate()?;

        tracing::info!(
            "Loaded {} model from {:?} (n_features={}, threshold={}, signed={})",
            model.model_type,
            model_path,
            model.feature_names.len(),
            model.threshold,
            signed
        );

        Ok(Self {
            model,
            source: model_path,
            signed,
        })
    }

    /// Probability of heart disease for a record.
    ///
    /// # Errors
    /// Returns error if the model cannot evaluate the record.
    pub fn probability(&self, record: &ClinicalRecord) -> Result<f64, ClassifierError> {
        self.model.probability(&record.to_vec())
    }

    #[must_use]
    pub fn is_signed(&self) -> bool {
        self.signed
    }

    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }
}

impl Classifier for LinearModelClassifier {
    fn predict(&self, record: &ClinicalRecord) -> Result<Label, ClassifierError> {
        let p = self.probability(record)?;
        Ok(if p >= self.model.threshold {
            Label::Present
        } else {
            Label::Absent
        })
    }

    fn describe(&self) -> String {
        let name = self
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.display().to_string());
        if self.signed {
            format!("{name} (signed)")
        } else {
            format!("{name} (unsigned)")
        }
    }
}

/// Pick the model file for unsigned loading.
fn discover_model(path: &Path, base_dir: &Path) -> Result<PathBuf, ModelError> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }

    [MODEL_FILE, FALLBACK_MODEL_FILE]
        .iter()
        .map(|name| base_dir.join(name))
        .find(|p| p.exists())
        .ok_or_else(|| ModelError::NotFound(base_dir.join(MODEL_FILE)))
}

/// Pick the model file bound by a verified manifest.
fn select_bound_model(
    path: &Path,
    base_dir: &Path,
    manifest: &SignedModelManifest,
) -> Result<PathBuf, ModelError> {
    if path.is_file() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !manifest.files.contains_key(&name) {
            return Err(ModelError::Integrity(format!(
                "{name} is not bound by {MANIFEST_FILE}"
            )));
        }
        return Ok(path.to_path_buf());
    }

    [MODEL_FILE, FALLBACK_MODEL_FILE]
        .iter()
        .find(|name| manifest.files.contains_key(**name))
        .map(|name| base_dir.join(name))
        .ok_or_else(|| {
            ModelError::Integrity(format!(
                "{MANIFEST_FILE} must include {MODEL_FILE} or {FALLBACK_MODEL_FILE}"
            ))
        })
}

fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Verify `model.sig` over `manifest.json` and every file hash it binds.
fn verify_manifest(base_dir: &Path, key: &VerifyingKey) -> Result<SignedModelManifest, ModelError> {
    let sig_path = base_dir.join(SIGNATURE_FILE);
    let manifest_path = base_dir.join(MANIFEST_FILE);

    if !sig_path.exists() || !manifest_path.exists() {
        return Err(ModelError::Integrity(format!(
            "{SIGNATURE_FILE} and {MANIFEST_FILE} are required when a verifying key is configured"
        )));
    }

    let sig_bytes = read_file(&sig_path)?;
    let sig_array: [u8; 64] = sig_bytes.as_slice().try_into().map_err(|_| {
        ModelError::Integrity("Invalid signature length (expected 64 bytes)".into())
    })?;
    let signature = Signature::from_bytes(&sig_array);

    let manifest_content = read_file(&manifest_path)?;
    key.verify(&manifest_content, &signature)
        .map_err(|_| ModelError::Integrity("Invalid model signature".into()))?;

    let manifest: SignedModelManifest = serde_json::from_slice(&manifest_content)
        .map_err(|e| ModelError::Integrity(format!("Invalid {MANIFEST_FILE} format: {e}")))?;

    if manifest.version != MANIFEST_VERSION {
        return Err(ModelError::Integrity(format!(
            "Unsupported manifest version: {}",
            manifest.version
        )));
    }
    if manifest.created_at > unix_now() + MAX_FUTURE_SKEW_SECS {
        return Err(ModelError::Integrity(
            "manifest created_at is in the future".into(),
        ));
    }
    if manifest.files.is_empty() {
        return Err(ModelError::Integrity(format!(
            "{MANIFEST_FILE} contains no files"
        )));
    }

    for (rel, expected_hex) in &manifest.files {
        if rel.contains('/') || rel.contains('\\') || rel == ".." {
            return Err(ModelError::Integrity(format!(
                "Manifest entry {rel:?} must be a plain file name"
            )));
        }
        let path = base_dir.join(rel);
        let bytes = fs::read(&path).map_err(|e| {
            ModelError::Integrity(format!(
                "Manifest references missing/unreadable file {path:?}: {e}"
            ))
        })?;
        if !constant_time_eq_str(&sha256_hex(&bytes), expected_hex) {
            return Err(ModelError::Integrity(format!("File hash mismatch for {rel}")));
        }
    }

    tracing::info!("Model signature and hashes verified successfully");
    Ok(manifest)
}

/// Sign every `*.json` model file in `dir` (except the manifest itself).
///
/// Writes `manifest.json` and `model.sig` into `dir`.
///
/// # Errors
/// Returns error if the directory holds no model files or cannot be written.
pub fn sign_model_dir(
    dir: &Path,
    signing_key: &SigningKey,
    serial: u64,
) -> Result<SignedModelManifest, ModelError> {
    let entries = fs::read_dir(dir).map_err(|source| ModelError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = BTreeMap::new();
    for entry in entries {
        let entry = entry.map_err(|source| ModelError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        if !path.is_file() || name == MANIFEST_FILE || !name.ends_with(".json") {
            continue;
        }
        files.insert(name, sha256_hex(&read_file(&path)?));
    }

    if files.is_empty() {
        return Err(ModelError::NotFound(dir.join(MODEL_FILE)));
    }

    let manifest = SignedModelManifest {
        version: MANIFEST_VERSION,
        serial,
        created_at: unix_now(),
        files,
    };
    let manifest_bytes = serde_json::to_vec_pretty(&manifest)
        .map_err(|e| ModelError::Format(format!("Failed to serialize manifest: {e}")))?;
    let signature = signing_key.sign(&manifest_bytes);

    let manifest_path = dir.join(MANIFEST_FILE);
    fs::write(&manifest_path, &manifest_bytes).map_err(|source| ModelError::Io {
        path: manifest_path,
        source,
    })?;
    let sig_path = dir.join(SIGNATURE_FILE);
    fs::write(&sig_path, signature.to_bytes()).map_err(|source| ModelError::Io {
        path: sig_path,
        source,
    })?;

    tracing::info!("Signed {} model file(s) in {:?}", manifest.files.len(), dir);
    Ok(manifest)
}

/// Decode a base64 Ed25519 verifying key.
///
/// # Errors
/// Returns error if the input is not a valid 32-byte key.
pub fn verifying_key_from_b64(b64: &str) -> Result<VerifyingKey, ModelError> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(b64.trim())
        .map_err(|_| ModelError::Integrity("Invalid public key base64".into()))?;
    let key: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
        ModelError::Integrity("Invalid public key length (expected 32 bytes)".into())
    })?;
    VerifyingKey::from_bytes(&key).map_err(|_| ModelError::Integrity("Invalid verifying key".into()))
}

/// Read a base64 verifying key from a file.
///
/// # Errors
/// Returns error if the file cannot be read or holds an invalid key.
pub fn load_verifying_key(path: &Path) -> Result<VerifyingKey, ModelError> {
    let content = read_file(path)?;
    verifying_key_from_b64(&String::from_utf8_lossy(&content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;
    use tempfile::tempdir;

    fn sample_record() -> ClinicalRecord {
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

    fn linear(coefficients: Vec<f64>, intercept: f64) -> ExportedLinearModel {
        ExportedLinearModel {
            model_type: "logistic_regression".into(),
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            coefficients,
            intercept,
            scaler_mean: None,
            scaler_scale: None,
            threshold: 0.5,
        }
    }

    fn write_model(path: &Path, intercept: f64) {
        let model = linear(vec![0.0; FEATURE_COUNT], intercept);
        std::fs::write(path, serde_json::to_vec_pretty(&model).expect("json")).expect("write");
    }

    fn random_signing_key() -> SigningKey {
        let mut sk = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut sk);
        SigningKey::from_bytes(&sk)
    }

    fn signed_options(key: &SigningKey) -> ModelLoadOptions {
        ModelLoadOptions {
            verifying_key: Some(key.verifying_key()),
            require_signed: true,
            min_serial: 0,
        }
    }

    #[test]
    fn test_intercept_only_model_thresholds() {
        let positive =
            LinearModelClassifier::from_model(linear(vec![0.0; FEATURE_COUNT], 2.0)).expect("valid");
        let negative =
            LinearModelClassifier::from_model(linear(vec![0.0; FEATURE_COUNT], -2.0)).expect("valid");

        assert_eq!(positive.predict(&sample_record()).expect("predict"), Label::Present);
        assert_eq!(negative.predict(&sample_record()).expect("predict"), Label::Absent);
    }

    #[test]
    fn test_scaler_applied() {
        let mut model = linear(vec![0.0; FEATURE_COUNT], 0.0);
        model.coefficients[0] = 1.0;
        model.scaler_mean = Some(vec![50.0; FEATURE_COUNT]);
        model.scaler_scale = Some(vec![10.0; FEATURE_COUNT]);

        // (54 - 50) / 10 = 0.4
        let p = model.probability(&sample_record().to_vec()).expect("score");
        assert!((p - sigmoid(0.4)).abs() < 1e-12);
    }

    #[test]
    fn test_feature_mismatch() {
        let model = linear(vec![0.0; FEATURE_COUNT], 0.0);
        let err = model.probability(&[1.0, 2.0]).expect_err("must fail");
        assert!(matches!(err, ClassifierError::FeatureMismatch { got: 2, expected: 13 }));
    }

    #[test]
    fn test_validate_rejects_bad_models() {
        let mut wrong_names = linear(vec![0.0; FEATURE_COUNT], 0.0);
        wrong_names.feature_names.swap(0, 1);
        assert!(wrong_names.validate().is_err());

        let short = linear(vec![0.0; 3], 0.0);
        assert!(short.validate().is_err());

        let mut half_scaler = linear(vec![0.0; FEATURE_COUNT], 0.0);
        half_scaler.scaler_mean = Some(vec![0.0; FEATURE_COUNT]);
        assert!(half_scaler.validate().is_err());

        let mut zero_scale = linear(vec![0.0; FEATURE_COUNT], 0.0);
        zero_scale.scaler_mean = Some(vec![0.0; FEATURE_COUNT]);
        zero_scale.scaler_scale = Some(vec![0.0; FEATURE_COUNT]);
        assert!(zero_scale.validate().is_err());

        let mut other_type = linear(vec![0.0; FEATURE_COUNT], 0.0);
        other_type.model_type = "random_forest".into();
        assert!(other_type.validate().is_err());
    }

    #[test]
    fn test_shipped_model_is_deterministic() {
        let classifier = LinearModelClassifier::load(Path::new("models"), &ModelLoadOptions::default())
            .expect("Shipped model should load");
        assert!(!classifier.is_signed());

        let record = sample_record();
        let first = classifier.predict(&record).expect("predict");
        for _ in 0..10 {
            assert_eq!(classifier.predict(&record).expect("predict"), first);
        }
    }

    #[test]
    fn test_missing_artifact_is_not_found() {
        let temp = tempdir().expect("tempdir");
        let err = LinearModelClassifier::load(&temp.path().join("nope"), &ModelLoadOptions::default())
            .expect_err("must fail");
        assert!(matches!(err, ModelError::NotFound(_)));

        let err = LinearModelClassifier::load(temp.path(), &ModelLoadOptions::default())
            .expect_err("must fail");
        assert!(matches!(err, ModelError::NotFound(_)));
    }

    #[test]
    fn test_unsigned_refused_when_required() {
        let temp = tempdir().expect("tempdir");
        write_model(&temp.path().join(MODEL_FILE), 1.0);

        let options = ModelLoadOptions {
            verifying_key: None,
            require_signed: true,
            min_serial: 0,
        };
        let err = LinearModelClassifier::load(temp.path(), &options).expect_err("must fail");
        assert!(matches!(err, ModelError::Unsigned(_)));
    }

    #[test]
    fn test_signed_model_roundtrip() {
        let temp = tempdir().expect("tempdir");
        write_model(&temp.path().join(MODEL_FILE), 1.0);
        let key = random_signing_key();

        let manifest = sign_model_dir(temp.path(), &key, 7).expect("sign");
        assert_eq!(manifest.serial, 7);
        assert!(manifest.files.contains_key(MODEL_FILE));

        let classifier =
            LinearModelClassifier::load(temp.path(), &signed_options(&key)).expect("load signed");
        assert!(classifier.is_signed());
        assert!(classifier.describe().contains("signed"));
    }

    #[test]
    fn test_serial_below_minimum_rejected() {
        let temp = tempdir().expect("tempdir");
        write_model(&temp.path().join(MODEL_FILE), 1.0);
        let key = random_signing_key();
        sign_model_dir(temp.path(), &key, 5).expect("sign");

        let mut options = signed_options(&key);
        options.min_serial = 6;
        let err = LinearModelClassifier::load(temp.path(), &options).expect_err("must fail");
        assert!(err.to_string().contains("serial 5 < minimum 6"));

        options.min_serial = 5;
        assert!(LinearModelClassifier::load(temp.path(), &options).is_ok());
    }

    #[test]
    fn test_prefers_manifest_bound_file() {
        let temp = tempdir().expect("tempdir");
        write_model(&temp.path().join(FALLBACK_MODEL_FILE), 1.0);
        let key = random_signing_key();
        sign_model_dir(temp.path(), &key, 1).expect("sign");

        // Added after signing, so not bound: must not be picked up.
        write_model(&temp.path().join(MODEL_FILE), -1.0);

        let classifier =
            LinearModelClassifier::load(temp.path(), &signed_options(&key)).expect("load signed");
        assert_eq!(
            classifier.source().file_name().and_then(|n| n.to_str()),
            Some(FALLBACK_MODEL_FILE)
        );
    }

    #[test]
    fn test_tampered_model_rejected() {
        let temp = tempdir().expect("tempdir");
        let model_path = temp.path().join(MODEL_FILE);
        write_model(&model_path, 1.0);
        let key = random_signing_key();
        sign_model_dir(temp.path(), &key, 1).expect("sign");

        write_model(&model_path, -5.0);

        let err = LinearModelClassifier::load(temp.path(), &signed_options(&key))
            .expect_err("must fail");
        assert!(err.to_string().contains("hash mismatch"));
    }

    #[test]
    fn test_wrong_key_rejected() {
        let temp = tempdir().expect("tempdir");
        write_model(&temp.path().join(MODEL_FILE), 1.0);
        sign_model_dir(temp.path(), &random_signing_key(), 1).expect("sign");

        let other = random_signing_key();
        let err = LinearModelClassifier::load(temp.path(), &signed_options(&other))
            .expect_err("must fail");
        assert!(err.to_string().contains("Invalid model signature"));
    }

    #[test]
    fn test_signature_required_with_key() {
        let temp = tempdir().expect("tempdir");
        write_model(&temp.path().join(MODEL_FILE), 1.0);

        let err = LinearModelClassifier::load(temp.path(), &signed_options(&random_signing_key()))
            .expect_err("must fail");
        assert!(matches!(err, ModelError::Integrity(_)));
    }

    #[test]
    fn test_verifying_key_b64() {
        let key = random_signing_key();
        let b64 = base64::engine::general_purpose::STANDARD.encode(key.verifying_key().to_bytes());
        let decoded = verifying_key_from_b64(&format!("{b64}\n")).expect("decode");
        assert_eq!(decoded, key.verifying_key());

        assert!(verifying_key_from_b64("not base64!").is_err());
        assert!(verifying_key_from_b64("AAAA").is_err());
    }
}
