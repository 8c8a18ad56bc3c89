//! Runtime configuration from `CARDIOGATE_*` environment variables.

use std::path::PathBuf;

use crate::adapters::model::{self, ModelError, ModelLoadOptions};

pub const USERS_FILE_ENV: &str = "CARDIOGATE_USERS_FILE";
pub const MODEL_PATH_ENV: &str = "CARDIOGATE_MODEL_PATH";
pub const MODEL_PUBKEY_ENV: &str = "CARDIOGATE_MODEL_PUBKEY_B64_FILE";
pub const REQUIRE_SIGNED_ENV: &str = "CARDIOGATE_REQUIRE_SIGNED_MODEL";
pub const MIN_SERIAL_ENV: &str = "CARDIOGATE_MODEL_MIN_SERIAL";
pub const SHOW_WELCOME_ENV: &str = "CARDIOGATE_SHOW_WELCOME";
pub const LOG_MODE_ENV: &str = "CARDIOGATE_LOG_MODE";
pub const LOG_FILE_ENV: &str = "CARDIOGATE_LOG_FILE";

const DEFAULT_USERS_FILE: &str = "users.txt";
const DEFAULT_MODEL_DIR: &str = "models";
const DEFAULT_LOG_FILE: &str = "cardiogate.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    File,
    Stdout,
    /// File when stdout is a terminal, stdout otherwise.
    Auto,
}

impl LogMode {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("file") => Self::File,
            Some("stdout") => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Whether to log to a file given the terminal state.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub users_file: PathBuf,
    pub model_path: PathBuf,
    pub model_pubkey_file: Option<PathBuf>,
    pub require_signed_model: bool,
    pub model_min_serial: u64,
    pub show_welcome: bool,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_bool(value: Option<&str>, default: bool) -> bool {
    match value {
        Some(v) if matches!(v, "1" | "true" | "TRUE" | "yes" | "YES") => true,
        Some(v) if matches!(v, "0" | "false" | "FALSE" | "no" | "NO") => false,
        _ => default,
    }
}

impl AppConfig {
    /// Resolve configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        // Relative to the working directory, not to the executable.
        let model_path = non_empty(MODEL_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_DIR));

        Self {
            users_file: non_empty(USERS_FILE_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_USERS_FILE)),
            model_path,
            model_pubkey_file: non_empty(MODEL_PUBKEY_ENV).map(PathBuf::from),
            require_signed_model: parse_bool(lookup(REQUIRE_SIGNED_ENV).as_deref(), false),
            model_min_serial: non_empty(MIN_SERIAL_ENV)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(0),
            show_welcome: parse_bool(lookup(SHOW_WELCOME_ENV).as_deref(), true),
            log_mode: LogMode::parse(lookup(LOG_MODE_ENV).as_deref()),
            log_file: non_empty(LOG_FILE_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }

    /// Model load options, reading the verifying key file if configured.
    ///
    /// # Errors
    /// Returns error if the configured key file is unreadable or invalid.
    pub fn model_load_options(&self) -> Result<ModelLoadOptions, ModelError> {
        let verifying_key = match &self.model_pubkey_file {
            Some(path) => Some(model::load_verifying_key(path)?),
            None => None,
        };

        Ok(ModelLoadOptions {
            verifying_key,
            require_signed: self.require_signed_model,
            min_serial: self.model_min_serial,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.users_file, PathBuf::from("users.txt"));
        assert_eq!(config.model_path, PathBuf::from("models"));
        assert_eq!(config.model_pubkey_file, None);
        assert!(!config.require_signed_model);
        assert_eq!(config.model_min_serial, 0);
        assert!(config.show_welcome);
        assert_eq!(config.log_mode, LogMode::Auto);
        assert_eq!(config.log_file, PathBuf::from("cardiogate.log"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            (USERS_FILE_ENV, "/data/users.txt"),
            (MODEL_PATH_ENV, "/opt/model.json"),
            (MODEL_PUBKEY_ENV, "/keys/verifying_key.b64"),
            (REQUIRE_SIGNED_ENV, "yes"),
            (MIN_SERIAL_ENV, " 42 "),
            (SHOW_WELCOME_ENV, "0"),
            (LOG_MODE_ENV, "stdout"),
        ]);

        assert_eq!(config.users_file, PathBuf::from("/data/users.txt"));
        assert_eq!(config.model_path, PathBuf::from("/opt/model.json"));
        assert_eq!(
            config.model_pubkey_file,
            Some(PathBuf::from("/keys/verifying_key.b64"))
        );
        assert!(config.require_signed_model);
        assert_eq!(config.model_min_serial, 42);
        assert!(!config.show_welcome);
        assert_eq!(config.log_mode, LogMode::Stdout);
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = config_from(&[
            (USERS_FILE_ENV, "  "),
            (SHOW_WELCOME_ENV, "maybe"),
            (MIN_SERIAL_ENV, "latest"),
        ]);
        assert_eq!(config.users_file, PathBuf::from("users.txt"));
        assert_eq!(config.model_min_serial, 0);
        assert!(config.show_welcome);
    }

    #[test]
    fn test_log_mode_resolution() {
        assert!(LogMode::File.use_file(false));
        assert!(!LogMode::Stdout.use_file(true));
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
    }

    #[test]
    fn test_missing_pubkey_file_is_error() {
        let config = config_from(&[(MODEL_PUBKEY_ENV, "/nonexistent/key.b64")]);
        assert!(config.model_load_options().is_err());
    }
}
