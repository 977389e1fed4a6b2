//! JSON configuration for hosting the core.
//!
//! # Responsibility
//! - Decode host settings: logging, demo seeding and the credential list.
//! - Validate settings before any state is built from them.
//!
//! # Invariants
//! - A config that passes `validate` always yields a usable directory:
//!   duplicate emails and malformed digests in `users` are load errors.
//! - Missing `users` falls back to the demo administrator account.

use crate::auth::credentials::{CredentialDirectory, CredentialError, CredentialRecord};
use crate::logging::{default_log_level, init_logging, normalize_level};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Errors raised while loading or applying configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json(serde_json::Error),
    /// Field value is present but unusable.
    Invalid {
        field: &'static str,
        message: String,
    },
    Credentials(CredentialError),
    Logging(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Json(err) => write!(f, "invalid config json: {err}"),
            Self::Invalid { field, message } => write!(f, "invalid config `{field}`: {message}"),
            Self::Credentials(err) => write!(f, "{err}"),
            Self::Logging(message) => write!(f, "logging init failed: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            Self::Credentials(err) => Some(err),
            Self::Invalid { .. } | Self::Logging(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<CredentialError> for ConfigError {
    fn from(value: CredentialError) -> Self {
        Self::Credentials(value)
    }
}

fn default_seed_demo_students() -> bool {
    true
}

/// Host configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// One of `trace|debug|info|warn|error`; build default when absent.
    #[serde(default)]
    pub log_level: Option<String>,
    /// Absolute directory for rolling logs; logging stays off when absent.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    #[serde(default = "default_seed_demo_students")]
    pub seed_demo_students: bool,
    /// Credential records; `None` means the demo directory.
    #[serde(default)]
    pub users: Option<Vec<CredentialRecord>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            log_dir: None,
            seed_demo_students: default_seed_demo_students(),
            users: None,
        }
    }
}

impl AppConfig {
    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Parses and validates config JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field, including building the credential directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(level) = &self.log_level {
            normalize_level(level).map_err(|message| ConfigError::Invalid {
                field: "log_level",
                message,
            })?;
        }
        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::Invalid {
                    field: "log_dir",
                    message: format!("must be an absolute path, got `{}`", dir.display()),
                });
            }
        }
        self.credential_directory()?;
        Ok(())
    }

    pub fn effective_log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }

    /// Builds the credential directory described by `users`.
    pub fn credential_directory(&self) -> Result<CredentialDirectory, ConfigError> {
        match &self.users {
            Some(records) => Ok(CredentialDirectory::from_records(records.clone())?),
            None => Ok(CredentialDirectory::demo()),
        }
    }

    /// Starts file logging when `log_dir` is set. Returns whether it did.
    pub fn init_logging(&self) -> Result<bool, ConfigError> {
        let Some(dir) = &self.log_dir else {
            return Ok(false);
        };
        let dir = dir.to_str().ok_or_else(|| ConfigError::Invalid {
            field: "log_dir",
            message: "path is not valid UTF-8".to_string(),
        })?;
        init_logging(self.effective_log_level(), dir).map_err(ConfigError::Logging)?;
        Ok(true)
    }
}
