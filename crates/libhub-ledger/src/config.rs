//! Ledger configuration loaded from TOML.
//!
//! Every key is optional; a missing file section falls back to the library
//! defaults (14-day loans, 5 units per overdue day, demo credentials).
//!
//! ```toml
//! loan_period_days = 21
//! fine_per_day = 2
//!
//! [auth]
//! username = "librarian"
//! password = "s3cret"
//! ```

use chrono::Days;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::fine::{DEFAULT_FINE_PER_DAY, DEFAULT_LOAN_PERIOD_DAYS, FinePolicy};

const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PASSWORD: &str = "password";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    /// Days between issue date and due date.
    pub loan_period_days: u32,
    /// Fine charged per overdue day.
    pub fine_per_day: u64,
    pub auth: AuthConfig,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            loan_period_days: DEFAULT_LOAN_PERIOD_DAYS,
            fine_per_day: DEFAULT_FINE_PER_DAY,
            auth: AuthConfig::default(),
        }
    }
}

impl LedgerConfig {
    /// Parse and validate configuration text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Self::parse(text, "<inline>")
    }

    /// Read, parse and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text, &path.display().to_string())
    }

    fn parse(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.loan_period_days == 0 {
            return Err(ConfigError::Invalid(
                "loan_period_days must be at least 1".to_string(),
            ));
        }
        if self.auth.username.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "auth.username must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn fine_policy(&self) -> FinePolicy {
        FinePolicy::new(self.fine_per_day)
    }

    pub fn loan_period(&self) -> Days {
        Days::new(u64::from(self.loan_period_days))
    }
}

/// Credentials accepted by the static authenticator.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
