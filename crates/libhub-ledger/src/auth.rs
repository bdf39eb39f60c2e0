//! Authentication capability.
//!
//! The ledger never checks credentials itself. Front ends hold an
//! `Authenticator` and decide what a `Session` unlocks.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::AuthConfig;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Proof of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("both username and password are required")]
    MissingCredentials,

    #[error("invalid username or password")]
    InvalidCredentials,
}

pub trait Authenticator {
    fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError>;
}

/// Accepts exactly one configured username/password pair.
#[derive(Clone)]
pub struct StaticAuthenticator {
    username: String,
    password: String,
}

impl StaticAuthenticator {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.username.clone(), config.password.clone())
    }
}

impl Default for StaticAuthenticator {
    fn default() -> Self {
        Self::from_config(&AuthConfig::default())
    }
}

impl Authenticator for StaticAuthenticator {
    fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        if credentials.username.is_empty() || credentials.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        if credentials.username != self.username || credentials.password != self.password {
            tracing::warn!(username = %credentials.username, "login rejected");
            return Err(AuthError::InvalidCredentials);
        }
        tracing::debug!(username = %credentials.username, "login accepted");
        Ok(Session {
            username: credentials.username.clone(),
        })
    }
}
