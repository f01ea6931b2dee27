//! Configuration settings.
//!
//! Defines the main `Config` struct and environment variable loading logic.

use crate::config::{Result, SessionError};
use crate::security::crypto::{SecretKey, SecretSource};
use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

fn get_env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Application configuration loaded from environment.
#[derive(Clone)]
pub struct Config {
    /// Address the reference HTTP server binds to.
    pub listen_addr: SocketAddr,
    /// Externally provisioned signing secret. `None` means a random
    /// per-process secret is generated at startup.
    pub session_secret: Option<String>,
    /// Logging format: "json" or "pretty".
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Recognised variables: `SESSION_SECRET` (optional, empty counts as
    /// unset), `LISTEN_ADDR` (default `0.0.0.0:8080`) and `LOG_FORMAT`
    /// (default `json`).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Config` if `LISTEN_ADDR` is not a valid socket address.
    pub fn from_env() -> Result<Arc<Self>> {
        let raw_addr = get_env_or("LISTEN_ADDR", "0.0.0.0:8080");
        let listen_addr = raw_addr.parse().map_err(|_| {
            SessionError::Config(format!("LISTEN_ADDR '{raw_addr}' is not a valid socket address"))
        })?;

        Ok(Arc::new(Self {
            listen_addr,
            session_secret: get_env_opt("SESSION_SECRET"),
            log_format: get_env_or("LOG_FORMAT", "json"),
        }))
    }

    /// Resolves the signing key, generating an ephemeral one when no
    /// secret was provisioned.
    #[must_use]
    pub fn secret_key(&self) -> (SecretKey, SecretSource) {
        SecretKey::resolve(self.session_secret.as_deref())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("listen_addr", &self.listen_addr)
            .field(
                "session_secret",
                &self.session_secret.as_ref().map(|_| "<redacted>"),
            )
            .field("log_format", &self.log_format)
            .finish()
    }
}
