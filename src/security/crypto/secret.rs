//! Signing key material.
//!
//! The key is either provisioned through configuration or generated once per
//! process. A generated key lives in memory only, so every token it signed
//! becomes unverifiable after a restart.

use rand::Rng;
use std::fmt;
use std::sync::Arc;

/// Length in bytes of a generated key.
pub const SECRET_LEN: usize = 32;

/// Where the active key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretSource {
    /// Supplied by the operator; survives restarts if they reuse it.
    Configured,
    /// Randomly generated for this process only.
    Ephemeral,
}

/// Immutable HMAC key shared by every sign and verify call.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(Arc<[u8]>);

impl SecretKey {
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Arc::from(bytes.into()))
    }

    /// Uses the UTF-8 bytes of `secret` directly as the key.
    #[must_use]
    pub fn from_secret(secret: &str) -> Self {
        Self::from_bytes(secret.as_bytes())
    }

    /// Generates a fresh random key.
    #[must_use]
    pub fn generate() -> Self {
        let random_bytes: [u8; SECRET_LEN] = rand::rng().random();
        Self::from_bytes(random_bytes)
    }

    /// Picks the configured secret when present, otherwise generates one.
    #[must_use]
    pub fn resolve(configured: Option<&str>) -> (Self, SecretSource) {
        match configured.filter(|s| !s.is_empty()) {
            Some(secret) => (Self::from_secret(secret), SecretSource::Configured),
            None => (Self::generate(), SecretSource::Ephemeral),
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey(<{} bytes>)", self.0.len())
    }
}
