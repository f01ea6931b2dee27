//! Session token signing.
//!
//! Tokens have the shape `<payload>.<signature>`. The payload is the
//! unpadded base64url encoding of `{"exp":<unix secs>}` and the signature is
//! the unpadded base64url encoding of HMAC-SHA256 computed over the ASCII
//! text of the encoded payload. Nothing is stored server side.

use crate::config::{Result, SessionError};
use crate::security::crypto::{Clock, SecretKey, SystemClock};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;
use tracing::{debug, error};

type HmacSha256 = Hmac<Sha256>;

/// Lifetime of an issued token.
pub const SESSION_DURATION_SECS: u64 = 3600;

const SEPARATOR: char = '.';

/// Signed token body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPayload {
    /// Absolute expiry, Unix seconds.
    pub exp: u64,
}

/// Reason a token failed verification.
///
/// Only meant for logs and tests. Callers of [`SessionTokenCodec::verify`]
/// get a plain `false` whatever the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Empty,
    Malformed,
    BadEncoding,
    BadSignature,
    BadPayload,
    Expired,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::Empty => "empty token",
            Self::Malformed => "malformed token",
            Self::BadEncoding => "invalid signature encoding",
            Self::BadSignature => "signature mismatch",
            Self::BadPayload => "unreadable payload",
            Self::Expired => "token expired",
        };
        f.write_str(reason)
    }
}

/// Issues and verifies session tokens under one secret.
#[derive(Clone)]
pub struct SessionTokenCodec<C = SystemClock> {
    secret: SecretKey,
    clock: C,
}

impl SessionTokenCodec<SystemClock> {
    /// Creates a codec reading the system clock.
    #[must_use]
    pub fn new(secret: SecretKey) -> Self {
        Self::with_clock(secret, SystemClock)
    }
}

impl<C: Clock> SessionTokenCodec<C> {
    #[must_use]
    pub fn with_clock(secret: SecretKey, clock: C) -> Self {
        Self { secret, clock }
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Issues a token expiring `SESSION_DURATION_SECS` from now.
    ///
    /// Returns `None` if signing fails; the caller should treat that as an
    /// unsuccessful login.
    #[must_use]
    pub fn generate(&self) -> Option<String> {
        let exp = self.clock.now_secs().saturating_add(SESSION_DURATION_SECS);
        self.issue_with_expiry(exp)
    }

    /// Issues a token with an explicit expiry.
    #[must_use]
    pub fn issue_with_expiry(&self, exp: u64) -> Option<String> {
        match self.sign(&SessionPayload { exp }) {
            Ok(token) => Some(token),
            Err(e) => {
                error!(error = %e, "Failed to issue session token");
                None
            }
        }
    }

    /// Returns `true` only for a well-formed, correctly signed, unexpired token.
    #[must_use]
    pub fn verify(&self, token: &str) -> bool {
        match self.inspect(token) {
            Ok(_) => true,
            Err(reason) => {
                debug!(%reason, "Session token rejected");
                false
            }
        }
    }

    /// Verifies a token and returns its payload, or the first check it failed.
    ///
    /// The signature is checked before the payload is decoded, so no
    /// attacker-controlled JSON is parsed unless it was signed with our key.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] describing why the token is not acceptable.
    pub fn inspect(&self, token: &str) -> std::result::Result<SessionPayload, Rejection> {
        if token.is_empty() {
            return Err(Rejection::Empty);
        }

        let Some((encoded_payload, encoded_signature)) = token.split_once(SEPARATOR) else {
            return Err(Rejection::Malformed);
        };
        if encoded_payload.is_empty()
            || encoded_signature.is_empty()
            || encoded_signature.contains(SEPARATOR)
        {
            return Err(Rejection::Malformed);
        }

        let signature = URL_SAFE_NO_PAD
            .decode(encoded_signature)
            .map_err(|_| Rejection::BadEncoding)?;

        // verify_slice compares in constant time and rejects length mismatches.
        self.mac(encoded_payload.as_bytes())
            .map_err(|_| Rejection::BadSignature)?
            .verify_slice(&signature)
            .map_err(|_| Rejection::BadSignature)?;

        let json = URL_SAFE_NO_PAD
            .decode(encoded_payload)
            .map_err(|_| Rejection::BadPayload)?;
        let payload: SessionPayload =
            serde_json::from_slice(&json).map_err(|_| Rejection::BadPayload)?;

        if payload.exp <= self.clock.now_secs() {
            return Err(Rejection::Expired);
        }

        Ok(payload)
    }

    fn sign(&self, payload: &SessionPayload) -> Result<String> {
        let json = serde_json::to_vec(payload)?;
        let encoded_payload = URL_SAFE_NO_PAD.encode(json);
        let signature = self.mac(encoded_payload.as_bytes())?.finalize().into_bytes();
        let encoded_signature = URL_SAFE_NO_PAD.encode(signature);
        Ok(format!("{encoded_payload}{SEPARATOR}{encoded_signature}"))
    }

    fn mac(&self, data: &[u8]) -> Result<HmacSha256> {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(self.secret.as_bytes())
            .map_err(|_| SessionError::InvalidKey)?;
        mac.update(data);
        Ok(mac)
    }
}

impl<C> fmt::Debug for SessionTokenCodec<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTokenCodec")
            .field("secret", &self.secret)
            .finish_non_exhaustive()
    }
}
