//! Session management.
//!
//! Carries signed session tokens in a cookie. Every cookie written here,
//! including the one that clears the session, uses the same fixed attribute
//! set: browsers ignore a deletion whose attributes differ from the original.

use crate::core::middleware::{CookieSink, CookieSource};
use crate::security::crypto::{Clock, SESSION_DURATION_SECS, SessionTokenCodec, SystemClock};
use chrono::DateTime;
use tracing::{debug, warn};

pub const SESSION_COOKIE_NAME: &str = "__session";

const COOKIE_ATTRIBUTES: &str = "Path=/; HttpOnly; Secure; SameSite=None";
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

fn format_http_date(unix_secs: u64) -> String {
    i64::try_from(unix_secs)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_default()
        .format(HTTP_DATE_FORMAT)
        .to_string()
}

/// Renders a `Set-Cookie` value with the fixed session attributes.
#[must_use]
pub fn format_set_cookie(name: &str, value: &str, expires_at: u64, max_age: u64) -> String {
    let expires = format_http_date(expires_at);
    format!("{name}={value}; Expires={expires}; Max-Age={max_age}; {COOKIE_ATTRIBUTES}")
}

/// Renders a `Set-Cookie` value that deletes `name`.
#[must_use]
pub fn format_clear_cookie(name: &str) -> String {
    format_set_cookie(name, "", 0, 0)
}

/// Outbound session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    /// Absolute expiry, Unix seconds. Zero clears the cookie.
    pub expires_at: u64,
    pub max_age: u64,
}

impl SessionCookie {
    /// Cookie carrying `token`, expiring one session duration after `now_secs`.
    #[must_use]
    pub fn issue(token: &str, now_secs: u64) -> Self {
        Self {
            name: SESSION_COOKIE_NAME.to_string(),
            value: token.to_string(),
            expires_at: now_secs.saturating_add(SESSION_DURATION_SECS),
            max_age: SESSION_DURATION_SECS,
        }
    }

    /// Empty cookie dated at the epoch.
    #[must_use]
    pub fn clear() -> Self {
        Self {
            name: SESSION_COOKIE_NAME.to_string(),
            value: String::new(),
            expires_at: 0,
            max_age: 0,
        }
    }

    #[must_use]
    pub fn to_header_value(&self) -> String {
        format_set_cookie(&self.name, &self.value, self.expires_at, self.max_age)
    }
}

/// Binds a token codec to the session cookie.
#[derive(Debug, Clone)]
pub struct SessionCookies<C = SystemClock> {
    codec: SessionTokenCodec<C>,
}

impl<C: Clock> SessionCookies<C> {
    #[must_use]
    pub fn new(codec: SessionTokenCodec<C>) -> Self {
        Self { codec }
    }

    #[must_use]
    pub fn codec(&self) -> &SessionTokenCodec<C> {
        &self.codec
    }

    /// Reads the session cookie. An empty value counts as absent.
    pub fn extract_token<R: CookieSource + ?Sized>(&self, request: &R) -> Option<String> {
        request
            .cookie(SESSION_COOKIE_NAME)
            .filter(|token| !token.is_empty())
    }

    pub fn set_cookie<W: CookieSink + ?Sized>(&self, response: &mut W, token: &str) {
        let now = self.codec.clock().now_secs();
        response.set_cookie(&SessionCookie::issue(token, now));
    }

    pub fn clear_cookie<W: CookieSink + ?Sized>(&self, response: &mut W) {
        response.set_cookie(&SessionCookie::clear());
    }

    /// Returns whether the request carries a valid session.
    ///
    /// No cryptographic work is done when the cookie is missing.
    pub fn verify_from_request<R: CookieSource + ?Sized>(&self, request: &R) -> bool {
        let Some(token) = self.extract_token(request) else {
            debug!("No session cookie present");
            return false;
        };
        self.codec.verify(&token)
    }

    /// Issues a fresh token and stores it on the response.
    ///
    /// Returns `false`, leaving the response untouched, if the token could
    /// not be issued.
    pub fn login<W: CookieSink + ?Sized>(&self, response: &mut W) -> bool {
        let Some(token) = self.codec.generate() else {
            warn!("Session token generation failed, login refused");
            return false;
        };
        self.set_cookie(response, &token);
        true
    }
}
