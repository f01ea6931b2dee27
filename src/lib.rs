//! Library definitions.
//!
//! Exports the session token codec, cookie lifecycle helpers and the
//! reference HTTP server.

pub mod config;
pub mod core;
pub mod security;
pub mod web;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;
pub use crate::core::middleware::{
    CookieSink, CookieSource, SESSION_COOKIE_NAME, SessionCookie, SessionCookies,
    format_clear_cookie, format_set_cookie,
};
pub use config::{Config, Result, SessionError};
pub use security::crypto::{
    Clock, Rejection, SESSION_DURATION_SECS, SecretKey, SecretSource, SessionPayload,
    SessionTokenCodec, SystemClock,
};
pub use web::server::{run_server, serve};
