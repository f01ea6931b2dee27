//! Framework adapter.
//!
//! The session layer only needs to read one named cookie from a request and
//! append a `Set-Cookie` to a response. Implementations are provided for
//! hyper messages and for a pre-parsed cookie map.

use crate::core::middleware::SessionCookie;
use hyper::header::{COOKIE, HeaderValue, SET_COOKIE};
use hyper::{Request, Response};
use std::collections::HashMap;
use tracing::warn;

/// Read side: looks up an inbound cookie by name.
pub trait CookieSource {
    fn cookie(&self, name: &str) -> Option<String>;
}

/// Write side: attaches an outbound cookie.
pub trait CookieSink {
    fn set_cookie(&mut self, cookie: &SessionCookie);
}

impl<B> CookieSource for Request<B> {
    fn cookie(&self, name: &str) -> Option<String> {
        self.headers()
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .map(|(key, value)| (key, value.trim_matches('"')))
            .find(|(key, value)| *key == name && !value.is_empty())
            .map(|(_, value)| value.to_string())
    }
}

impl<B> CookieSink for Response<B> {
    fn set_cookie(&mut self, cookie: &SessionCookie) {
        match HeaderValue::from_str(&cookie.to_header_value()) {
            Ok(value) => {
                self.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => warn!(cookie = %cookie.name, error = %e, "Dropped unencodable cookie"),
        }
    }
}

impl CookieSource for HashMap<String, String> {
    fn cookie(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}
