//! Middleware components.
//!
//! Includes the framework adapter traits and session cookie management.

mod adapter;
mod session;

pub use adapter::{CookieSink, CookieSource};
pub use session::{
    SESSION_COOKIE_NAME, SessionCookie, SessionCookies, format_clear_cookie, format_set_cookie,
};
