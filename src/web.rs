//! Web interface components.
//!
//! Hosts the reference HTTP adapter for the session cookie.

pub mod server;
