//! Core system components.
//!
//! Contains the cookie lifecycle middleware that binds tokens to HTTP traffic.

pub mod middleware;
