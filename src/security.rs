//! Security primitives.
//!
//! Provides the signing key, time source and session token codec.

pub mod crypto;
