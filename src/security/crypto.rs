//! Cryptographic utilities.
//!
//! Provides session token signing and verification handlers.

pub mod clock;
pub mod secret;
pub mod token;

pub use clock::{Clock, SystemClock};
pub use secret::{SECRET_LEN, SecretKey, SecretSource};
pub use token::{Rejection, SESSION_DURATION_SECS, SessionPayload, SessionTokenCodec};
