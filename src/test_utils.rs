//! Test utilities and shared configuration.
//!
//! This module provides common helpers for unit and integration tests,
//! reducing duplication across the codebase.

#[cfg(any(test, feature = "testing"))]
use crate::config::Config;
#[cfg(any(test, feature = "testing"))]
use crate::security::crypto::{Clock, SecretKey, SessionTokenCodec};
#[cfg(any(test, feature = "testing"))]
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
#[cfg(any(test, feature = "testing"))]
use std::sync::Arc;
#[cfg(any(test, feature = "testing"))]
use std::sync::atomic::{AtomicU64, Ordering};

/// Fixed signing secret used across tests.
#[cfg(any(test, feature = "testing"))]
pub const TEST_SECRET: &[u8] = b"0000000000000000000000000000000000000000000000000000000000000000";

/// Settable clock. Clones share the same instant.
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

#[cfg(any(test, feature = "testing"))]
impl ManualClock {
    #[must_use]
    pub fn new(now_secs: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(now_secs)),
        }
    }

    pub fn set(&self, now_secs: u64) {
        self.now.store(now_secs, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

#[cfg(any(test, feature = "testing"))]
impl Clock for ManualClock {
    fn now_secs(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Creates a codec over [`TEST_SECRET`] and a manual clock set to `now_secs`.
///
/// The returned clock drives the codec, so tests can move time forward
/// without sleeping.
#[cfg(any(test, feature = "testing"))]
#[must_use]
pub fn create_test_codec(now_secs: u64) -> (SessionTokenCodec<ManualClock>, ManualClock) {
    let clock = ManualClock::new(now_secs);
    let codec = SessionTokenCodec::with_clock(SecretKey::from_bytes(TEST_SECRET), clock.clone());
    (codec, clock)
}

/// Creates a standard configuration for testing purposes.
///
/// This configuration has:
/// - Loopback listener on an ephemeral port
/// - The fixed test secret
/// - Pretty logging
#[cfg(any(test, feature = "testing"))]
#[must_use]
pub fn create_test_config() -> Arc<Config> {
    Arc::new(Config {
        listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0),
        session_secret: Some(String::from_utf8_lossy(TEST_SECRET).into_owned()),
        log_format: "pretty".to_string(),
    })
}
