//! `MaveSession` - Stateless signed session cookies.
//!
//! Copyright (C) 2026 Maverick
//! SPDX-License-Identifier: AGPL-3.0-only
//!
//! Loads configuration, sets up logging, resolves the signing secret and
//! launches the reference session server.

use mavesession::{Config, SecretSource, SessionCookies, SessionTokenCodec, run_server};

use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let (non_blocking, _guard) = tracing_appender::non_blocking(std::io::stdout());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(non_blocking);

    if log_format.eq_ignore_ascii_case("pretty") {
        subscriber.init();
    } else {
        subscriber.json().init();
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let (secret, secret_source) = config.secret_key();
    if secret_source == SecretSource::Ephemeral {
        warn!(
            "SESSION_SECRET is not set; using a random in-memory secret. \
             All sessions become invalid when the process restarts"
        );
    }

    info!(
        listen_addr = %config.listen_addr,
        secret_source = ?secret_source,
        log_format = %config.log_format,
        "Server initialized"
    );

    let cookies = SessionCookies::new(SessionTokenCodec::new(secret));

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "Failed to create tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = runtime.block_on(run_server(config, cookies)) {
        error!(error = %e, "Server stopped");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
