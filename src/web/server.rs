//! Reference HTTP server.
//!
//! Shows the session cookie wired into a hyper service:
//! - `POST /login` issues a session cookie (credential checks live upstream)
//! - `POST /logout` clears it
//! - `GET /session` reports whether the caller is authenticated

use crate::config::{Config, Result};
use crate::core::middleware::SessionCookies;
use crate::security::crypto::Clock;
use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::header::{CONTENT_TYPE, HeaderValue};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

/// Binds `config.listen_addr` and serves until the process exits.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound.
pub async fn run_server(config: Arc<Config>, cookies: SessionCookies) -> Result<()> {
    let listener = TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "Session server listening");
    serve(listener, cookies).await
}

/// Accepts connections on an already bound listener.
///
/// # Errors
///
/// Never returns under normal operation; accept failures are logged and skipped.
pub async fn serve<C>(listener: TcpListener, cookies: SessionCookies<C>) -> Result<()>
where
    C: Clock + Clone + 'static,
{
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!(error = %e, "Failed to accept connection");
                continue;
            }
        };
        let io = TokioIo::new(stream);
        let cookies = cookies.clone();

        tokio::task::spawn(async move {
            let service = service_fn(move |req: Request<Incoming>| {
                let response = handle(&cookies, &req);
                async move { Ok::<_, Infallible>(response) }
            });

            if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                debug!(%peer, error = %err, "Connection closed with error");
            }
        });
    }
}

/// Routes a single request.
pub fn handle<B, C: Clock>(cookies: &SessionCookies<C>, req: &Request<B>) -> Response<Full<Bytes>> {
    match (req.method(), req.uri().path()) {
        (&Method::POST, "/login") => {
            let mut response = empty(StatusCode::NO_CONTENT);
            if cookies.login(&mut response) {
                info!("Session issued");
                response
            } else {
                error!("Login failed: no session token could be issued");
                text(StatusCode::INTERNAL_SERVER_ERROR, "could not authenticate")
            }
        }
        (&Method::POST, "/logout") => {
            let mut response = empty(StatusCode::NO_CONTENT);
            cookies.clear_cookie(&mut response);
            response
        }
        (&Method::GET, "/session") => {
            if cookies.verify_from_request(req) {
                text(StatusCode::OK, "authenticated")
            } else {
                text(StatusCode::UNAUTHORIZED, "unauthenticated")
            }
        }
        _ => text(StatusCode::NOT_FOUND, "404 Not Found"),
    }
}

fn empty(status: StatusCode) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = status;
    response
}

fn text(status: StatusCode, body: &'static str) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from_static(body.as_bytes())));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    response
}
