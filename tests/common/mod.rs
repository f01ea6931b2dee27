use mavesession::{SESSION_COOKIE_NAME, SecretKey, SessionCookies, SessionTokenCodec, serve};
use tokio::net::TcpListener;

pub const TEST_SECRET: &str = "0000000000000000000000000000000000000000000000000000000000000000";

pub fn create_test_codec(secret: &str) -> SessionTokenCodec {
    SessionTokenCodec::new(SecretKey::from_secret(secret))
}

pub async fn spawn_server_with_secret(secret: &str) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let cookies = SessionCookies::new(create_test_codec(secret));

    tokio::spawn(async move {
        let _ = serve(listener, cookies).await;
    });

    port
}

pub async fn spawn_server() -> u16 {
    spawn_server_with_secret(TEST_SECRET).await
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Returns the raw `Set-Cookie` header for the session cookie, if any.
pub fn session_set_cookie(resp: &reqwest::Response) -> Option<String> {
    resp.headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{SESSION_COOKIE_NAME}=")))
        .map(str::to_string)
}

/// Extracts the `name=value` pair from a `Set-Cookie` header.
pub fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap_or_default().to_string()
}
