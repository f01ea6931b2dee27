use crate::common::{TEST_SECRET, client, create_test_codec, spawn_server};
use mavesession::{Config, SessionCookies, SessionError, run_server};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::test]
async fn test_unknown_route() {
    let port = spawn_server().await;

    let resp = client()
        .get(format!("http://127.0.0.1:{port}/admin"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_wrong_method_on_login() {
    let port = spawn_server().await;

    let resp = client()
        .get(format!("http://127.0.0.1:{port}/login"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_run_server_reports_bind_failure() {
    let occupied = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let config = Arc::new(Config {
        listen_addr: occupied.local_addr().unwrap(),
        session_secret: Some(TEST_SECRET.to_string()),
        log_format: "pretty".to_string(),
    });
    let cookies = SessionCookies::new(create_test_codec(TEST_SECRET));

    let result = run_server(config, cookies).await;

    assert!(matches!(result, Err(SessionError::Io(_))));
}
