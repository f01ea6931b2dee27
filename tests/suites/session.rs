use crate::common::{
    TEST_SECRET, client, cookie_pair, create_test_codec, session_set_cookie, spawn_server,
    spawn_server_with_secret,
};
use mavesession::SESSION_COOKIE_NAME;
use std::time::{SystemTime, UNIX_EPOCH};

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

#[tokio::test]
async fn test_login_session_logout_flow() {
    let port = spawn_server().await;
    let client = client();

    let resp = client
        .post(format!("http://127.0.0.1:{port}/login"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let set_cookie = session_set_cookie(&resp).expect("login sets the session cookie");
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Secure"));
    assert!(set_cookie.contains("SameSite=None"));
    assert!(set_cookie.contains("Max-Age=3600"));

    let cookie = cookie_pair(&set_cookie);
    let resp = client
        .get(format!("http://127.0.0.1:{port}/session"))
        .header("Cookie", &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "authenticated");

    let resp = client
        .post(format!("http://127.0.0.1:{port}/logout"))
        .header("Cookie", &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let cleared = session_set_cookie(&resp).expect("logout clears the session cookie");
    assert_eq!(cookie_pair(&cleared), format!("{SESSION_COOKIE_NAME}="));
    assert!(cleared.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
    assert!(cleared.contains("Max-Age=0"));

    let attrs = |header: &str| -> Vec<String> {
        let mut attrs: Vec<String> = header
            .split("; ")
            .skip(1)
            .filter(|a| !a.starts_with("Expires=") && !a.starts_with("Max-Age="))
            .map(str::to_string)
            .collect();
        attrs.sort();
        attrs
    };
    assert_eq!(attrs(&set_cookie), attrs(&cleared));
}

#[tokio::test]
async fn test_session_without_cookie() {
    let port = spawn_server().await;

    let resp = client()
        .get(format!("http://127.0.0.1:{port}/session"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
    assert_eq!(resp.text().await.unwrap(), "unauthenticated");
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let port = spawn_server().await;
    let codec = create_test_codec(TEST_SECRET);
    let token = codec.issue_with_expiry(now_secs() - 1).unwrap();

    let resp = client()
        .get(format!("http://127.0.0.1:{port}/session"))
        .header("Cookie", format!("{SESSION_COOKIE_NAME}={token}"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_tampered_token_rejected() {
    let port = spawn_server().await;
    let codec = create_test_codec(TEST_SECRET);
    let token = codec.generate().unwrap();

    let (payload, signature) = token.split_once('.').unwrap();
    let forged_payload = codec
        .issue_with_expiry(now_secs() + 86_400 * 365)
        .unwrap();
    let (forged_payload, _) = forged_payload.split_once('.').unwrap();
    assert_ne!(payload, forged_payload);
    let forged = format!("{forged_payload}.{signature}");

    let resp = client()
        .get(format!("http://127.0.0.1:{port}/session"))
        .header("Cookie", format!("{SESSION_COOKIE_NAME}={forged}"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_token_from_other_secret_rejected() {
    let port = spawn_server_with_secret("another-deployment").await;
    let token = create_test_codec(TEST_SECRET).generate().unwrap();

    let resp = client()
        .get(format!("http://127.0.0.1:{port}/session"))
        .header("Cookie", format!("{SESSION_COOKIE_NAME}={token}"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_malformed_cookie_values_rejected() {
    let port = spawn_server().await;
    let client = client();

    for value in ["", "no-dot-here", "a.b.c", "not$base64.not$base64"] {
        let resp = client
            .get(format!("http://127.0.0.1:{port}/session"))
            .header("Cookie", format!("{SESSION_COOKIE_NAME}={value}"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 401, "value {value:?} was accepted");
    }
}
