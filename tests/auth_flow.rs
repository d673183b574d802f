mod common;

use std::time::{Duration, Instant};

use common::{closed_port_url, MockService, Reply, WIF};
use secrecy::SecretString;
use zelid_auth::{sign_message, AuthClient, AuthConfig, AuthError, SigningError};

fn client(base_url: &str) -> AuthClient {
    AuthClient::new(AuthConfig::new(base_url).with_timeout_ms(2_000)).unwrap()
}

fn key() -> SecretString {
    SecretString::new(WIF.to_string())
}

#[tokio::test]
async fn test_success_returns_exact_header() {
    let service = MockService::start(vec![Reply::ok(r#"{"status":"success"}"#)]).await;

    let header = client(&service.base_url)
        .get_auth_header("u1", &key(), "Hello, World!")
        .await
        .unwrap();

    assert_eq!(
        header.as_str(),
        "zelid=u1&signature=HwNhoboTvAXm2jnToQ9Fp3thAlONNdywjOaLVR%2FYPXveXhG3kDOP0sC1HiS%2FBkLnCFyk6zXenfbIF8%2Bi9CjU%2Fd8%3D&loginPhrase=Hello, World!"
    );

    let requests = service.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/id/verifylogin");
    assert_eq!(
        requests[0].json(),
        serde_json::json!({
            "loginPhrase": "Hello, World!",
            "zelid": "u1",
            "signature": "HwNhoboTvAXm2jnToQ9Fp3thAlONNdywjOaLVR/YPXveXhG3kDOP0sC1HiS/BkLnCFyk6zXenfbIF8+i9CjU/d8="
        })
    );
}

#[tokio::test]
async fn test_header_field_order_and_escaping() {
    let service = MockService::start(vec![Reply::ok(r#"{"status":"success","data":{}}"#)]).await;

    let header = client(&service.base_url)
        .get_auth_header("u1", &key(), "phraseABC")
        .await
        .unwrap();

    // the signature for this phrase contains both '+' and '/'
    let signature = sign_message("phraseABC", WIF).unwrap().to_base64();
    assert!(signature.contains('+') && signature.contains('/'));
    assert_eq!(
        header.to_string(),
        "zelid=u1&signature=IKf7Zf3F03s3GvvAFBgeXSoS9Yx%2FlnyuIAj5fbt5M7z%2BCLkG0CPfAmjqy3wfnfetdeQ1G6OX7lQH7e7vTcuLpMI%3D&loginPhrase=phraseABC"
    );
}

#[tokio::test]
async fn test_failure_status_is_verification_failed() {
    let service = MockService::start(vec![Reply::ok(r#"{"status":"failure"}"#)]).await;

    let result = client(&service.base_url)
        .get_auth_header("u1", &key(), "phraseABC")
        .await;

    match result {
        Err(AuthError::VerificationFailed { status, message }) => {
            assert_eq!(status, "failure");
            assert_eq!(message, None);
        }
        other => panic!("expected VerificationFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_message_is_surfaced() {
    let service = MockService::start(vec![Reply::ok(
        r#"{"status":"error","data":{"code":401,"name":"Unauthorized","message":"Signature is invalid"}}"#,
    )])
    .await;

    let err = client(&service.base_url)
        .get_auth_header("u1", &key(), "phraseABC")
        .await
        .unwrap_err();

    assert!(matches!(
        &err,
        AuthError::VerificationFailed { message: Some(m), .. } if m == "Signature is invalid"
    ));
}

#[tokio::test]
async fn test_invalid_key_never_reaches_network() {
    let service = MockService::start(vec![Reply::ok(r#"{"status":"success"}"#)]).await;
    let bad_key = SecretString::new("L1aW4aubDFB7yfras2S1mN3bqg9nwySY8nkoLmJebSLD5BWv3ENY".to_string());

    let result = client(&service.base_url)
        .get_auth_header("u1", &bad_key, "phraseABC")
        .await;

    assert!(matches!(
        result,
        Err(AuthError::SigningFailed(SigningError::InvalidKey(_)))
    ));
    assert!(service.requests().is_empty());
}

#[tokio::test]
async fn test_timeout_is_distinguishable() {
    let service = MockService::start(vec![Reply::Stall]).await;
    let client = AuthClient::new(AuthConfig::new(&service.base_url).with_timeout_ms(200)).unwrap();

    let started = Instant::now();
    let result = client.get_auth_header("u1", &key(), "phraseABC").await;

    assert!(matches!(result, Err(AuthError::Timeout)), "got {:?}", result);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let url = closed_port_url().await;

    let result = client(&url).get_auth_header("u1", &key(), "phraseABC").await;

    assert!(matches!(result, Err(AuthError::NetworkError(_))), "got {:?}", result);
}

#[tokio::test]
async fn test_non_2xx_is_network_error() {
    let service = MockService::start(vec![Reply::Json(
        502,
        r#"{"status":"success"}"#.to_string(),
    )])
    .await;

    let result = client(&service.base_url)
        .get_auth_header("u1", &key(), "phraseABC")
        .await;

    match result {
        Err(AuthError::NetworkError(msg)) => assert!(msg.contains("502")),
        other => panic!("expected NetworkError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_network_error() {
    for body in ["<html>oops</html>", r#"{"data":"no status"}"#, ""] {
        let service = MockService::start(vec![Reply::ok(body)]).await;

        let result = client(&service.base_url)
            .get_auth_header("u1", &key(), "phraseABC")
            .await;

        assert!(
            matches!(result, Err(AuthError::NetworkError(_))),
            "body {:?} gave {:?}",
            body,
            result
        );
    }
}

#[tokio::test]
async fn test_concurrent_logins_are_independent() {
    let service = MockService::start(vec![
        Reply::ok(r#"{"status":"success"}"#),
        Reply::ok(r#"{"status":"success"}"#),
    ])
    .await;
    let client = client(&service.base_url);
    let key = key();

    let (first, second) = tokio::join!(
        client.get_auth_header("alice", &key, "phrase-one"),
        client.get_auth_header("bob", &key, "phrase-two"),
    );

    assert!(first.unwrap().as_str().starts_with("zelid=alice&"));
    assert!(second.unwrap().as_str().ends_with("&loginPhrase=phrase-two"));
    assert_eq!(service.requests().len(), 2);
}

#[tokio::test]
async fn test_login_fetches_phrase_then_verifies() {
    let service = MockService::start(vec![
        Reply::ok(r#"{"status":"success","data":"1700000000000abcdef"}"#),
        Reply::ok(r#"{"status":"success","data":{"message":"Successfully logged in"}}"#),
    ])
    .await;

    let header = client(&service.base_url)
        .login("1ZelId", &key())
        .await
        .unwrap();

    assert!(header
        .as_str()
        .starts_with("zelid=1ZelId&signature="));
    assert!(header
        .as_str()
        .ends_with("&loginPhrase=1700000000000abcdef"));

    let requests = service.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!((requests[0].method.as_str(), requests[0].path.as_str()), ("GET", "/id/loginphrase"));
    assert_eq!((requests[1].method.as_str(), requests[1].path.as_str()), ("POST", "/id/verifylogin"));
    assert_eq!(requests[1].json()["loginPhrase"], "1700000000000abcdef");
}

#[tokio::test]
async fn test_login_phrase_rejected() {
    let service = MockService::start(vec![Reply::ok(
        r#"{"status":"error","data":{"message":"Too many requests"}}"#,
    )])
    .await;

    let result = client(&service.base_url).login_phrase().await;

    assert!(matches!(
        result,
        Err(AuthError::VerificationFailed { ref status, .. }) if status == "error"
    ));
}
