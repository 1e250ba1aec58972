use serde_json::json;
use std::time::Duration;
use vimm::services::hive_auth::POSTER_ACCOUNT;
use vimm::services::ApiClient;
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn challenge_and_login() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/challenge"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "challenge": "abc123" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/hive"))
        .and(body_json(json!({
            "username": "alice",
            "challenge": "abc123",
            "signature": "sig",
            "method": "keychain"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "token": "jwt-token-value"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::with_base(&server.uri());
    let challenge = client.auth_challenge().await.unwrap();
    let session = client.authenticate_hive("alice", &challenge, "sig").await.unwrap();

    assert_eq!(session.user, "alice");
    assert_eq!(session.token, "jwt-token-value");
}

#[tokio::test]
async fn missing_challenge_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/challenge"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let err = ApiClient::with_base(&server.uri()).auth_challenge().await.unwrap_err();

    assert_eq!(err.to_string(), "Invalid response: No challenge received from server");
}

#[tokio::test]
async fn unsuccessful_login_reports_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/hive"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Invalid signature"
        })))
        .mount(&server)
        .await;

    let err = ApiClient::with_base(&server.uri())
        .authenticate_hive("alice", "abc", "bad")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid signature");
}

#[tokio::test]
async fn verify_distinguishes_rejection_from_network_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/verify"))
        .and(header("authorization", "Bearer good-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "valid": true })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/verify"))
        .and(header("authorization", "Bearer stale-token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = ApiClient::with_base(&server.uri());
    assert!(!client.verify_token("good-token").await.should_logout());
    assert!(client.verify_token("stale-token").await.should_logout());

    // nothing listens on the discard port
    let offline = ApiClient::with_base("http://127.0.0.1:9");
    let check = offline.verify_token("good-token").await;
    assert!(check.network_error);
    assert!(!check.should_logout());
}

#[tokio::test]
async fn rejected_login_prefers_error_over_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/hive"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Unauthorized",
            "error": "Signature verification failed"
        })))
        .mount(&server)
        .await;

    let err = ApiClient::with_base(&server.uri())
        .authenticate_hive("alice", "abc", "bad")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Signature verification failed");
}

#[tokio::test]
async fn slow_verify_keeps_the_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/verify"))
        .respond_with(
            ResponseTemplate::new(401).set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let check = ApiClient::with_base(&server.uri())
        .verify_token_within("good-token", Duration::from_millis(200))
        .await;

    assert!(check.network_error);
    assert!(!check.should_logout());
}

#[tokio::test]
async fn stream_key_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/stream-key"))
        .and(body_json(json!({ "username": "alice" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "streamKey": "live_abc" })))
        .mount(&server)
        .await;

    let key = ApiClient::with_base(&server.uri())
        .request_stream_key("alice", None)
        .await
        .unwrap();

    assert_eq!(key, "live_abc");
}

#[tokio::test]
async fn hive_account_posting_authority() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({
            "method": "condenser_api.get_accounts",
            "params": [["alice"]]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": [{
                "name": "alice",
                "posting": {
                    "weight_threshold": 1,
                    "account_auths": [["vimm", 1]],
                    "key_auths": [["STM7abc", 1]]
                }
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({ "params": [["nobody"]] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "jsonrpc": "2.0", "id": 1, "result": [] })))
        .mount(&server)
        .await;

    let client = ApiClient::with_base(&server.uri());
    let account = client.hive_account("alice").await.unwrap();
    assert!(account.posting.grants(POSTER_ACCOUNT));
    assert_eq!(account.posting.weight_threshold, 1);

    let err = client.hive_account("nobody").await.unwrap_err();
    assert!(err.is_not_found());
}
