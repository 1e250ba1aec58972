use serde_json::json;
use vimm::models::chat::ChatConfig;
use vimm::services::chat::MessagePage;
use vimm::services::{ApiClient, ApiError};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn history_accepts_wrapped_and_plain_lists() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chat/messages/alice"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [{ "_id": "m1", "username": "bob", "message": "hi", "timestamp": "2024-01-01T00:00:00Z" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/chat/messages/carol"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 5, "username": "dave", "message": "yo" }
        ])))
        .mount(&server)
        .await;

    let client = ApiClient::with_base(&server.uri());
    let wrapped = client.chat_messages("alice", 50, MessagePage::default()).await.unwrap();
    let plain = client.chat_messages("carol", 50, MessagePage::default()).await.unwrap();

    assert_eq!(wrapped[0].id, "m1");
    assert_eq!(wrapped[0].text, "hi");
    assert_eq!(plain[0].id, "5");
}

#[tokio::test]
async fn history_passes_paging_bounds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chat/messages/alice"))
        .and(query_param("limit", "100"))
        .and(query_param("before", "2024-01-02T00:00:00Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let page = MessagePage {
        before: Some("2024-01-02T00:00:00Z"),
        after: None,
    };
    let messages = ApiClient::with_base(&server.uri())
        .chat_messages("alice", 100, page)
        .await
        .unwrap();

    assert!(messages.is_empty());
}

#[tokio::test]
async fn send_returns_echoed_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat/messages/alice"))
        .and(header("authorization", "Bearer tok-123"))
        .and(body_json(json!({ "message": "hello" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": { "id": "m9", "username": "bob", "message": "hello" }
        })))
        .mount(&server)
        .await;

    let echoed = ApiClient::with_base(&server.uri())
        .send_chat_message("alice", "hello", Some("tok-123"))
        .await
        .unwrap();

    assert_eq!(echoed.map(|m| m.id), Some("m9".to_string()));
}

#[tokio::test]
async fn rejected_send_surfaces_reason() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat/messages/alice"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({ "message": "Slow mode is on" })))
        .mount(&server)
        .await;

    let err = ApiClient::with_base(&server.uri())
        .send_chat_message("alice", "hello", Some("tok-123"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(429));
    assert_eq!(err.to_string(), "Slow mode is on");
}

#[tokio::test]
async fn moderation_calls_need_a_token() {
    let client = ApiClient::with_base("http://127.0.0.1:9");

    assert_eq!(
        client.delete_chat_message("alice", "m1", None).await.unwrap_err(),
        ApiError::AuthRequired
    );
    assert_eq!(
        client.ban_user("alice", "bob", None, None, Some("  ")).await.unwrap_err(),
        ApiError::AuthRequired
    );
    assert_eq!(client.clear_chat("alice", None).await.unwrap_err(), ApiError::AuthRequired);
}

#[tokio::test]
async fn timeout_uses_default_duration() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat/timeout/alice"))
        .and(body_json(json!({ "username": "bob", "duration": 600 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    ApiClient::with_base(&server.uri())
        .timeout_user("alice", "bob", None, None, Some("tok-123"))
        .await
        .unwrap();
}

#[tokio::test]
async fn ban_unban_and_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat/ban/alice"))
        .and(body_json(json!({ "username": "bob", "reason": "spam" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/chat/ban/alice/bob"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/chat/bans/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bans": [{ "username": "eve", "expires": "2030-01-01T00:00:00Z" }]
        })))
        .mount(&server)
        .await;

    let client = ApiClient::with_base(&server.uri());
    client
        .ban_user("alice", "bob", Some("spam"), None, Some("tok-123"))
        .await
        .unwrap();
    client.unban_user("alice", "bob", Some("tok-123")).await.unwrap();
    let banned = client.banned_users("alice", Some("tok-123")).await.unwrap();

    assert_eq!(banned.len(), 1);
    assert_eq!(banned[0].username, "eve");
    assert_eq!(banned[0].expires_at.as_deref(), Some("2030-01-01T00:00:00Z"));
}

#[tokio::test]
async fn config_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chat/config/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "slowMode": true,
            "slowModeInterval": 10,
            "moderators": ["bob"]
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/chat/config/alice"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::with_base(&server.uri());
    let config = client.chat_config("alice", None).await.unwrap();

    assert!(config.slow_mode);
    assert_eq!(config.slow_mode_delay, 10);
    assert_eq!(config.moderators, vec!["bob".to_string()]);

    let updated = ChatConfig {
        followers_only: true,
        ..config
    };
    client
        .update_chat_config("alice", &updated, Some("tok-123"))
        .await
        .unwrap();
}

#[tokio::test]
async fn moderation_settings_fall_back_to_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chat/config/alice"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = ApiClient::with_base(&server.uri())
        .moderation_settings("alice", Some("tok-123"))
        .await;

    assert_eq!(config, ChatConfig::default());
}
