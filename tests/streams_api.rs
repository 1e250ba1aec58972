use serde_json::json;
use vimm::models::streams::{NO_INFO_DESCRIPTION, UNTITLED_STREAM, WELCOME_DESCRIPTION};
use vimm::services::ApiClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn lists_streams_with_defaults_filled_in() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/streams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "streams": [
                { "id": 7, "username": "alice", "title": "", "viewers": 12, "isLive": true },
                { "id": "b2", "username": "bob", "title": "Cooking", "category": "IRL", "viewers": null }
            ]
        })))
        .mount(&server)
        .await;

    let streams = ApiClient::with_base(&server.uri()).list_streams().await.unwrap();

    assert_eq!(streams.len(), 2);
    assert_eq!(streams[0].id, "7");
    assert_eq!(streams[0].title, UNTITLED_STREAM);
    assert_eq!(streams[0].category, "General");
    assert_eq!(streams[0].avatar, "https://images.hive.blog/u/alice/avatar");
    assert_eq!(streams[1].category, "IRL");
    assert_eq!(streams[1].viewers, 0);
}

#[tokio::test]
async fn listing_failure_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/streams"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({ "error": "maintenance" })))
        .mount(&server)
        .await;

    let err = ApiClient::with_base(&server.uri()).list_streams().await.unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert_eq!(err.to_string(), "maintenance");
}

#[tokio::test]
async fn stream_info_follows_the_stream_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/streams/path/alice"))
        .and(query_param("type", "hiveAccount"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "streamId": "s-1" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/streams/s-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "s-1",
            "title": "Late night build",
            "isLive": true,
            "viewers": 40,
            "postPermlink": "late-night-build"
        })))
        .mount(&server)
        .await;

    let info = ApiClient::with_base(&server.uri()).stream_info("alice").await;

    assert_eq!(info.stream_id.as_deref(), Some("s-1"));
    assert_eq!(info.username, "alice");
    assert_eq!(info.title, "Late night build");
    assert!(info.has_custom_title());
    assert_eq!(info.description, WELCOME_DESCRIPTION);
    assert_eq!(info.permlink.as_deref(), Some("late-night-build"));
    assert!(info.is_live);
}

#[tokio::test]
async fn unknown_channel_gets_offline_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/streams/path/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let info = ApiClient::with_base(&server.uri()).stream_info("ghost").await;

    assert!(!info.is_live);
    assert_eq!(info.title, "ghost's Stream");
    assert_eq!(info.description, NO_INFO_DESCRIPTION);
}

#[tokio::test]
async fn server_error_gets_welcome_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/streams/path/alice"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let info = ApiClient::with_base(&server.uri()).stream_info("alice").await;

    assert!(!info.is_live);
    assert_eq!(info.description, WELCOME_DESCRIPTION);
}
