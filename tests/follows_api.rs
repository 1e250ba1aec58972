use serde_json::json;
use vimm::services::{ApiClient, ApiError};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn follow_posts_lowercased_username_with_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/follows/follow"))
        .and(header("authorization", "Bearer tok-123"))
        .and(body_json(json!({ "username": "alice" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let result = ApiClient::with_base(&server.uri())
        .follow(Some("tok-123"), " Alice ")
        .await
        .unwrap();

    assert_eq!(result.message.as_deref(), Some("ok"));
}

#[tokio::test]
async fn failed_follow_surfaces_the_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/follows/follow"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Bad Request",
            "error": "Already following this channel"
        })))
        .mount(&server)
        .await;

    let err = ApiClient::with_base(&server.uri())
        .follow(Some("tok-123"), "alice")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Status {
            status: 400,
            message: "Already following this channel".into()
        }
    );
}

#[tokio::test]
async fn unfollow_posts_username_and_reports_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/follows/unfollow"))
        .and(header("authorization", "Bearer tok-123"))
        .and(body_json(json!({ "username": "alice" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Unfollowed" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/follows/unfollow"))
        .and(body_json(json!({ "username": "bob" })))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found",
            "error": "You are not following this channel"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::with_base(&server.uri());
    let result = client.unfollow(Some("tok-123"), "Alice").await.unwrap();
    assert_eq!(result.message.as_deref(), Some("Unfollowed"));

    let err = client.unfollow(Some("tok-123"), "bob").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "You are not following this channel");
}

#[tokio::test]
async fn follow_without_token_never_hits_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = ApiClient::with_base(&server.uri())
        .follow(None, "alice")
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::AuthRequired);
}

#[tokio::test]
async fn follow_status_is_false_on_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/follows/status/alice"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/follows/status/bob"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "isFollowing": true })))
        .mount(&server)
        .await;

    let client = ApiClient::with_base(&server.uri());

    assert!(!client.is_following(Some("tok-123"), "alice").await);
    assert!(client.is_following(Some("tok-123"), "bob").await);
    assert!(!client.is_following(None, "bob").await);
}

#[tokio::test]
async fn follow_stats_default_to_zero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/follows/stats/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "followerCount": 1200 })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/follows/stats/bob"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = ApiClient::with_base(&server.uri());

    assert_eq!(client.follow_stats("alice").await.follower_count, 1200);
    assert_eq!(client.follow_stats("bob").await.follower_count, 0);
}

#[tokio::test]
async fn following_list_is_unwrapped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/follows/following"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "following": [{ "username": "alice" }, { "username": "bob", "lastSeen": "2 days ago" }]
        })))
        .mount(&server)
        .await;

    let channels = ApiClient::with_base(&server.uri())
        .following(Some("tok-123"))
        .await
        .unwrap();

    assert_eq!(channels.len(), 2);
    assert_eq!(channels[1].last_seen_label(), "2 days ago");
    assert_eq!(channels[0].last_seen_label(), "Recently");
}
