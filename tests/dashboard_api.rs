use serde_json::json;
use vimm::models::channels::{ChannelForm, ContentRating};
use vimm::models::dashboard::StreamSettings;
use vimm::services::dashboard::GROWTH_DAYS;
use vimm::services::{ApiClient, ApiError};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn stats_and_growth_fall_back_when_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/streams/stats/alice"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/streams/followers/growth/alice"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = ApiClient::with_base(&server.uri());
    let stats = client.stream_stats("alice", Some("tok-123")).await;
    let growth = client.follower_growth("alice", Some("tok-123"), GROWTH_DAYS).await;

    assert_eq!(stats.current_viewers, 0);
    assert!(!stats.is_live);
    assert!(growth.is_empty());
}

#[tokio::test]
async fn stats_and_growth_decode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/streams/stats/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "currentViewers": 12,
            "peakViewers": 40,
            "totalWatchTime": 3600,
            "chatMessageRate": 2.5,
            "uptime": 1700000000000i64,
            "isLive": true
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/streams/followers/growth/alice"))
        .and(query_param("days", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "date": "2024-01-01", "followers": 10 },
            { "date": "2024-01-02", "followers": 12 }
        ])))
        .mount(&server)
        .await;

    let client = ApiClient::with_base(&server.uri());
    let stats = client.stream_stats("alice", Some("tok-123")).await;
    let growth = client.follower_growth("alice", Some("tok-123"), GROWTH_DAYS).await;

    assert_eq!(stats.peak_viewers, 40);
    assert_eq!(stats.uptime, Some(1_700_000_000_000));
    assert!(stats.is_live);
    assert_eq!(growth.len(), 2);
    assert_eq!(growth[1].followers, 12);
}

#[tokio::test]
async fn saves_stream_settings() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/streams/settings/alice"))
        .and(header("authorization", "Bearer tok-123"))
        .and(body_json(json!({
            "title": "Speedruns",
            "description": "",
            "tags": ["games"],
            "language": "en",
            "contentRating": "teen"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let settings = StreamSettings {
        title: "Speedruns".into(),
        tags: vec!["games".into()],
        language: "en".into(),
        content_rating: ContentRating::Teen,
        ..Default::default()
    };
    ApiClient::with_base(&server.uri())
        .update_stream_settings("alice", &settings, Some("tok-123"))
        .await
        .unwrap();
}

#[tokio::test]
async fn my_channel_requires_login() {
    let err = ApiClient::with_base("http://127.0.0.1:9")
        .my_channel(None)
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::AuthRequired);
}

#[tokio::test]
async fn my_channel_load_and_update() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/channels/my-channel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Chill stream",
            "description": null,
            "language": "en",
            "category": "Music",
            "contentRating": "mature",
            "tags": ["lofi"]
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/channels/my-channel"))
        .and(body_json(json!({
            "title": "New title",
            "description": "",
            "language": "en",
            "category": "Music"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::with_base(&server.uri());
    let channel = client.my_channel(Some("tok-123")).await.unwrap();
    assert_eq!(channel.description, "");
    assert_eq!(channel.content_rating, ContentRating::Mature);

    let edited = ChannelForm {
        title: "New title".into(),
        ..channel.form_fields()
    };
    client.update_my_channel(Some("tok-123"), &edited).await.unwrap();
}
