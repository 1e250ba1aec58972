use serde_json::json;
use vimm::services::hls::tokenized_url;
use vimm::services::ApiClient;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn resolves_stream_and_fetches_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/streams/path/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "streamId": "s-1" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/hls/token/s-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "hls-token",
            "expiresIn": 600
        })))
        .mount(&server)
        .await;

    let client = ApiClient::with_base(&server.uri());
    let stream_id = client.stream_id_for("alice").await.unwrap();
    let token = client.hls_token(&stream_id).await.unwrap();

    assert_eq!(token.token, "hls-token");
    assert_eq!(token.refresh_delay_secs(), 540);
    assert_eq!(
        client.playlist_url(&stream_id),
        format!("{}/live/s-1/master.m3u8", server.uri())
    );
    assert_eq!(
        tokenized_url(&client.playlist_url(&stream_id), &token.token),
        format!("{}/live/s-1/master.m3u8?token=hls-token", server.uri())
    );
}

#[tokio::test]
async fn missing_stream_id_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/streams/path/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let result = ApiClient::with_base(&server.uri()).stream_id_for("alice").await;

    assert!(result.is_err());
}

#[tokio::test]
async fn empty_token_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/hls/token/s-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "" })))
        .mount(&server)
        .await;

    assert!(ApiClient::with_base(&server.uri()).hls_token("s-1").await.is_err());
}

#[tokio::test]
async fn refresh_sends_current_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/hls/refresh-token"))
        .and(header("authorization", "Bearer old-token"))
        .and(body_json(json!({ "streamId": "s-1", "token": "old-token" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "new-token" })))
        .mount(&server)
        .await;

    let fresh = ApiClient::with_base(&server.uri())
        .refresh_hls_token("s-1", "old-token")
        .await
        .unwrap();

    assert_eq!(fresh.token, "new-token");
    assert_eq!(fresh.refresh_delay_secs(), 3540);
}
