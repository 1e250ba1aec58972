use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::{self, AppConfig};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Invalid response: {0}")]
    Decode(String),
    #[error("Authentication required")]
    AuthRequired,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

/// Which body fields carry the failure reason, in order of preference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorKeys {
    #[default]
    MessageFirst,
    ErrorFirst,
}

impl ErrorKeys {
    fn keys(self) -> [&'static str; 2] {
        match self {
            ErrorKeys::MessageFirst => ["message", "error"],
            ErrorKeys::ErrorFirst => ["error", "message"],
        }
    }
}

/// Pulls the human-readable reason out of an error body.
pub fn error_message(status: u16, body: &str, keys: ErrorKeys) -> String {
    let from_body = serde_json::from_str::<Value>(body).ok().and_then(|json| {
        keys.keys()
            .iter()
            .find_map(|key| json.get(*key).and_then(Value::as_str).filter(|m| !m.is_empty()))
            .map(str::to_string)
    });

    from_body.unwrap_or_else(|| {
        StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status {status}"))
    })
}

/// Thin wrapper over `reqwest` that knows the backend base URLs.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    config: AppConfig,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::from_config()
    }
}

impl ApiClient {
    pub fn from_config() -> Self {
        Self::new(config::get().clone())
    }

    pub fn new(config: AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Points every service at one base URL, which is what the mock servers in tests need.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self::new(AppConfig {
            chat_server: base.clone(),
            core_server: base.clone(),
            hive_api: base,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub(crate) fn core(&self, path: &str) -> String {
        format!("{}{}", self.config.core_server, path)
    }

    pub(crate) fn chat(&self, path: &str) -> String {
        format!("{}{}", self.config.chat_server, path)
    }

    pub(crate) fn hive_node(&self) -> &str {
        &self.config.hive_api
    }

    pub(crate) fn request(&self, method: Method, url: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        keys: ErrorKeys,
    ) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(status.as_u16(), &body, keys);
            log::debug!("request failed with {status}: {message}");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        if body.trim().is_empty() {
            return serde_json::from_value(Value::Null)
                .or_else(|_| serde_json::from_value(Value::Object(Default::default())))
                .map_err(|e| ApiError::Decode(e.to_string()));
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        self.send(self.request(Method::GET, url, token), ErrorKeys::MessageFirst)
            .await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        self.post_json_with(url, body, token, ErrorKeys::MessageFirst)
            .await
    }

    pub(crate) async fn post_json_with<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
        token: Option<&str>,
        keys: ErrorKeys,
    ) -> Result<T, ApiError> {
        self.send(self.request(Method::POST, url, token).json(body), keys)
            .await
    }

    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        self.send(self.request(Method::PUT, url, token).json(body), ErrorKeys::MessageFirst)
            .await
    }

    pub(crate) async fn delete_json<T: DeserializeOwned>(
        &self,
        url: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        self.send(self.request(Method::DELETE, url, token), ErrorKeys::MessageFirst)
            .await
    }
}

pub(crate) fn require_token(token: Option<&str>) -> Result<&str, ApiError> {
    token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::AuthRequired)
}

pub(crate) fn encode(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_message_then_error() {
        let keys = ErrorKeys::MessageFirst;
        assert_eq!(error_message(400, r#"{"message":"bad title"}"#, keys), "bad title");
        assert_eq!(error_message(400, r#"{"error":"nope"}"#, keys), "nope");
        assert_eq!(error_message(400, r#"{"message":"", "error":"second"}"#, keys), "second");
        assert_eq!(error_message(400, r#"{"error":{"code":1}}"#, keys), "Bad Request");
    }

    #[test]
    fn error_first_reads_error_field() {
        let body = r#"{"message":"Bad Request","error":"Already following this channel"}"#;
        assert_eq!(
            error_message(400, body, ErrorKeys::ErrorFirst),
            "Already following this channel"
        );
        assert_eq!(error_message(400, body, ErrorKeys::MessageFirst), "Bad Request");
        assert_eq!(
            error_message(400, r#"{"message":"only message"}"#, ErrorKeys::ErrorFirst),
            "only message"
        );
    }

    #[test]
    fn falls_back_to_status_reason() {
        assert_eq!(error_message(404, "<html>", ErrorKeys::default()), "Not Found");
        assert_eq!(
            error_message(599, "", ErrorKeys::default()),
            "Request failed with status 599"
        );
    }

    #[test]
    fn classifies_errors() {
        let e = ApiError::Status {
            status: 404,
            message: "gone".into(),
        };
        assert!(e.is_not_found());
        assert!(!e.is_network());
        assert_eq!(e.to_string(), "gone");
        assert!(ApiError::Network("x".into()).is_network());
        assert_eq!(ApiError::AuthRequired.to_string(), "Authentication required");
    }

    #[test]
    fn requires_non_blank_token() {
        assert_eq!(require_token(None), Err(ApiError::AuthRequired));
        assert_eq!(require_token(Some("  ")), Err(ApiError::AuthRequired));
        assert_eq!(require_token(Some("abc")), Ok("abc"));
    }
}
