use serde::{Deserialize, Serialize};

use super::http::{encode, ApiClient, ApiError};

pub const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3600;
const REFRESH_MARGIN_SECS: u64 = 60;
const MIN_REFRESH_DELAY_SECS: u64 = 30;

/// Short-lived credential for fetching HLS playlists and segments.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HlsToken {
    pub token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

impl HlsToken {
    /// Seconds until the token should be refreshed.
    pub fn refresh_delay_secs(&self) -> u64 {
        let lifetime = self.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
        lifetime
            .saturating_sub(REFRESH_MARGIN_SECS)
            .max(MIN_REFRESH_DELAY_SECS)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshBody<'a> {
    stream_id: &'a str,
    token: &'a str,
}

impl ApiClient {
    pub async fn hls_token(&self, stream_id: &str) -> Result<HlsToken, ApiError> {
        let url = self.core(&format!("/api/hls/token/{}", encode(stream_id)));
        let token: HlsToken = self.get_json(&url, None).await?;
        if token.token.is_empty() {
            return Err(ApiError::Decode("Empty HLS token".to_string()));
        }
        Ok(token)
    }

    pub async fn refresh_hls_token(&self, stream_id: &str, current: &str) -> Result<HlsToken, ApiError> {
        let url = self.core("/api/hls/refresh-token");
        let body = RefreshBody {
            stream_id,
            token: current,
        };
        self.post_json(&url, &body, Some(current)).await
    }

    pub fn playlist_url(&self, stream_id: &str) -> String {
        self.config().hls_url(stream_id)
    }
}

/// Playlist URL carrying the token as a query parameter, for native HLS playback.
pub fn tokenized_url(playlist: &str, token: &str) -> String {
    let separator = if playlist.contains('?') { '&' } else { '?' };
    format!("{playlist}{separator}token={}", encode(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(expires_in: Option<u64>) -> HlsToken {
        HlsToken {
            token: "t".to_string(),
            expires_in,
        }
    }

    #[test]
    fn refreshes_a_minute_early() {
        assert_eq!(token(Some(600)).refresh_delay_secs(), 540);
        assert_eq!(token(None).refresh_delay_secs(), 3540);
    }

    #[test]
    fn never_refreshes_too_eagerly() {
        assert_eq!(token(Some(70)).refresh_delay_secs(), 30);
        assert_eq!(token(Some(0)).refresh_delay_secs(), 30);
    }

    #[test]
    fn appends_token_query() {
        assert_eq!(
            tokenized_url("http://x/live/a/master.m3u8", "a b"),
            "http://x/live/a/master.m3u8?token=a%20b"
        );
        assert_eq!(tokenized_url("http://x/p?y=1", "t"), "http://x/p?y=1&token=t");
    }
}
