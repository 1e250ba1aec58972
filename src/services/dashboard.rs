use serde_json::Value;

use super::http::{encode, require_token, ApiClient, ApiError};
use crate::models::chat::ChatConfig;
use crate::models::dashboard::{FollowerGrowthPoint, StreamSettings, StreamStats};

pub const GROWTH_DAYS: u32 = 7;

impl ApiClient {
    /// Zeroed stats when the backend can't answer.
    pub async fn stream_stats(&self, username: &str, token: Option<&str>) -> StreamStats {
        let url = self.core(&format!("/api/streams/stats/{}", encode(username)));
        self.get_json(&url, token).await.unwrap_or_else(|e| {
            log::error!("Error fetching stream stats: {e}");
            StreamStats::default()
        })
    }

    pub async fn follower_growth(
        &self,
        username: &str,
        token: Option<&str>,
        days: u32,
    ) -> Vec<FollowerGrowthPoint> {
        let url = self.core(&format!(
            "/api/streams/followers/growth/{}?days={days}",
            encode(username)
        ));
        self.get_json(&url, token).await.unwrap_or_else(|e| {
            log::error!("Error fetching follower growth: {e}");
            Vec::new()
        })
    }

    pub async fn update_stream_settings(
        &self,
        username: &str,
        settings: &StreamSettings,
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        let token = require_token(token)?;
        let url = self.core(&format!("/api/streams/settings/{}", encode(username)));
        self.put_json(&url, settings, Some(token)).await
    }

    pub async fn moderation_settings(&self, username: &str, token: Option<&str>) -> ChatConfig {
        self.chat_config(username, token).await.unwrap_or_else(|e| {
            log::error!("Error fetching moderation settings: {e}");
            ChatConfig::default()
        })
    }
}
