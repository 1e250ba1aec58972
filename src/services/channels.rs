use serde_json::Value;

use super::http::{require_token, ApiClient, ApiError};
use crate::models::channels::{ChannelForm, ChannelSettings};

const MY_CHANNEL_PATH: &str = "/api/channels/my-channel";

impl ApiClient {
    pub async fn my_channel(&self, token: Option<&str>) -> Result<ChannelSettings, ApiError> {
        let token = require_token(token)?;
        self.get_json(&self.core(MY_CHANNEL_PATH), Some(token)).await
    }

    pub async fn update_my_channel(
        &self,
        token: Option<&str>,
        settings: &ChannelForm,
    ) -> Result<Value, ApiError> {
        let token = require_token(token)?;
        self.put_json(&self.core(MY_CHANNEL_PATH), settings, Some(token))
            .await
            .inspect_err(|e| log::error!("Error updating channel settings: {e}"))
    }
}
