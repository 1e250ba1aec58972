use serde::Serialize;
use serde_json::Value;

use super::http::{encode, require_token, ApiClient, ApiError};
use crate::config::{CHAT_CONFIG_PATH, CHAT_MESSAGES_PATH};
use crate::models::chat::{
    BannedList, BannedUser, ChatConfig, ChatMessage, MessageList, SendMessageResponse,
};

pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

#[derive(Debug, Serialize)]
struct SendMessageBody<'a> {
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct BanBody<'a> {
    username: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<u64>,
}

#[derive(Debug, Serialize)]
struct TimeoutBody<'a> {
    username: &'a str,
    duration: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

/// Optional paging bounds for the message history, as ISO timestamps.
#[derive(Clone, Debug, Default)]
pub struct MessagePage<'a> {
    pub before: Option<&'a str>,
    pub after: Option<&'a str>,
}

impl ApiClient {
    fn messages_url(&self, account: &str) -> String {
        self.chat(&CHAT_MESSAGES_PATH.replace(":hiveAccount", &encode(account)))
    }

    pub async fn chat_messages(
        &self,
        account: &str,
        limit: u32,
        page: MessagePage<'_>,
    ) -> Result<Vec<ChatMessage>, ApiError> {
        let mut url = format!("{}?limit={limit}", self.messages_url(account));
        if let Some(before) = page.before {
            url.push_str(&format!("&before={}", encode(before)));
        }
        if let Some(after) = page.after {
            url.push_str(&format!("&after={}", encode(after)));
        }
        let list: MessageList = self.get_json(&url, None).await?;
        Ok(list.into_vec())
    }

    /// Returns the stored message when the server echoes it back.
    pub async fn send_chat_message(
        &self,
        account: &str,
        text: &str,
        token: Option<&str>,
    ) -> Result<Option<ChatMessage>, ApiError> {
        let token = require_token(token)?;
        let response: SendMessageResponse = self
            .post_json(&self.messages_url(account), &SendMessageBody { message: text }, Some(token))
            .await?;
        Ok(response.data)
    }

    pub async fn delete_chat_message(
        &self,
        account: &str,
        message_id: &str,
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        let token = require_token(token)?;
        let url = format!("{}/{}", self.messages_url(account), encode(message_id));
        self.delete_json(&url, Some(token)).await
    }

    pub async fn chat_config(&self, account: &str, token: Option<&str>) -> Result<ChatConfig, ApiError> {
        let url = self.chat(&CHAT_CONFIG_PATH.replace(":hiveAccount", &encode(account)));
        self.get_json(&url, token).await
    }

    pub async fn update_chat_config(
        &self,
        account: &str,
        config: &ChatConfig,
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        let token = require_token(token)?;
        let url = self.chat(&CHAT_CONFIG_PATH.replace(":hiveAccount", &encode(account)));
        self.put_json(&url, config, Some(token)).await
    }

    pub async fn ban_user(
        &self,
        account: &str,
        username: &str,
        reason: Option<&str>,
        duration: Option<u64>,
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        let token = require_token(token)?;
        let url = self.chat(&format!("/api/chat/ban/{}", encode(account)));
        let body = BanBody {
            username,
            reason,
            duration,
        };
        self.post_json(&url, &body, Some(token)).await
    }

    pub async fn unban_user(
        &self,
        account: &str,
        username: &str,
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        let token = require_token(token)?;
        let url = self.chat(&format!(
            "/api/chat/ban/{}/{}",
            encode(account),
            encode(username)
        ));
        self.delete_json(&url, Some(token)).await
    }

    pub async fn banned_users(&self, account: &str, token: Option<&str>) -> Result<Vec<BannedUser>, ApiError> {
        let token = require_token(token)?;
        let url = self.chat(&format!("/api/chat/bans/{}", encode(account)));
        let list: BannedList = self.get_json(&url, Some(token)).await?;
        Ok(list.into_vec())
    }

    pub async fn timeout_user(
        &self,
        account: &str,
        username: &str,
        duration: Option<u64>,
        reason: Option<&str>,
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        let token = require_token(token)?;
        let url = self.chat(&format!("/api/chat/timeout/{}", encode(account)));
        let body = TimeoutBody {
            username,
            duration: duration.unwrap_or(DEFAULT_TIMEOUT_SECS),
            reason,
        };
        self.post_json(&url, &body, Some(token)).await
    }

    pub async fn clear_chat(&self, account: &str, token: Option<&str>) -> Result<Value, ApiError> {
        let token = require_token(token)?;
        let url = self.chat(&format!("/api/chat/clear/{}", encode(account)));
        self.post_json(&url, &serde_json::json!({}), Some(token)).await
    }
}
