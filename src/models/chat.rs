use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{flexible_id, nullable};

pub const MAX_MESSAGE_LEN: usize = 500;
pub const HISTORY_LIMIT: u32 = 50;
pub const MODERATION_HISTORY_LIMIT: u32 = 100;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(default, alias = "_id", deserialize_with = "flexible_id")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub username: String,
    #[serde(rename = "message", default, deserialize_with = "nullable")]
    pub text: String,
    #[serde(default, deserialize_with = "nullable")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "nullable")]
    pub is_moderator: bool,
}

impl ChatMessage {
    /// Same id, or the same author, text and timestamp when ids are missing.
    pub fn is_same_as(&self, other: &ChatMessage) -> bool {
        if !self.id.is_empty() && self.id == other.id {
            return true;
        }
        self.timestamp == other.timestamp
            && self.username == other.username
            && self.text == other.text
    }

    pub fn key(&self) -> String {
        if self.id.is_empty() {
            format!("{}:{}:{}", self.timestamp, self.username, self.text)
        } else {
            self.id.clone()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatConfig {
    #[serde(default, deserialize_with = "nullable")]
    pub slow_mode: bool,
    #[serde(default, alias = "slowModeInterval", deserialize_with = "nullable")]
    pub slow_mode_delay: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub followers_only: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub emote_only: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub moderators: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannedUser {
    #[serde(default, deserialize_with = "nullable")]
    pub username: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default, alias = "expires")]
    pub expires_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum BannedList {
    Plain(Vec<BannedUser>),
    Wrapped {
        #[serde(default, alias = "banned", deserialize_with = "nullable")]
        bans: Vec<BannedUser>,
    },
}

impl BannedList {
    pub fn into_vec(self) -> Vec<BannedUser> {
        match self {
            BannedList::Plain(list) => list,
            BannedList::Wrapped { bans } => bans,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum MessageList {
    Plain(Vec<ChatMessage>),
    Wrapped {
        #[serde(default, deserialize_with = "nullable")]
        messages: Vec<ChatMessage>,
    },
}

impl MessageList {
    pub fn into_vec(self) -> Vec<ChatMessage> {
        match self {
            MessageList::Plain(list) => list,
            MessageList::Wrapped { messages } => messages,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SendMessageResponse {
    #[serde(default)]
    pub data: Option<ChatMessage>,
}

pub fn is_moderator(user: Option<&str>, channel: &str, config: &ChatConfig) -> bool {
    match user {
        Some(user) if !user.is_empty() => {
            user.eq_ignore_ascii_case(channel)
                || config.moderators.iter().any(|m| m.eq_ignore_ascii_case(user))
        }
        _ => false,
    }
}

/// Ordered chat history that refuses duplicates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    pub fn new(history: Vec<ChatMessage>) -> Self {
        let mut log = Self::default();
        for message in history {
            log.push(message);
        }
        log
    }

    /// Returns false when the message was already present.
    pub fn push(&mut self, message: ChatMessage) -> bool {
        if self.messages.iter().any(|m| m.is_same_as(&message)) {
            return false;
        }
        self.messages.push(message);
        true
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| m.id != id);
        before != self.messages.len()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn search(&self, term: &str) -> Vec<ChatMessage> {
        let term = term.trim().to_lowercase();
        self.messages
            .iter()
            .filter(|m| {
                term.is_empty()
                    || m.username.to_lowercase().contains(&term)
                    || m.text.to_lowercase().contains(&term)
            })
            .cloned()
            .collect()
    }
}

/// Socket events the chat widgets react to.
#[derive(Clone, Debug, PartialEq)]
pub enum ChatEvent {
    Connected,
    Disconnected(String),
    ConnectError(String),
    Message(ChatMessage),
    MessageSent,
    MessageDeleted(String),
    AuthError(String),
    Error(String),
}

fn text_field(payload: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| payload.get(*k))
        .and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
}

impl ChatEvent {
    pub fn decode(event: &str, payload: Value) -> Option<Self> {
        match event {
            "connect" => Some(ChatEvent::Connected),
            "disconnect" => Some(ChatEvent::Disconnected(
                payload.as_str().unwrap_or("unknown").to_string(),
            )),
            "connect_error" => Some(ChatEvent::ConnectError(
                text_field(&payload, &["message"]).unwrap_or_else(|| "Connection failed".to_string()),
            )),
            "chat-message" => serde_json::from_value(payload).ok().map(ChatEvent::Message),
            "message-sent" => Some(ChatEvent::MessageSent),
            "message-deleted" => {
                text_field(&payload, &["messageId", "id"]).map(ChatEvent::MessageDeleted)
            }
            "auth-error" => Some(ChatEvent::AuthError(
                text_field(&payload, &["error"]).unwrap_or_else(|| "Authentication failed".to_string()),
            )),
            "error" => Some(ChatEvent::Error(match &payload {
                Value::String(s) => s.clone(),
                other => text_field(other, &["message"])
                    .unwrap_or_else(|| "An error occurred".to_string()),
            })),
            _ => None,
        }
    }
}

pub const SOCKET_EVENTS: [&str; 8] = [
    "connect",
    "disconnect",
    "connect_error",
    "chat-message",
    "message-sent",
    "message-deleted",
    "auth-error",
    "error",
];

pub fn room_name(account: &str) -> String {
    format!("chat-{account}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn msg(id: &str, user: &str, text: &str, ts: &str) -> ChatMessage {
        ChatMessage {
            id: id.to_string(),
            username: user.to_string(),
            text: text.to_string(),
            timestamp: ts.to_string(),
            is_moderator: false,
        }
    }

    #[test]
    fn keys_stay_distinct_without_ids() {
        let ts = "2024-01-01T00:00:00.000Z";
        let a = msg("", "bob", "first", ts);
        let b = msg("", "bob", "second", ts);
        assert_ne!(a.key(), b.key());

        let mut log = ChatLog::default();
        assert!(log.push(a));
        assert!(log.push(b));
        let keys: std::collections::HashSet<String> =
            log.messages().iter().map(ChatMessage::key).collect();
        assert_eq!(keys.len(), 2);
        assert_eq!(msg("m1", "bob", "x", ts).key(), "m1");
    }

    #[test]
    fn decodes_wire_names() {
        let m: ChatMessage = serde_json::from_value(json!({
            "_id": "abc",
            "username": "alice",
            "message": "hi",
            "timestamp": "2024-01-01T00:00:00Z",
            "isModerator": true
        }))
        .unwrap();
        assert_eq!(m.id, "abc");
        assert_eq!(m.text, "hi");
        assert!(m.is_moderator);

        let config: ChatConfig =
            serde_json::from_value(json!({"slowMode": true, "slowModeInterval": 5})).unwrap();
        assert!(config.slow_mode);
        assert_eq!(config.slow_mode_delay, 5);
        assert!(config.moderators.is_empty());
    }

    #[test]
    fn log_skips_duplicate_ids() {
        let mut log = ChatLog::default();
        assert!(log.push(msg("1", "alice", "hi", "t1")));
        assert!(!log.push(msg("1", "alice", "edited", "t2")));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn log_skips_same_content_without_ids() {
        let mut log = ChatLog::default();
        assert!(log.push(msg("", "bob", "yo", "t1")));
        assert!(!log.push(msg("", "bob", "yo", "t1")));
        assert!(log.push(msg("", "bob", "yo", "t2")));
        assert!(log.push(msg("", "carol", "yo", "t2")));
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn log_removes_and_searches() {
        let mut log = ChatLog::new(vec![
            msg("1", "alice", "Hello there", "t1"),
            msg("2", "bob", "general kenobi", "t2"),
        ]);
        assert_eq!(log.search("HELLO").len(), 1);
        assert_eq!(log.search("bob")[0].id, "2");
        assert_eq!(log.search("").len(), 2);
        assert!(log.remove("1"));
        assert!(!log.remove("1"));
        assert_eq!(log.messages()[0].username, "bob");
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn owner_and_listed_users_moderate() {
        let config = ChatConfig {
            moderators: vec!["Mod1".to_string()],
            ..Default::default()
        };
        assert!(is_moderator(Some("streamer"), "streamer", &config));
        assert!(is_moderator(Some("mod1"), "streamer", &config));
        assert!(!is_moderator(Some("viewer"), "streamer", &config));
        assert!(!is_moderator(None, "streamer", &config));
    }

    #[test]
    fn decodes_socket_events() {
        assert_eq!(
            ChatEvent::decode("auth-error", json!({})),
            Some(ChatEvent::AuthError("Authentication failed".to_string()))
        );
        assert_eq!(
            ChatEvent::decode("auth-error", json!({"error": "expired"})),
            Some(ChatEvent::AuthError("expired".to_string()))
        );
        assert_eq!(
            ChatEvent::decode("error", json!("boom")),
            Some(ChatEvent::Error("boom".to_string()))
        );
        assert_eq!(
            ChatEvent::decode("error", json!({"message": "bad"})),
            Some(ChatEvent::Error("bad".to_string()))
        );
        assert_eq!(
            ChatEvent::decode("message-deleted", json!({"messageId": 9})),
            Some(ChatEvent::MessageDeleted("9".to_string()))
        );
        assert!(matches!(
            ChatEvent::decode("chat-message", json!({"id": "1", "username": "a", "message": "b"})),
            Some(ChatEvent::Message(m)) if m.text == "b"
        ));
        assert_eq!(ChatEvent::decode("newMessage", json!({})), None);
    }

    #[test]
    fn room_is_prefixed() {
        assert_eq!(room_name("alice"), "chat-alice");
    }
}
