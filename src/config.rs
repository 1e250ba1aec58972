use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CHAT_SERVER: &str = "http://localhost:3001";
pub const DEFAULT_CORE_SERVER: &str = "http://85.239.54.212:3000";
pub const DEFAULT_HIVE_API: &str = "https://api.openhive.network";

pub const CHAT_SOCKET_PATH: &str = "/socket.io";
pub const CHAT_MESSAGES_PATH: &str = "/api/chat/messages/:hiveAccount";
pub const CHAT_CONFIG_PATH: &str = "/api/chat/config/:hiveAccount";
pub const CHAT_EMBED_PATH: &str = "/chat/:hiveAccount";

pub const STREAMS_PATH: &str = "/api/streams";
pub const STREAM_DETAILS_PATH: &str = "/api/streams/:streamId";
pub const AUTH_PATH: &str = "/api/auth";
pub const HLS_PATH: &str = "/live/:streamId/master.m3u8";

/// Base URLs of the backend services this front end talks to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub chat_server: String,
    pub core_server: String,
    pub hive_api: String,
}

/// Optional replacements for the defaults. Empty strings count as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub chat_server: Option<String>,
    pub core_server: Option<String>,
    pub hive_api: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            chat_server: DEFAULT_CHAT_SERVER.to_string(),
            core_server: DEFAULT_CORE_SERVER.to_string(),
            hive_api: DEFAULT_HIVE_API.to_string(),
        }
    }
}

impl ConfigOverrides {
    /// Values baked in at build time so the server render and the wasm bundle agree.
    pub fn from_build_env() -> Self {
        Self {
            chat_server: option_env!("VIMM_CHAT_SERVER").map(str::to_string),
            core_server: option_env!("VIMM_CORE_SERVER").map(str::to_string),
            hive_api: option_env!("VIMM_HIVE_API").map(str::to_string),
        }
    }
}

fn pick(default: String, value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim().trim_end_matches('/').to_string(),
        _ => default,
    }
}

impl AppConfig {
    pub fn merge(self, overrides: ConfigOverrides) -> Self {
        Self {
            chat_server: pick(self.chat_server, overrides.chat_server),
            core_server: pick(self.core_server, overrides.core_server),
            hive_api: pick(self.hive_api, overrides.hive_api),
        }
    }

    pub fn streams_url(&self) -> String {
        format!("{}{}", self.core_server, STREAMS_PATH)
    }

    pub fn stream_details_url(&self, stream_id: &str) -> String {
        format!(
            "{}{}",
            self.core_server,
            fill(STREAM_DETAILS_PATH, ":streamId", stream_id)
        )
    }

    pub fn auth_url(&self, action: &str) -> String {
        format!("{}{}/{}", self.core_server, AUTH_PATH, action)
    }

    pub fn hls_url(&self, stream_id: &str) -> String {
        format!("{}{}", self.core_server, fill(HLS_PATH, ":streamId", stream_id))
    }

    pub fn player_url(&self, username: &str) -> String {
        format!(
            "{}/player.html?user={}",
            self.core_server,
            urlencoding::encode(username)
        )
    }

    pub fn chat_socket_url(&self) -> String {
        self.chat_server.clone()
    }

    pub fn chat_messages_url(&self, account: &str) -> String {
        format!(
            "{}{}",
            self.chat_server,
            fill(CHAT_MESSAGES_PATH, ":hiveAccount", account)
        )
    }

    pub fn chat_config_url(&self, account: &str) -> String {
        format!(
            "{}{}",
            self.chat_server,
            fill(CHAT_CONFIG_PATH, ":hiveAccount", account)
        )
    }

    pub fn chat_embed_url(&self, account: &str) -> String {
        format!(
            "{}{}",
            self.chat_server,
            fill(CHAT_EMBED_PATH, ":hiveAccount", account)
        )
    }
}

fn fill(template: &str, placeholder: &str, value: &str) -> String {
    template.replace(placeholder, &urlencoding::encode(value))
}

static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    let config = AppConfig::default().merge(ConfigOverrides::from_build_env());
    log::debug!(
        "config loaded: core={} chat={} hive={}",
        config.core_server,
        config.chat_server,
        config.hive_api
    );
    config
});

pub fn get() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    fn webhop() -> AppConfig {
        AppConfig::default().merge(ConfigOverrides {
            chat_server: Some("http://vimmcore.webhop.me".to_string()),
            core_server: Some("http://vimmcore.webhop.me".to_string()),
            hive_api: None,
        })
    }

    #[test]
    fn defaults_are_used_without_overrides() {
        let config = AppConfig::default().merge(ConfigOverrides::default());
        assert_eq!(config.chat_server, "http://localhost:3001");
        assert_eq!(config.core_server, "http://85.239.54.212:3000");
        assert_eq!(config.hive_api, "https://api.openhive.network");
    }

    #[test]
    fn empty_overrides_do_not_replace_defaults() {
        let config = AppConfig::default().merge(ConfigOverrides {
            chat_server: Some(String::new()),
            core_server: Some("   ".to_string()),
            hive_api: None,
        });
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn overrides_replace_defaults() {
        let config = webhop();
        assert_eq!(config.chat_server, "http://vimmcore.webhop.me");
        assert_eq!(config.core_server, "http://vimmcore.webhop.me");
        assert!(!config.core_server.contains("https://"));
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let config = AppConfig::default().merge(ConfigOverrides {
            core_server: Some("http://core.example/".to_string()),
            ..Default::default()
        });
        assert_eq!(config.streams_url(), "http://core.example/api/streams");
    }

    #[test]
    fn builds_player_and_chat_urls() {
        let config = webhop();
        assert_eq!(
            config.player_url("testuser"),
            "http://vimmcore.webhop.me/player.html?user=testuser"
        );
        assert_eq!(
            config.chat_embed_url("testuser"),
            "http://vimmcore.webhop.me/chat/testuser"
        );
        assert_eq!(
            config.player_url("a b"),
            "http://vimmcore.webhop.me/player.html?user=a%20b"
        );
    }

    #[test]
    fn builds_api_urls() {
        let config = webhop();
        assert_eq!(config.streams_url(), "http://vimmcore.webhop.me/api/streams");
        assert_eq!(
            config.stream_details_url("abc"),
            "http://vimmcore.webhop.me/api/streams/abc"
        );
        assert_eq!(
            config.hls_url("abc"),
            "http://vimmcore.webhop.me/live/abc/master.m3u8"
        );
        assert_eq!(
            config.chat_messages_url("alice"),
            "http://vimmcore.webhop.me/api/chat/messages/alice"
        );
        assert_eq!(
            config.chat_config_url("alice"),
            "http://vimmcore.webhop.me/api/chat/config/alice"
        );
        assert_eq!(
            config.auth_url("challenge"),
            "http://vimmcore.webhop.me/api/auth/challenge"
        );
    }
}
