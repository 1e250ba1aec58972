use serde::{Deserialize, Serialize};

use super::channels::{ChannelSettings, ContentRating};
use super::{lenient_count, lenient_millis, nullable};

pub const MAX_STREAM_TITLE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;
pub const MAX_TAGS: usize = 10;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamStats {
    #[serde(default, deserialize_with = "lenient_count")]
    pub current_viewers: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub peak_viewers: u64,
    /// Seconds.
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_watch_time: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub new_followers: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub chat_message_rate: f64,
    /// Stream start as epoch milliseconds.
    #[serde(default, deserialize_with = "lenient_millis")]
    pub uptime: Option<i64>,
    #[serde(default, deserialize_with = "nullable")]
    pub is_live: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FollowerGrowthPoint {
    pub date: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub followers: u64,
}

/// Metadata edited from the dashboard.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamSettings {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub language: String,
    pub content_rating: ContentRating,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl From<ChannelSettings> for StreamSettings {
    fn from(channel: ChannelSettings) -> Self {
        Self {
            title: channel.title,
            description: channel.description,
            tags: channel.tags,
            language: channel.language,
            content_rating: channel.content_rating,
            last_updated: channel.last_updated,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettingsErrors {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<String>,
}

impl SettingsErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.tags.is_none()
    }
}

impl StreamSettings {
    pub fn validate(&self) -> SettingsErrors {
        let mut errors = SettingsErrors::default();

        if self.title.trim().is_empty() {
            errors.title = Some("Stream title is required".to_string());
        } else if self.title.chars().count() > MAX_STREAM_TITLE_LEN {
            errors.title = Some(format!(
                "Title must be {MAX_STREAM_TITLE_LEN} characters or less"
            ));
        }

        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            errors.description = Some(format!(
                "Description must be {MAX_DESCRIPTION_LEN} characters or less"
            ));
        }

        if self.tags.len() > MAX_TAGS {
            errors.tags = Some(format!("Maximum {MAX_TAGS} tags allowed"));
        }

        errors
    }

    /// Adds a lowercased tag unless it is blank, a duplicate, or over the limit.
    pub fn add_tag(&mut self, raw: &str) -> bool {
        let tag = raw.trim().to_lowercase();
        if tag.is_empty() || self.tags.contains(&tag) || self.tags.len() >= MAX_TAGS {
            return false;
        }
        self.tags.push(tag);
        true
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    /// Compares editable fields, ignoring `last_updated`.
    pub fn differs_from(&self, other: &StreamSettings) -> bool {
        self.title != other.title
            || self.description != other.description
            || self.tags != other.tags
            || self.language != other.language
            || self.content_rating != other.content_rating
    }
}

/// Moderation toggles kept in the chat service config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModerationToggle {
    SlowMode,
    FollowersOnly,
    EmoteOnly,
}

impl ModerationToggle {
    pub fn label(&self) -> &'static str {
        match self {
            ModerationToggle::SlowMode => "Slow Mode",
            ModerationToggle::FollowersOnly => "Followers Only",
            ModerationToggle::EmoteOnly => "Emote Only",
        }
    }

    pub fn apply(&self, config: &mut super::chat::ChatConfig) {
        match self {
            ModerationToggle::SlowMode => config.slow_mode = !config.slow_mode,
            ModerationToggle::FollowersOnly => config.followers_only = !config.followers_only,
            ModerationToggle::EmoteOnly => config.emote_only = !config.emote_only,
        }
    }

    pub fn is_on(&self, config: &super::chat::ChatConfig) -> bool {
        match self {
            ModerationToggle::SlowMode => config.slow_mode,
            ModerationToggle::FollowersOnly => config.followers_only,
            ModerationToggle::EmoteOnly => config.emote_only,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> StreamSettings {
        StreamSettings {
            title: "Speedruns".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn title_is_required_and_bounded() {
        let mut s = valid();
        assert!(s.validate().is_empty());

        s.title = "   ".to_string();
        assert_eq!(s.validate().title.as_deref(), Some("Stream title is required"));

        s.title = "x".repeat(101);
        assert_eq!(
            s.validate().title.as_deref(),
            Some("Title must be 100 characters or less")
        );
    }

    #[test]
    fn description_and_tags_are_bounded() {
        let mut s = valid();
        s.description = "d".repeat(501);
        s.tags = (0..11).map(|i| i.to_string()).collect();
        let errors = s.validate();
        assert!(errors.description.is_some());
        assert_eq!(errors.tags.as_deref(), Some("Maximum 10 tags allowed"));
    }

    #[test]
    fn tags_are_normalized_and_unique() {
        let mut s = valid();
        assert!(s.add_tag("  Speedrun "));
        assert!(!s.add_tag("SPEEDRUN"));
        assert!(!s.add_tag("   "));
        assert_eq!(s.tags, vec!["speedrun"]);

        for i in 0..20 {
            s.add_tag(&format!("t{i}"));
        }
        assert_eq!(s.tags.len(), MAX_TAGS);

        s.remove_tag("speedrun");
        assert!(!s.tags.contains(&"speedrun".to_string()));
    }

    #[test]
    fn change_detection_ignores_timestamp() {
        let a = valid();
        let mut b = a.clone();
        b.last_updated = Some("2024-01-01T00:00:00Z".to_string());
        assert!(!a.differs_from(&b));
        b.content_rating = ContentRating::Mature;
        assert!(a.differs_from(&b));
    }

    #[test]
    fn stats_accept_float_and_string_numbers() {
        let stats: StreamStats = serde_json::from_value(serde_json::json!({
            "currentViewers": 12.0,
            "peakViewers": "40",
            "totalWatchTime": 3600,
            "newFollowers": null,
            "uptime": 1700000000000.0,
            "isLive": true
        }))
        .unwrap();
        assert_eq!(stats.current_viewers, 12);
        assert_eq!(stats.peak_viewers, 40);
        assert_eq!(stats.total_watch_time, 3600);
        assert_eq!(stats.new_followers, 0);
        assert_eq!(stats.uptime, Some(1_700_000_000_000));
        assert!(stats.is_live);

        let point: FollowerGrowthPoint =
            serde_json::from_value(serde_json::json!({ "date": "2024-01-01", "followers": 7.0 }))
                .unwrap();
        assert_eq!(point.followers, 7);
    }

    #[test]
    fn toggles_flip_config() {
        let mut config = super::super::chat::ChatConfig::default();
        ModerationToggle::SlowMode.apply(&mut config);
        assert!(ModerationToggle::SlowMode.is_on(&config));
        ModerationToggle::SlowMode.apply(&mut config);
        assert!(!config.slow_mode);
        ModerationToggle::EmoteOnly.apply(&mut config);
        assert!(config.emote_only);
    }
}
