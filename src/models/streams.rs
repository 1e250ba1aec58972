use serde::{Deserialize, Serialize};

use super::{flexible_id, non_empty, nullable};
use crate::format::avatar_url;

pub const DEFAULT_CATEGORY: &str = "General";
pub const UNTITLED_STREAM: &str = "Untitled Stream";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StreamRecord {
    #[serde(default, deserialize_with = "flexible_id")]
    id: String,
    #[serde(default, deserialize_with = "nullable")]
    username: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    viewers: u64,
    #[serde(default)]
    avatar: Option<String>,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    is_live: bool,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    stream_path: Option<String>,
    #[serde(default)]
    start_time: Option<String>,
}

/// A live stream as listed by the core server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StreamRecord")]
pub struct Stream {
    pub id: String,
    pub username: String,
    pub title: String,
    pub viewers: u64,
    pub avatar: String,
    pub thumbnail: Option<String>,
    pub is_live: bool,
    pub category: String,
    pub language: Option<String>,
    pub description: Option<String>,
    pub stream_path: Option<String>,
    pub start_time: Option<String>,
}

impl From<StreamRecord> for Stream {
    fn from(record: StreamRecord) -> Self {
        let avatar = non_empty(record.avatar).unwrap_or_else(|| avatar_url(&record.username));
        Self {
            id: record.id,
            title: non_empty(record.title).unwrap_or_else(|| UNTITLED_STREAM.to_string()),
            viewers: record.viewers,
            avatar,
            thumbnail: non_empty(record.thumbnail),
            is_live: record.is_live,
            category: non_empty(record.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            language: non_empty(record.language),
            description: non_empty(record.description),
            stream_path: non_empty(record.stream_path),
            start_time: non_empty(record.start_time),
            username: record.username,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StreamsResponse {
    #[serde(default, deserialize_with = "nullable")]
    pub streams: Vec<Stream>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamPathResponse {
    #[serde(default)]
    pub stream_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StreamDetailsRecord {
    #[serde(default, deserialize_with = "flexible_id")]
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub is_live: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub viewers: u64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub stream_path: Option<String>,
    #[serde(default)]
    pub permlink: Option<String>,
    #[serde(default)]
    pub post_permlink: Option<String>,
}

/// Everything the watch page shows about one channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamInfo {
    pub id: Option<String>,
    pub stream_id: Option<String>,
    pub username: String,
    pub title: String,
    pub description: String,
    pub is_live: bool,
    pub viewers: u64,
    pub category: String,
    pub language: Option<String>,
    pub thumbnail: Option<String>,
    pub start_time: Option<String>,
    pub stream_path: Option<String>,
    pub permlink: Option<String>,
}

pub const WELCOME_DESCRIPTION: &str = "Welcome to the stream!";
pub const NO_INFO_DESCRIPTION: &str = "No stream information available.";

impl StreamInfo {
    pub fn default_title(username: &str) -> String {
        format!("{username}'s Stream")
    }

    /// The offline placeholder used when the stream can't be found or loaded.
    pub fn offline(username: &str, description: &str) -> Self {
        Self {
            id: None,
            stream_id: None,
            username: username.to_string(),
            title: Self::default_title(username),
            description: description.to_string(),
            is_live: false,
            viewers: 0,
            category: DEFAULT_CATEGORY.to_string(),
            language: None,
            thumbnail: None,
            start_time: None,
            stream_path: None,
            permlink: None,
        }
    }

    pub(crate) fn from_details(username: &str, stream_id: &str, record: StreamDetailsRecord) -> Self {
        Self {
            id: non_empty(Some(record.id)),
            stream_id: Some(stream_id.to_string()),
            username: non_empty(record.username).unwrap_or_else(|| username.to_string()),
            title: non_empty(record.title).unwrap_or_else(|| Self::default_title(username)),
            description: non_empty(record.description)
                .unwrap_or_else(|| WELCOME_DESCRIPTION.to_string()),
            is_live: record.is_live,
            viewers: record.viewers,
            category: non_empty(record.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            language: non_empty(record.language),
            thumbnail: non_empty(record.thumbnail),
            start_time: non_empty(record.start_time),
            stream_path: non_empty(record.stream_path),
            permlink: non_empty(record.permlink).or_else(|| non_empty(record.post_permlink)),
        }
    }

    pub fn has_custom_title(&self) -> bool {
        self.title != Self::default_title(&self.username)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChannelRecord {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub channel_title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub channel_description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Public channel profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelInfo {
    pub username: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub language: Option<String>,
}

impl ChannelInfo {
    pub(crate) fn from_record(username: &str, record: ChannelRecord) -> Self {
        Self {
            username: non_empty(record.username).unwrap_or_else(|| username.to_string()),
            title: non_empty(record.title)
                .or_else(|| non_empty(record.channel_title))
                .unwrap_or_else(|| format!("{username}'s Channel")),
            description: non_empty(record.description)
                .or_else(|| non_empty(record.channel_description))
                .unwrap_or_else(|| "Welcome to my channel!".to_string()),
            category: non_empty(record.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            language: non_empty(record.language),
        }
    }
}

impl From<StreamInfo> for ChannelInfo {
    fn from(info: StreamInfo) -> Self {
        Self {
            username: info.username,
            title: info.title,
            description: info.description,
            category: info.category,
            language: info.language,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StreamSort {
    #[default]
    Viewers,
    Username,
    Title,
}

impl StreamSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamSort::Viewers => "viewers",
            StreamSort::Username => "username",
            StreamSort::Title => "title",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "username" => StreamSort::Username,
            "title" => StreamSort::Title,
            _ => StreamSort::Viewers,
        }
    }
}

pub const ALL_CATEGORIES: &str = "all";

/// Search, category filter and sort used by the directory.
pub fn filter_streams(streams: &[Stream], search: &str, category: &str, sort: StreamSort) -> Vec<Stream> {
    let query = search.trim().to_lowercase();
    let mut filtered: Vec<Stream> = streams
        .iter()
        .filter(|s| {
            query.is_empty()
                || s.username.to_lowercase().contains(&query)
                || s.title.to_lowercase().contains(&query)
                || s.category.to_lowercase().contains(&query)
        })
        .filter(|s| category == ALL_CATEGORIES || s.category.eq_ignore_ascii_case(category))
        .cloned()
        .collect();

    match sort {
        StreamSort::Viewers => filtered.sort_by(|a, b| b.viewers.cmp(&a.viewers)),
        StreamSort::Username => filtered.sort_by_key(|s| s.username.to_lowercase()),
        StreamSort::Title => filtered.sort_by_key(|s| s.title.to_lowercase()),
    }
    filtered
}

/// Distinct categories in first-seen order.
pub fn categories(streams: &[Stream]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for stream in streams {
        if !seen.iter().any(|c| c.eq_ignore_ascii_case(&stream.category)) {
            seen.push(stream.category.clone());
        }
    }
    seen
}

pub fn top_by_viewers(streams: &[Stream], count: usize) -> Vec<Stream> {
    let mut sorted = streams.to_vec();
    sorted.sort_by(|a, b| b.viewers.cmp(&a.viewers));
    sorted.truncate(count);
    sorted
}

pub fn stream_count_label(count: usize) -> String {
    if count == 1 {
        "1 stream found".to_string()
    } else {
        format!("{count} streams found")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(username: &str, title: &str, category: &str, viewers: u64) -> Stream {
        serde_json::from_value(serde_json::json!({
            "id": username,
            "username": username,
            "title": title,
            "category": category,
            "viewers": viewers,
            "isLive": true
        }))
        .unwrap()
    }

    #[test]
    fn fills_defaults_for_missing_fields() {
        let s: Stream = serde_json::from_str(r#"{"id": 7, "username": "alice", "title": null}"#).unwrap();
        assert_eq!(s.id, "7");
        assert_eq!(s.title, "Untitled Stream");
        assert_eq!(s.category, "General");
        assert_eq!(s.viewers, 0);
        assert_eq!(s.avatar, "https://images.hive.blog/u/alice/avatar");
        assert!(!s.is_live);
    }

    #[test]
    fn filters_by_search_across_fields() {
        let streams = vec![
            stream("gamer123", "Fortnite", "Gaming", 10),
            stream("artcreator", "Painting", "Art", 20),
            stream("musiclover", "Piano", "Music", 5),
        ];
        let hits = filter_streams(&streams, "ART", ALL_CATEGORIES, StreamSort::Viewers);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].username, "artcreator");

        let hits = filter_streams(&streams, "gaming", ALL_CATEGORIES, StreamSort::Viewers);
        assert_eq!(hits[0].username, "gamer123");
    }

    #[test]
    fn filters_by_category_and_sorts() {
        let streams = vec![
            stream("b", "Zeta", "Gaming", 10),
            stream("a", "Alpha", "gaming", 30),
            stream("c", "Mid", "Music", 50),
        ];
        let by_viewers = filter_streams(&streams, "", "Gaming", StreamSort::Viewers);
        assert_eq!(
            by_viewers.iter().map(|s| s.username.as_str()).collect::<Vec<_>>(),
            vec!["a", "b"]
        );

        let by_title = filter_streams(&streams, "", ALL_CATEGORIES, StreamSort::Title);
        assert_eq!(by_title[0].title, "Alpha");
        assert_eq!(by_title[2].title, "Zeta");

        let by_name = filter_streams(&streams, "", ALL_CATEGORIES, StreamSort::Username);
        assert_eq!(by_name[0].username, "a");
    }

    #[test]
    fn collects_distinct_categories() {
        let streams = vec![
            stream("a", "x", "Gaming", 1),
            stream("b", "x", "gaming", 1),
            stream("c", "x", "Art", 1),
        ];
        assert_eq!(categories(&streams), vec!["Gaming", "Art"]);
    }

    #[test]
    fn labels_stream_count() {
        assert_eq!(stream_count_label(1), "1 stream found");
        assert_eq!(stream_count_label(0), "0 streams found");
        assert_eq!(stream_count_label(4), "4 streams found");
    }

    #[test]
    fn stream_info_uses_post_permlink_fallback() {
        let record: StreamDetailsRecord = serde_json::from_value(serde_json::json!({
            "id": "s1",
            "username": "alice",
            "isLive": true,
            "viewers": 12,
            "postPermlink": "my-post"
        }))
        .unwrap();
        let info = StreamInfo::from_details("alice", "abc", record);
        assert_eq!(info.permlink.as_deref(), Some("my-post"));
        assert_eq!(info.title, "alice's Stream");
        assert_eq!(info.description, "Welcome to the stream!");
        assert!(!info.has_custom_title());
        assert_eq!(info.stream_id.as_deref(), Some("abc"));
    }

    #[test]
    fn channel_info_prefers_channel_fields() {
        let record: ChannelRecord = serde_json::from_value(serde_json::json!({
            "channelTitle": "Cozy corner",
            "description": ""
        }))
        .unwrap();
        let info = ChannelInfo::from_record("bob", record);
        assert_eq!(info.username, "bob");
        assert_eq!(info.title, "Cozy corner");
        assert_eq!(info.description, "Welcome to my channel!");
    }
}
