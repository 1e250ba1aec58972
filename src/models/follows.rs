use serde::{Deserialize, Serialize};

use super::{non_empty, nullable};
use super::streams::Stream;
use crate::format::avatar_url;

/// One channel the signed-in viewer follows, merged with live data when available.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowedChannel {
    #[serde(default, deserialize_with = "nullable")]
    pub username: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub viewers: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub is_live: bool,
    #[serde(default)]
    pub last_seen: Option<String>,
}

impl FollowedChannel {
    pub fn avatar(&self) -> String {
        non_empty(self.avatar.clone()).unwrap_or_else(|| avatar_url(&self.username))
    }

    pub fn last_seen_label(&self) -> String {
        non_empty(self.last_seen.clone()).unwrap_or_else(|| "Recently".to_string())
    }
}

/// A follower of some channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowRelationship {
    #[serde(default, deserialize_with = "nullable")]
    pub username: String,
    #[serde(default)]
    pub followed_at: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowStats {
    #[serde(default, deserialize_with = "nullable")]
    pub follower_count: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub following_count: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FollowingResponse {
    #[serde(default, deserialize_with = "nullable")]
    pub following: Vec<FollowedChannel>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FollowersResponse {
    #[serde(default, deserialize_with = "nullable")]
    pub followers: Vec<FollowRelationship>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FollowStatusResponse {
    #[serde(default, deserialize_with = "nullable")]
    pub is_following: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendationsResponse {
    #[serde(default, deserialize_with = "nullable")]
    pub recommendations: Vec<FollowedChannel>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FollowRequest {
    pub username: String,
}

impl FollowRequest {
    pub fn new(username: &str) -> Self {
        Self {
            username: username.trim().to_lowercase(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FollowResult {
    #[serde(default)]
    pub message: Option<String>,
}

/// Splits followed channels into (live, offline) using the current stream list.
pub fn partition_followed(
    followed: &[FollowedChannel],
    streams: &[Stream],
) -> (Vec<FollowedChannel>, Vec<FollowedChannel>) {
    let mut live = Vec::new();
    let mut offline = Vec::new();

    for channel in followed {
        match streams.iter().find(|s| s.username == channel.username) {
            Some(stream) => live.push(FollowedChannel {
                username: channel.username.clone(),
                avatar: Some(stream.avatar.clone()),
                title: Some(stream.title.clone()),
                category: Some(stream.category.clone()),
                thumbnail: stream.thumbnail.clone().or_else(|| channel.thumbnail.clone()),
                viewers: stream.viewers,
                is_live: true,
                last_seen: None,
            }),
            None => offline.push(FollowedChannel {
                is_live: false,
                last_seen: Some(channel.last_seen_label()),
                ..channel.clone()
            }),
        }
    }

    (live, offline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn channel(username: &str) -> FollowedChannel {
        serde_json::from_value(json!({ "username": username })).unwrap()
    }

    #[test]
    fn follow_request_normalizes_username() {
        assert_eq!(FollowRequest::new("  Alice ").username, "alice");
    }

    #[test]
    fn partitions_by_current_streams() {
        let followed = vec![channel("alice"), channel("bob")];
        let streams: Vec<Stream> = serde_json::from_value(json!([
            { "id": 1, "username": "alice", "title": "Live now", "viewers": 42 }
        ]))
        .unwrap();

        let (live, offline) = partition_followed(&followed, &streams);
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].username, "alice");
        assert_eq!(live[0].viewers, 42);
        assert!(live[0].is_live);
        assert_eq!(live[0].title.as_deref(), Some("Live now"));

        assert_eq!(offline.len(), 1);
        assert_eq!(offline[0].username, "bob");
        assert_eq!(offline[0].last_seen.as_deref(), Some("Recently"));
    }

    #[test]
    fn keeps_known_last_seen() {
        let mut bob = channel("bob");
        bob.last_seen = Some("2 hours ago".to_string());
        let (_, offline) = partition_followed(&[bob], &[]);
        assert_eq!(offline[0].last_seen_label(), "2 hours ago");
        assert_eq!(offline[0].avatar(), "https://images.hive.blog/u/bob/avatar");
    }
}
