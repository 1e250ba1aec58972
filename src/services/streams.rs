use super::http::{encode, ApiClient, ApiError};
use crate::config::STREAMS_PATH;
use crate::models::streams::{
    ChannelInfo, ChannelRecord, Stream, StreamDetailsRecord, StreamInfo, StreamPathResponse,
    StreamsResponse, NO_INFO_DESCRIPTION, WELCOME_DESCRIPTION,
};

impl ApiClient {
    pub async fn list_streams(&self) -> Result<Vec<Stream>, ApiError> {
        let response: StreamsResponse = self.get_json(&self.core(STREAMS_PATH), None).await?;
        Ok(response.streams)
    }

    /// Resolves a Hive account to its stream id.
    pub async fn stream_id_for(&self, username: &str) -> Result<String, ApiError> {
        let url = self.core(&format!(
            "/api/streams/path/{}?type=hiveAccount",
            encode(username)
        ));
        let response: StreamPathResponse = self.get_json(&url, None).await?;
        response
            .stream_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::Decode("Stream ID not found in response".to_string()))
    }

    async fn fetch_stream_info(&self, username: &str) -> Result<StreamInfo, ApiError> {
        let stream_id = self.stream_id_for(username).await?;
        let url = self.core(&format!("/api/streams/{}", encode(&stream_id)));
        let record: StreamDetailsRecord = self.get_json(&url, None).await?;
        Ok(StreamInfo::from_details(username, &stream_id, record))
    }

    /// Never fails: missing streams and backend errors both produce an offline placeholder.
    pub async fn stream_info(&self, username: &str) -> StreamInfo {
        match self.fetch_stream_info(username).await {
            Ok(info) => info,
            Err(e) if e.is_not_found() => StreamInfo::offline(username, NO_INFO_DESCRIPTION),
            Err(e) => {
                log::error!("Error fetching stream info for {username}: {e}");
                StreamInfo::offline(username, WELCOME_DESCRIPTION)
            }
        }
    }

    pub async fn channel_info(&self, username: &str) -> ChannelInfo {
        let url = self.core(&format!("/api/channels/{}", encode(username)));
        match self.get_json::<ChannelRecord>(&url, None).await {
            Ok(record) => ChannelInfo::from_record(username, record),
            Err(e) => {
                log::debug!("channel lookup for {username} failed, using stream info: {e}");
                self.stream_info(username).await.into()
            }
        }
    }
}

/// Shown in the directory when the stream list can't be loaded.
pub fn placeholder_streams() -> Vec<Stream> {
    let raw = [
        ("1", "gamer123", "Playing Fortnite Battle Royale", 1243, "Gaming", "Epic wins and fails in Fortnite!"),
        ("2", "streamqueen", "Just Chatting with Viewers", 856, "Just Chatting", "Come hang out and chat!"),
        ("3", "proplayer", "Competitive Ranked Matches", 2105, "Esports", "Climbing the leaderboards!"),
        ("4", "artcreator", "Digital Art Creation Session", 437, "Art", "Creating beautiful digital artwork"),
        ("5", "musiclover", "Piano Practice and Covers", 691, "Music", "Playing your favorite songs!"),
    ];

    raw.iter()
        .map(|(id, username, title, viewers, category, description)| Stream {
            id: id.to_string(),
            username: username.to_string(),
            title: title.to_string(),
            viewers: *viewers,
            avatar: crate::format::avatar_url(username),
            thumbnail: Some(format!("https://picsum.photos/320/180?random={id}")),
            is_live: true,
            category: category.to_string(),
            language: None,
            description: Some(description.to_string()),
            stream_path: None,
            start_time: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_live_and_distinct() {
        let streams = placeholder_streams();
        assert_eq!(streams.len(), 5);
        assert!(streams.iter().all(|s| s.is_live));
        assert_eq!(streams[0].username, "gamer123");
        assert_eq!(streams[4].category, "Music");
    }
}
