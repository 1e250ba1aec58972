use super::http::{encode, require_token, ApiClient, ApiError, ErrorKeys};
use crate::models::follows::{
    FollowRequest, FollowResult, FollowStats, FollowStatusResponse, FollowedChannel,
    FollowersResponse, FollowRelationship, FollowingResponse, RecommendationsResponse,
};

impl ApiClient {
    pub async fn following(&self, token: Option<&str>) -> Result<Vec<FollowedChannel>, ApiError> {
        let token = require_token(token)?;
        let response: FollowingResponse = self
            .get_json(&self.core("/api/follows/following"), Some(token))
            .await?;
        Ok(response.following)
    }

    pub async fn followers(&self, username: &str) -> Result<Vec<FollowRelationship>, ApiError> {
        let url = self.core(&format!("/api/follows/followers/{}", encode(username)));
        let response: FollowersResponse = self.get_json(&url, None).await?;
        Ok(response.followers)
    }

    /// False whenever the answer can't be determined.
    pub async fn is_following(&self, token: Option<&str>, username: &str) -> bool {
        let Ok(token) = require_token(token) else {
            return false;
        };
        let url = self.core(&format!("/api/follows/status/{}", encode(username)));
        match self.get_json::<FollowStatusResponse>(&url, Some(token)).await {
            Ok(status) => status.is_following,
            Err(e) if e.is_unauthorized() => false,
            Err(e) => {
                log::error!("Error checking follow status for {username}: {e}");
                false
            }
        }
    }

    pub async fn follow(&self, token: Option<&str>, username: &str) -> Result<FollowResult, ApiError> {
        let token = require_token(token)?;
        self.post_json_with(
            &self.core("/api/follows/follow"),
            &FollowRequest::new(username),
            Some(token),
            ErrorKeys::ErrorFirst,
        )
        .await
    }

    pub async fn unfollow(&self, token: Option<&str>, username: &str) -> Result<FollowResult, ApiError> {
        let token = require_token(token)?;
        self.post_json_with(
            &self.core("/api/follows/unfollow"),
            &FollowRequest::new(username),
            Some(token),
            ErrorKeys::ErrorFirst,
        )
        .await
    }

    pub async fn follow_stats(&self, username: &str) -> FollowStats {
        let url = self.core(&format!("/api/follows/stats/{}", encode(username)));
        self.get_json(&url, None).await.unwrap_or_else(|e| {
            log::error!("Error fetching follow stats for {username}: {e}");
            FollowStats::default()
        })
    }

    pub async fn recommendations(&self, token: Option<&str>, limit: u32) -> Vec<FollowedChannel> {
        let url = self.core(&format!("/api/follows/recommendations?limit={limit}"));
        match self.get_json::<RecommendationsResponse>(&url, token).await {
            Ok(response) => response.recommendations,
            Err(e) => {
                log::error!("Error fetching recommendations: {e}");
                Vec::new()
            }
        }
    }
}
