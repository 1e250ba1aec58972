use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use super::http::{require_token, ApiClient, ApiError, ErrorKeys};

/// A verification that has not answered by then counts as a network failure.
pub const VERIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Account that streams post through once posting authority is granted.
pub const POSTER_ACCOUNT: &str = "vimm";

#[derive(Debug, Deserialize)]
struct ChallengeResponse {
    #[serde(default)]
    challenge: Option<String>,
}

#[derive(Debug, Serialize)]
struct HiveLoginBody<'a> {
    username: &'a str,
    challenge: &'a str,
    signature: &'a str,
    method: &'static str,
}

#[derive(Debug, Default, Deserialize)]
struct HiveLoginResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    profile: Option<Value>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// A successful server-side Hive login.
#[derive(Clone, Debug, PartialEq)]
pub struct HiveSession {
    pub user: String,
    pub token: String,
    pub profile: Option<Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenCheck {
    pub valid: bool,
    pub network_error: bool,
}

impl TokenCheck {
    /// Only a definite rejection ends the session.
    pub fn should_logout(&self) -> bool {
        !self.valid && !self.network_error
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StreamKeyResponse {
    #[serde(default)]
    stream_key: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Authority {
    #[serde(default)]
    pub weight_threshold: u32,
    #[serde(default)]
    pub account_auths: Vec<(String, u32)>,
    #[serde(default)]
    pub key_auths: Vec<(String, u32)>,
}

impl Authority {
    pub fn grants(&self, account: &str) -> bool {
        self.account_auths.iter().any(|(name, _)| name == account)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct HiveAccount {
    pub name: String,
    #[serde(default)]
    pub posting: Authority,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    #[serde(default = "Option::default")]
    result: Option<T>,
    #[serde(default)]
    error: Option<Value>,
}

impl ApiClient {
    pub async fn auth_challenge(&self) -> Result<String, ApiError> {
        let url = self.config().auth_url("challenge");
        let response: ChallengeResponse = self.get_json(&url, None).await.map_err(|e| {
            log::error!("Challenge request error: {e}");
            ApiError::Network("Failed to get authentication challenge from server".to_string())
        })?;
        response
            .challenge
            .filter(|c| !c.is_empty())
            .ok_or_else(|| ApiError::Decode("No challenge received from server".to_string()))
    }

    pub async fn authenticate_hive(
        &self,
        username: &str,
        challenge: &str,
        signature: &str,
    ) -> Result<HiveSession, ApiError> {
        let url = self.config().auth_url("hive");
        let body = HiveLoginBody {
            username,
            challenge,
            signature,
            method: "keychain",
        };
        let response: HiveLoginResponse = self
            .post_json_with(&url, &body, None, ErrorKeys::ErrorFirst)
            .await?;

        match (response.success, response.token) {
            (true, Some(token)) if !token.is_empty() => Ok(HiveSession {
                user: username.to_string(),
                token,
                profile: response.profile,
            }),
            _ => Err(ApiError::Status {
                status: 200,
                message: response
                    .error
                    .or(response.message)
                    .unwrap_or_else(|| "Authentication failed".to_string()),
            }),
        }
    }

    /// Transport failures keep the session alive; any HTTP answer is authoritative.
    pub async fn verify_token(&self, token: &str) -> TokenCheck {
        self.verify_token_within(token, VERIFY_TIMEOUT).await
    }

    pub async fn verify_token_within(&self, token: &str, limit: Duration) -> TokenCheck {
        let url = self.config().auth_url("verify");
        let request = self
            .request(Method::POST, &url, Some(token))
            .json(&serde_json::json!({}))
            .timeout(limit);
        match self.send::<Value>(request, ErrorKeys::MessageFirst).await {
            Ok(_) => TokenCheck {
                valid: true,
                network_error: false,
            },
            Err(ApiError::Network(e)) => {
                log::warn!("Network error during token verification, assuming token is still valid: {e}");
                TokenCheck {
                    valid: true,
                    network_error: true,
                }
            }
            Err(ApiError::Decode(_)) => TokenCheck {
                valid: true,
                network_error: false,
            },
            Err(e) => {
                log::info!("Token verification rejected: {e}");
                TokenCheck {
                    valid: false,
                    network_error: false,
                }
            }
        }
    }

    pub async fn server_logout(&self, token: &str) {
        let url = self.config().auth_url("logout");
        if let Err(e) = self
            .post_json::<_, Value>(&url, &serde_json::json!({}), Some(token))
            .await
        {
            log::error!("Logout API error: {e}");
        }
    }

    pub async fn request_stream_key(&self, username: &str, token: Option<&str>) -> Result<String, ApiError> {
        let url = self.config().auth_url("stream-key");
        let token = token.and_then(|t| require_token(Some(t)).ok());
        let response: StreamKeyResponse = self
            .post_json(&url, &serde_json::json!({ "username": username }), token)
            .await?;
        response
            .stream_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ApiError::Decode("No stream key in response".to_string()))
    }

    /// `condenser_api.get_accounts` against the configured Hive node.
    pub async fn hive_account(&self, username: &str) -> Result<HiveAccount, ApiError> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "method": "condenser_api.get_accounts",
            "params": [[username]],
            "id": 1
        });
        let response: RpcResponse<Vec<HiveAccount>> =
            self.post_json(self.hive_node(), &body, None).await?;

        if let Some(error) = response.error {
            return Err(ApiError::Decode(error.to_string()));
        }
        response
            .result
            .and_then(|accounts| accounts.into_iter().next())
            .ok_or_else(|| ApiError::Status {
                status: 404,
                message: format!("Hive account @{username} not found"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_definite_rejections_log_out() {
        assert!(TokenCheck { valid: false, network_error: false }.should_logout());
        assert!(!TokenCheck { valid: true, network_error: true }.should_logout());
        assert!(!TokenCheck { valid: true, network_error: false }.should_logout());
    }

    #[test]
    fn reads_account_auths() {
        let account: HiveAccount = serde_json::from_value(serde_json::json!({
            "name": "alice",
            "posting": {
                "weight_threshold": 1,
                "account_auths": [["vimm", 1], ["other", 1]],
                "key_auths": [["STM123", 1]]
            }
        }))
        .unwrap();
        assert!(account.posting.grants(POSTER_ACCOUNT));
        assert!(!account.posting.grants("nobody"));
        assert_eq!(account.posting.weight_threshold, 1);
    }
}
