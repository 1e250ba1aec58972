use leptos::{prelude::*, task::spawn_local};
use std::time::Duration;

use super::keychain::{self, POSTING};
use super::storage;
use super::types::{AuthAction, AuthError, AuthState};
use crate::services::hive_auth::HiveSession;
use crate::services::ApiClient;

const VERIFY_INTERVAL: Duration = Duration::from_secs(30 * 60);

#[derive(Clone, Copy)]
pub struct AuthContext {
    state: RwSignal<AuthState>,
}

impl AuthContext {
    fn dispatch(&self, action: AuthAction) {
        self.state.update(|state| {
            *state = std::mem::take(state).reduce(action);
        });
    }

    pub fn state(&self) -> AuthState {
        self.state.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(|s| s.is_authenticated)
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    pub fn user(&self) -> Option<String> {
        self.state.with(|s| s.user.clone())
    }

    pub fn error(&self) -> Option<String> {
        self.state.with(|s| s.error.clone())
    }

    pub fn token(&self) -> Option<String> {
        self.state.with(|s| s.token.clone())
    }

    /// Current token without subscribing the caller.
    pub fn bearer(&self) -> Option<String> {
        self.state.with_untracked(|s| s.token.clone())
    }

    pub fn user_untracked(&self) -> Option<String> {
        self.state.with_untracked(|s| s.user.clone())
    }

    pub fn clear_error(&self) {
        self.dispatch(AuthAction::ClearError);
    }

    pub async fn login(&self, username: &str) -> Result<(), AuthError> {
        let username = username.trim().to_lowercase();
        if username.is_empty() {
            let e = AuthError::ServerRejected("Please enter your Hive username".to_string());
            self.dispatch(AuthAction::LoginFailure(e.to_string()));
            return Err(e);
        }

        self.dispatch(AuthAction::LoginStart);
        match authenticate_with_keychain(&username).await {
            Ok(session) => {
                storage::save(&session.user, &session.token);
                log::info!("Authentication successful for user: {}", session.user);
                self.dispatch(AuthAction::LoginSuccess {
                    user: session.user,
                    token: session.token,
                });
                Ok(())
            }
            Err(e) => {
                log::error!("Login failed: {e}");
                self.dispatch(AuthAction::LoginFailure(e.to_string()));
                Err(e)
            }
        }
    }

    /// Local state is cleared first; the server is told afterwards.
    pub fn logout(&self) {
        let token = self.bearer();
        storage::clear();
        self.dispatch(AuthAction::Logout);
        if let Some(token) = token {
            spawn_local(async move {
                ApiClient::from_config().server_logout(&token).await;
            });
        }
    }

    /// Re-signs a fresh challenge for the current user.
    pub async fn refresh_token(&self) -> Result<(), AuthError> {
        let user = self.user_untracked().ok_or(AuthError::NotLoggedIn)?;
        let session = authenticate_with_keychain(&user).await?;
        storage::save(&session.user, &session.token);
        self.dispatch(AuthAction::LoginSuccess {
            user: session.user,
            token: session.token,
        });
        Ok(())
    }

    async fn verify_stored(&self, token: String) {
        let check = ApiClient::from_config().verify_token(&token).await;
        if check.should_logout() {
            log::info!("Stored token is invalid, logging out");
            self.logout();
        } else if check.network_error {
            log::info!("Token verification skipped due to network error, keeping session");
        } else {
            log::debug!("Token verified");
        }
    }
}

async fn authenticate_with_keychain(username: &str) -> Result<HiveSession, AuthError> {
    if !keychain::is_installed() {
        return Err(AuthError::KeychainMissing);
    }
    let client = ApiClient::from_config();
    let challenge = client
        .auth_challenge()
        .await
        .map_err(|e| AuthError::ChallengeFailed(e.to_string()))?;
    let signature = keychain::sign_buffer(username, &challenge, POSTING).await?;
    client
        .authenticate_hive(username, &challenge, &signature)
        .await
        .map_err(|e| AuthError::ServerRejected(e.to_string()))
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let auth = AuthContext {
        state: RwSignal::new(AuthState::default()),
    };

    // restore the saved session, then check it in the background
    Effect::new(move |_| match storage::load() {
        Some(stored) => {
            log::info!("Restoring authentication for user: {}", stored.user);
            let token = stored.token.clone();
            auth.dispatch(AuthAction::InitializeSuccess {
                user: stored.user,
                token: stored.token,
            });
            spawn_local(async move { auth.verify_stored(token).await });
        }
        None => auth.dispatch(AuthAction::InitializeComplete),
    });

    Effect::new(move |_| {
        if let Ok(handle) = set_interval_with_handle(
            move || {
                if let Some(token) = auth.bearer() {
                    spawn_local(async move { auth.verify_stored(token).await });
                }
            },
            VERIFY_INTERVAL,
        ) {
            on_cleanup(move || handle.clear());
        }
    });

    provide_context(auth);

    view! { {children()} }
}

pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}
