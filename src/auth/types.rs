use std::fmt;

pub const AUTH_USER_KEY: &str = "vimm-auth-user";
pub const AUTH_TOKEN_KEY: &str = "vimm-auth-token";

#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    KeychainMissing,
    KeychainRejected(String),
    ChallengeFailed(String),
    ServerRejected(String),
    NotLoggedIn,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::KeychainMissing => write!(
                f,
                "Hive Keychain extension not found. Please install Hive Keychain."
            ),
            AuthError::KeychainRejected(e) => write!(f, "Keychain request failed: {}", e),
            AuthError::ChallengeFailed(e) => write!(f, "{}", e),
            AuthError::ServerRejected(e) => write!(f, "{}", e),
            AuthError::NotLoggedIn => write!(f, "Please log in first"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Session state shared through [`crate::auth::context::AuthContext`].
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub user: Option<String>,
    pub token: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            is_authenticated: false,
            user: None,
            token: None,
            loading: true,
            error: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AuthAction {
    LoginStart,
    LoginSuccess { user: String, token: String },
    LoginFailure(String),
    Logout,
    ClearError,
    InitializeSuccess { user: String, token: String },
    InitializeComplete,
}

impl AuthState {
    pub fn reduce(self, action: AuthAction) -> AuthState {
        match action {
            AuthAction::LoginStart => AuthState {
                loading: true,
                error: None,
                ..self
            },
            AuthAction::LoginSuccess { user, token }
            | AuthAction::InitializeSuccess { user, token } => AuthState {
                is_authenticated: true,
                user: Some(user),
                token: Some(token),
                loading: false,
                error: None,
            },
            AuthAction::LoginFailure(error) => AuthState {
                is_authenticated: false,
                user: None,
                token: None,
                loading: false,
                error: Some(error),
            },
            AuthAction::Logout => AuthState {
                is_authenticated: false,
                user: None,
                token: None,
                loading: false,
                error: None,
            },
            AuthAction::ClearError => AuthState { error: None, ..self },
            AuthAction::InitializeComplete => AuthState {
                loading: false,
                ..self
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_in() -> AuthState {
        AuthState::default().reduce(AuthAction::LoginSuccess {
            user: "alice".into(),
            token: "token-0123456789".into(),
        })
    }

    #[test]
    fn starts_loading_and_signed_out() {
        let state = AuthState::default();
        assert!(state.loading);
        assert!(!state.is_authenticated);
    }

    #[test]
    fn login_flow() {
        let state = AuthState::default().reduce(AuthAction::LoginStart);
        assert!(state.loading);
        assert!(state.error.is_none());

        let state = signed_in();
        assert!(state.is_authenticated);
        assert_eq!(state.user.as_deref(), Some("alice"));
        assert!(!state.loading);
    }

    #[test]
    fn failure_clears_session_and_keeps_error() {
        let state = signed_in().reduce(AuthAction::LoginFailure("denied".into()));
        assert!(!state.is_authenticated);
        assert!(state.token.is_none());
        assert_eq!(state.error.as_deref(), Some("denied"));

        let state = state.reduce(AuthAction::ClearError);
        assert!(state.error.is_none());
    }

    #[test]
    fn logout_and_initialize() {
        let state = signed_in().reduce(AuthAction::Logout);
        assert!(!state.is_authenticated);
        assert!(state.user.is_none());
        assert!(!state.loading);

        let state = AuthState::default().reduce(AuthAction::InitializeComplete);
        assert!(!state.loading);
        assert!(!state.is_authenticated);

        let state = AuthState::default().reduce(AuthAction::InitializeSuccess {
            user: "bob".into(),
            token: "token-0123456789".into(),
        });
        assert!(state.is_authenticated);
        assert!(!state.loading);
    }

    #[test]
    fn error_messages() {
        assert_eq!(AuthError::NotLoggedIn.to_string(), "Please log in first");
        assert_eq!(
            AuthError::KeychainRejected("user cancelled".into()).to_string(),
            "Keychain request failed: user cancelled"
        );
    }
}
