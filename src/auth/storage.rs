use super::types::{AUTH_TOKEN_KEY, AUTH_USER_KEY};
use crate::interop::local_storage;

const MIN_TOKEN_LEN: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredAuth {
    pub user: String,
    pub token: String,
}

/// A stored pair is usable when both halves are present and the token looks real.
pub fn validate_stored(user: Option<String>, token: Option<String>) -> Option<StoredAuth> {
    let user = user?.trim().to_string();
    let token = token?.trim().to_string();
    if user.is_empty() || token.len() <= MIN_TOKEN_LEN {
        return None;
    }
    Some(StoredAuth { user, token })
}

/// Reads the saved session, wiping it if it is malformed.
pub fn load() -> Option<StoredAuth> {
    let storage = local_storage()?;
    let user = storage.get_item(AUTH_USER_KEY).ok().flatten();
    let token = storage.get_item(AUTH_TOKEN_KEY).ok().flatten();
    let had_anything = user.is_some() || token.is_some();

    match validate_stored(user, token) {
        Some(stored) => Some(stored),
        None => {
            if had_anything {
                log::warn!("Invalid stored auth data, clearing");
                clear();
            }
            None
        }
    }
}

pub fn save(user: &str, token: &str) {
    if let Some(storage) = local_storage() {
        if storage.set_item(AUTH_USER_KEY, user).is_err()
            || storage.set_item(AUTH_TOKEN_KEY, token).is_err()
        {
            log::error!("Failed to persist auth session");
        }
    }
}

pub fn clear() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(AUTH_USER_KEY);
        let _ = storage.remove_item(AUTH_TOKEN_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_trimmed_pair() {
        let stored = validate_stored(Some(" alice ".into()), Some(" 0123456789ab ".into()));
        assert_eq!(
            stored,
            Some(StoredAuth {
                user: "alice".into(),
                token: "0123456789ab".into()
            })
        );
    }

    #[test]
    fn rejects_missing_or_short_values() {
        assert!(validate_stored(None, Some("0123456789ab".into())).is_none());
        assert!(validate_stored(Some("alice".into()), None).is_none());
        assert!(validate_stored(Some("   ".into()), Some("0123456789ab".into())).is_none());
        assert!(validate_stored(Some("alice".into()), Some("0123456789".into())).is_none());
        assert!(validate_stored(Some("alice".into()), Some("01234567890".into())).is_some());
    }
}
