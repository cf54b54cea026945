use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;
use tokio::sync::Mutex;

use common::PlayerId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    InvalidUsername,
    UsernameTaken,
    InvalidCredentials,
    NotAuthenticated,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::InvalidUsername => {
                write!(f, "Username must be 3-20 letters, digits or underscores")
            }
            AuthError::UsernameTaken => write!(f, "Username is already taken"),
            AuthError::InvalidCredentials => write!(f, "Invalid username or password"),
            AuthError::NotAuthenticated => write!(f, "Not authenticated"),
        }
    }
}

impl std::error::Error for AuthError {}

#[derive(Default)]
struct UserStoreInner {
    password_hashes: HashMap<PlayerId, u64>,
    current_user: Option<PlayerId>,
}

/// Accounts plus the signed-in user of this session.
///
/// Passwords are kept as salted `DefaultHasher` digests. This keeps them out of
/// logs and debug output; it is not a security boundary.
#[derive(Clone, Default)]
pub struct UserStore {
    inner: Arc<Mutex<UserStoreInner>>,
}

fn hash_password(username: &PlayerId, password: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    username.hash(&mut hasher);
    password.hash(&mut hasher);
    hasher.finish()
}

fn validate_username(username: &str) -> Result<(), AuthError> {
    let valid_length = (3..=20).contains(&username.chars().count());
    let valid_chars = username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid_length && valid_chars {
        Ok(())
    } else {
        Err(AuthError::InvalidUsername)
    }
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the account and signs it in.
    pub async fn sign_up(&self, username: &str, password: &str) -> Result<PlayerId, AuthError> {
        validate_username(username)?;
        let player_id = PlayerId::from(username);

        let mut inner = self.inner.lock().await;
        if inner.password_hashes.contains_key(&player_id) {
            return Err(AuthError::UsernameTaken);
        }
        let hash = hash_password(&player_id, password);
        inner.password_hashes.insert(player_id.clone(), hash);
        inner.current_user = Some(player_id.clone());
        Ok(player_id)
    }

    pub async fn log_in(&self, username: &str, password: &str) -> Result<PlayerId, AuthError> {
        let player_id = PlayerId::from(username);

        let mut inner = self.inner.lock().await;
        match inner.password_hashes.get(&player_id) {
            Some(stored) if *stored == hash_password(&player_id, password) => {
                inner.current_user = Some(player_id.clone());
                Ok(player_id)
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    pub async fn log_out(&self) -> Result<PlayerId, AuthError> {
        let mut inner = self.inner.lock().await;
        inner.current_user.take().ok_or(AuthError::NotAuthenticated)
    }

    pub async fn current_user(&self) -> Option<PlayerId> {
        self.inner.lock().await.current_user.clone()
    }

    pub async fn require_user(&self) -> Result<PlayerId, AuthError> {
        self.current_user().await.ok_or(AuthError::NotAuthenticated)
    }
}
