use crate::remote::RemoteUser;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A followed account or list member.
///
/// Identity is the username alone (case-sensitive). The id is informational and
/// is never compared, so a config-sourced user without an id equals the
/// API-sourced user with the same username.
#[derive(Debug, Clone, Default)]
pub struct User {
    pub id: Option<u64>,
    pub username: String,
}

/// Configuration shape of a user: `{username}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    pub username: String,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
        }
    }

    pub fn with_id(id: u64, username: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            username: username.into(),
        }
    }

    pub fn to_config(&self) -> UserConfig {
        UserConfig {
            username: self.username.clone(),
        }
    }

    pub fn from_config(config: UserConfig) -> Self {
        Self::new(config.username)
    }

    pub fn from_remote(user: &RemoteUser) -> Self {
        Self::with_id(user.id, user.screen_name.clone())
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.username == other.username
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.username.hash(state);
    }
}
