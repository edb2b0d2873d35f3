use super::{config_sort_key, is_meta_list, same_usernames, User, UserConfig};
use crate::error::ModelError;
use crate::remote::{ListMode, RemoteList, RemoteUser};
use serde::{Deserialize, Serialize};

/// A curated list of users, identified by name.
///
/// API-sourced lists may carry a meta-list name: they hold the denormalized
/// membership of a meta-list that already exists remotely. Only the
/// configuration boundary rejects such names.
///
/// Equality ignores the remote id and member order, matching [`User`] identity.
#[derive(Debug, Clone)]
pub struct List {
    pub id: Option<u64>,
    pub name: String,
    pub is_private: bool,
    pub members: Vec<User>,
}

impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.is_private == other.is_private
            && same_usernames(&self.members, &other.members)
    }
}

impl Eq for List {}

/// Configuration shape of a list: `{name, is_private, members: [{username}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListConfig {
    pub name: String,
    #[serde(default = "default_private")]
    pub is_private: bool,
    #[serde(default)]
    pub members: Vec<UserConfig>,
}

pub(super) fn default_private() -> bool {
    true
}

impl List {
    pub fn new(name: impl Into<String>, is_private: bool, members: Vec<User>) -> Self {
        Self {
            id: None,
            name: name.into(),
            is_private,
            members,
        }
    }

    pub fn mode(&self) -> ListMode {
        ListMode::from_private(self.is_private)
    }

    /// Serialize for configuration. Members are sorted by lowercased username.
    pub fn to_config(&self) -> Result<ListConfig, ModelError> {
        if is_meta_list(&self.name) {
            return Err(ModelError::ListNameIsMetaList(self.name.clone()));
        }
        let mut members: Vec<&User> = self.members.iter().collect();
        members.sort_by_key(|member| config_sort_key(&member.username));
        Ok(ListConfig {
            name: self.name.clone(),
            is_private: self.is_private,
            members: members.into_iter().map(User::to_config).collect(),
        })
    }

    pub fn from_config(config: ListConfig) -> Result<Self, ModelError> {
        if is_meta_list(&config.name) {
            return Err(ModelError::ListNameIsMetaList(config.name));
        }
        Ok(Self::new(
            config.name,
            config.is_private,
            config.members.into_iter().map(User::from_config).collect(),
        ))
    }

    pub fn from_remote(list: &RemoteList, members: &[RemoteUser]) -> Self {
        Self {
            id: Some(list.id),
            name: list.name.clone(),
            is_private: list.mode.is_private(),
            members: members.iter().map(User::from_remote).collect(),
        }
    }
}
