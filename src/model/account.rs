use super::{
    config_sort_key, same_usernames, List, ListConfig, MetaList, MetaListConfig, User, UserConfig,
};
use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// One full snapshot of account state, either desired (from configuration) or
/// actual (from the API).
///
/// Equality compares follows by username and lists and meta-lists by name,
/// ignoring collection order.
#[derive(Debug, Clone, Default)]
pub struct Account {
    pub follows: Vec<User>,
    pub lists: Vec<List>,
    pub meta_lists: Vec<MetaList>,
}

fn by_name<'a, T, F>(items: &'a [T], name: F) -> BTreeMap<&'a str, &'a T>
where
    F: Fn(&'a T) -> &'a str,
{
    items.iter().map(|item| (name(item), item)).collect()
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        same_usernames(&self.follows, &other.follows)
            && self.lists.len() == other.lists.len()
            && by_name(&self.lists, |l| l.name.as_str())
                == by_name(&other.lists, |l| l.name.as_str())
            && self.meta_lists.len() == other.meta_lists.len()
            && by_name(&self.meta_lists, |m| m.name.as_str())
                == by_name(&other.meta_lists, |m| m.name.as_str())
    }
}

impl Eq for Account {}

fn check_unique_usernames(kind: &'static str, users: &[User]) -> Result<(), ModelError> {
    let mut seen = HashSet::new();
    for user in users {
        if !seen.insert(user.username.as_str()) {
            return Err(ModelError::DuplicateName {
                kind,
                name: user.username.clone(),
            });
        }
    }
    Ok(())
}

/// Configuration document shape. Missing top-level keys read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountConfig {
    #[serde(default)]
    pub follows: Vec<UserConfig>,
    #[serde(default)]
    pub lists: Vec<ListConfig>,
    #[serde(default)]
    pub meta_lists: Vec<MetaListConfig>,
}

impl Account {
    /// Check name and username uniqueness and the list / meta-list namespace
    /// split.
    pub fn validate(&self) -> Result<(), ModelError> {
        check_unique_usernames("follow", &self.follows)?;

        let mut list_names = HashSet::new();
        for list in &self.lists {
            check_unique_usernames("member", &list.members)?;
            if !list_names.insert(list.name.as_str()) {
                return Err(ModelError::DuplicateName {
                    kind: "list",
                    name: list.name.clone(),
                });
            }
        }

        let mut meta_names = HashSet::new();
        for meta in &self.meta_lists {
            if list_names.contains(meta.name.as_str()) {
                return Err(ModelError::NamespaceCollision(meta.name.clone()));
            }
            if !meta_names.insert(meta.name.as_str()) {
                return Err(ModelError::DuplicateName {
                    kind: "meta-list",
                    name: meta.name.clone(),
                });
            }
        }

        Ok(())
    }

    /// Serialize for configuration, sorting every collection by lowercased name.
    pub fn to_config(&self) -> Result<AccountConfig, ModelError> {
        self.validate()?;

        let mut follows: Vec<&User> = self.follows.iter().collect();
        follows.sort_by_key(|user| config_sort_key(&user.username));
        let mut lists: Vec<&List> = self.lists.iter().collect();
        lists.sort_by_key(|list| config_sort_key(&list.name));
        let mut meta_lists: Vec<&MetaList> = self.meta_lists.iter().collect();
        meta_lists.sort_by_key(|meta| config_sort_key(&meta.name));

        Ok(AccountConfig {
            follows: follows.into_iter().map(User::to_config).collect(),
            lists: lists
                .into_iter()
                .map(List::to_config)
                .collect::<Result<_, _>>()?,
            meta_lists: meta_lists
                .into_iter()
                .map(MetaList::to_config)
                .collect::<Result<_, _>>()?,
        })
    }

    pub fn from_config(config: AccountConfig) -> Result<Self, ModelError> {
        let account = Self {
            follows: config.follows.into_iter().map(User::from_config).collect(),
            lists: config
                .lists
                .into_iter()
                .map(List::from_config)
                .collect::<Result<_, _>>()?,
            meta_lists: config
                .meta_lists
                .into_iter()
                .map(MetaList::from_config)
                .collect::<Result<_, _>>()?,
        };
        account.validate()?;
        Ok(account)
    }
}
