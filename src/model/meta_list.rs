use super::list::default_private;
use super::{config_sort_key, List, User};
use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Reserved name prefix that marks a list as a meta-list.
pub const META_LIST_PREFIX: &str = "META";

/// Whether `name` falls in the meta-list namespace.
pub fn is_meta_list(name: &str) -> bool {
    name.starts_with(META_LIST_PREFIX)
}

/// A list of lists: its membership is the union of the referenced lists.
///
/// Configuration-sourced meta-lists carry `lists` (the referenced list names).
/// API-sourced meta-lists carry `remote`, the list that already exists
/// remotely with its real membership. Equality ignores reference order.
#[derive(Debug, Clone)]
pub struct MetaList {
    pub name: String,
    pub is_private: bool,
    pub lists: Option<Vec<String>>,
    pub remote: Option<List>,
}

impl PartialEq for MetaList {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.is_private == other.is_private
            && self.reference_set() == other.reference_set()
            && self.remote == other.remote
    }
}

impl Eq for MetaList {}

/// Configuration shape of a meta-list: `{name, is_private, lists: [name, ...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaListConfig {
    pub name: String,
    #[serde(default = "default_private")]
    pub is_private: bool,
    #[serde(default)]
    pub lists: Vec<String>,
}

fn check_name(name: &str) -> Result<(), ModelError> {
    if is_meta_list(name) {
        Ok(())
    } else {
        Err(ModelError::InvalidMetaListName {
            name: name.to_string(),
            prefix: META_LIST_PREFIX,
        })
    }
}

impl MetaList {
    /// Build a configuration-sourced meta-list.
    pub fn new(
        name: impl Into<String>,
        is_private: bool,
        lists: Vec<String>,
    ) -> Result<Self, ModelError> {
        let name = name.into();
        check_name(&name)?;
        if lists.is_empty() {
            return Err(ModelError::EmptyMetaList(name));
        }
        Ok(Self {
            name,
            is_private,
            lists: Some(lists),
            remote: None,
        })
    }

    /// Wrap a list fetched from the API whose name is in the meta-list namespace.
    pub fn from_remote_list(list: List) -> Result<Self, ModelError> {
        check_name(&list.name)?;
        Ok(Self {
            name: list.name.clone(),
            is_private: list.is_private,
            lists: None,
            remote: Some(list),
        })
    }

    /// Serialize for configuration. References are sorted by lowercased name.
    pub fn to_config(&self) -> Result<MetaListConfig, ModelError> {
        check_name(&self.name)?;
        let mut lists = match &self.lists {
            Some(lists) if !lists.is_empty() => lists.clone(),
            _ => return Err(ModelError::EmptyMetaList(self.name.clone())),
        };
        lists.sort_by_key(|name| config_sort_key(name));
        Ok(MetaListConfig {
            name: self.name.clone(),
            is_private: self.is_private,
            lists,
        })
    }

    pub fn from_config(config: MetaListConfig) -> Result<Self, ModelError> {
        Self::new(config.name, config.is_private, config.lists)
    }

    fn reference_set(&self) -> Option<BTreeSet<&str>> {
        self.lists
            .as_ref()
            .map(|lists| lists.iter().map(String::as_str).collect())
    }

    /// Resolve this meta-list into a concrete list.
    ///
    /// An API-sourced meta-list is returned as fetched. Otherwise membership is
    /// the union, by username, of every canonical list named in `lists`. Names
    /// with no canonical list contribute nothing.
    pub fn materialize<'a, I>(&self, canonical_lists: I) -> List
    where
        I: IntoIterator<Item = &'a List>,
    {
        if let Some(remote) = &self.remote {
            return remote.clone();
        }

        let references: &[String] = self.lists.as_deref().unwrap_or(&[]);
        let mut seen: HashSet<&str> = HashSet::new();
        let mut found: HashSet<&str> = HashSet::new();
        let mut members: Vec<User> = Vec::new();

        for list in canonical_lists {
            if !references.iter().any(|name| name == &list.name) {
                continue;
            }
            found.insert(list.name.as_str());
            for member in &list.members {
                if seen.insert(member.username.as_str()) {
                    members.push(User::new(member.username.clone()));
                }
            }
        }

        for reference in references {
            if !found.contains(reference.as_str()) {
                debug!(
                    meta_list = %self.name,
                    list = %reference,
                    "Meta-list references a list that does not exist, ignoring"
                );
            }
        }

        List::new(self.name.clone(), self.is_private, members)
    }
}
