//! Entity Model
//!
//! Value types for one snapshot of account state: users, lists, meta-lists and the
//! account that groups them. Each entity converts to and from its configuration
//! shape (`to_config` / `from_config`) and can be built from API-shaped data
//! (`from_remote`). Ids only ever come from the remote API and are dropped when
//! writing configuration.

use std::collections::BTreeSet;

mod account;
mod list;
mod meta_list;
mod user;

pub use account::{Account, AccountConfig};
pub use list::{List, ListConfig};
pub use meta_list::{is_meta_list, MetaList, MetaListConfig, META_LIST_PREFIX};
pub use user::{User, UserConfig};

/// Sort key used for deterministic configuration output: case-insensitive,
/// with the exact name breaking ties between case variants.
pub(crate) fn config_sort_key(name: &str) -> (String, String) {
    (name.to_lowercase(), name.to_string())
}

/// Compare two user collections by username, ignoring order.
pub(crate) fn same_usernames(left: &[User], right: &[User]) -> bool {
    let left: BTreeSet<&str> = left.iter().map(|u| u.username.as_str()).collect();
    let right: BTreeSet<&str> = right.iter().map(|u| u.username.as_str()).collect();
    left == right
}
