//! In-memory account service.
//!
//! Behaves like the remote API closely enough for reconciliation tests: ids are
//! assigned on first sight, every mutating call is recorded, and individual
//! usernames or list names can be set up to be rejected.

use super::{AccountApi, ListMode, RemoteList, RemoteUser};
use crate::error::RemoteError;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap, HashSet};

/// A mutating call received by [`InMemoryAccountApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    CreateFriendship(String),
    DestroyFriendship(String),
    CreateList { name: String, mode: ListMode },
    DestroyList(u64),
    AddListMember { list_id: u64, username: String },
    RemoveListMember { list_id: u64, username: String },
}

#[derive(Debug, Clone)]
struct StoredList {
    name: String,
    mode: ListMode,
    members: Vec<String>,
}

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    user_ids: HashMap<String, u64>,
    follows: Vec<String>,
    lists: BTreeMap<u64, StoredList>,
    rejected: HashSet<String>,
    calls: Vec<ApiCall>,
}

impl State {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn user_id(&mut self, username: &str) -> u64 {
        if let Some(id) = self.user_ids.get(username) {
            return *id;
        }
        let id = self.allocate_id();
        self.user_ids.insert(username.to_string(), id);
        id
    }

    fn remote_user(&mut self, username: &str) -> RemoteUser {
        RemoteUser {
            id: self.user_id(username),
            screen_name: username.to_string(),
        }
    }

    fn check_rejected(&self, target: &str) -> Result<(), RemoteError> {
        if self.rejected.contains(target) {
            Err(RemoteError::Rejected(format!("{} cannot be used", target)))
        } else {
            Ok(())
        }
    }

    fn list_mut(&mut self, list_id: u64) -> Result<&mut StoredList, RemoteError> {
        self.lists
            .get_mut(&list_id)
            .ok_or_else(|| RemoteError::NotFound(format!("list {}", list_id)))
    }
}

/// Thread-safe in-memory implementation of [`AccountApi`].
#[derive(Debug, Default)]
pub struct InMemoryAccountApi {
    state: Mutex<State>,
}

impl InMemoryAccountApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow `username` without recording a call. Returns the user id.
    pub fn seed_follow(&self, username: &str) -> u64 {
        let mut state = self.state.lock();
        let id = state.user_id(username);
        if !state.follows.iter().any(|f| f == username) {
            state.follows.push(username.to_string());
        }
        id
    }

    /// Create a list without recording a call. Returns the list id.
    pub fn seed_list(&self, name: &str, mode: ListMode, members: &[&str]) -> u64 {
        let mut state = self.state.lock();
        for member in members {
            state.user_id(member);
        }
        let id = state.allocate_id();
        state.lists.insert(
            id,
            StoredList {
                name: name.to_string(),
                mode,
                members: members.iter().map(|m| m.to_string()).collect(),
            },
        );
        id
    }

    /// Make every mutation targeting `target` (a username or list name) fail.
    pub fn reject(&self, target: &str) {
        self.state.lock().rejected.insert(target.to_string());
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.state.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    pub fn follows(&self) -> Vec<String> {
        let mut follows = self.state.lock().follows.clone();
        follows.sort();
        follows
    }

    pub fn list_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .state
            .lock()
            .lists
            .values()
            .map(|l| l.name.clone())
            .collect();
        names.sort();
        names
    }

    /// Sorted members of the list called `name`, if it exists.
    pub fn list_members(&self, name: &str) -> Option<Vec<String>> {
        let state = self.state.lock();
        state.lists.values().find(|l| l.name == name).map(|l| {
            let mut members = l.members.clone();
            members.sort();
            members
        })
    }

    pub fn list_mode(&self, name: &str) -> Option<ListMode> {
        let state = self.state.lock();
        state.lists.values().find(|l| l.name == name).map(|l| l.mode)
    }
}

impl AccountApi for InMemoryAccountApi {
    fn get_follows(&self) -> Result<Vec<RemoteUser>, RemoteError> {
        let mut state = self.state.lock();
        let follows = state.follows.clone();
        Ok(follows.iter().map(|f| state.remote_user(f)).collect())
    }

    fn get_lists(&self) -> Result<Vec<RemoteList>, RemoteError> {
        let state = self.state.lock();
        Ok(state
            .lists
            .iter()
            .map(|(id, list)| RemoteList {
                id: *id,
                name: list.name.clone(),
                mode: list.mode,
            })
            .collect())
    }

    fn get_list_members(&self, list_id: u64) -> Result<Vec<RemoteUser>, RemoteError> {
        let mut state = self.state.lock();
        let members = state.list_mut(list_id)?.members.clone();
        Ok(members.iter().map(|m| state.remote_user(m)).collect())
    }

    fn create_friendship(&self, username: &str) -> Result<(), RemoteError> {
        let mut state = self.state.lock();
        state
            .calls
            .push(ApiCall::CreateFriendship(username.to_string()));
        state.check_rejected(username)?;
        state.user_id(username);
        if !state.follows.iter().any(|f| f == username) {
            state.follows.push(username.to_string());
        }
        Ok(())
    }

    fn destroy_friendship(&self, username: &str) -> Result<(), RemoteError> {
        let mut state = self.state.lock();
        state
            .calls
            .push(ApiCall::DestroyFriendship(username.to_string()));
        state.check_rejected(username)?;
        let before = state.follows.len();
        state.follows.retain(|f| f != username);
        if state.follows.len() == before {
            return Err(RemoteError::NotFound(format!("not following {}", username)));
        }
        Ok(())
    }

    fn create_list(&self, name: &str, mode: ListMode) -> Result<RemoteList, RemoteError> {
        let mut state = self.state.lock();
        state.calls.push(ApiCall::CreateList {
            name: name.to_string(),
            mode,
        });
        state.check_rejected(name)?;
        let id = state.allocate_id();
        state.lists.insert(
            id,
            StoredList {
                name: name.to_string(),
                mode,
                members: Vec::new(),
            },
        );
        Ok(RemoteList {
            id,
            name: name.to_string(),
            mode,
        })
    }

    fn destroy_list(&self, list_id: u64) -> Result<(), RemoteError> {
        let mut state = self.state.lock();
        state.calls.push(ApiCall::DestroyList(list_id));
        let name = state.list_mut(list_id)?.name.clone();
        state.check_rejected(&name)?;
        state.lists.remove(&list_id);
        Ok(())
    }

    fn add_list_member(&self, list_id: u64, username: &str) -> Result<(), RemoteError> {
        let mut state = self.state.lock();
        state.calls.push(ApiCall::AddListMember {
            list_id,
            username: username.to_string(),
        });
        state.check_rejected(username)?;
        state.user_id(username);
        let list = state.list_mut(list_id)?;
        if !list.members.iter().any(|m| m == username) {
            list.members.push(username.to_string());
        }
        Ok(())
    }

    fn remove_list_member(&self, list_id: u64, username: &str) -> Result<(), RemoteError> {
        let mut state = self.state.lock();
        state.calls.push(ApiCall::RemoveListMember {
            list_id,
            username: username.to_string(),
        });
        state.check_rejected(username)?;
        let list = state.list_mut(list_id)?;
        let before = list.members.len();
        list.members.retain(|m| m != username);
        if list.members.len() == before {
            return Err(RemoteError::NotFound(format!(
                "{} is not a member of list {}",
                username, list_id
            )));
        }
        Ok(())
    }
}
