//! Remote account API
//!
//! [`AccountApi`] is the read/write surface of the remote service. The reconciler
//! only ever talks to this trait; [`http::HttpAccountApi`] is the production
//! implementation and [`memory::InMemoryAccountApi`] the test double.

use crate::error::RemoteError;
use serde::{Deserialize, Serialize};

pub mod http;
pub mod memory;
mod snapshot;

pub use snapshot::fetch_account;

/// Visibility of a remote list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListMode {
    Private,
    Public,
}

impl ListMode {
    pub fn from_private(is_private: bool) -> Self {
        if is_private {
            ListMode::Private
        } else {
            ListMode::Public
        }
    }

    pub fn is_private(self) -> bool {
        self == ListMode::Private
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ListMode::Private => "private",
            ListMode::Public => "public",
        }
    }
}

/// User as reported by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteUser {
    pub id: u64,
    pub screen_name: String,
}

/// List as reported by the API (without members).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteList {
    pub id: u64,
    pub name: String,
    pub mode: ListMode,
}

/// Blocking read/write primitives of the remote account service.
pub trait AccountApi {
    fn get_follows(&self) -> Result<Vec<RemoteUser>, RemoteError>;

    fn get_lists(&self) -> Result<Vec<RemoteList>, RemoteError>;

    fn get_list_members(&self, list_id: u64) -> Result<Vec<RemoteUser>, RemoteError>;

    fn create_friendship(&self, username: &str) -> Result<(), RemoteError>;

    fn destroy_friendship(&self, username: &str) -> Result<(), RemoteError>;

    fn create_list(&self, name: &str, mode: ListMode) -> Result<RemoteList, RemoteError>;

    fn destroy_list(&self, list_id: u64) -> Result<(), RemoteError>;

    fn add_list_member(&self, list_id: u64, username: &str) -> Result<(), RemoteError>;

    fn remove_list_member(&self, list_id: u64, username: &str) -> Result<(), RemoteError>;
}
