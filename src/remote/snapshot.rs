//! Build the actual account snapshot from the API.

use super::AccountApi;
use crate::error::ApiError;
use crate::model::{is_meta_list, Account, List, MetaList, User};
use tracing::{debug, info};

/// Fetch follows and lists. Lists in the meta-list namespace become API-sourced
/// meta-lists carrying their remote membership.
pub fn fetch_account(api: &dyn AccountApi) -> Result<Account, ApiError> {
    let follows: Vec<User> = api.get_follows()?.iter().map(User::from_remote).collect();
    info!(count = follows.len(), "Fetched follows");

    let mut lists = Vec::new();
    let mut meta_lists = Vec::new();
    for remote_list in api.get_lists()? {
        let members = api.get_list_members(remote_list.id)?;
        debug!(list = %remote_list.name, members = members.len(), "Fetched list members");
        let list = List::from_remote(&remote_list, &members);
        if is_meta_list(&list.name) {
            meta_lists.push(MetaList::from_remote_list(list)?);
        } else {
            lists.push(list);
        }
    }
    info!(
        lists = lists.len(),
        meta_lists = meta_lists.len(),
        "Fetched lists"
    );

    Ok(Account {
        follows,
        lists,
        meta_lists,
    })
}
