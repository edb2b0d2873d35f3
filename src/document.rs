//! Account document: the human-edited YAML file describing desired state.

use crate::error::ApiError;
use crate::model::{Account, AccountConfig, MetaList};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// Parse an account from YAML text. An empty document is an empty account.
pub fn parse_account(text: &str, origin: &str) -> Result<Account, ApiError> {
    let document_error = |message: String| ApiError::Document {
        path: origin.to_string(),
        message,
    };
    let config: AccountConfig = if text.trim().is_empty() {
        AccountConfig::default()
    } else {
        serde_yaml::from_str(text).map_err(|e| document_error(e.to_string()))?
    };
    Account::from_config(config).map_err(|e| document_error(e.to_string()))
}

/// Serialize an account to sorted, deterministic YAML.
pub fn render_account(account: &Account) -> Result<String, ApiError> {
    let config = account.to_config()?;
    serde_yaml::to_string(&config)
        .map_err(|e| ApiError::ConfigError(format!("Failed to serialize account: {}", e)))
}

pub fn read_account(path: &Path) -> Result<Account, ApiError> {
    let text = std::fs::read_to_string(path).map_err(|e| ApiError::Document {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let account = parse_account(&text, &path.display().to_string())?;
    info!(
        path = %path.display(),
        follows = account.follows.len(),
        lists = account.lists.len(),
        meta_lists = account.meta_lists.len(),
        "Read account document"
    );
    Ok(account)
}

pub fn write_account(path: &Path, account: &Account) -> Result<(), ApiError> {
    let text = render_account(account)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, text)?;
    info!(path = %path.display(), "Wrote account document");
    Ok(())
}

/// Prepare an API snapshot for writing as configuration.
///
/// API-sourced meta-lists have no list references. References are taken from
/// `previous` (the document being overwritten) by name; meta-lists with no known
/// definition are dropped with a warning.
pub fn adopt_meta_list_definitions(mut snapshot: Account, previous: Option<&Account>) -> Account {
    let known: HashMap<&str, &MetaList> = previous
        .map(|account| {
            account
                .meta_lists
                .iter()
                .map(|meta| (meta.name.as_str(), meta))
                .collect()
        })
        .unwrap_or_default();

    let meta_lists = std::mem::take(&mut snapshot.meta_lists);
    snapshot.meta_lists = meta_lists
        .into_iter()
        .filter_map(|remote| match known.get(remote.name.as_str()) {
            Some(definition) => Some(MetaList {
                name: remote.name,
                is_private: remote.is_private,
                lists: definition.lists.clone(),
                remote: None,
            }),
            None => {
                warn!(
                    meta_list = %remote.name,
                    "Remote meta-list has no definition in the existing document, skipping"
                );
                None
            }
        })
        .collect();
    snapshot
}
