//! HTTP client for a REST account API shaped like the Twitter v1.1 endpoints.
//!
//! Requests are made with an async `reqwest` client driven to completion on a
//! private tokio runtime, so the client presents the blocking [`AccountApi`].

use super::{AccountApi, ListMode, RemoteList, RemoteUser};
use crate::config::RemoteConfig;
use crate::error::{ApiError, RemoteError};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::debug;

/// Cursor value requesting the first page.
const FIRST_PAGE: i64 = -1;

#[derive(Debug, Deserialize)]
struct UserPage {
    #[serde(default)]
    users: Vec<RemoteUser>,
    #[serde(default)]
    next_cursor: i64,
}

#[derive(Debug, Deserialize)]
struct ListPage {
    #[serde(default)]
    lists: Vec<RemoteList>,
    #[serde(default)]
    next_cursor: i64,
}

// Map transport and status errors to RemoteError
fn map_http_error(error: reqwest::Error) -> RemoteError {
    if let Some(status) = error.status() {
        match status.as_u16() {
            401 | 403 => RemoteError::AuthFailed(format!("Authentication failed: {}", error)),
            404 => RemoteError::NotFound(format!("{}", error)),
            429 => RemoteError::RateLimited(format!("Rate limit exceeded: {}", error)),
            400..=499 => RemoteError::Rejected(format!(
                "Request rejected with status {}: {}",
                status, error
            )),
            _ => RemoteError::RequestFailed(format!(
                "Request failed with status {}: {}",
                status, error
            )),
        }
    } else if error.is_timeout() {
        RemoteError::RequestFailed(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        RemoteError::RequestFailed(format!("Connection error: {}", error))
    } else if error.is_decode() {
        RemoteError::InvalidResponse(format!("{}", error))
    } else {
        RemoteError::RequestFailed(format!("HTTP error: {}", error))
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, RemoteError> {
    let response = request.send().await.map_err(map_http_error)?;
    let response = response.error_for_status().map_err(map_http_error)?;
    response.json::<T>().await.map_err(map_http_error)
}

fn build_http_client(config: &RemoteConfig) -> Result<Client, ApiError> {
    Client::builder()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
        .map_err(|e| ApiError::ConfigError(format!("Failed to create HTTP client: {}", e)))
}

/// Production [`AccountApi`] over HTTP.
pub struct HttpAccountApi {
    client: Client,
    runtime: Runtime,
    base_url: String,
    token: String,
    page_size: u32,
}

impl HttpAccountApi {
    pub fn new(config: &RemoteConfig, token: String) -> Result<Self, ApiError> {
        let runtime = Runtime::new()
            .map_err(|e| ApiError::ConfigError(format!("Failed to create runtime: {}", e)))?;
        Ok(Self {
            client: build_http_client(config)?,
            runtime,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
            page_size: config.page_size,
        })
    }

    /// Build a client whose bearer token is read from `config.token_env`.
    pub fn from_config(config: &RemoteConfig) -> Result<Self, ApiError> {
        let token = std::env::var(&config.token_env).map_err(|_| {
            ApiError::ConfigError(format!(
                "Environment variable {} is not set",
                config.token_env
            ))
        })?;
        Self::new(config, token)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, RemoteError> {
        debug!(path, "GET");
        let request = self
            .client
            .get(self.url(path))
            .bearer_auth(&self.token)
            .query(query);
        self.runtime.block_on(send(request))
    }

    fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, RemoteError> {
        debug!(path, "POST");
        let request = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.token)
            .query(query);
        self.runtime.block_on(send(request))
    }

    fn post_unit(&self, path: &str, query: &[(&str, String)]) -> Result<(), RemoteError> {
        self.post::<serde_json::Value>(path, query).map(|_| ())
    }

    fn get_users_paged(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<RemoteUser>, RemoteError> {
        let mut users = Vec::new();
        let mut cursor = FIRST_PAGE;
        loop {
            let mut query = params.to_vec();
            query.push(("cursor", cursor.to_string()));
            query.push(("count", self.page_size.to_string()));
            query.push(("skip_status", "true".to_string()));
            let page: UserPage = self.get(path, &query)?;
            users.extend(page.users);
            if page.next_cursor == 0 {
                break;
            }
            cursor = page.next_cursor;
        }
        Ok(users)
    }
}

impl AccountApi for HttpAccountApi {
    fn get_follows(&self) -> Result<Vec<RemoteUser>, RemoteError> {
        self.get_users_paged("friends/list.json", &[])
    }

    fn get_lists(&self) -> Result<Vec<RemoteList>, RemoteError> {
        let mut lists = Vec::new();
        let mut cursor = FIRST_PAGE;
        loop {
            let query = [
                ("cursor", cursor.to_string()),
                ("count", self.page_size.to_string()),
            ];
            let page: ListPage = self.get("lists/ownerships.json", &query)?;
            lists.extend(page.lists);
            if page.next_cursor == 0 {
                break;
            }
            cursor = page.next_cursor;
        }
        Ok(lists)
    }

    fn get_list_members(&self, list_id: u64) -> Result<Vec<RemoteUser>, RemoteError> {
        self.get_users_paged("lists/members.json", &[("list_id", list_id.to_string())])
    }

    fn create_friendship(&self, username: &str) -> Result<(), RemoteError> {
        self.post_unit(
            "friendships/create.json",
            &[("screen_name", username.to_string())],
        )
    }

    fn destroy_friendship(&self, username: &str) -> Result<(), RemoteError> {
        self.post_unit(
            "friendships/destroy.json",
            &[("screen_name", username.to_string())],
        )
    }

    fn create_list(&self, name: &str, mode: ListMode) -> Result<RemoteList, RemoteError> {
        self.post(
            "lists/create.json",
            &[
                ("name", name.to_string()),
                ("mode", mode.as_str().to_string()),
            ],
        )
    }

    fn destroy_list(&self, list_id: u64) -> Result<(), RemoteError> {
        self.post_unit("lists/destroy.json", &[("list_id", list_id.to_string())])
    }

    fn add_list_member(&self, list_id: u64, username: &str) -> Result<(), RemoteError> {
        self.post_unit(
            "lists/members/create.json",
            &[
                ("list_id", list_id.to_string()),
                ("screen_name", username.to_string()),
            ],
        )
    }

    fn remove_list_member(&self, list_id: u64, username: &str) -> Result<(), RemoteError> {
        self.post_unit(
            "lists/members/destroy.json",
            &[
                ("list_id", list_id.to_string()),
                ("screen_name", username.to_string()),
            ],
        )
    }
}
