//! Configuration System
//!
//! Application settings for the remote API connection and logging. Sources are
//! merged in increasing precedence: built-in defaults, the global config file,
//! an explicit config file, and `GRAPHSYNC__*` environment variables
//! (`GRAPHSYNC__REMOTE__PAGE_SIZE=100` sets `remote.page_size`).
//!
//! The account document is not configuration; see [`crate::document`].

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use config::{Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

mod merge {
    pub(super) mod merge_policy;
}
mod sources {
    pub(super) mod global_file;
}

pub const DEFAULT_BASE_URL: &str = "https://api.twitter.com/1.1";
pub const DEFAULT_TOKEN_ENV: &str = "GRAPHSYNC_API_TOKEN";

/// Largest page the cursor-paginated endpoints accept.
pub const MAX_PAGE_SIZE: u32 = 200;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphsyncConfig {
    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote API connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Name of the environment variable holding the bearer token
    #[serde(default = "default_token_env")]
    pub token_env: String,

    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_token_env() -> String {
    DEFAULT_TOKEN_ENV.to_string()
}

fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    120
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token_env: default_token_env(),
            page_size: default_page_size(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl RemoteConfig {
    pub fn validate(&self) -> Result<(), String> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err("base_url cannot be empty".to_string());
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(format!(
                "base_url must start with http:// or https://, got '{}'",
                self.base_url
            ));
        }
        if self.token_env.trim().is_empty() {
            return Err("token_env cannot be empty".to_string());
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(format!(
                "page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            ));
        }
        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err("timeouts must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl GraphsyncConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ApiError> {
        self.remote
            .validate()
            .map_err(|e| ApiError::ConfigError(format!("remote: {}", e)))
    }
}

/// Loads [`GraphsyncConfig`] from layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from defaults, the global file, `explicit` (required when given),
    /// and the environment.
    pub fn load(explicit: Option<&Path>) -> Result<GraphsyncConfig, ApiError> {
        let mut builder = merge::merge_policy::builder_with_defaults()?;
        builder = sources::global_file::add_to_builder(builder);
        if let Some(path) = explicit {
            debug!(config_path = %path.display(), "Using explicit configuration file");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix("GRAPHSYNC")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config: GraphsyncConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from defaults and a single file, ignoring the global file and the
    /// environment.
    pub fn load_from_file(path: &Path) -> Result<GraphsyncConfig, ApiError> {
        let config: GraphsyncConfig = merge::merge_policy::builder_with_defaults()?
            .add_source(File::from(path).format(FileFormat::Toml).required(true))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn global_config_path() -> Option<PathBuf> {
        sources::global_file::global_config_path()
    }
}
