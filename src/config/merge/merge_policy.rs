//! Merge rules: defaults, override order, conflict handling.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("remote.base_url", crate::config::DEFAULT_BASE_URL)?
        .set_default("remote.token_env", crate::config::DEFAULT_TOKEN_ENV)?
        .set_default("remote.page_size", 200)?
        .set_default("logging.level", "info")?
        .set_default("logging.output", "stderr")
}
