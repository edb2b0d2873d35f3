//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::cli::parse::Commands;
use crate::cli::presentation::{format_account_summary, format_reconcile_report};
use crate::cli::prompt::{DecisionPolicy, TerminalDecisionSource};
use crate::config::{ConfigLoader, GraphsyncConfig};
use crate::document::{adopt_meta_list_definitions, read_account, write_account};
use crate::error::ApiError;
use crate::gate::DecisionSource;
use crate::reconcile::AccountReconciler;
use crate::remote::http::HttpAccountApi;
use crate::remote::{fetch_account, AccountApi};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

/// Runtime context for CLI execution: loaded configuration and decision policy.
pub struct RunContext {
    config: GraphsyncConfig,
    policy: DecisionPolicy,
}

impl RunContext {
    /// Create run context from an optional config path. Uses ConfigLoader only.
    pub fn new(config_path: Option<PathBuf>, policy: DecisionPolicy) -> Result<Self, ApiError> {
        let config = ConfigLoader::load(config_path.as_deref())?;
        Ok(Self::with_config(config, policy))
    }

    pub fn with_config(config: GraphsyncConfig, policy: DecisionPolicy) -> Self {
        Self { config, policy }
    }

    pub fn config(&self) -> &GraphsyncConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Validate { file } => self.validate(file),
            _ => {
                let api = HttpAccountApi::from_config(&self.config.remote)?;
                self.execute_with_api(command, &api)
            }
        }
    }

    /// Execute a command against a given API, prompting through the terminal.
    pub fn execute_with_api(
        &self,
        command: &Commands,
        api: &dyn AccountApi,
    ) -> Result<String, ApiError> {
        let mut decisions = TerminalDecisionSource::new(self.policy);
        self.execute_with(command, api, &mut decisions)
    }

    /// Execute a command against a given API and decision source.
    pub fn execute_with(
        &self,
        command: &Commands,
        api: &dyn AccountApi,
        decisions: &mut dyn DecisionSource,
    ) -> Result<String, ApiError> {
        let started = Instant::now();
        let result = match command {
            Commands::Download { file } => self.download(file, api),
            Commands::Upload { file } => self.upload(file, api, decisions),
            Commands::Validate { file } => self.validate(file),
        };
        info!(
            command = command.name(),
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn download(&self, file: &Path, api: &dyn AccountApi) -> Result<String, ApiError> {
        let snapshot = fetch_account(api)?;
        let previous = if file.exists() {
            Some(read_account(file)?)
        } else {
            None
        };
        let remote_meta_lists = snapshot.meta_lists.len();
        let account = adopt_meta_list_definitions(snapshot, previous.as_ref());
        let skipped = remote_meta_lists.saturating_sub(account.meta_lists.len());
        if skipped > 0 {
            warn!(skipped, "Remote meta-lists without a definition were not written");
        }
        write_account(file, &account)?;

        let mut out = format_account_summary("Downloaded", &account);
        out.push_str(&format!("\nWrote {}\n", file.display()));
        Ok(out)
    }

    fn upload(
        &self,
        file: &Path,
        api: &dyn AccountApi,
        decisions: &mut dyn DecisionSource,
    ) -> Result<String, ApiError> {
        let desired = read_account(file)?;
        let actual = fetch_account(api)?;
        let report = AccountReconciler::new(api, decisions).merge_accounts(&actual, &desired)?;
        Ok(format_reconcile_report(&report))
    }

    fn validate(&self, file: &Path) -> Result<String, ApiError> {
        let account = read_account(file)?;
        let mut out = format_account_summary("Document", &account);
        out.push_str(&format!("\n{} is valid.\n", file.display()));
        Ok(out)
    }
}
