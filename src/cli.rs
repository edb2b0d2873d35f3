//! CLI domain: parse, route, prompt, output, and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod output;
mod parse;
mod presentation;
mod prompt;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{format_account_summary, format_reconcile_report};
pub use prompt::{DecisionPolicy, TerminalDecisionSource};
pub use route::RunContext;
