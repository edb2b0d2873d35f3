//! Terminal decision source: batch summaries and item lines on stdout, answers
//! through `dialoguer` prompts.

use crate::error::ApiError;
use crate::gate::{BatchDecision, DecisionSource, PendingBatch};
use dialoguer::{Confirm, Select};

const BATCH_CHOICES: [&str; 3] = ["Accept all (a)", "Do nothing (n)", "Confirm each (c)"];

/// How batches are decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionPolicy {
    /// Prompt for every batch.
    Interactive,
    /// Apply every batch (`--yes`).
    AcceptAll,
    /// Apply nothing (`--dry-run`).
    DryRun,
}

impl DecisionPolicy {
    pub fn from_flags(yes: bool, dry_run: bool) -> Self {
        if dry_run {
            DecisionPolicy::DryRun
        } else if yes {
            DecisionPolicy::AcceptAll
        } else {
            DecisionPolicy::Interactive
        }
    }
}

pub struct TerminalDecisionSource {
    policy: DecisionPolicy,
}

impl TerminalDecisionSource {
    pub fn new(policy: DecisionPolicy) -> Self {
        Self { policy }
    }
}

fn decision_for_choice(choice: usize) -> BatchDecision {
    match choice {
        0 => BatchDecision::AcceptAll,
        2 => BatchDecision::ConfirmEach,
        _ => BatchDecision::DoNothing,
    }
}

impl DecisionSource for TerminalDecisionSource {
    fn decide_batch(&mut self, batch: &PendingBatch<'_>) -> Result<BatchDecision, ApiError> {
        println!("{}", batch.summary);
        match self.policy {
            DecisionPolicy::AcceptAll => Ok(BatchDecision::AcceptAll),
            DecisionPolicy::DryRun => Ok(BatchDecision::DoNothing),
            DecisionPolicy::Interactive => {
                let choice = Select::new()
                    .with_prompt("Proceed?")
                    .items(&BATCH_CHOICES)
                    .default(1)
                    .interact()
                    .map_err(|e| ApiError::Prompt(e.to_string()))?;
                Ok(decision_for_choice(choice))
            }
        }
    }

    fn confirm_item(&mut self, description: &str) -> Result<bool, ApiError> {
        match self.policy {
            DecisionPolicy::AcceptAll => Ok(true),
            DecisionPolicy::DryRun => Ok(false),
            DecisionPolicy::Interactive => Confirm::new()
                .with_prompt(description.trim_start())
                .default(false)
                .interact()
                .map_err(|e| ApiError::Prompt(e.to_string())),
        }
    }

    fn announce_item(&mut self, description: &str) {
        println!("{}", description);
    }

    fn announce_skipped(&mut self, description: &str) {
        if self.policy == DecisionPolicy::DryRun {
            println!("{}", description);
        }
    }
}
