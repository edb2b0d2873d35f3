//! Confirmation Gate
//!
//! Every mutating action passes through [`ConfirmationGate::apply`]. The gate asks
//! an injected [`DecisionSource`] what to do with a pending batch: apply all of it,
//! none of it, or confirm each item individually. An empty batch never reaches the
//! decision source.

use crate::error::ApiError;
use std::collections::{BTreeSet, VecDeque};
use tracing::debug;

/// Answer to a batch-level prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchDecision {
    AcceptAll,
    DoNothing,
    ConfirmEach,
}

impl BatchDecision {
    /// Parse a line-oriented answer (`a`, `n`, `c`). Anything else is `DoNothing`.
    pub fn from_answer(answer: &str) -> Self {
        match answer.trim() {
            "a" => BatchDecision::AcceptAll,
            "c" => BatchDecision::ConfirmEach,
            _ => BatchDecision::DoNothing,
        }
    }
}

/// A batch of pending changes of one kind.
#[derive(Debug, Clone)]
pub struct PendingBatch<'a> {
    pub summary: String,
    pub items: &'a BTreeSet<String>,
}

/// Source of confirmation decisions (a terminal, a fixed policy, a test script).
pub trait DecisionSource {
    /// Decide what to do with a non-empty batch.
    fn decide_batch(&mut self, batch: &PendingBatch<'_>) -> Result<BatchDecision, ApiError>;

    /// Confirm one item when the batch decision was `ConfirmEach`.
    fn confirm_item(&mut self, description: &str) -> Result<bool, ApiError>;

    /// Announce an item that is about to be applied.
    fn announce_item(&mut self, _description: &str) {}

    /// Report an item left unapplied because its whole batch was declined.
    fn announce_skipped(&mut self, _description: &str) {}
}

/// Applies every batch without asking.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAllSource;

impl DecisionSource for AcceptAllSource {
    fn decide_batch(&mut self, _batch: &PendingBatch<'_>) -> Result<BatchDecision, ApiError> {
        Ok(BatchDecision::AcceptAll)
    }

    fn confirm_item(&mut self, _description: &str) -> Result<bool, ApiError> {
        Ok(true)
    }
}

/// Declines every batch. Summaries are still logged by the gate, which makes this
/// a dry run.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeclineAllSource;

impl DecisionSource for DeclineAllSource {
    fn decide_batch(&mut self, _batch: &PendingBatch<'_>) -> Result<BatchDecision, ApiError> {
        Ok(BatchDecision::DoNothing)
    }

    fn confirm_item(&mut self, _description: &str) -> Result<bool, ApiError> {
        Ok(false)
    }
}

/// Replays queued answers and records every prompt it was shown.
///
/// Runs out of batch answers as `DoNothing` and of item answers as `false`.
#[derive(Debug, Default, Clone)]
pub struct ScriptedSource {
    batch_answers: VecDeque<BatchDecision>,
    item_answers: VecDeque<bool>,
    pub batch_prompts: Vec<String>,
    pub item_prompts: Vec<String>,
    pub skipped_items: Vec<String>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_batches(mut self, answers: impl IntoIterator<Item = BatchDecision>) -> Self {
        self.batch_answers.extend(answers);
        self
    }

    pub fn with_items(mut self, answers: impl IntoIterator<Item = bool>) -> Self {
        self.item_answers.extend(answers);
        self
    }

    pub fn prompt_count(&self) -> usize {
        self.batch_prompts.len() + self.item_prompts.len()
    }
}

impl DecisionSource for ScriptedSource {
    fn decide_batch(&mut self, batch: &PendingBatch<'_>) -> Result<BatchDecision, ApiError> {
        self.batch_prompts.push(batch.summary.clone());
        Ok(self
            .batch_answers
            .pop_front()
            .unwrap_or(BatchDecision::DoNothing))
    }

    fn confirm_item(&mut self, description: &str) -> Result<bool, ApiError> {
        self.item_prompts.push(description.to_string());
        Ok(self.item_answers.pop_front().unwrap_or(false))
    }

    fn announce_skipped(&mut self, description: &str) {
        self.skipped_items.push(description.to_string());
    }
}

/// Counts for one gated batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateOutcome {
    pub applied: usize,
    pub declined: usize,
}

impl GateOutcome {
    pub fn merge(&mut self, other: GateOutcome) {
        self.applied += other.applied;
        self.declined += other.declined;
    }
}

/// The single policy point in front of every mutation.
pub struct ConfirmationGate<'a> {
    source: &'a mut dyn DecisionSource,
}

impl<'a> ConfirmationGate<'a> {
    pub fn new(source: &'a mut dyn DecisionSource) -> Self {
        Self { source }
    }

    /// Gate a batch, running `execute` for every approved item.
    ///
    /// `describe` renders the per-item line shown before execution and used for
    /// per-item confirmation. An error from `execute` stops the batch and is
    /// returned; per-item recovery belongs to the executor.
    pub fn apply<D, E>(
        &mut self,
        batch: PendingBatch<'_>,
        describe: D,
        mut execute: E,
    ) -> Result<GateOutcome, ApiError>
    where
        D: Fn(&str) -> String,
        E: FnMut(&str) -> Result<(), ApiError>,
    {
        let mut outcome = GateOutcome::default();
        if batch.items.is_empty() {
            return Ok(outcome);
        }

        debug!(summary = %batch.summary, "Batch pending");
        let decision = self.source.decide_batch(&batch)?;
        if decision == BatchDecision::DoNothing {
            for item in batch.items {
                self.source.announce_skipped(&describe(item.as_str()));
            }
            outcome.declined = batch.items.len();
            debug!(declined = outcome.declined, "Batch declined");
            return Ok(outcome);
        }

        for item in batch.items {
            let description = describe(item.as_str());
            let approved = match decision {
                BatchDecision::AcceptAll => {
                    self.source.announce_item(&description);
                    true
                }
                _ => self.source.confirm_item(&description)?,
            };
            if approved {
                debug!(item = %description, "Applying");
                execute(item.as_str())?;
                outcome.applied += 1;
            } else {
                outcome.declined += 1;
            }
        }

        Ok(outcome)
    }
}
