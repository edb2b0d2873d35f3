//! Account Reconciler
//!
//! Drives remote state toward a desired account snapshot in a fixed sequence:
//! follows, then lists (create, delete, merge members), then meta-lists. Meta-lists
//! are materialized against the canonical lists produced by the list pass and then
//! reconciled by the same list algorithm.
//!
//! Every mutation goes through the [`ConfirmationGate`]. Failures to follow a user
//! or to add a list member are recorded and the batch continues; every other
//! remote failure ends the run.

use crate::error::ApiError;
use crate::gate::{ConfirmationGate, DecisionSource, GateOutcome};
use crate::model::{Account, List, User};
use crate::remote::AccountApi;
use std::collections::BTreeMap;
use tracing::info;

mod follows;
mod lists;

/// Reconciliation tier a change belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Follows,
    Lists,
    MetaLists,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Follows => "follows",
            Tier::Lists => "lists",
            Tier::MetaLists => "meta-lists",
        }
    }
}

/// Kind of remote mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChangeKind {
    Follow,
    Unfollow,
    CreateList,
    DeleteList,
    AddMember,
    RemoveMember,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Follow => "follow",
            ChangeKind::Unfollow => "unfollow",
            ChangeKind::CreateList => "create list",
            ChangeKind::DeleteList => "delete list",
            ChangeKind::AddMember => "add member",
            ChangeKind::RemoveMember => "remove member",
        }
    }
}

/// Counts for one (tier, kind) pair. `failed` items were approved but the
/// remote rejected them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeStats {
    pub applied: usize,
    pub declined: usize,
    pub failed: usize,
}

/// A per-item failure that did not stop its batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    pub tier: Tier,
    pub kind: ChangeKind,
    pub username: String,
    pub list: Option<String>,
    pub message: String,
}

/// What one reconciliation run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Follows after the run.
    pub follows: Vec<User>,
    /// Canonical lists after the run, sorted by name.
    pub lists: Vec<List>,
    /// Canonical meta-lists after the run, sorted by name.
    pub meta_lists: Vec<List>,
    pub changes: BTreeMap<(Tier, ChangeKind), ChangeStats>,
    pub failures: Vec<ItemFailure>,
}

impl ReconcileReport {
    /// True when no batch was pending at any tier.
    pub fn is_noop(&self) -> bool {
        self.changes
            .values()
            .all(|s| s.applied == 0 && s.declined == 0 && s.failed == 0)
    }

    pub fn total_applied(&self) -> usize {
        self.changes.values().map(|s| s.applied).sum()
    }

    pub fn stats(&self, tier: Tier, kind: ChangeKind) -> ChangeStats {
        self.changes.get(&(tier, kind)).copied().unwrap_or_default()
    }
}

/// Reconciles an actual account snapshot against a desired one.
pub struct AccountReconciler<'a> {
    api: &'a dyn AccountApi,
    gate: ConfirmationGate<'a>,
    report: ReconcileReport,
}

impl<'a> AccountReconciler<'a> {
    pub fn new(api: &'a dyn AccountApi, decisions: &'a mut dyn DecisionSource) -> Self {
        Self {
            api,
            gate: ConfirmationGate::new(decisions),
            report: ReconcileReport::default(),
        }
    }

    /// Make the remote account match `desired`.
    ///
    /// When this returns `Ok`, every approved change has been applied remotely.
    /// List privacy is never changed on existing lists.
    pub fn merge_accounts(
        &mut self,
        actual: &Account,
        desired: &Account,
    ) -> Result<ReconcileReport, ApiError> {
        self.report = ReconcileReport::default();

        let follows = self.reconcile_follows(&actual.follows, &desired.follows)?;

        let canonical_lists =
            self.reconcile_lists(Tier::Lists, actual.lists.clone(), &desired.lists)?;

        let actual_meta: Vec<List> = actual
            .meta_lists
            .iter()
            .map(|meta| meta.materialize(canonical_lists.values()))
            .collect();
        let desired_meta: Vec<List> = desired
            .meta_lists
            .iter()
            .map(|meta| meta.materialize(canonical_lists.values()))
            .collect();
        let canonical_meta = self.reconcile_lists(Tier::MetaLists, actual_meta, &desired_meta)?;

        let mut report = std::mem::take(&mut self.report);
        report.follows = follows;
        report.lists = canonical_lists.into_values().collect();
        report.meta_lists = canonical_meta.into_values().collect();
        info!(
            applied = report.total_applied(),
            failures = report.failures.len(),
            "Reconciliation finished"
        );
        Ok(report)
    }

    fn record(&mut self, tier: Tier, kind: ChangeKind, outcome: GateOutcome, failed: usize) {
        let stats = self.report.changes.entry((tier, kind)).or_default();
        stats.applied += outcome.applied.saturating_sub(failed);
        stats.declined += outcome.declined;
        stats.failed += failed;
    }
}
