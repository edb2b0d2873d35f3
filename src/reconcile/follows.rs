use super::{AccountReconciler, ChangeKind, ItemFailure, Tier};
use crate::diff::diff_by;
use crate::error::ApiError;
use crate::gate::PendingBatch;
use crate::model::User;
use std::collections::BTreeMap;
use tracing::warn;

impl<'a> AccountReconciler<'a> {
    /// Follow users only in `desired`, unfollow users only in `actual`.
    ///
    /// Returns the follows after the pass. A user whose follow request failed is
    /// not in the result.
    pub(super) fn reconcile_follows(
        &mut self,
        actual: &[User],
        desired: &[User],
    ) -> Result<Vec<User>, ApiError> {
        let diff = diff_by(desired, actual, |u| u.username.as_str());
        let mut canonical: BTreeMap<String, User> = actual
            .iter()
            .map(|u| (u.username.clone(), u.clone()))
            .collect();

        let api = self.api;
        let mut failures = Vec::new();
        let added = self.gate.apply(
            PendingBatch {
                summary: format!(
                    "Merging follows will result in {} follows added",
                    diff.additions.len()
                ),
                items: &diff.additions,
            },
            |username| format!("    Follow: @{}", username),
            |username| {
                match api.create_friendship(username) {
                    Ok(()) => {
                        canonical.insert(username.to_string(), User::new(username));
                    }
                    Err(e) => {
                        warn!(username, error = %e, "Error adding follow");
                        failures.push(ItemFailure {
                            tier: Tier::Follows,
                            kind: ChangeKind::Follow,
                            username: username.to_string(),
                            list: None,
                            message: e.to_string(),
                        });
                    }
                }
                Ok(())
            },
        )?;
        self.record(Tier::Follows, ChangeKind::Follow, added, failures.len());
        self.report.failures.append(&mut failures);

        let removed = self.gate.apply(
            PendingBatch {
                summary: format!(
                    "Merging follows will result in {} follows removed",
                    diff.removals.len()
                ),
                items: &diff.removals,
            },
            |username| format!("    Unfollow: @{}", username),
            |username| {
                api.destroy_friendship(username)?;
                canonical.remove(username);
                Ok(())
            },
        )?;
        self.record(Tier::Follows, ChangeKind::Unfollow, removed, 0);

        Ok(canonical.into_values().collect())
    }
}
