use super::{AccountReconciler, ChangeKind, ItemFailure, Tier};
use crate::diff::diff_by;
use crate::error::ApiError;
use crate::gate::PendingBatch;
use crate::model::{List, User};
use crate::remote::ListMode;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

impl<'a> AccountReconciler<'a> {
    /// Create missing lists, delete surplus lists, then merge members of every
    /// canonical list that has a desired counterpart.
    ///
    /// Returns the canonical lists keyed by name. Lists whose creation was
    /// declined are absent; lists whose deletion was declined keep their actual
    /// members.
    pub(super) fn reconcile_lists(
        &mut self,
        tier: Tier,
        actual: Vec<List>,
        desired: &[List],
    ) -> Result<BTreeMap<String, List>, ApiError> {
        let diff = diff_by(desired, &actual, |l| l.name.as_str());
        let desired_by_name: HashMap<&str, &List> =
            desired.iter().map(|l| (l.name.as_str(), l)).collect();
        let mut canonical: BTreeMap<String, List> =
            actual.into_iter().map(|l| (l.name.clone(), l)).collect();
        let label = tier.as_str();
        let api = self.api;

        let created = self.gate.apply(
            PendingBatch {
                summary: format!(
                    "Merging {} will result in {} lists created",
                    label,
                    diff.additions.len()
                ),
                items: &diff.additions,
            },
            |name| format!("    Create list: {}", name),
            |name| {
                let is_private = desired_by_name.get(name).map_or(true, |l| l.is_private);
                let remote = api.create_list(name, ListMode::from_private(is_private))?;
                let list = List::from_remote(&remote, &[]);
                canonical.insert(list.name.clone(), list);
                Ok(())
            },
        )?;
        self.record(tier, ChangeKind::CreateList, created, 0);

        let deleted = self.gate.apply(
            PendingBatch {
                summary: format!(
                    "Merging {} will result in {} lists deleted",
                    label,
                    diff.removals.len()
                ),
                items: &diff.removals,
            },
            |name| format!("    Delete list: {}", name),
            |name| {
                let list_id = canonical
                    .get(name)
                    .and_then(|l| l.id)
                    .ok_or_else(|| ApiError::MissingRemoteId(name.to_string()))?;
                api.destroy_list(list_id)?;
                canonical.remove(name);
                Ok(())
            },
        )?;
        self.record(tier, ChangeKind::DeleteList, deleted, 0);

        // Privacy drift on existing lists is left as is.
        for (name, list) in canonical.iter_mut() {
            match desired_by_name.get(name.as_str()) {
                Some(wanted) => {
                    let members = self.reconcile_members(tier, list, wanted)?;
                    list.members = members;
                }
                None => debug!(list = %name, "No desired entry, members left untouched"),
            }
        }

        Ok(canonical)
    }

    /// Add members only in `desired`, remove members only in `list`.
    ///
    /// Returns the canonical membership: actual members minus removed ones, plus
    /// members whose add call succeeded.
    fn reconcile_members(
        &mut self,
        tier: Tier,
        list: &List,
        desired: &List,
    ) -> Result<Vec<User>, ApiError> {
        let diff = diff_by(&desired.members, &list.members, |u| u.username.as_str());
        let mut canonical: BTreeMap<String, User> = list
            .members
            .iter()
            .map(|u| (u.username.clone(), u.clone()))
            .collect();
        let list_id = || {
            list.id
                .ok_or_else(|| ApiError::MissingRemoteId(list.name.clone()))
        };
        let api = self.api;

        let mut failures = Vec::new();
        let added = self.gate.apply(
            PendingBatch {
                summary: format!(
                    "Merging list \"{}\" will result in {} members added",
                    list.name,
                    diff.additions.len()
                ),
                items: &diff.additions,
            },
            |username| format!("    Add @{} to list \"{}\"", username, list.name),
            |username| {
                match api.add_list_member(list_id()?, username) {
                    Ok(()) => {
                        canonical.insert(username.to_string(), User::new(username));
                    }
                    Err(e) => {
                        warn!(username, list = %list.name, error = %e, "Error adding list member");
                        failures.push(ItemFailure {
                            tier,
                            kind: ChangeKind::AddMember,
                            username: username.to_string(),
                            list: Some(list.name.clone()),
                            message: e.to_string(),
                        });
                    }
                }
                Ok(())
            },
        )?;
        self.record(tier, ChangeKind::AddMember, added, failures.len());
        self.report.failures.append(&mut failures);

        let removed = self.gate.apply(
            PendingBatch {
                summary: format!(
                    "Merging list \"{}\" will result in {} members removed",
                    list.name,
                    diff.removals.len()
                ),
                items: &diff.removals,
            },
            |username| format!("    Remove @{} from list \"{}\"", username, list.name),
            |username| {
                api.remove_list_member(list_id()?, username)?;
                canonical.remove(username);
                Ok(())
            },
        )?;
        self.record(tier, ChangeKind::RemoveMember, removed, 0);

        Ok(canonical.into_values().collect())
    }
}
