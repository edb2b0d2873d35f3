//! Set Differ
//!
//! Computes additions and removals between a desired and an actual collection of
//! named items. Used for follows (by username), lists (by name) and list members
//! (by username).

use std::collections::BTreeSet;

/// Result of diffing a desired set `D` against an actual set `A`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetDiff {
    /// `D − A`
    pub additions: BTreeSet<String>,
    /// `A − D`
    pub removals: BTreeSet<String>,
}

impl SetDiff {
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn change_count(&self) -> usize {
        self.additions.len() + self.removals.len()
    }
}

/// Diff two collections keyed by `key`. Duplicate keys on either side collapse.
pub fn diff_by<T, F>(desired: &[T], actual: &[T], key: F) -> SetDiff
where
    F: Fn(&T) -> &str,
{
    let desired_keys: BTreeSet<&str> = desired.iter().map(&key).collect();
    let actual_keys: BTreeSet<&str> = actual.iter().map(&key).collect();

    SetDiff {
        additions: desired_keys
            .difference(&actual_keys)
            .map(|k| k.to_string())
            .collect(),
        removals: actual_keys
            .difference(&desired_keys)
            .map(|k| k.to_string())
            .collect(),
    }
}
