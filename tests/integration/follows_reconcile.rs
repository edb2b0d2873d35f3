//! Follow reconciliation against the in-memory account service

use super::test_utils::users;
use graphsync::gate::{AcceptAllSource, BatchDecision, ScriptedSource};
use graphsync::model::Account;
use graphsync::reconcile::{AccountReconciler, ChangeKind, Tier};
use graphsync::remote::fetch_account;
use graphsync::remote::memory::{ApiCall, InMemoryAccountApi};

fn usernames(account_follows: &[graphsync::model::User]) -> Vec<String> {
    let mut names: Vec<String> = account_follows.iter().map(|u| u.username.clone()).collect();
    names.sort();
    names
}

#[test]
fn test_follow_additions_and_removals() {
    let api = InMemoryAccountApi::new();
    api.seed_follow("bob");
    api.seed_follow("carol");
    let desired = Account {
        follows: users(&["alice", "bob"]),
        ..Account::default()
    };

    let actual = fetch_account(&api).unwrap();
    let mut source = AcceptAllSource;
    let report = AccountReconciler::new(&api, &mut source)
        .merge_accounts(&actual, &desired)
        .unwrap();

    assert_eq!(
        api.calls(),
        vec![
            ApiCall::CreateFriendship("alice".to_string()),
            ApiCall::DestroyFriendship("carol".to_string()),
        ]
    );
    assert_eq!(api.follows(), vec!["alice".to_string(), "bob".to_string()]);
    assert_eq!(usernames(&report.follows), vec!["alice", "bob"]);
}

#[test]
fn test_failed_follow_is_excluded_and_batch_continues() {
    let api = InMemoryAccountApi::new();
    api.reject("bravo");
    let desired = Account {
        follows: users(&["alpha", "bravo", "charlie"]),
        ..Account::default()
    };

    let actual = fetch_account(&api).unwrap();
    let mut source = AcceptAllSource;
    let report = AccountReconciler::new(&api, &mut source)
        .merge_accounts(&actual, &desired)
        .unwrap();

    assert_eq!(api.follows(), vec!["alpha".to_string(), "charlie".to_string()]);
    assert_eq!(usernames(&report.follows), vec!["alpha", "charlie"]);

    let stats = report.stats(Tier::Follows, ChangeKind::Follow);
    assert_eq!(stats.applied, 2);
    assert_eq!(stats.failed, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].username, "bravo");
}

#[test]
fn test_confirm_each_applies_only_approved_items() {
    let api = InMemoryAccountApi::new();
    let desired = Account {
        follows: users(&["alpha", "bravo"]),
        ..Account::default()
    };

    let actual = fetch_account(&api).unwrap();
    let mut source = ScriptedSource::new()
        .with_batches([BatchDecision::ConfirmEach])
        .with_items([false, true]);
    let report = AccountReconciler::new(&api, &mut source)
        .merge_accounts(&actual, &desired)
        .unwrap();

    assert_eq!(api.follows(), vec!["bravo".to_string()]);
    assert_eq!(
        source.item_prompts,
        vec!["    Follow: @alpha".to_string(), "    Follow: @bravo".to_string()]
    );
    let stats = report.stats(Tier::Follows, ChangeKind::Follow);
    assert_eq!(stats.applied, 1);
    assert_eq!(stats.declined, 1);
}

#[test]
fn test_declined_unfollow_keeps_user() {
    let api = InMemoryAccountApi::new();
    api.seed_follow("carol");

    let actual = fetch_account(&api).unwrap();
    let mut source = ScriptedSource::new().with_batches([BatchDecision::DoNothing]);
    let report = AccountReconciler::new(&api, &mut source)
        .merge_accounts(&actual, &Account::default())
        .unwrap();

    assert!(api.calls().is_empty());
    assert_eq!(api.follows(), vec!["carol".to_string()]);
    assert_eq!(usernames(&report.follows), vec!["carol"]);
    assert_eq!(
        source.batch_prompts,
        vec!["Merging follows will result in 1 follows removed".to_string()]
    );
    assert_eq!(source.skipped_items, vec!["    Unfollow: @carol".to_string()]);
}

#[test]
fn test_unfollow_failure_aborts_run() {
    let api = InMemoryAccountApi::new();
    api.seed_follow("carol");
    api.reject("carol");

    let actual = fetch_account(&api).unwrap();
    let mut source = AcceptAllSource;
    let result = AccountReconciler::new(&api, &mut source).merge_accounts(&actual, &Account::default());

    assert!(result.is_err());
}
