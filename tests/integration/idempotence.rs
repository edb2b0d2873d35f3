//! A second reconciliation against the result of the first is a no-op

use super::test_utils::{list, users};
use graphsync::gate::{AcceptAllSource, ScriptedSource};
use graphsync::model::{Account, MetaList};
use graphsync::reconcile::AccountReconciler;
use graphsync::remote::fetch_account;
use graphsync::remote::memory::InMemoryAccountApi;
use graphsync::remote::ListMode;

fn desired() -> Account {
    Account {
        follows: users(&["alice", "bob"]),
        lists: vec![
            list("Canada", &["x", "y"]),
            graphsync::model::List::new("US", false, users(&["y", "z"])),
        ],
        meta_lists: vec![MetaList::new(
            "META: Politics",
            true,
            vec!["Canada".to_string(), "US".to_string()],
        )
        .unwrap()],
    }
}

#[test]
fn test_second_run_issues_no_prompts_and_no_calls() {
    let api = InMemoryAccountApi::new();
    api.seed_follow("carol");
    api.seed_list("Stale", ListMode::Public, &["q"]);
    let desired = desired();

    let actual = fetch_account(&api).unwrap();
    let mut accept = AcceptAllSource;
    let first = AccountReconciler::new(&api, &mut accept)
        .merge_accounts(&actual, &desired)
        .unwrap();
    assert!(!first.is_noop());
    assert_eq!(api.list_mode("US"), Some(ListMode::Public));

    api.clear_calls();
    let actual = fetch_account(&api).unwrap();
    let mut scripted = ScriptedSource::new();
    let second = AccountReconciler::new(&api, &mut scripted)
        .merge_accounts(&actual, &desired)
        .unwrap();

    assert_eq!(scripted.prompt_count(), 0);
    assert!(api.calls().is_empty());
    assert!(second.is_noop());
    assert_eq!(second.total_applied(), 0);
}

#[test]
fn test_empty_desired_against_empty_remote_is_noop() {
    let api = InMemoryAccountApi::new();
    let actual = fetch_account(&api).unwrap();
    let mut scripted = ScriptedSource::new();
    let report = AccountReconciler::new(&api, &mut scripted)
        .merge_accounts(&actual, &Account::default())
        .unwrap();

    assert!(report.is_noop());
    assert_eq!(scripted.prompt_count(), 0);
}
