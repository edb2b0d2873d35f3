//! Meta-list materialization and reconciliation

use super::test_utils::list;
use graphsync::gate::{AcceptAllSource, BatchDecision, ScriptedSource};
use graphsync::model::{Account, MetaList};
use graphsync::reconcile::{AccountReconciler, ChangeKind, Tier};
use graphsync::remote::fetch_account;
use graphsync::remote::memory::InMemoryAccountApi;
use graphsync::remote::ListMode;

fn politics() -> MetaList {
    MetaList::new(
        "META: Politics",
        true,
        vec!["Canada".to_string(), "US".to_string()],
    )
    .unwrap()
}

#[test]
fn test_meta_list_materializes_union_of_referenced_lists() {
    let api = InMemoryAccountApi::new();
    api.seed_list("Canada", ListMode::Private, &["x", "y"]);
    api.seed_list("US", ListMode::Private, &["y", "z"]);
    let desired = Account {
        lists: vec![list("Canada", &["x", "y"]), list("US", &["y", "z"])],
        meta_lists: vec![politics()],
        ..Account::default()
    };

    let actual = fetch_account(&api).unwrap();
    let mut source = AcceptAllSource;
    let report = AccountReconciler::new(&api, &mut source)
        .merge_accounts(&actual, &desired)
        .unwrap();

    assert_eq!(
        api.list_members("META: Politics"),
        Some(vec!["x".to_string(), "y".to_string(), "z".to_string()])
    );
    assert_eq!(api.list_mode("META: Politics"), Some(ListMode::Private));
    assert_eq!(report.meta_lists.len(), 1);
    assert_eq!(report.stats(Tier::MetaLists, ChangeKind::AddMember).applied, 3);
}

#[test]
fn test_meta_list_follows_canonical_lists_not_desired_ones() {
    // The "US" list creation is declined, so its members never reach the meta-list.
    let api = InMemoryAccountApi::new();
    api.seed_list("Canada", ListMode::Private, &["x", "y"]);
    let desired = Account {
        lists: vec![list("Canada", &["x", "y"]), list("US", &["y", "z"])],
        meta_lists: vec![politics()],
        ..Account::default()
    };

    let actual = fetch_account(&api).unwrap();
    let mut source = ScriptedSource::new().with_batches([
        BatchDecision::DoNothing,
        BatchDecision::AcceptAll,
        BatchDecision::AcceptAll,
    ]);
    AccountReconciler::new(&api, &mut source)
        .merge_accounts(&actual, &desired)
        .unwrap();

    assert_eq!(
        source.batch_prompts,
        vec![
            "Merging lists will result in 1 lists created".to_string(),
            "Merging meta-lists will result in 1 lists created".to_string(),
            "Merging list \"META: Politics\" will result in 2 members added".to_string(),
        ]
    );
    assert_eq!(api.list_names(), vec!["Canada".to_string(), "META: Politics".to_string()]);
    assert_eq!(
        api.list_members("META: Politics"),
        Some(vec!["x".to_string(), "y".to_string()])
    );
}

#[test]
fn test_existing_meta_list_is_merged_toward_union() {
    let api = InMemoryAccountApi::new();
    api.seed_list("Canada", ListMode::Private, &["x", "y"]);
    api.seed_list("US", ListMode::Private, &["y", "z"]);
    api.seed_list("META: Politics", ListMode::Private, &["x", "stale"]);
    let desired = Account {
        lists: vec![list("Canada", &["x", "y"]), list("US", &["y", "z"])],
        meta_lists: vec![politics()],
        ..Account::default()
    };

    let actual = fetch_account(&api).unwrap();
    assert_eq!(actual.meta_lists.len(), 1);
    let mut source = AcceptAllSource;
    let report = AccountReconciler::new(&api, &mut source)
        .merge_accounts(&actual, &desired)
        .unwrap();

    assert_eq!(
        api.list_members("META: Politics"),
        Some(vec!["x".to_string(), "y".to_string(), "z".to_string()])
    );
    assert_eq!(report.stats(Tier::MetaLists, ChangeKind::RemoveMember).applied, 1);
    assert_eq!(report.stats(Tier::MetaLists, ChangeKind::AddMember).applied, 2);
}

#[test]
fn test_meta_list_absent_from_document_is_deleted() {
    let api = InMemoryAccountApi::new();
    api.seed_list("META: Old", ListMode::Private, &["x"]);

    let actual = fetch_account(&api).unwrap();
    let mut source = AcceptAllSource;
    AccountReconciler::new(&api, &mut source)
        .merge_accounts(&actual, &Account::default())
        .unwrap();

    assert!(api.list_names().is_empty());
}
