//! Rendered documents do not depend on input order, and read back equal

use graphsync::document::{parse_account, render_account};
use graphsync::model::{Account, List, MetaList, User};
use proptest::prelude::*;

fn names() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::hash_set("[a-cA-C]{1,3}", 0..8).prop_map(|set| set.into_iter().collect())
}

fn list_names() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::hash_set("[a-cA-C]{1,3}", 1..6)
        .prop_map(|set| set.into_iter().map(|n| format!("L{}", n)).collect())
}

fn account(follows: &[String], lists: &[String]) -> Account {
    Account {
        follows: follows.iter().map(|n| User::new(n.clone())).collect(),
        lists: lists
            .iter()
            .map(|n| List::new(n.clone(), true, follows.iter().map(|f| User::new(f.clone())).collect()))
            .collect(),
        meta_lists: vec![MetaList::new("META all", false, lists.to_vec()).unwrap()],
    }
}

#[test]
fn test_render_is_order_independent() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(names(), list_names()), |(follows, lists)| {
            let mut reversed_follows = follows.clone();
            reversed_follows.reverse();
            let mut reversed_lists = lists.clone();
            reversed_lists.reverse();

            let forward = render_account(&account(&follows, &lists)).unwrap();
            let backward = render_account(&account(&reversed_follows, &reversed_lists)).unwrap();
            prop_assert_eq!(forward, backward);
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_shuffled_account_reads_back_equal() {
    let mut runner = proptest::test_runner::TestRunner::default();

    let shuffled = (names(), list_names()).prop_flat_map(|(follows, lists)| {
        (
            Just(follows.clone()).prop_shuffle(),
            Just(lists.clone()).prop_shuffle(),
        )
    });

    runner
        .run(&shuffled, |(follows, lists)| {
            let original = account(&follows, &lists);
            let text = render_account(&original).unwrap();
            let restored = parse_account(&text, "rendered").unwrap();
            prop_assert_eq!(restored, original);
            Ok(())
        })
        .unwrap();
}
