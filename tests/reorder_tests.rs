//! Reorder flow tests against the in-memory store
//!
//! These exercise the full optimistic-move/persist/reconcile pipeline the
//! `move` commands run, using the in-memory store so every failure mode
//! can be injected deterministically.

use serde_json::{json, Value};

use sct::core::ordering::{fetch_sorted, move_and_persist, Direction, MoveOutcome};
use sct::entities::Post;
use sct::store::{ContentStore, MemoryStore, StoreError};

fn post_row(id: &str, title: &str, order: Value) -> Value {
    json!({
        "id": id,
        "title": title,
        "slug": title.to_lowercase(),
        "order": order,
    })
}

fn titles(posts: &[Post]) -> Vec<&str> {
    posts.iter().map(|p| p.title.as_str()).collect()
}

#[tokio::test]
async fn test_move_up_persists_exactly_the_changed_rows() {
    let store = MemoryStore::new();
    store.insert_row("posts", post_row("a", "A", json!(0)));
    store.insert_row("posts", post_row("b", "B", json!(1)));
    store.insert_row("posts", post_row("c", "C", json!(2)));

    let posts = fetch_sorted::<Post, _>(&store).await.unwrap();
    let outcome = move_and_persist(&store, posts, 1, Direction::Up)
        .await
        .unwrap();

    let MoveOutcome::Persisted { items, updated } = outcome else {
        panic!("expected Persisted");
    };
    assert_eq!(titles(&items), vec!["B", "A", "C"]);
    assert_eq!(updated, 2);

    // exactly two rows were written: A -> 1 and B -> 0; C was untouched
    let mut written: Vec<(String, Value)> = store
        .recorded_updates()
        .into_iter()
        .map(|(_, id, _, value)| (id, value))
        .collect();
    written.sort_by(|left, right| left.0.cmp(&right.0));
    assert_eq!(
        written,
        vec![("a".to_string(), json!(1)), ("b".to_string(), json!(0))]
    );
    assert_eq!(store.rows("posts")[2]["order"], json!(2));
}

#[tokio::test]
async fn test_boundary_moves_touch_nothing() {
    let store = MemoryStore::new();
    store.insert_row("posts", post_row("a", "A", json!(0)));
    store.insert_row("posts", post_row("b", "B", json!(1)));

    let posts = fetch_sorted::<Post, _>(&store).await.unwrap();
    let outcome = move_and_persist(&store, posts, 0, Direction::Up)
        .await
        .unwrap();
    assert!(matches!(outcome, MoveOutcome::NoOp { .. }));

    let posts = fetch_sorted::<Post, _>(&store).await.unwrap();
    let outcome = move_and_persist(&store, posts, 1, Direction::Down)
        .await
        .unwrap();
    assert!(matches!(outcome, MoveOutcome::NoOp { .. }));

    assert!(store.recorded_updates().is_empty());
}

#[tokio::test]
async fn test_failed_write_reverts_to_authoritative_order() {
    let store = MemoryStore::new();
    // dirty inherited orders: every row changes on renumbering
    store.insert_row("posts", post_row("a", "A", json!(0)));
    store.insert_row("posts", post_row("b", "B", json!(5)));
    store.insert_row("posts", post_row("c", "C", json!(9)));
    store.fail_update("posts", "c");

    let posts = fetch_sorted::<Post, _>(&store).await.unwrap();
    let outcome = move_and_persist(&store, posts, 1, Direction::Up)
        .await
        .unwrap();

    let MoveOutcome::Reverted { items, error } = outcome else {
        panic!("expected Reverted");
    };

    assert!(matches!(
        error,
        StoreError::Persist {
            failed: 1,
            total: 3,
            ..
        }
    ));
    assert!(error.to_string().contains("1 of 3"));

    // the local view matches a fresh authoritative fetch, including
    // whatever subset of the batch did land remotely
    let authoritative = fetch_sorted::<Post, _>(&store).await.unwrap();
    assert_eq!(titles(&items), titles(&authoritative));
}

#[tokio::test]
async fn test_rows_without_ids_are_skipped_not_fatal() {
    let store = MemoryStore::new();
    store.insert_row(
        "posts",
        json!({ "title": "X", "slug": "x", "order": 0 }),
    );
    store.insert_row("posts", post_row("a", "A", json!(1)));
    store.insert_row("posts", post_row("b", "B", json!(2)));

    let posts = fetch_sorted::<Post, _>(&store).await.unwrap();
    // moving A up swaps it with the id-less row; only A can be written
    let outcome = move_and_persist(&store, posts, 1, Direction::Up)
        .await
        .unwrap();

    let MoveOutcome::Persisted { items, updated } = outcome else {
        panic!("expected Persisted");
    };
    assert_eq!(titles(&items), vec!["A", "X", "B"]);
    assert_eq!(updated, 1);

    let written = store.recorded_updates();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].1, "a");
}

#[tokio::test]
async fn test_null_orders_sort_last_and_ties_are_stable() {
    let store = MemoryStore::new();
    store.insert_row("posts", post_row("a", "A", Value::Null));
    store.insert_row("posts", post_row("b", "B", json!(5)));
    store.insert_row("posts", post_row("c", "C", json!(5)));

    let posts = fetch_sorted::<Post, _>(&store).await.unwrap();
    assert_eq!(titles(&posts), vec!["B", "C", "A"]);
}

#[tokio::test]
async fn test_fetch_failure_propagates() {
    let store = MemoryStore::new();
    store.fail_list("posts");

    assert!(fetch_sorted::<Post, _>(&store).await.is_err());
}

#[tokio::test]
async fn test_revert_refetch_failure_surfaces_fetch_error() {
    let store = MemoryStore::new();
    store.insert_row("posts", post_row("a", "A", json!(0)));
    store.insert_row("posts", post_row("b", "B", json!(1)));
    store.fail_update("posts", "a");

    let posts = fetch_sorted::<Post, _>(&store).await.unwrap();
    store.fail_list("posts");

    let result = move_and_persist(&store, posts, 1, Direction::Up).await;
    assert!(matches!(result, Err(StoreError::Fetch { .. })));
}

#[tokio::test]
async fn test_reorder_heals_duplicate_orders_from_partial_failures() {
    let store = MemoryStore::new();
    // the duplicate-order state a previously failed batch can leave behind
    store.insert_row("posts", post_row("a", "A", json!(1)));
    store.insert_row("posts", post_row("b", "B", json!(1)));
    store.insert_row("posts", post_row("c", "C", json!(2)));

    let posts = fetch_sorted::<Post, _>(&store).await.unwrap();
    let outcome = move_and_persist(&store, posts, 2, Direction::Up)
        .await
        .unwrap();
    assert!(matches!(outcome, MoveOutcome::Persisted { .. }));

    let orders: Vec<Value> = store
        .rows("posts")
        .iter()
        .map(|row| row["order"].clone())
        .collect();
    let mut sorted: Vec<i64> = orders.iter().map(|v| v.as_i64().unwrap()).collect();
    sorted.sort_unstable();
    assert_eq!(sorted, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_trait_object_store_works() {
    // the reorder routines only need the two-method store surface
    let store = MemoryStore::new();
    store.insert_row("posts", post_row("a", "A", json!(0)));
    let dyn_store: &dyn ContentStore = &store;

    let posts = fetch_sorted::<Post, _>(dyn_store).await.unwrap();
    assert_eq!(posts.len(), 1);
}
