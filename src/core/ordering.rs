//! Manual list ordering
//!
//! Ordered entities (posts, services, cards, logos, testimonials) carry an
//! integer `order` column that defines their display position. Operators
//! reorder them one step at a time; every move rewrites the whole
//! sequence to `0..N-1`, so gaps and duplicates inherited from the backend
//! heal on the next move.
//!
//! The flow is optimistic: the in-memory list is updated first, then every
//! changed row is written back in one unordered batch. If any write fails,
//! the local list is thrown away and the authoritative order is re-fetched.

use serde_json::json;

use crate::core::entity::ContentRecord;
use crate::store::{ContentStore, StoreError};

/// Column holding the display position
pub const ORDER_FIELD: &str = "order";

/// Rows without an order value sort after every row that has one
pub const ORDER_SENTINEL: i64 = i64::MAX;

/// An entity that participates in manual ordering
pub trait Orderable {
    /// Backend id, if the row has one
    fn record_id(&self) -> Option<&str>;

    /// Label used in warnings and reorder output
    fn label(&self) -> &str;

    /// Current order value; `None` on legacy rows that never had one
    fn order(&self) -> Option<i64>;

    /// Overwrite the order value
    fn set_order(&mut self, value: i64);
}

/// Direction of a single-step move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            _ => Err(format!("Unknown direction: '{}'. Use 'up' or 'down'", s)),
        }
    }
}

/// One row whose stored order value needs to change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderChange {
    pub id: Option<String>,
    pub label: String,
    pub order: i64,
}

/// Result of a move: the list the caller should display, plus what happened
#[derive(Debug)]
pub enum MoveOutcome<T> {
    /// Boundary move; nothing changed
    NoOp { items: Vec<T> },

    /// All changed rows were written; the optimistic list stands
    Persisted { items: Vec<T>, updated: usize },

    /// At least one write failed; `items` is the re-fetched authoritative
    /// order and `error` is what went wrong
    Reverted { items: Vec<T>, error: StoreError },
}

/// Sort ascending by order value, missing values last.
///
/// The sort is stable, so ties and the missing-value group keep the
/// backend's return order.
pub fn sort_by_order<T: Orderable>(items: &mut [T]) {
    items.sort_by_key(|item| item.order().unwrap_or(ORDER_SENTINEL));
}

/// Fetch every row of `T`'s table, decode, and sort by order.
///
/// Rows that fail to decode are logged and skipped; a transport or backend
/// failure surfaces as a fetch error and the caller's previous list (if
/// any) stays untouched.
pub async fn fetch_sorted<T, S>(store: &S) -> Result<Vec<T>, StoreError>
where
    T: ContentRecord + Orderable,
    S: ContentStore + ?Sized,
{
    let rows = store.list_all(T::TABLE).await?;
    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        match serde_json::from_value::<T>(row) {
            Ok(item) => items.push(item),
            Err(error) => {
                tracing::warn!(table = T::TABLE, %error, "skipping row that does not decode");
            }
        }
    }
    sort_by_order(&mut items);
    Ok(items)
}

/// Exchange the element at `index` with its neighbor, then renumber the
/// whole sequence to `0..N-1`.
///
/// Moving the first element up or the last element down is a no-op and
/// returns an empty change set without touching the slice. Otherwise the
/// returned changes list every element whose stored order differs from its
/// new position - the two swapped neighbors at minimum, plus any rows whose
/// inherited values had gaps or duplicates.
pub fn swap_and_renumber<T: Orderable>(
    items: &mut [T],
    index: usize,
    direction: Direction,
) -> Vec<OrderChange> {
    if at_boundary(items.len(), index, direction) {
        return Vec::new();
    }

    let neighbor = match direction {
        Direction::Up => index - 1,
        Direction::Down => index + 1,
    };
    items.swap(index, neighbor);

    let mut changes = Vec::new();
    for (position, item) in items.iter_mut().enumerate() {
        let position = position as i64;
        if item.order() != Some(position) {
            item.set_order(position);
            changes.push(OrderChange {
                id: item.record_id().map(str::to_string),
                label: item.label().to_string(),
                order: position,
            });
        }
    }
    changes
}

fn at_boundary(len: usize, index: usize, direction: Direction) -> bool {
    if index >= len {
        return true;
    }
    match direction {
        Direction::Up => index == 0,
        Direction::Down => index + 1 == len,
    }
}

/// Write every changed order value back to the store, in parallel.
///
/// Rows without an id are skipped with a warning. Returns the number of
/// rows written, or an aggregate persist error if any single write failed -
/// whatever subset succeeded stays persisted remotely.
pub async fn persist_order<S>(
    store: &S,
    table: &str,
    changes: &[OrderChange],
) -> Result<usize, StoreError>
where
    S: ContentStore + ?Sized,
{
    let mut pending = Vec::new();
    for change in changes {
        match change.id.as_deref() {
            Some(id) => {
                pending.push(store.update_field(table, id, ORDER_FIELD, json!(change.order)));
            }
            None => {
                tracing::warn!(label = %change.label, table, "row has no id; skipping order update");
            }
        }
    }

    let total = pending.len();
    let results = futures::future::join_all(pending).await;
    let mut failed = 0usize;
    for result in &results {
        if let Err(error) = result {
            failed += 1;
            tracing::debug!(%error, table, "order update failed");
        }
    }

    if failed > 0 {
        return Err(StoreError::Persist {
            table: table.to_string(),
            failed,
            total,
        });
    }

    tracing::debug!(table, updated = total, "order batch persisted");
    Ok(total)
}

/// Move one element and persist the result.
///
/// `items` must already be display-sorted (see [`fetch_sorted`]). On a
/// persist failure the optimistic list is discarded and the authoritative
/// order is re-fetched; if even that re-fetch fails, the fetch error
/// propagates.
pub async fn move_and_persist<T, S>(
    store: &S,
    mut items: Vec<T>,
    index: usize,
    direction: Direction,
) -> Result<MoveOutcome<T>, StoreError>
where
    T: ContentRecord + Orderable,
    S: ContentStore + ?Sized,
{
    if at_boundary(items.len(), index, direction) {
        return Ok(MoveOutcome::NoOp { items });
    }

    let changes = swap_and_renumber(&mut items, index, direction);

    match persist_order(store, T::TABLE, &changes).await {
        Ok(updated) => Ok(MoveOutcome::Persisted { items, updated }),
        Err(error) => {
            let items = fetch_sorted::<T, S>(store).await?;
            Ok(MoveOutcome::Reverted { items, error })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Item {
        id: Option<&'static str>,
        name: &'static str,
        order: Option<i64>,
    }

    impl Item {
        fn new(id: &'static str, name: &'static str, order: impl Into<Option<i64>>) -> Self {
            Self {
                id: Some(id),
                name,
                order: order.into(),
            }
        }
    }

    impl Orderable for Item {
        fn record_id(&self) -> Option<&str> {
            self.id
        }

        fn label(&self) -> &str {
            self.name
        }

        fn order(&self) -> Option<i64> {
            self.order
        }

        fn set_order(&mut self, value: i64) {
            self.order = Some(value);
        }
    }

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.name).collect()
    }

    fn orders(items: &[Item]) -> Vec<Option<i64>> {
        items.iter().map(|i| i.order).collect()
    }

    #[test]
    fn test_sort_missing_order_goes_last() {
        let mut items = vec![
            Item::new("a", "a", None),
            Item::new("b", "b", 5),
            Item::new("c", "c", 5),
        ];
        sort_by_order(&mut items);
        // missing order sorts last; the tied pair keeps its return order
        assert_eq!(names(&items), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let mut items = vec![
            Item::new("a", "a", 1),
            Item::new("b", "b", 0),
            Item::new("c", "c", 1),
            Item::new("d", "d", 0),
        ];
        sort_by_order(&mut items);
        assert_eq!(names(&items), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_move_first_up_is_noop() {
        let mut items = vec![Item::new("a", "a", 0), Item::new("b", "b", 1)];
        let before = items.clone();
        let changes = swap_and_renumber(&mut items, 0, Direction::Up);
        assert!(changes.is_empty());
        assert_eq!(items, before);
    }

    #[test]
    fn test_move_last_down_is_noop() {
        let mut items = vec![Item::new("a", "a", 0), Item::new("b", "b", 1)];
        let before = items.clone();
        let changes = swap_and_renumber(&mut items, 1, Direction::Down);
        assert!(changes.is_empty());
        assert_eq!(items, before);
    }

    #[test]
    fn test_out_of_range_index_is_noop() {
        let mut items = vec![Item::new("a", "a", 0)];
        let before = items.clone();
        assert!(swap_and_renumber(&mut items, 7, Direction::Up).is_empty());
        assert_eq!(items, before);
    }

    #[test]
    fn test_move_up_swaps_neighbors_and_renumbers() {
        let mut items = vec![
            Item::new("a", "a", 0),
            Item::new("b", "b", 1),
            Item::new("c", "c", 2),
            Item::new("d", "d", 3),
        ];
        let changes = swap_and_renumber(&mut items, 2, Direction::Up);

        assert_eq!(names(&items), vec!["a", "c", "b", "d"]);
        assert_eq!(orders(&items), vec![Some(0), Some(1), Some(2), Some(3)]);
        // only the exchanged pair changed stored values
        let changed: Vec<&str> = changes.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(changed, vec!["c", "b"]);
    }

    #[test]
    fn test_move_down_mirrors_move_up() {
        let mut items = vec![
            Item::new("a", "a", 0),
            Item::new("b", "b", 1),
            Item::new("c", "c", 2),
        ];
        let changes = swap_and_renumber(&mut items, 0, Direction::Down);
        assert_eq!(names(&items), vec!["b", "a", "c"]);
        assert_eq!(changes.len(), 2);
    }

    #[test]
    fn test_move_up_then_down_restores_original() {
        let original = vec![
            Item::new("a", "a", 0),
            Item::new("b", "b", 1),
            Item::new("c", "c", 2),
            Item::new("d", "d", 3),
        ];

        for index in 1..original.len() {
            let mut items = original.clone();
            swap_and_renumber(&mut items, index, Direction::Up);
            swap_and_renumber(&mut items, index - 1, Direction::Down);
            assert_eq!(items, original, "round trip at index {index}");
        }
    }

    #[test]
    fn test_renumber_heals_gaps_and_duplicates() {
        let mut items = vec![
            Item::new("a", "a", 0),
            Item::new("b", "b", 5),
            Item::new("c", "c", 5),
            Item::new("d", "d", None),
        ];
        let changes = swap_and_renumber(&mut items, 2, Direction::Up);

        assert_eq!(orders(&items), vec![Some(0), Some(1), Some(2), Some(3)]);
        // a already sat at 0; everything else was dirty
        let changed: Vec<&str> = changes.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(changed, vec!["c", "b", "d"]);
    }

    #[test]
    fn test_change_set_carries_missing_ids() {
        let mut items = vec![
            Item {
                id: None,
                name: "a",
                order: Some(0),
            },
            Item::new("b", "b", 1),
        ];
        let changes = swap_and_renumber(&mut items, 1, Direction::Up);
        assert_eq!(changes.len(), 2);
        assert!(changes.iter().any(|c| c.id.is_none()));
    }

    #[test]
    fn test_direction_parse_and_display() {
        assert_eq!("up".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!("DOWN".parse::<Direction>().unwrap(), Direction::Down);
        assert!("sideways".parse::<Direction>().is_err());
        assert_eq!(Direction::Up.to_string(), "up");
    }
}
