//! In-memory content store
//!
//! Backs the test suite: tables are plain JSON rows, writes can be made to
//! fail per row, and every successful `update_field` call is recorded so
//! tests can assert exactly which rows a reorder batch touched.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::store::{ContentStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    fail_updates: Mutex<HashSet<(String, String)>>,
    fail_lists: Mutex<HashSet<String>>,
    updates: Mutex<Vec<(String, String, String, Value)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a row into a table
    pub fn insert_row(&self, table: &str, row: Value) {
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(row);
    }

    /// Make every future `update_field` for this row fail
    pub fn fail_update(&self, table: &str, id: &str) {
        self.fail_updates
            .lock()
            .unwrap()
            .insert((table.to_string(), id.to_string()));
    }

    /// Make every future `list_all` for this table fail
    pub fn fail_list(&self, table: &str) {
        self.fail_lists.lock().unwrap().insert(table.to_string());
    }

    /// Successful `update_field` calls, in completion order
    pub fn recorded_updates(&self) -> Vec<(String, String, String, Value)> {
        self.updates.lock().unwrap().clone()
    }

    /// Current rows of a table
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn list_all(&self, table: &str) -> Result<Vec<Value>, StoreError> {
        if self.fail_lists.lock().unwrap().contains(table) {
            return Err(StoreError::Fetch {
                table: table.to_string(),
                reason: "injected list failure".to_string(),
            });
        }
        Ok(self.rows(table))
    }

    async fn update_field(
        &self,
        table: &str,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<(), StoreError> {
        let key = (table.to_string(), id.to_string());
        if self.fail_updates.lock().unwrap().contains(&key) {
            return Err(StoreError::Reject {
                op: "update",
                table: table.to_string(),
                reason: format!("injected update failure for '{id}'"),
            });
        }

        let mut tables = self.tables.lock().unwrap();
        let rows = tables.get_mut(table).ok_or_else(|| StoreError::Reject {
            op: "update",
            table: table.to_string(),
            reason: "no such table".to_string(),
        })?;

        let row = rows
            .iter_mut()
            .find(|row| row.get("id").and_then(Value::as_str) == Some(id))
            .ok_or_else(|| StoreError::Reject {
                op: "update",
                table: table.to_string(),
                reason: format!("no row with id '{id}'"),
            })?;

        if let Value::Object(object) = row {
            object.insert(field.to_string(), value.clone());
        }

        self.updates
            .lock()
            .unwrap()
            .push((table.to_string(), id.to_string(), field.to_string(), value));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_update_field_mutates_row_and_records_call() {
        let store = MemoryStore::new();
        store.insert_row("posts", json!({ "id": "a", "order": 5 }));

        store
            .update_field("posts", "a", "order", json!(0))
            .await
            .unwrap();

        assert_eq!(store.rows("posts")[0]["order"], json!(0));
        assert_eq!(store.recorded_updates().len(), 1);
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let store = MemoryStore::new();
        store.insert_row("posts", json!({ "id": "a" }));
        store.fail_update("posts", "a");
        store.fail_list("posts");

        assert!(store
            .update_field("posts", "a", "order", json!(0))
            .await
            .is_err());
        assert!(store.list_all("posts").await.is_err());
    }
}
