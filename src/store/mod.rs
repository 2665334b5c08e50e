//! Remote content store
//!
//! The website's content lives in a hosted PostgREST-compatible backend.
//! [`RestStore`] is the real client; [`MemoryStore`] backs the test suite.
//! The [`ContentStore`] trait is deliberately tiny - list one table, patch
//! one column - because that is the whole surface the reordering flow
//! needs. The richer CRUD operations used by the entity commands are
//! inherent methods on [`RestStore`].

pub mod memory;
pub mod rest;
pub mod storage;

pub use memory::MemoryStore;
pub use rest::RestStore;
pub use storage::{StorageClient, StorageError};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Remote read failed; the caller's previous list stays untouched
    #[error("failed to fetch rows from '{table}': {reason}")]
    Fetch { table: String, reason: String },

    /// The backend rejected a single write
    #[error("backend rejected {op} on '{table}': {reason}")]
    Reject {
        op: &'static str,
        table: String,
        reason: String,
    },

    /// Aggregate failure of a reorder batch; successful writes in the
    /// batch stay persisted
    #[error("{failed} of {total} order update(s) failed for '{table}'")]
    Persist {
        table: String,
        failed: usize,
        total: usize,
    },

    /// A response body did not decode into the expected shape
    #[error("response from '{table}' does not decode: {reason}")]
    Decode { table: String, reason: String },

    /// Single-row lookup matched nothing
    #[error("no {name} found matching '{query}'")]
    NotFound { name: &'static str, query: String },
}

/// The minimal store surface the ordering core requires
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Read every row of a table as raw JSON objects
    async fn list_all(&self, table: &str) -> Result<Vec<Value>, StoreError>;

    /// Patch a single column of a single row, keyed by id
    async fn update_field(
        &self,
        table: &str,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<(), StoreError>;
}
