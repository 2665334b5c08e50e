//! PostgREST table client
//!
//! Thin wrapper over the backend's REST surface: one URL per table,
//! `eq.`-style column filters, `Prefer: return=representation` on inserts.
//! Auth is a service key forwarded both as `apikey` and as a bearer token,
//! the way the hosted backend expects.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde_json::Value;

use crate::core::config::Backend;
use crate::core::entity::ContentRecord;
use crate::store::{ContentStore, StoreError};

#[derive(Debug, Clone)]
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl RestStore {
    pub fn new(backend: &Backend) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: backend.url.trim_end_matches('/').to_string(),
            service_key: backend.service_key.clone(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    /// Raw table read with arbitrary query parameters
    pub async fn fetch_rows(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<Value>, StoreError> {
        let response = self
            .request(Method::GET, &self.table_url(table))
            .query(query)
            .send()
            .await
            .map_err(|e| StoreError::Fetch {
                table: table.to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(StoreError::Fetch {
                table: table.to_string(),
                reason: error_body(response).await,
            });
        }

        response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| StoreError::Decode {
                table: table.to_string(),
                reason: e.to_string(),
            })
    }

    /// Every row of `T`'s table. Rows that fail to decode are logged and
    /// skipped rather than failing the whole listing.
    pub async fn fetch_all<T: ContentRecord>(&self) -> Result<Vec<T>, StoreError> {
        let rows = self
            .fetch_rows(T::TABLE, &[("select", "*".to_string())])
            .await?;
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            match serde_json::from_value::<T>(row) {
                Ok(record) => records.push(record),
                Err(error) => {
                    tracing::warn!(table = T::TABLE, %error, "skipping row that does not decode");
                }
            }
        }
        Ok(records)
    }

    /// First row where `column` equals `value`, if any
    pub async fn fetch_one<T: ContentRecord>(
        &self,
        column: &str,
        value: &str,
    ) -> Result<Option<T>, StoreError> {
        let rows = self
            .fetch_rows(
                T::TABLE,
                &[
                    ("select", "*".to_string()),
                    (column, eq(value)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;

        match rows.into_iter().next() {
            None => Ok(None),
            Some(row) => serde_json::from_value::<T>(row)
                .map(Some)
                .map_err(|e| StoreError::Decode {
                    table: T::TABLE.to_string(),
                    reason: e.to_string(),
                }),
        }
    }

    /// Like [`fetch_one`](Self::fetch_one) but a missing row is an error
    pub async fn require_one<T: ContentRecord>(
        &self,
        column: &str,
        value: &str,
    ) -> Result<T, StoreError> {
        self.fetch_one(column, value)
            .await?
            .ok_or_else(|| StoreError::NotFound {
                name: T::NAME,
                query: value.to_string(),
            })
    }

    /// Insert a record and return the backend's representation of it
    /// (with the assigned id and timestamps filled in)
    pub async fn insert<T: ContentRecord>(&self, record: &T) -> Result<T, StoreError> {
        let response = self
            .request(Method::POST, &self.table_url(T::TABLE))
            .header("Prefer", "return=representation")
            .json(record)
            .send()
            .await
            .map_err(|e| StoreError::Reject {
                op: "insert",
                table: T::TABLE.to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(StoreError::Reject {
                op: "insert",
                table: T::TABLE.to_string(),
                reason: error_body(response).await,
            });
        }

        let mut rows = response
            .json::<Vec<T>>()
            .await
            .map_err(|e| StoreError::Decode {
                table: T::TABLE.to_string(),
                reason: e.to_string(),
            })?;

        rows.pop().ok_or_else(|| StoreError::Decode {
            table: T::TABLE.to_string(),
            reason: "insert returned no representation".to_string(),
        })
    }

    /// Patch all rows where `column` equals `value`
    pub async fn update_where(
        &self,
        table: &str,
        column: &str,
        value: &str,
        patch: &Value,
    ) -> Result<(), StoreError> {
        let response = self
            .request(Method::PATCH, &self.table_url(table))
            .query(&[(column, eq(value))])
            .json(patch)
            .send()
            .await
            .map_err(|e| StoreError::Reject {
                op: "update",
                table: table.to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(StoreError::Reject {
                op: "update",
                table: table.to_string(),
                reason: error_body(response).await,
            });
        }
        Ok(())
    }

    /// Delete all rows of `T`'s table where `column` equals `value`
    pub async fn delete_where<T: ContentRecord>(
        &self,
        column: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        let response = self
            .request(Method::DELETE, &self.table_url(T::TABLE))
            .query(&[(column, eq(value))])
            .send()
            .await
            .map_err(|e| StoreError::Reject {
                op: "delete",
                table: T::TABLE.to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(StoreError::Reject {
                op: "delete",
                table: T::TABLE.to_string(),
                reason: error_body(response).await,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ContentStore for RestStore {
    async fn list_all(&self, table: &str) -> Result<Vec<Value>, StoreError> {
        self.fetch_rows(table, &[("select", "*".to_string())]).await
    }

    async fn update_field(
        &self,
        table: &str,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<(), StoreError> {
        self.update_where(table, "id", id, &single_field_patch(field, value))
            .await
    }
}

/// PostgREST equality filter value
fn eq(value: &str) -> String {
    format!("eq.{value}")
}

/// `{ field: value }` as a JSON patch body
fn single_field_patch(field: &str, value: Value) -> Value {
    let mut patch = serde_json::Map::with_capacity(1);
    patch.insert(field.to_string(), value);
    Value::Object(patch)
}

async fn error_body(response: Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(body) if !body.trim().is_empty() => format!("{status}: {}", body.trim()),
        _ => status.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Backend;

    fn store() -> RestStore {
        RestStore::new(&Backend {
            url: "https://proj.example".to_string(),
            service_key: "sk-test".to_string(),
        })
    }

    #[test]
    fn test_table_url() {
        assert_eq!(store().table_url("posts"), "https://proj.example/rest/v1/posts");
    }

    #[test]
    fn test_table_url_trims_trailing_slash() {
        let store = RestStore::new(&Backend {
            url: "https://proj.example/".to_string(),
            service_key: "sk".to_string(),
        });
        assert_eq!(store.table_url("cards"), "https://proj.example/rest/v1/cards");
    }

    #[test]
    fn test_eq_filter() {
        assert_eq!(eq("abc-123"), "eq.abc-123");
    }

    #[test]
    fn test_single_field_patch() {
        let patch = single_field_patch("order", serde_json::json!(3));
        assert_eq!(patch, serde_json::json!({ "order": 3 }));
    }
}
