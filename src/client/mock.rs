//! Mock Grist API client for testing
//!
//! Keeps tables in memory so store and autosave code can be exercised
//! without a Grist server.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use super::api::{ColumnsApi, RecordsApi};
use super::models::{Column, NewRecord, Record, UpdateRecord, UpsertRecord};
use super::query::RecordQuery;
use crate::error::{ApiError, ApiResult};

/// Mock API client for testing.
///
/// # Example
/// ```ignore
/// let mock = MockGristClient::new()
///     .with_records("AuditsAudits", vec![Record::new(1, json!({"Hash": "abc"}))])
///     .await;
///
/// let rows = mock.get_records("AuditsAudits", &RecordQuery::new()).await?;
/// assert_eq!(rows.len(), 1);
/// ```
#[derive(Default)]
pub struct MockGristClient {
    /// Table id -> rows
    tables: Arc<Mutex<HashMap<String, Vec<Record>>>>,
    /// Table id -> column metadata
    columns: Arc<Mutex<HashMap<String, Vec<Column>>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Simulated latency for write calls
    write_delay: Arc<Mutex<Option<Duration>>>,
    call_count: Arc<Mutex<CallCounts>>,
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub get_records: usize,
    pub put_records: usize,
    pub patch_records: usize,
    pub post_records: usize,
    pub delete_records: usize,
    pub list_columns: usize,
}

impl CallCounts {
    pub fn total(&self) -> usize {
        self.get_records
            + self.put_records
            + self.patch_records
            + self.post_records
            + self.delete_records
            + self.list_columns
    }
}

/// A captured API request for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// The API method called (e.g., "get_records", "put_records")
    pub method: String,
    pub table: String,
    /// Query parameters for reads
    pub params: Vec<(&'static str, String)>,
    /// JSON body for writes
    pub body: Option<Value>,
}

impl MockGristClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a table with rows.
    pub async fn with_records(self, table: &str, records: Vec<Record>) -> Self {
        self.tables.lock().await.insert(table.to_string(), records);
        self
    }

    pub async fn with_columns(self, table: &str, columns: Vec<Column>) -> Self {
        self.columns.lock().await.insert(table.to_string(), columns);
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        self.set_error(error).await;
        self
    }

    /// Same as [`with_error`](Self::with_error) for a mock that is already shared.
    pub async fn set_error(&self, error: ApiError) {
        *self.error.lock().await = Some(error);
    }

    /// Make every write take `delay` before completing.
    pub async fn with_write_delay(self, delay: Duration) -> Self {
        *self.write_delay.lock().await = Some(delay);
        self
    }

    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Bodies of every `put_records` call, in order.
    pub async fn put_bodies(&self) -> Vec<Value> {
        self.captured_requests
            .lock()
            .await
            .iter()
            .filter(|r| r.method == "put_records")
            .filter_map(|r| r.body.clone())
            .collect()
    }

    /// Current rows of a table.
    pub async fn table(&self, table: &str) -> Vec<Record> {
        self.tables
            .lock()
            .await
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    async fn check_error(&self) -> ApiResult<()> {
        match self.error.lock().await.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn capture(
        &self,
        method: &str,
        table: &str,
        params: Vec<(&'static str, String)>,
        body: Option<Value>,
    ) {
        self.captured_requests.lock().await.push(CapturedRequest {
            method: method.to_string(),
            table: table.to_string(),
            params,
            body,
        });
    }

    async fn simulate_write_latency(&self) {
        let delay = *self.write_delay.lock().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

fn values_match(cell: Option<&Value>, accepted: &[Value]) -> bool {
    let cell = cell.unwrap_or(&Value::Null);
    accepted.iter().any(|v| match (cell.as_f64(), v.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => cell == v,
    })
}

fn compare_cells(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

fn apply_query(mut rows: Vec<Record>, query: &RecordQuery) -> Vec<Record> {
    if let Some(filter) = query.filter_param() {
        // Re-read the rendered filter so the mock sees exactly what Grist would.
        if let Ok(Value::Object(filters)) = serde_json::from_str::<Value>(&filter) {
            rows.retain(|row| {
                filters.iter().all(|(column, accepted)| {
                    let accepted = accepted.as_array().cloned().unwrap_or_default();
                    if column == "id" {
                        return values_match(Some(&Value::from(row.id)), &accepted);
                    }
                    values_match(row.fields.get(column), &accepted)
                })
            });
        }
    }

    if let Some(sort) = query.sort_param() {
        for key in sort.split(',').rev() {
            let (column, desc) = match key.strip_prefix('-') {
                Some(c) => (c, true),
                None => (key, false),
            };
            if column == "manualSort" {
                continue;
            }
            rows.sort_by(|a, b| {
                let ord = compare_cells(a.fields.get(column), b.fields.get(column));
                if desc { ord.reverse() } else { ord }
            });
        }
    }

    rows
}

fn matches_require(row: &Record, require: &Map<String, Value>) -> bool {
    require
        .iter()
        .all(|(k, v)| values_match(row.fields.get(k), std::slice::from_ref(v)))
}

fn next_id(rows: &[Record]) -> i64 {
    rows.iter().map(|r| r.id).max().unwrap_or(0) + 1
}

#[async_trait]
impl RecordsApi for MockGristClient {
    async fn get_records(&self, table: &str, query: &RecordQuery) -> ApiResult<Vec<Record>> {
        self.capture("get_records", table, query.to_query_params(), None)
            .await;
        self.check_error().await?;
        self.call_count.lock().await.get_records += 1;

        let tables = self.tables.lock().await;
        let rows = tables.get(table).cloned().unwrap_or_default();
        Ok(apply_query(rows, query))
    }

    async fn put_records(&self, table: &str, records: &[UpsertRecord]) -> ApiResult<()> {
        let body = serde_json::json!({ "records": records });
        self.capture("put_records", table, Vec::new(), Some(body))
            .await;
        self.call_count.lock().await.put_records += 1;
        self.simulate_write_latency().await;
        self.check_error().await?;

        let mut tables = self.tables.lock().await;
        let rows = tables.entry(table.to_string()).or_default();
        for upsert in records {
            match rows.iter_mut().find(|r| matches_require(r, &upsert.require)) {
                Some(row) => row.fields.extend(upsert.fields.clone()),
                None => {
                    let mut fields = upsert.require.clone();
                    fields.extend(upsert.fields.clone());
                    let id = next_id(rows);
                    rows.push(Record { id, fields });
                }
            }
        }
        Ok(())
    }

    async fn patch_records(&self, table: &str, records: &[UpdateRecord]) -> ApiResult<()> {
        let body = serde_json::json!({ "records": records });
        self.capture("patch_records", table, Vec::new(), Some(body))
            .await;
        self.call_count.lock().await.patch_records += 1;
        self.simulate_write_latency().await;
        self.check_error().await?;

        let mut tables = self.tables.lock().await;
        let rows = tables.entry(table.to_string()).or_default();
        for update in records {
            let row = rows
                .iter_mut()
                .find(|r| r.id == update.id)
                .ok_or_else(|| ApiError::NotFound(format!("Invalid row id {}", update.id)))?;
            row.fields.extend(update.fields.clone());
        }
        Ok(())
    }

    async fn post_records(&self, table: &str, records: &[NewRecord]) -> ApiResult<Vec<i64>> {
        let body = serde_json::json!({ "records": records });
        self.capture("post_records", table, Vec::new(), Some(body))
            .await;
        self.call_count.lock().await.post_records += 1;
        self.simulate_write_latency().await;
        self.check_error().await?;

        let mut tables = self.tables.lock().await;
        let rows = tables.entry(table.to_string()).or_default();
        let mut ids = Vec::with_capacity(records.len());
        for new in records {
            let id = next_id(rows);
            rows.push(Record {
                id,
                fields: new.fields.clone(),
            });
            ids.push(id);
        }
        Ok(ids)
    }

    async fn delete_records(&self, table: &str, ids: &[i64]) -> ApiResult<()> {
        self.capture("delete_records", table, Vec::new(), Some(serde_json::json!(ids)))
            .await;
        self.call_count.lock().await.delete_records += 1;
        self.check_error().await?;

        let mut tables = self.tables.lock().await;
        if let Some(rows) = tables.get_mut(table) {
            rows.retain(|r| !ids.contains(&r.id));
        }
        Ok(())
    }
}

#[async_trait]
impl ColumnsApi for MockGristClient {
    async fn list_columns(&self, table: &str) -> ApiResult<Vec<Column>> {
        self.capture("list_columns", table, Vec::new(), None).await;
        self.check_error().await?;
        self.call_count.lock().await.list_columns += 1;

        let columns = self.columns.lock().await;
        columns
            .get(table)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Table not found \"{}\"", table)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SortOrder;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_client_default_empty() {
        let mock = MockGristClient::new();
        let rows = mock.get_records("Any", &RecordQuery::new()).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_mock_client_filters_and_sorts() {
        let mock = MockGristClient::new()
            .with_records(
                "Reco",
                vec![
                    Record::new(1, json!({"Produit": 1, "Priorite": "P2"})),
                    Record::new(2, json!({"Produit": 2, "Priorite": "P0"})),
                    Record::new(3, json!({"Produit": 1, "Priorite": "P3"})),
                ],
            )
            .await;

        let query = RecordQuery::new()
            .filter_eq("Produit", 1)
            .sort_by("Priorite", SortOrder::Desc);
        let rows = mock.get_records("Reco", &query).await.unwrap();
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3, 1]);
    }

    #[tokio::test]
    async fn test_mock_client_with_error() {
        let mock = MockGristClient::new()
            .with_error(ApiError::Unauthorized)
            .await;

        assert!(mock.get_records("T", &RecordQuery::new()).await.is_err());

        // Error is consumed, next call succeeds
        assert!(mock.get_records("T", &RecordQuery::new()).await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_put_upserts_by_require() {
        let mock = MockGristClient::new()
            .with_records("R", vec![Record::new(5, json!({"Audit": 1, "Question": 2}))])
            .await;

        let upsert = |q: i64, answer: &str| UpsertRecord {
            require: json!({"Audit": 1, "Question": q}).as_object().cloned().unwrap(),
            fields: json!({"Reponse": answer}).as_object().cloned().unwrap(),
        };

        mock.put_records("R", &[upsert(2, "Oui"), upsert(3, "Non")])
            .await
            .unwrap();

        let rows = mock.table("R").await;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].str_field("Reponse").as_deref(), Some("Oui"));
        assert_eq!(rows[1].id, 6);
        assert_eq!(mock.call_counts().await.put_records, 1);
        assert_eq!(mock.put_bodies().await.len(), 1);
    }

    #[tokio::test]
    async fn test_mock_columns_missing_table() {
        let mock = MockGristClient::new();
        let err = mock.list_columns("Nope").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
