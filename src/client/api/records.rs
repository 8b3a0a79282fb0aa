//! Records API trait

use async_trait::async_trait;

use crate::client::models::{NewRecord, Record, UpdateRecord, UpsertRecord};
use crate::client::query::RecordQuery;
use crate::error::ApiResult;

/// Row-level operations on a Grist table
///
/// Every method addresses one table by id and issues exactly one request.
#[async_trait]
pub trait RecordsApi: Send + Sync {
    /// `GET /tables/{table}/records` with optional filter and sort
    async fn get_records(&self, table: &str, query: &RecordQuery) -> ApiResult<Vec<Record>>;

    /// `PUT /tables/{table}/records`: upsert each row by its `require` keys
    async fn put_records(&self, table: &str, records: &[UpsertRecord]) -> ApiResult<()>;

    /// `PATCH /tables/{table}/records`: update rows by id
    async fn patch_records(&self, table: &str, records: &[UpdateRecord]) -> ApiResult<()>;

    /// `POST /tables/{table}/records`: insert rows, returning their new ids
    #[allow(dead_code)]
    async fn post_records(&self, table: &str, records: &[NewRecord]) -> ApiResult<Vec<i64>>;

    /// `POST /tables/{table}/data/delete`
    #[allow(dead_code)]
    async fn delete_records(&self, table: &str, ids: &[i64]) -> ApiResult<()>;
}
