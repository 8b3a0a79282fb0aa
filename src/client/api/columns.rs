//! Columns API trait

use async_trait::async_trait;

use crate::client::models::Column;
use crate::error::ApiResult;

/// Schema metadata for a Grist table
#[async_trait]
pub trait ColumnsApi: Send + Sync {
    /// `GET /tables/{table}/columns`
    async fn list_columns(&self, table: &str) -> ApiResult<Vec<Column>>;
}
