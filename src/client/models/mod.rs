//! Grist API data models
//!
//! Wire-level shapes only. Table-specific meaning lives in `crate::store`.

mod column;
mod record;

pub use column::Column;
#[cfg(test)]
pub use column::ColumnFields;
pub(crate) use column::ColumnsResponse;
pub use record::{NewRecord, Record, UpdateRecord, UpsertRecord, to_grist_list};
pub(crate) use record::{CreatedResponse, RecordsResponse};
