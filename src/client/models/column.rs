//! Grist column metadata

use serde::{Deserialize, Serialize};

/// Column as returned by `GET /tables/{table}/columns`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub id: String,

    #[serde(default)]
    pub fields: ColumnFields,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnFields {
    #[serde(default)]
    pub label: Option<String>,

    #[serde(default, rename = "type")]
    pub col_type: Option<String>,

    /// JSON-encoded widget configuration; holds `choices` for choice columns.
    #[serde(default)]
    pub widget_options: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ColumnsResponse {
    #[serde(default)]
    pub columns: Vec<Column>,
}
