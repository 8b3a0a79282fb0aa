//! Query helpers for Grist record fetches
//!
//! Grist's `filter` parameter is a JSON object mapping column ids to the
//! list of accepted values; `sort` is a comma-separated list of column ids,
//! each optionally prefixed with `-` for descending order.

use serde_json::Value;

/// Sort order for a sorted column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Query parameters for `GET /tables/{table}/records`.
///
/// # Example
/// ```ignore
/// let query = RecordQuery::new()
///     .filter_eq("Produit", 12)
///     .sort_by("Priorite", SortOrder::Desc);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordQuery {
    /// Column -> accepted values, in insertion order
    filters: Vec<(String, Vec<Value>)>,
    sort: Vec<(String, SortOrder)>,
}

impl RecordQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep rows where `column` equals `value`.
    pub fn filter_eq(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter_in(column, vec![value.into()])
    }

    /// Keep rows where `column` is one of `values`. Repeating a column
    /// replaces its earlier values.
    pub fn filter_in(mut self, column: impl Into<String>, values: Vec<Value>) -> Self {
        let column = column.into();
        self.filters.retain(|(c, _)| *c != column);
        self.filters.push((column, values));
        self
    }

    pub fn sort_by(mut self, column: impl Into<String>, order: SortOrder) -> Self {
        self.sort.push((column.into(), order));
        self
    }

    /// `filter` parameter value, e.g. `{"Produit":[12],"Statut":["Fait"]}`
    pub fn filter_param(&self) -> Option<String> {
        if self.filters.is_empty() {
            return None;
        }

        let body = self
            .filters
            .iter()
            .map(|(column, values)| {
                format!(
                    "{}:{}",
                    Value::String(column.clone()),
                    Value::Array(values.clone())
                )
            })
            .collect::<Vec<_>>()
            .join(",");

        Some(format!("{{{}}}", body))
    }

    /// `sort` parameter value, e.g. `-Priorite,manualSort`
    pub fn sort_param(&self) -> Option<String> {
        if self.sort.is_empty() {
            return None;
        }

        Some(
            self.sort
                .iter()
                .map(|(column, order)| match order {
                    SortOrder::Asc => column.clone(),
                    SortOrder::Desc => format!("-{}", column),
                })
                .collect::<Vec<_>>()
                .join(","),
        )
    }

    /// Convert to query string parameters.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(filter) = self.filter_param() {
            params.push(("filter", filter));
        }
        if let Some(sort) = self.sort_param() {
            params.push(("sort", sort));
        }
        params
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.sort.is_empty()
    }

    /// Accepted values for `column`, if filtered on it.
    pub fn filter_values(&self, column: &str) -> Option<&[Value]> {
        self.filters
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_slice())
    }
}
