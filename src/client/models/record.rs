//! Grist record wire models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Marker Grist puts at the head of a `ChoiceList` / `RefList` cell.
pub const LIST_MARKER: &str = "L";

/// A row as returned by `GET /tables/{table}/records`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,

    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn new(id: i64, fields: Value) -> Self {
        let fields = match fields {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self { id, fields }
    }

    /// Text cell. Empty strings count as absent.
    pub fn str_field(&self, name: &str) -> Option<String> {
        match self.fields.get(name)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    /// Integer cell, also used for `Ref` columns. Grist stores an unset
    /// reference as `0`, which is reported as absent.
    pub fn i64_field(&self, name: &str) -> Option<i64> {
        let value = self.fields.get(name)?;
        let n = value
            .as_i64()
            .or_else(|| value.as_f64().map(|f| f as i64))?;
        (n != 0).then_some(n)
    }

    pub fn f64_field(&self, name: &str) -> Option<f64> {
        self.fields.get(name)?.as_f64()
    }

    pub fn bool_field(&self, name: &str) -> bool {
        self.fields
            .get(name)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// List cell with the leading `"L"` marker removed. Non-string
    /// items (e.g. `RefList` ids) are rendered as text.
    pub fn list_field(&self, name: &str) -> Vec<String> {
        let Some(Value::Array(items)) = self.fields.get(name) else {
            return Vec::new();
        };

        let mut items = items.iter().peekable();
        if items.peek().and_then(|v| v.as_str()) == Some(LIST_MARKER) {
            items.next();
        }

        items
            .filter_map(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect()
    }

    /// Date or DateTime cell. Grist sends epoch seconds; older exports
    /// carry ISO-8601 strings, which are accepted too. `0` means unset.
    pub fn timestamp_field(&self, name: &str) -> Option<DateTime<Utc>> {
        match self.fields.get(name)? {
            Value::Number(n) => {
                let secs = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
                if secs == 0 {
                    return None;
                }
                DateTime::from_timestamp(secs, 0)
            }
            Value::String(s) if !s.is_empty() => DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    NaiveDate::parse_from_str(s, "%Y-%m-%d")
                        .ok()
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                        .map(|dt| dt.and_utc())
                }),
            _ => None,
        }
    }
}

/// Wrap a list of values the way Grist expects list cells to be written.
pub fn to_grist_list(items: &[String]) -> Value {
    let mut out = Vec::with_capacity(items.len() + 1);
    out.push(Value::String(LIST_MARKER.to_string()));
    out.extend(items.iter().cloned().map(Value::String));
    Value::Array(out)
}

/// Row for `PUT /records`: matched on `require`, then `fields` are applied.
/// A row matching nothing is inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertRecord {
    pub require: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub fields: Map<String, Value>,
}

/// Row for `PATCH /records`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateRecord {
    pub id: i64,
    pub fields: Map<String, Value>,
}

/// Row for `POST /records`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecord {
    pub fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecordsResponse {
    #[serde(default)]
    pub records: Vec<Record>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedRecord {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedResponse {
    #[serde(default)]
    pub records: Vec<CreatedRecord>,
}
