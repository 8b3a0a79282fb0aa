//! Recommendation, consumption and hosting mapping models

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Follow-up action recommended to a product team
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub id: i64,
    pub product_id: Option<i64>,
    pub text: String,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub committee: Option<String>,
}

impl Recommendation {
    pub fn is_done(&self) -> bool {
        self.status.as_deref() == Some(crate::schema::recommendations::STATUS_DONE)
    }
}

/// Infrastructure cost line for a product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Consumption {
    pub id: i64,
    pub product_id: Option<i64>,
    pub tool: Option<String>,
    /// Hosting account identifier, resolved through the mapping table
    pub identifier: Option<String>,
    pub cost: f64,
    pub detail: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

/// Row of the product/hosting mapping table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostingMapping {
    pub id: i64,
    pub tool_identifier: String,
}
