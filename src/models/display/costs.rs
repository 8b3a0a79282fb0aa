//! Recommendation, consumption and hosting display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{format_date, or_dash, truncate_string};
use crate::models::{Consumption, HostingMapping, Recommendation};

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct RecommendationDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "PRIORITY")]
    pub priority: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "COMMITTEE")]
    pub committee: String,

    #[tabled(rename = "RECOMMENDATION")]
    pub text: String,
}

impl From<Recommendation> for RecommendationDisplay {
    fn from(rec: Recommendation) -> Self {
        Self {
            id: rec.id,
            priority: or_dash(rec.priority.as_deref()),
            status: or_dash(rec.status.as_deref()),
            committee: or_dash(rec.committee.as_deref()),
            text: truncate_string(&rec.text, 70),
        }
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ConsumptionDisplay {
    #[tabled(rename = "DATE")]
    pub date: String,

    #[tabled(rename = "TOOL")]
    pub tool: String,

    #[tabled(rename = "IDENTIFIER")]
    pub identifier: String,

    /// Euros, two decimals
    #[tabled(rename = "COST")]
    pub cost: String,

    #[tabled(rename = "DETAIL")]
    pub detail: String,
}

impl From<Consumption> for ConsumptionDisplay {
    fn from(c: Consumption) -> Self {
        Self {
            date: format_date(c.date),
            tool: or_dash(c.tool.as_deref()),
            identifier: or_dash(c.identifier.as_deref()),
            cost: format!("{:.2}", c.cost),
            detail: or_dash(c.detail.as_deref()),
        }
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct HostingDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "IDENTIFIER")]
    pub identifier: String,
}

impl From<HostingMapping> for HostingDisplay {
    fn from(mapping: HostingMapping) -> Self {
        Self {
            id: mapping.id,
            identifier: mapping.tool_identifier,
        }
    }
}
