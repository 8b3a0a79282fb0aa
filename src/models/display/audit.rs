//! Audit display model

use serde::Serialize;
use tabled::Tabled;

use super::common::format_date;
use crate::models::Audit;

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct AuditDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "HASH")]
    pub hash: String,

    #[tabled(rename = "PRODUCT")]
    pub product: String,

    /// Investment committee date
    #[tabled(rename = "COMMITTEE")]
    pub committee_date: String,

    #[tabled(rename = "STATUS")]
    pub status: String,
}

impl From<&Audit> for AuditDisplay {
    fn from(audit: &Audit) -> Self {
        let status = if audit.closed {
            format!("closed {}", format_date(audit.closed_at))
        } else {
            "open".to_string()
        };

        Self {
            id: audit.id,
            hash: audit.hash.clone(),
            product: audit.product.name.clone(),
            committee_date: format_date(audit.committee_date),
            status,
        }
    }
}

impl From<Audit> for AuditDisplay {
    fn from(audit: Audit) -> Self {
        Self::from(&audit)
    }
}
