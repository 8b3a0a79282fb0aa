//! Audit models

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::answer::Category;

/// Minimal product reference carried by an audit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRef {
    pub id: i64,
    pub name: String,
}

/// One investment-committee audit of a product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Audit {
    pub id: i64,
    pub hash: String,
    pub committee_date: Option<DateTime<Utc>>,
    pub closed: bool,
    pub closed_at: Option<DateTime<Utc>>,
    pub product: ProductRef,
}

/// Everything needed to fill in an audit
#[derive(Debug, Clone, Serialize)]
pub struct Questionnaire {
    pub audit: Audit,
    pub previous_audit: Option<Audit>,
    pub categories: Vec<Category>,
}

impl Questionnaire {
    pub fn question_count(&self) -> usize {
        self.categories.iter().map(|c| c.questions.len()).sum()
    }

    pub fn answered_count(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|c| &c.questions)
            .filter(|q| q.response.as_ref().is_some_and(|r| r.answer.is_some()))
            .count()
    }
}
