//! Questions table and questionnaire assembly

use std::collections::HashMap;

use super::Store;
use crate::client::{GristApi, RecordQuery, SortOrder};
use crate::error::Result;
use crate::models::{Category, Importance, Question, Questionnaire, Response};
use crate::schema::questions;

fn by_question(responses: &[Response]) -> HashMap<i64, &Response> {
    responses.iter().map(|r| (r.question_id, r)).collect()
}

impl<C: GristApi + 'static> Store<C> {
    /// Validated questions grouped by category, in first-seen order, each
    /// carrying its current and previous response.
    pub async fn find_questions(
        &self,
        current: &[Response],
        previous: &[Response],
    ) -> Result<Vec<Category>> {
        let query = RecordQuery::new()
            .filter_eq(questions::STATUS, questions::STATUS_VALIDATED)
            .sort_by("manualSort", SortOrder::Asc);
        let records = self.client.get_records(questions::TABLE, &query).await?;

        let current = by_question(current);
        let previous = by_question(previous);

        let mut categories: Vec<Category> = Vec::new();
        for record in &records {
            let title = record.str_field(questions::CATEGORY).unwrap_or_default();
            let question = Question {
                id: record.id,
                text: record.str_field(questions::QUESTION).unwrap_or_default(),
                tooltip: record.str_field(questions::TOOLTIP),
                importance: record
                    .str_field(questions::IMPORTANCE)
                    .and_then(|i| Importance::parse(&i)),
                response: current.get(&record.id).map(|r| (*r).clone()),
                previous_response: previous.get(&record.id).map(|r| (*r).clone()),
            };

            match categories.iter_mut().find(|c| c.title == title) {
                Some(category) => category.questions.push(question),
                None => categories.push(Category {
                    title,
                    questions: vec![question],
                }),
            }
        }

        Ok(categories)
    }

    /// Audit, previous audit and grouped questions for `hash`, or `None`
    /// when no such audit exists.
    pub async fn questionnaire(&self, hash: &str) -> Result<Option<Questionnaire>> {
        let Some(audit) = self.find_audit_by_hash(hash).await? else {
            return Ok(None);
        };

        let previous_audit = self.find_previous_audit(audit.product.id, hash).await?;

        let current = self.find_responses(audit.id).await?;
        let previous = match &previous_audit {
            Some(prev) => self.find_responses(prev.id).await?,
            None => Vec::new(),
        };

        let categories = self.find_questions(&current, &previous).await?;

        Ok(Some(Questionnaire {
            audit,
            previous_audit,
            categories,
        }))
    }
}
