//! Responses table

use super::Store;
use crate::client::models::Record;
use crate::client::{GristApi, RecordQuery};
use crate::error::Result;
use crate::models::{Answer, Response};
use crate::schema::responses;

pub(super) fn response_from_record(record: &Record) -> Response {
    Response {
        id: Some(record.id),
        audit_id: record.i64_field(responses::AUDIT).unwrap_or_default(),
        question_id: record.i64_field(responses::QUESTION).unwrap_or_default(),
        answer: record
            .str_field(responses::ANSWER)
            .and_then(|a| Answer::from_wire(&a)),
        comment: record.str_field(responses::COMMENT),
        percentage: record
            .f64_field(responses::PERCENTAGE)
            .map(|p| p.round().clamp(0.0, 100.0) as u8),
    }
}

impl<C: GristApi + 'static> Store<C> {
    pub async fn find_responses(&self, audit_id: i64) -> Result<Vec<Response>> {
        let query = RecordQuery::new().filter_eq(responses::AUDIT, audit_id);
        let records = self.client.get_records(responses::TABLE, &query).await?;
        Ok(records.iter().map(response_from_record).collect())
    }

    pub async fn find_response(&self, audit_id: i64, question_id: i64) -> Result<Option<Response>> {
        let query = RecordQuery::new()
            .filter_eq(responses::AUDIT, audit_id)
            .filter_eq(responses::QUESTION, question_id);
        let records = self.client.get_records(responses::TABLE, &query).await?;
        Ok(records.first().map(response_from_record))
    }
}
