//! Pending answer edits and their wire form

use serde_json::{Map, Value};

use crate::client::models::UpsertRecord;
use crate::models::Answer;
use crate::schema::responses;

/// Identity of an edit: one question within one audit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EditKey {
    pub audit_id: i64,
    pub question_id: i64,
}

/// A change to one question's response that has not been written yet
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEdit {
    pub audit_id: i64,
    pub question_id: i64,

    pub answer: Option<Answer>,

    pub comment: Option<String>,

    /// 0-100, only kept for [`Answer::No`]
    pub percentage: Option<u8>,

    /// Write the comment even when it is absent, clearing the stored one
    pub comment_modified: bool,

    /// Clear answer and comment
    pub reset: bool,
}

impl PendingEdit {
    pub fn new(audit_id: i64, question_id: i64) -> Self {
        Self {
            audit_id,
            question_id,
            answer: None,
            comment: None,
            percentage: None,
            comment_modified: false,
            reset: false,
        }
    }

    pub fn answer(audit_id: i64, question_id: i64, answer: Answer) -> Self {
        Self {
            answer: Some(answer),
            ..Self::new(audit_id, question_id)
        }
    }

    pub fn reset(audit_id: i64, question_id: i64) -> Self {
        Self {
            reset: true,
            ..Self::new(audit_id, question_id)
        }
    }

    /// Set the comment. An empty comment clears the stored one.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        let comment = comment.into();
        self.comment = (!comment.is_empty()).then_some(comment);
        self.comment_modified = true;
        self
    }

    pub fn with_percentage(mut self, percentage: u8) -> Self {
        self.percentage = Some(percentage.min(100));
        self
    }

    pub fn key(&self) -> EditKey {
        EditKey {
            audit_id: self.audit_id,
            question_id: self.question_id,
        }
    }

    /// Percentage to store: the given value for "No", zero for any other
    /// answer or a reset.
    pub fn effective_percentage(&self) -> u8 {
        match self.answer {
            _ if self.reset => 0,
            Some(Answer::No) | None => self.percentage.unwrap_or(0).min(100),
            Some(_) => 0,
        }
    }

    /// Upsert row for the responses table, matched on audit and question.
    pub fn to_upsert_record(&self) -> UpsertRecord {
        let mut require = Map::new();
        require.insert(responses::AUDIT.to_string(), Value::from(self.audit_id));
        require.insert(responses::QUESTION.to_string(), Value::from(self.question_id));

        let mut fields = Map::new();
        if self.answer.is_some() || self.reset {
            let answer = self
                .answer
                .filter(|_| !self.reset)
                .map(|a| Value::from(a.as_wire()))
                .unwrap_or(Value::Null);
            fields.insert(responses::ANSWER.to_string(), answer);
        }
        if self.comment.is_some() || self.reset || self.comment_modified {
            // A reset stores an empty comment rather than clearing the cell.
            let comment = match &self.comment {
                _ if self.reset => Value::from(""),
                Some(comment) => Value::from(comment.as_str()),
                None => Value::Null,
            };
            fields.insert(responses::COMMENT.to_string(), comment);
        }
        fields.insert(
            responses::PERCENTAGE.to_string(),
            Value::from(self.effective_percentage()),
        );

        UpsertRecord { require, fields }
    }
}

/// Combine a new edit with the one already pending for the same key.
///
/// A pending reset is kept and the incoming edit dropped; otherwise the
/// incoming edit replaces the pending one.
pub fn merge_edit(existing: Option<PendingEdit>, incoming: PendingEdit) -> PendingEdit {
    match existing {
        Some(existing) if existing.reset => existing,
        _ => incoming,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields_of(edit: &PendingEdit) -> Value {
        Value::Object(edit.to_upsert_record().fields)
    }

    #[test]
    fn test_no_answer_with_percentage_and_comment() {
        let edit = PendingEdit::answer(1, 1, Answer::No)
            .with_percentage(50)
            .with_comment("needs work");

        assert_eq!(
            serde_json::to_value(edit.to_upsert_record()).unwrap(),
            json!({
                "require": {"Audit": 1, "Question": 1},
                "fields": {"Reponse": "Non", "Commentaires_Details": "needs work", "Pourcentage": 50}
            })
        );
    }

    #[test]
    fn test_non_no_answer_sends_zero_percentage() {
        let edit = PendingEdit::answer(1, 2, Answer::Yes).with_percentage(70);
        assert_eq!(fields_of(&edit), json!({"Reponse": "Oui", "Pourcentage": 0}));
    }

    #[test]
    fn test_reset_clears_answer_and_comment() {
        let edit = PendingEdit::reset(3, 4);
        assert_eq!(
            fields_of(&edit),
            json!({"Reponse": null, "Commentaires_Details": "", "Pourcentage": 0})
        );
    }

    #[test]
    fn test_reset_ignores_comment_set_on_same_edit() {
        let edit = PendingEdit::reset(3, 4).with_comment("stale");
        assert_eq!(fields_of(&edit)["Commentaires_Details"], json!(""));
    }

    #[test]
    fn test_comment_only_edit() {
        let edit = PendingEdit::new(1, 1).with_comment("later");
        assert_eq!(
            fields_of(&edit),
            json!({"Commentaires_Details": "later", "Pourcentage": 0})
        );
    }

    #[test]
    fn test_cleared_comment_is_written_as_null() {
        let edit = PendingEdit::answer(1, 1, Answer::Unknown).with_comment("");
        assert!(edit.comment_modified);
        assert_eq!(
            fields_of(&edit),
            json!({"Reponse": "Ne sais pas", "Commentaires_Details": null, "Pourcentage": 0})
        );
    }

    #[test]
    fn test_percentage_clamped() {
        let edit = PendingEdit::answer(1, 1, Answer::No).with_percentage(250);
        assert_eq!(edit.effective_percentage(), 100);
    }

    #[test]
    fn test_merge_keeps_pending_reset() {
        let reset = PendingEdit::reset(1, 1);
        let later = PendingEdit::answer(1, 1, Answer::Yes);
        assert_eq!(merge_edit(Some(reset.clone()), later), reset);
    }

    #[test]
    fn test_merge_later_reset_overwrites() {
        let earlier = PendingEdit::answer(1, 1, Answer::Yes);
        let reset = PendingEdit::reset(1, 1);
        assert_eq!(merge_edit(Some(earlier), reset.clone()), reset);
    }

    #[test]
    fn test_merge_last_edit_wins() {
        let first = PendingEdit::answer(1, 1, Answer::Yes);
        let second = PendingEdit::answer(1, 1, Answer::NotApplicable);
        assert_eq!(merge_edit(Some(first), second.clone()), second);
        assert_eq!(merge_edit(None, second.clone()), second);
    }
}
