//! Questionnaire display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{EMPTY, truncate_string};
use crate::models::{Question, Questionnaire, Response};

const QUESTION_WIDTH: usize = 60;

/// One questionnaire line with the current and previous answers
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct QuestionDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "CATEGORY")]
    pub category: String,

    #[tabled(rename = "PRIO")]
    pub importance: String,

    #[tabled(rename = "QUESTION")]
    pub question: String,

    #[tabled(rename = "ANSWER")]
    pub answer: String,

    #[tabled(rename = "PREVIOUS")]
    pub previous: String,
}

/// "Non (40%)" for partial answers, the plain label otherwise
fn describe(response: Option<&Response>) -> String {
    let Some(answer) = response.and_then(|r| r.answer) else {
        return EMPTY.to_string();
    };
    match response.and_then(|r| r.percentage) {
        Some(pct) if pct > 0 => format!("{} ({}%)", answer, pct),
        _ => answer.to_string(),
    }
}

impl QuestionDisplay {
    pub fn new(category: &str, question: &Question) -> Self {
        Self {
            id: question.id,
            category: category.to_string(),
            importance: question
                .importance
                .map(|i| i.to_string())
                .unwrap_or_else(|| EMPTY.to_string()),
            question: truncate_string(&question.text, QUESTION_WIDTH),
            answer: describe(question.response.as_ref()),
            previous: describe(question.previous_response.as_ref()),
        }
    }

    /// Flatten a questionnaire into rows, in questionnaire order
    pub fn rows(questionnaire: &Questionnaire) -> Vec<Self> {
        questionnaire
            .categories
            .iter()
            .flat_map(|c| c.questions.iter().map(|q| Self::new(&c.title, q)))
            .collect()
    }
}
