//! Questionnaire answers and responses

use serde::{Deserialize, Serialize};
use std::fmt;

/// Answer to a questionnaire question, serialized with the labels
/// stored in the responses table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Answer {
    #[serde(rename = "Oui", alias = "yes")]
    #[value(alias = "oui")]
    Yes,

    #[serde(rename = "Non", alias = "no")]
    #[value(alias = "non")]
    No,

    #[serde(rename = "Ne sais pas", alias = "unknown")]
    #[value(alias = "nsp")]
    Unknown,

    #[serde(rename = "N/A", alias = "na")]
    #[value(name = "na", alias = "n/a")]
    NotApplicable,
}

impl Answer {
    pub fn as_wire(&self) -> &'static str {
        match self {
            Answer::Yes => "Oui",
            Answer::No => "Non",
            Answer::Unknown => "Ne sais pas",
            Answer::NotApplicable => "N/A",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "Oui" => Some(Answer::Yes),
            "Non" => Some(Answer::No),
            "Ne sais pas" => Some(Answer::Unknown),
            "N/A" => Some(Answer::NotApplicable),
            _ => None,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Question priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Importance {
    P0,
    P1,
    P2,
    P3,
}

impl Importance {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "P0" => Some(Importance::P0),
            "P1" => Some(Importance::P1),
            "P2" => Some(Importance::P2),
            "P3" => Some(Importance::P3),
            _ => None,
        }
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A stored answer for one question within one audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub audit_id: i64,
    pub question_id: i64,
    pub answer: Option<Answer>,
    pub comment: Option<String>,
    /// Share of the requirement met, only meaningful for [`Answer::No`]
    pub percentage: Option<u8>,
}

/// A questionnaire question with the current and previous audit's responses
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub tooltip: Option<String>,
    pub importance: Option<Importance>,
    pub response: Option<Response>,
    pub previous_response: Option<Response>,
}

/// Questions sharing a category, in questionnaire order
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub title: String,
    pub questions: Vec<Question>,
}
