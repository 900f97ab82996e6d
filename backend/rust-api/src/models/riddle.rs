use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A generated riddle. Equality and hashing cover every field so a batch
/// collapses into a set by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Riddle {
    pub id: String,
    /// Three hints, from subtle to direct.
    pub hints: Vec<String>,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RiddleResponse {
    pub riddles: HashSet<Riddle>,
}

impl RiddleResponse {
    pub fn empty() -> Self {
        Self {
            riddles: HashSet::new(),
        }
    }
}

/// Request to submit an answer for a riddle
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserAnswerSubmissionRequest {
    #[serde(default)]
    pub user_id: String,

    #[serde(default)]
    pub riddle_id: String,

    #[validate(length(min = 1, message = "Answer must not be empty"))]
    pub answer: String,

    /// Seconds spent on the riddle
    pub time_spent: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserAnswerSubmissionResponse {
    pub correct: bool,
    pub feedback: String,
}
