use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatResponse {
    pub correct_answers: u32,
    pub current_streak: u32,
    pub hints_used: u32,
    pub current_riddle_index: u32,
}

/// Progress snapshot pushed by the client. Accepted and not stored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveStatRequest {
    #[serde(default)]
    pub user_id: String,
    pub correct_answers: Option<u32>,
    pub current_streak: Option<u32>,
    pub current_riddle_index: Option<u32>,
    pub last_updated: Option<DateTime<Utc>>,
}
