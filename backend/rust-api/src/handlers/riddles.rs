use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::{
    extractors::{bad_request, ValidatedJson},
    models::{
        riddle::{UserAnswerSubmissionRequest, UserAnswerSubmissionResponse},
        RiddleResponse,
    },
    services::AppState,
};

/// GET /api/riddles/{userId} - Generate a fresh riddle batch
///
/// Never fails on upstream problems: the batch is simply empty.
pub async fn fetch_riddles(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<RiddleResponse>, Response> {
    if user_id.trim().is_empty() {
        return Err(bad_request("Validation error: userId must not be empty".to_string()));
    }

    tracing::info!("Fetching riddles for user: {}", user_id);

    let riddles = state.riddle_service.fetch_riddles().await;
    Ok(Json(RiddleResponse { riddles }))
}

/// POST /api/riddles/submit - Accept an answer (not evaluated yet)
pub async fn submit_answer(
    ValidatedJson(req): ValidatedJson<UserAnswerSubmissionRequest>,
) -> Json<UserAnswerSubmissionResponse> {
    tracing::info!(
        user_id = %req.user_id,
        riddle_id = %req.riddle_id,
        time_spent = ?req.time_spent,
        "Answer submitted"
    );

    Json(UserAnswerSubmissionResponse {
        correct: false,
        feedback: String::new(),
    })
}
