use axum::{body::Bytes, extract::Path, http::StatusCode, response::Response, Json};

use crate::{
    extractors::bad_request,
    models::stats::{SaveStatRequest, StatResponse},
};

/// GET /api/stats/{userId}
pub async fn fetch_stats(Path(user_id): Path<String>) -> Result<Json<StatResponse>, Response> {
    if user_id.trim().is_empty() {
        return Err(bad_request("Validation error: userId must not be empty".to_string()));
    }

    tracing::debug!("Fetching stats for user: {}", user_id);
    Ok(Json(StatResponse::default()))
}

/// POST /api/stats/update - no-op, any body is accepted
pub async fn update_stats(body: Bytes) -> StatusCode {
    match serde_json::from_slice::<SaveStatRequest>(&body) {
        Ok(req) => tracing::debug!(
            user_id = %req.user_id,
            correct_answers = ?req.correct_answers,
            current_streak = ?req.current_streak,
            "Stats update received"
        ),
        Err(e) => tracing::debug!(error = %e, "Ignoring unreadable stats update"),
    }

    StatusCode::OK
}
