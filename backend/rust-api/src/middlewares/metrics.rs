use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

use crate::metrics::{HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION_SECONDS};

/// Path segments that are part of the route itself, never an identifier.
const STATIC_SEGMENTS: &[&str] = &[
    "", "api", "riddles", "stats", "submit", "update", "health", "metrics",
];

/// Records request count and latency per method, normalized path and status
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = normalize_path(req.uri().path());

    let response = next.run(req).await;

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    HTTP_REQUESTS_TOTAL
        .with_label_values(&[&method, &path, &status])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[&method, &path])
        .observe(duration);

    response
}

/// Normalize URL path to avoid cardinality explosion.
/// User ids under `/api/riddles` and `/api/stats` collapse to `{userId}`.
fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').collect();
    let under_api = segments.get(1) == Some(&"api");

    segments
        .iter()
        .enumerate()
        .map(|(idx, segment)| {
            if under_api && idx == 3 && !STATIC_SEGMENTS.contains(segment) {
                "{userId}"
            } else if is_uuid_like(segment) || is_numeric_id(segment) {
                "{id}"
            } else {
                *segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Check if string looks like a UUID
fn is_uuid_like(s: &str) -> bool {
    // UUID format: 8-4-4-4-12 hex characters
    if s.len() != 36 {
        return false;
    }
    s.chars().all(|c| c.is_ascii_hexdigit() || c == '-')
}

fn is_numeric_id(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
