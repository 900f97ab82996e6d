use serde_json::Value;
use thiserror::Error;

use crate::models::Riddle;

const CODE_FENCE: &str = "```";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unexpected chat-completion envelope: {0}")]
    MalformedEnvelope(String),

    #[error("Riddle payload is not a valid riddle array: {0}")]
    MalformedPayload(String),
}

impl ParseError {
    pub fn kind(&self) -> &'static str {
        match self {
            ParseError::MalformedEnvelope(_) => "malformed_envelope",
            ParseError::MalformedPayload(_) => "malformed_payload",
        }
    }
}

/// Extracts the riddle list from a raw chat-completion response body.
///
/// Reads `choices[0].message.content`, unwraps a double-encoded string or a
/// markdown fence around it, then decodes the remainder as `[Riddle, ...]`.
/// Any failure discards the whole batch.
pub fn parse(raw: &str) -> Result<Vec<Riddle>, ParseError> {
    let content = extract_content(raw)?;
    tracing::debug!(content = %content, "Processing chat-completion content");

    let payload = clean_payload(&content);
    serde_json::from_str::<Vec<Riddle>>(&payload)
        .map_err(|e| ParseError::MalformedPayload(e.to_string()))
}

fn extract_content(raw: &str) -> Result<String, ParseError> {
    let envelope: Value = serde_json::from_str(raw)
        .map_err(|e| ParseError::MalformedEnvelope(format!("invalid JSON: {}", e)))?;

    let first_choice = envelope
        .get("choices")
        .and_then(|v| v.as_array())
        .ok_or_else(|| ParseError::MalformedEnvelope("missing choices".to_string()))?
        .first()
        .ok_or_else(|| ParseError::MalformedEnvelope("empty choices".to_string()))?;

    let message = first_choice
        .get("message")
        .ok_or_else(|| ParseError::MalformedEnvelope("missing message".to_string()))?;

    message
        .get("content")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| ParseError::MalformedEnvelope("missing content".to_string()))
}

/// Applies the cleanup policy in order: strip outer quotes (unescaping
/// embedded `\"`), then cut a fenced payload down to its `[...]` span.
fn clean_payload(content: &str) -> String {
    let mut payload = content.to_string();

    if payload.len() >= 2 && payload.starts_with('"') && payload.ends_with('"') {
        payload = payload[1..payload.len() - 1].replace("\\\"", "\"");
    }

    if payload.contains(CODE_FENCE) {
        if let (Some(start), Some(end)) = (payload.find('['), payload.rfind(']')) {
            if end > start {
                return payload[start..=end].to_string();
            }
        }
    }

    payload
}
