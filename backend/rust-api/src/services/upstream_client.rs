use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::{config::UpstreamConfig, metrics::track_upstream_call, models::chat::AiChatRequest};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    #[error("Failed to reach chat-completion API: {0}")]
    Transport(String),

    #[error("Chat-completion API returned status {status}: {body}")]
    BadStatus { status: u16, body: String },
}

impl UpstreamError {
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Transport(_) => "transport",
            UpstreamError::BadStatus { .. } => "bad_status",
        }
    }
}

/// Sends a chat-completion request and hands back the raw response body.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn fetch_completion(&self, request: &AiChatRequest) -> Result<String, UpstreamError>;
}

/// OpenAI-compatible HTTP client. One POST per call, no retries.
pub struct OpenAiClient {
    http_client: Client,
    api_url: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    async fn send(&self, request: &AiChatRequest) -> Result<String, UpstreamError> {
        let response = self
            .http_client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Error sending request to chat-completion API");
                UpstreamError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!(
                error = %e,
                status = status.as_u16(),
                "Failed to read upstream response body"
            );
            UpstreamError::Transport(e.to_string())
        })?;

        if status != StatusCode::OK {
            tracing::warn!(
                status = status.as_u16(),
                body = %body,
                "Received non-OK response from chat-completion API"
            );
            return Err(UpstreamError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(status = status.as_u16(), "Chat-completion response received");
        tracing::info!(body = %body, "Chat-completion response body");

        Ok(body)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn fetch_completion(&self, request: &AiChatRequest) -> Result<String, UpstreamError> {
        track_upstream_call(self.send(request), |result| match result {
            Ok(_) => "success",
            Err(err) => err.kind(),
        })
        .await
    }
}
