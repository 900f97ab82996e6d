#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, StatusCode},
    response::Response,
    routing::post,
    Router,
};
use http_body_util::BodyExt;
use riddles_api::{
    config::{Config, UpstreamConfig},
    create_router,
    models::chat::AiChatRequest,
    services::{
        upstream_client::{CompletionClient, UpstreamError},
        AppState,
    },
};
use serde_json::json;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

pub const FENCED_CONTENT: &str =
    "```json\n[{\"id\":\"r1\",\"hints\":[\"a\",\"b\",\"c\"],\"question\":\"Q\",\"answer\":\"A\"}]\n```";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Wraps riddle content in a chat-completion envelope
pub fn envelope(content: &str) -> String {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

/// Completion client that replays scripted responses in order, repeating the last one
pub struct ScriptedClient {
    responses: Vec<Result<String, UpstreamError>>,
    calls: AtomicUsize,
}

impl ScriptedClient {
    pub fn new(responses: Vec<Result<String, UpstreamError>>) -> Arc<Self> {
        assert!(!responses.is_empty());
        Arc::new(Self {
            responses,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn always(response: Result<String, UpstreamError>) -> Arc<Self> {
        Self::new(vec![response])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn fetch_completion(&self, _request: &AiChatRequest) -> Result<String, UpstreamError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let idx = n.min(self.responses.len() - 1);
        self.responses[idx].clone()
    }
}

pub fn test_config(api_url: &str) -> Config {
    Config {
        upstream: UpstreamConfig {
            api_key: "sk-test".to_string(),
            api_url: api_url.to_string(),
            ..UpstreamConfig::default()
        },
        bind_addr: "127.0.0.1:0".to_string(),
    }
}

pub fn create_test_app(client: Arc<dyn CompletionClient>) -> (Router, Arc<AppState>) {
    init_tracing();

    let state = Arc::new(AppState::with_client(
        test_config("http://127.0.0.1:9/v1/chat/completions"),
        client,
    ));
    (create_router(Arc::clone(&state)), state)
}

pub async fn body_bytes(response: Response<Body>) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

pub struct MockUpstream {
    pub url: String,
    pub captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Serves `POST /v1/chat/completions` on a random local port with a fixed reply
pub async fn spawn_mock_upstream(status: StatusCode, reply: String) -> MockUpstream {
    let captured: Arc<Mutex<Vec<CapturedRequest>>> = Arc::new(Mutex::new(Vec::new()));

    let handler = {
        let captured = Arc::clone(&captured);
        move |headers: HeaderMap, raw: Bytes| {
            let captured = Arc::clone(&captured);
            let reply = reply.clone();
            async move {
                let body = serde_json::from_slice(&raw).unwrap_or(serde_json::Value::Null);
                captured
                    .lock()
                    .unwrap()
                    .push(CapturedRequest { headers, body });
                (status, reply)
            }
        }
    };

    let app = Router::new().route("/v1/chat/completions", post(handler));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockUpstream {
        url: format!("http://{}/v1/chat/completions", addr),
        captured,
    }
}

/// URL of a local port with nothing listening on it
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/v1/chat/completions", addr)
}
