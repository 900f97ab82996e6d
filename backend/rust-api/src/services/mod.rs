use std::sync::Arc;

use crate::config::Config;
use crate::services::{
    riddle_cache::RiddleCache,
    riddle_service::RiddleService,
    upstream_client::{CompletionClient, OpenAiClient},
};

pub struct AppState {
    pub config: Config,
    pub riddle_cache: Arc<RiddleCache>,
    pub riddle_service: RiddleService,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = OpenAiClient::new(&config.upstream)?;

        tracing::info!(
            url = %config.upstream.api_url,
            model = %config.upstream.model,
            configured = config.upstream.is_configured(),
            "Chat-completion client initialized"
        );

        Ok(Self::with_client(config, Arc::new(client)))
    }

    /// Builds the state around an arbitrary completion client.
    pub fn with_client(config: Config, client: Arc<dyn CompletionClient>) -> Self {
        let riddle_cache = Arc::new(RiddleCache::new());
        let riddle_service = RiddleService::new(
            client,
            Arc::clone(&riddle_cache),
            config.upstream.model.clone(),
        );

        Self {
            config,
            riddle_cache,
            riddle_service,
        }
    }
}

pub mod cache_sweeper;
pub mod prompt_builder;
pub mod response_parser;
pub mod riddle_cache;
pub mod riddle_service;
pub mod upstream_client;
