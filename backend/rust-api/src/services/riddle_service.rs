use std::{collections::HashSet, sync::Arc};

use thiserror::Error;

use crate::{
    metrics::RIDDLE_FETCHES_TOTAL,
    models::Riddle,
    services::{
        prompt_builder::build_riddle_request_for,
        response_parser::{self, ParseError},
        riddle_cache::{RiddleCache, SHARED_CACHE_KEY},
        upstream_client::{CompletionClient, UpstreamError},
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RiddleFetchError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl RiddleFetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            RiddleFetchError::Upstream(err) => err.kind(),
            RiddleFetchError::Parse(err) => err.kind(),
        }
    }
}

/// Generates riddle batches: prompt, upstream call, parse, cache.
pub struct RiddleService {
    client: Arc<dyn CompletionClient>,
    cache: Arc<RiddleCache>,
    model: String,
}

impl RiddleService {
    pub fn new(client: Arc<dyn CompletionClient>, cache: Arc<RiddleCache>, model: String) -> Self {
        Self {
            client,
            cache,
            model,
        }
    }

    /// Fail-open fetch: any failure is logged and yields an empty set.
    pub async fn fetch_riddles(&self) -> HashSet<Riddle> {
        match self.try_fetch_riddles().await {
            Ok(riddles) => {
                RIDDLE_FETCHES_TOTAL.with_label_values(&["success"]).inc();
                riddles
            }
            Err(err) => {
                RIDDLE_FETCHES_TOTAL.with_label_values(&[err.kind()]).inc();
                tracing::warn!(
                    kind = err.kind(),
                    error = %err,
                    "Riddle fetch failed, returning empty set"
                );
                HashSet::new()
            }
        }
    }

    /// Always calls upstream; the cache is written here but never read.
    pub async fn try_fetch_riddles(&self) -> Result<HashSet<Riddle>, RiddleFetchError> {
        let request = build_riddle_request_for(&self.model);
        let raw = self.client.fetch_completion(&request).await?;
        let riddles = response_parser::parse(&raw)?;

        tracing::info!(count = riddles.len(), riddles = ?riddles, "Processed riddles");

        let riddles: HashSet<Riddle> = riddles.into_iter().collect();
        if !riddles.is_empty() {
            self.cache.put(SHARED_CACHE_KEY, riddles.clone());
        }

        Ok(riddles)
    }
}
