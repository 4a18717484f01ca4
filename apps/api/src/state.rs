use std::sync::Arc;

use crate::config::Config;
use crate::document::embedding::{Embedder, HashingEmbedder};
use crate::screening::match_scoring::{KeywordMatchScorer, MatchScorer};
use crate::screening::service::RetrievalSettings;
use crate::screening::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Process-lifetime analysis sessions.
    pub store: Arc<SessionStore>,
    /// Pluggable match scorer. Default: KeywordMatchScorer.
    pub match_scorer: Arc<dyn MatchScorer>,
    /// Pluggable embedder. Default: HashingEmbedder (lexical, 100 buckets).
    pub embedder: Arc<dyn Embedder>,
}

impl AppState {
    /// State with an empty store and the default keyword scorer and hashing embedder.
    pub fn new(config: Config) -> Self {
        AppState {
            config,
            store: Arc::new(SessionStore::new()),
            match_scorer: Arc::new(KeywordMatchScorer),
            embedder: Arc::new(HashingEmbedder),
        }
    }

    pub fn retrieval_settings(&self) -> RetrievalSettings {
        RetrievalSettings {
            chunk_size: self.config.chunk_size,
            top_k: self.config.top_k,
        }
    }
}
