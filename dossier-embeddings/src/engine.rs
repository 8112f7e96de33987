//! EmbeddingEngine — cache → provider → normalize → cache-put.
//!
//! Constructed once at startup and shared by reference; model lifecycle is
//! an initialization contract, not per-request logic.

use dossier_core::config::EmbeddingConfig;
use dossier_core::errors::DossierResult;
use dossier_core::traits::IEmbeddingProvider;
use tracing::{debug, info};

use crate::cache::EmbeddingCache;
use crate::norm;
use crate::providers;

/// The main embedding engine. Implements `IEmbeddingProvider` so it can be
/// used anywhere a provider is expected.
pub struct EmbeddingEngine {
    provider: Box<dyn IEmbeddingProvider>,
    cache: EmbeddingCache,
    dimensions: usize,
}

impl EmbeddingEngine {
    /// Create an engine from configuration.
    pub fn new(config: &EmbeddingConfig) -> DossierResult<Self> {
        let provider = providers::create_provider(config)?;
        let cache = EmbeddingCache::new(config.l1_cache_size);
        info!(
            provider = provider.name(),
            dims = config.dimensions,
            "EmbeddingEngine initialized"
        );
        Ok(Self {
            provider,
            cache,
            dimensions: config.dimensions,
        })
    }

    /// Engine with an explicit provider (tests, alternative backends).
    pub fn with_provider(provider: Box<dyn IEmbeddingProvider>, cache_size: u64) -> Self {
        let dimensions = provider.dimensions();
        Self {
            provider,
            cache: EmbeddingCache::new(cache_size),
            dimensions,
        }
    }

    /// Embed a question, returning a normalized vector.
    pub fn embed_query(&self, query: &str) -> DossierResult<Vec<f32>> {
        let hash = blake3::hash(query.as_bytes()).to_hex().to_string();

        if let Some(vec) = self.cache.get(&hash) {
            debug!(hash = %hash, "embedding cache hit");
            return Ok(vec);
        }

        let mut embedding = self.provider.embed(query)?;
        norm::validate_dimensions(&embedding, self.dimensions)?;
        norm::l2_normalize(&mut embedding);

        self.cache.insert(hash, embedding.clone());
        Ok(embedding)
    }
}

impl IEmbeddingProvider for EmbeddingEngine {
    fn embed(&self, text: &str) -> DossierResult<Vec<f32>> {
        self.embed_query(text)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        self.provider.name()
    }

    fn is_available(&self) -> bool {
        self.provider.is_available()
    }
}
