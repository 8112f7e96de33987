use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Base URL of the embedding service.
    pub endpoint: String,
    /// Model name sent with each request.
    pub model: String,
    /// Expected embedding dimensionality.
    pub dimensions: usize,
    /// Request timeout (seconds).
    pub timeout_secs: u64,
    /// Max entries in the in-memory embedding cache.
    pub l1_cache_size: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::DEFAULT_EMBED_ENDPOINT.to_string(),
            model: defaults::DEFAULT_EMBED_MODEL.to_string(),
            dimensions: defaults::DEFAULT_EMBED_DIMENSIONS,
            timeout_secs: defaults::DEFAULT_EMBED_TIMEOUT_SECS,
            l1_cache_size: defaults::DEFAULT_EMBED_CACHE_SIZE,
        }
    }
}
