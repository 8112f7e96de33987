use serde::{Deserialize, Serialize};

use super::defaults;

/// Cross-encoder rerank client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RerankConfig {
    /// Base URL of the rerank service.
    pub endpoint: String,
    /// Request timeout (seconds).
    pub timeout_secs: u64,
    /// Max candidates sent to the reranker in one batch.
    pub rerank_cap: usize,
}

impl Default for RerankConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::DEFAULT_RERANK_ENDPOINT.to_string(),
            timeout_secs: defaults::DEFAULT_RERANK_TIMEOUT_SECS,
            rerank_cap: defaults::DEFAULT_RERANK_CAP,
        }
    }
}
