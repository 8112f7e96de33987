use serde::{Deserialize, Serialize};

use super::defaults;

/// Generation backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Base URL of the OpenAI-compatible endpoint (without `/chat/completions`).
    pub endpoint: String,
    /// Model name sent with each request.
    pub model: String,
    /// Completion token cap per request.
    pub max_tokens: u32,
    /// Request timeout (seconds).
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::DEFAULT_GENERATION_ENDPOINT.to_string(),
            model: defaults::DEFAULT_GENERATION_MODEL.to_string(),
            max_tokens: defaults::DEFAULT_MAX_TOKENS,
            timeout_secs: defaults::DEFAULT_GENERATION_TIMEOUT_SECS,
        }
    }
}
