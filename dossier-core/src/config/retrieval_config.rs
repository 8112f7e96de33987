use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrieval pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Candidates kept after reranking (the answer's evidence set).
    pub top_k: usize,
    /// Raw result cap for the lexical fallback search.
    pub lexical_cap: usize,
    /// Soft character ceiling for the assembled context.
    pub max_context_chars: usize,
    /// Per-candidate snippet truncation (characters).
    pub snippet_chars: usize,
    /// Head-truncation bound for the merged-text fallback (characters).
    pub merged_text_chars: usize,
    /// Per-candidate excerpt length in the extractive fallback answer.
    pub fallback_excerpt_chars: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: defaults::DEFAULT_TOP_K,
            lexical_cap: defaults::DEFAULT_LEXICAL_CAP,
            max_context_chars: defaults::DEFAULT_MAX_CONTEXT_CHARS,
            snippet_chars: defaults::DEFAULT_SNIPPET_CHARS,
            merged_text_chars: defaults::DEFAULT_MERGED_TEXT_CHARS,
            fallback_excerpt_chars: defaults::DEFAULT_FALLBACK_EXCERPT_CHARS,
        }
    }
}
