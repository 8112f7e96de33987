//! Workspace configuration: one struct per subsystem, all fields defaulted,
//! loadable from TOML with partial overrides.

pub mod defaults;

mod embedding_config;
mod generation_config;
mod index_config;
mod rerank_config;
mod retrieval_config;
mod storage_config;

pub use embedding_config::EmbeddingConfig;
pub use generation_config::GenerationConfig;
pub use index_config::IndexConfig;
pub use rerank_config::RerankConfig;
pub use retrieval_config::RetrievalConfig;
pub use storage_config::StorageConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{DossierResult, PipelineError};

/// Top-level configuration aggregating all subsystems.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DossierConfig {
    pub storage: StorageConfig,
    pub embedding: EmbeddingConfig,
    pub index: IndexConfig,
    pub rerank: RerankConfig,
    pub generation: GenerationConfig,
    pub retrieval: RetrievalConfig,
}

impl DossierConfig {
    /// Parse a TOML string. Missing sections and fields fall back to defaults.
    pub fn from_toml(s: &str) -> DossierResult<Self> {
        toml::from_str(s).map_err(|e| {
            PipelineError::InvalidConfig {
                reason: format!("parse error: {e}"),
            }
            .into()
        })
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &std::path::Path) -> DossierResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| PipelineError::InvalidConfig {
            reason: format!("read error: {e}"),
        })?;
        Self::from_toml(&raw)
    }
}
