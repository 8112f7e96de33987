//! Embedding providers.

mod http_provider;

pub use http_provider::HttpEmbeddingProvider;

use dossier_core::config::EmbeddingConfig;
use dossier_core::errors::DossierResult;
use dossier_core::traits::IEmbeddingProvider;

/// Build the configured provider.
pub fn create_provider(config: &EmbeddingConfig) -> DossierResult<Box<dyn IEmbeddingProvider>> {
    Ok(Box::new(HttpEmbeddingProvider::new(config)?))
}
