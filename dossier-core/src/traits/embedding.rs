use crate::errors::DossierResult;

/// Embedding generation provider. Vectors are L2-normalized.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text, returning a normalized vector of floats.
    fn embed(&self, text: &str) -> DossierResult<Vec<f32>>;

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider is currently available.
    fn is_available(&self) -> bool;
}
