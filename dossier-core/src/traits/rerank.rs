use crate::errors::DossierResult;

/// Cross-encoder relevance scoring of (query, text) pairs.
pub trait IRerankClient: Send + Sync {
    /// Score every text against the query. The returned vector has the
    /// same length and order as `texts`.
    fn score(&self, query: &str, texts: &[String]) -> DossierResult<Vec<f64>>;
}
