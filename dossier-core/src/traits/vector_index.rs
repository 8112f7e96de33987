use crate::errors::DossierResult;

/// One ANN hit: a fragment id and its similarity score
/// (inner product over normalized vectors).
#[derive(Debug, Clone, PartialEq)]
pub struct VectorHit {
    pub fragment_id: String,
    pub score: f64,
}

/// Approximate nearest-neighbor search over a named collection.
pub trait IVectorIndex: Send + Sync {
    /// Whether the collection exists. A missing collection is `Ok(false)`,
    /// not an error — per-case collections are created lazily by the
    /// indexing pipeline.
    fn has_collection(&self, name: &str) -> DossierResult<bool>;

    /// Top-`limit` hits for the query vector, ranked by similarity.
    fn search(
        &self,
        collection: &str,
        query_vector: &[f32],
        limit: usize,
    ) -> DossierResult<Vec<VectorHit>>;
}
