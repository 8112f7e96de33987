/// Cross-encoder rerank client errors. Recoverable: the reranker
/// degrades to pass-through ordering.
#[derive(Debug, thiserror::Error)]
pub enum RerankError {
    #[error("rerank service unreachable: {reason}")]
    Unreachable { reason: String },

    #[error("malformed rerank response: {reason}")]
    MalformedResponse { reason: String },

    #[error("score count mismatch: sent {sent} texts, got {got} scores")]
    ScoreCountMismatch { sent: usize, got: usize },
}
