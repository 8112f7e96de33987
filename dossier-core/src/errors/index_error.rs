/// Vector-index client errors. All variants are recoverable: the
/// orchestrator degrades to lexical search when the index is unusable.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("vector index unreachable: {reason}")]
    Unreachable { reason: String },

    #[error("vector search failed: {reason}")]
    SearchFailed { reason: String },

    #[error("malformed index response: {reason}")]
    MalformedResponse { reason: String },
}
