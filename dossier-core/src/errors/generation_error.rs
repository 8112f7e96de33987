/// Generation backend errors. Recoverable: the composer falls back to an
/// extractive summary of the top candidates.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generation endpoint unreachable: {reason}")]
    Unreachable { reason: String },

    #[error("generation request rejected with status {status}")]
    Rejected { status: u16 },

    #[error("malformed completion response: {reason}")]
    MalformedResponse { reason: String },
}
