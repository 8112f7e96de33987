/// Pipeline-level errors. `InvalidRequest` is the only error `ask`
/// surfaces to its caller; everything else degrades in-stage.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },
}
