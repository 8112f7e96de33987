//! Error taxonomy for the dossier workspace.
//!
//! One enum per subsystem, folded into the umbrella `DossierError`.
//! Backend failures (index, rerank, generation, embedding) are recoverable
//! at their pipeline stage and never reach the caller of `ask`.

mod embedding_error;
mod generation_error;
mod index_error;
mod pipeline_error;
mod rerank_error;
mod store_error;

pub use embedding_error::EmbeddingError;
pub use generation_error::GenerationError;
pub use index_error::IndexError;
pub use pipeline_error::PipelineError;
pub use rerank_error::RerankError;
pub use store_error::StoreError;

/// Umbrella error for the whole workspace.
#[derive(Debug, thiserror::Error)]
pub enum DossierError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Rerank(#[from] RerankError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Workspace-wide result alias.
pub type DossierResult<T> = Result<T, DossierError>;
