//! Collaborator contracts. The pipeline depends only on these traits;
//! concrete backends live in `dossier-store`, `dossier-embeddings`, and
//! `dossier-backends`.

mod chunk_store;
mod embedding;
mod generation;
mod query_log;
mod rerank;
mod vector_index;

pub use chunk_store::IChunkStore;
pub use embedding::IEmbeddingProvider;
pub use generation::IGenerationClient;
pub use query_log::IQueryLog;
pub use rerank::IRerankClient;
pub use vector_index::{IVectorIndex, VectorHit};
