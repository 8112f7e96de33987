//! # dossier-backends
//!
//! Blocking HTTP clients for the three external pipeline backends: the
//! vector index (ANN search), the cross-encoder rerank service, and the
//! OpenAI-compatible generation endpoint. Every client carries a bounded
//! timeout; a timeout is treated identically to a hard failure and the
//! caller's stage fallback fires.

pub mod generation;
pub mod protocol;
pub mod rerank;
pub mod vector_index;

pub use generation::HttpGenerationClient;
pub use rerank::HttpRerankClient;
pub use vector_index::HttpVectorIndex;
