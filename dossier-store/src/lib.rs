//! # dossier-store
//!
//! SQLite-backed fragment store. Implements `IChunkStore` (batch hydration,
//! case-scoped FTS5 lexical search, merged text) and `IQueryLog` (append-only
//! question/answer log). Fragment rows are produced by the ingestion
//! pipeline; this crate only owns their persistence and retrieval.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::FragmentStore;

use dossier_core::errors::{DossierError, StoreError};

/// Convert a SQLite failure message into a `DossierError`.
pub(crate) fn to_store_err(message: String) -> DossierError {
    StoreError::SqliteError { message }.into()
}
