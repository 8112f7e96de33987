//! FragmentStore — owns the connection pool, implements `IChunkStore` and
//! `IQueryLog`, runs migrations on open.

use std::path::Path;

use dossier_core::config::StorageConfig;
use dossier_core::errors::DossierResult;
use dossier_core::models::{Fragment, QueryLogEntry};
use dossier_core::traits::{IChunkStore, IQueryLog};

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries;

/// The fragment store. Read-mostly: the pipeline only hydrates and
/// searches; writes exist for the ingestion pipeline and for tests.
pub struct FragmentStore {
    pool: ConnectionPool,
}

impl FragmentStore {
    /// Open a store backed by a file on disk.
    pub fn open(path: &Path) -> DossierResult<Self> {
        Self::open_with_config(path, &StorageConfig::default())
    }

    /// Open with explicit storage configuration.
    pub fn open_with_config(path: &Path, config: &StorageConfig) -> DossierResult<Self> {
        let pool = ConnectionPool::open(path, config.read_pool_size, config.busy_timeout_ms)?;
        let store = Self { pool };
        store.initialize()?;
        Ok(store)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> DossierResult<Self> {
        let pool = ConnectionPool::open_in_memory(StorageConfig::default().busy_timeout_ms)?;
        let store = Self { pool };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> DossierResult<()> {
        self.pool
            .writer
            .with_conn(|conn| migrations::run_migrations(conn))
    }

    /// Insert a single fragment (ingestion/test seam).
    pub fn insert_fragment(&self, fragment: &Fragment) -> DossierResult<()> {
        self.pool
            .writer
            .with_conn(|conn| queries::fragment_ops::insert_fragment(conn, fragment))
    }

    /// Insert a batch of fragments in one transaction.
    pub fn insert_fragments(&self, fragments: &[Fragment]) -> DossierResult<usize> {
        self.pool
            .writer
            .with_conn(|conn| queries::fragment_ops::insert_fragments(conn, fragments))
    }

    /// Store a case's merged parsed text (ingestion/test seam).
    pub fn set_merged_text(&self, case_id: &str, text: &str) -> DossierResult<()> {
        self.pool
            .writer
            .with_conn(|conn| queries::merged_ops::set_merged_text(conn, case_id, text))
    }

    /// Most recent query-log entries for a case, newest first.
    pub fn recent_queries(&self, case_id: &str, limit: usize) -> DossierResult<Vec<QueryLogEntry>> {
        self.pool
            .with_reader(|conn| queries::query_log_ops::recent_entries(conn, case_id, limit))
    }
}

impl IChunkStore for FragmentStore {
    fn get_by_ids(&self, ids: &[String]) -> DossierResult<Vec<Fragment>> {
        self.pool
            .with_reader(|conn| queries::fragment_ops::get_by_ids(conn, ids))
    }

    fn lexical_search(
        &self,
        case_id: &str,
        query: &str,
        limit: usize,
    ) -> DossierResult<Vec<Fragment>> {
        self.pool
            .with_reader(|conn| queries::fragment_ops::lexical_search(conn, case_id, query, limit))
    }

    fn merged_text(&self, case_id: &str) -> DossierResult<Option<String>> {
        self.pool
            .with_reader(|conn| queries::merged_ops::merged_text(conn, case_id))
    }
}

impl IQueryLog for FragmentStore {
    fn append(&self, entry: &QueryLogEntry) -> DossierResult<()> {
        self.pool
            .writer
            .with_conn(|conn| queries::query_log_ops::append_entry(conn, entry))
    }
}
