//! Connection pool: one write connection plus a small round-robin pool of
//! read connections (WAL readers are never blocked by the writer).

pub mod pragmas;

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::Connection;

use dossier_core::errors::{DossierError, DossierResult, StoreError};

use crate::to_store_err;

/// Maximum number of read connections.
const MAX_POOL_SIZE: usize = 8;

/// The single write connection, serialized behind a mutex.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    fn open(path: &Path, busy_timeout_ms: u64) -> DossierResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_store_err(e.to_string()))?;
        pragmas::apply_pragmas(&conn, busy_timeout_ms)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn open_in_memory(busy_timeout_ms: u64) -> DossierResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_store_err(e.to_string()))?;
        pragmas::apply_read_pragmas(&conn, busy_timeout_ms)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Execute a closure with the write connection.
    pub fn with_conn<F, T>(&self, f: F) -> DossierResult<T>
    where
        F: FnOnce(&Connection) -> DossierResult<T>,
    {
        let guard = self.conn.lock().map_err(|e| {
            DossierError::from(StoreError::LockPoisoned {
                reason: e.to_string(),
            })
        })?;
        f(&guard)
    }
}

/// A pool of read-only SQLite connections.
pub struct ReadPool {
    connections: Vec<Mutex<Connection>>,
    next: AtomicUsize,
}

impl ReadPool {
    fn open(path: &Path, pool_size: usize, busy_timeout_ms: u64) -> DossierResult<Self> {
        let size = pool_size.clamp(1, MAX_POOL_SIZE);
        let mut connections = Vec::with_capacity(size);
        for _ in 0..size {
            let conn = Connection::open_with_flags(
                path,
                rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY
                    | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .map_err(|e| to_store_err(e.to_string()))?;
            pragmas::apply_read_pragmas(&conn, busy_timeout_ms)?;
            connections.push(Mutex::new(conn));
        }
        Ok(Self {
            connections,
            next: AtomicUsize::new(0),
        })
    }

    /// Execute a closure with a read connection from the pool (round-robin).
    pub fn with_conn<F, T>(&self, f: F) -> DossierResult<T>
    where
        F: FnOnce(&Connection) -> DossierResult<T>,
    {
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.connections.len();
        let guard = self.connections[idx].lock().map_err(|e| {
            DossierError::from(StoreError::LockPoisoned {
                reason: e.to_string(),
            })
        })?;
        f(&guard)
    }

    pub fn size(&self) -> usize {
        self.connections.len()
    }
}

/// Manages the write connection and the read pool.
///
/// In-memory mode has no read pool: separate in-memory connections are
/// isolated databases, so all reads route through the writer.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    pub readers: Option<ReadPool>,
}

impl ConnectionPool {
    /// Open a pool for the given database file.
    pub fn open(path: &Path, read_pool_size: usize, busy_timeout_ms: u64) -> DossierResult<Self> {
        // The writer must create the database (and enter WAL mode) before
        // read-only connections can open it.
        let writer = WriteConnection::open(path, busy_timeout_ms)?;
        let readers = ReadPool::open(path, read_pool_size, busy_timeout_ms)?;
        Ok(Self {
            writer,
            readers: Some(readers),
        })
    }

    /// Open an in-memory pool (for testing).
    pub fn open_in_memory(busy_timeout_ms: u64) -> DossierResult<Self> {
        let writer = WriteConnection::open_in_memory(busy_timeout_ms)?;
        Ok(Self {
            writer,
            readers: None,
        })
    }

    /// Execute a read-only query on the best available connection.
    pub fn with_reader<F, T>(&self, f: F) -> DossierResult<T>
    where
        F: FnOnce(&Connection) -> DossierResult<T>,
    {
        match &self.readers {
            Some(pool) => pool.with_conn(f),
            None => self.writer.with_conn(f),
        }
    }
}
