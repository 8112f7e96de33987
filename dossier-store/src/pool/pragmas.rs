//! PRAGMA configuration applied to every SQLite connection.
//!
//! WAL mode, NORMAL sync, busy_timeout, foreign_keys ON.

use rusqlite::Connection;

use dossier_core::errors::DossierResult;

use crate::to_store_err;

/// Apply performance and safety pragmas to a write connection.
pub fn apply_pragmas(conn: &Connection, busy_timeout_ms: u64) -> DossierResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = {busy_timeout_ms};
        PRAGMA foreign_keys = ON;
        "
    ))
    .map_err(|e| to_store_err(e.to_string()))?;
    Ok(())
}

/// Apply pragmas to a read connection (no journal mode changes on
/// read-only handles).
pub fn apply_read_pragmas(conn: &Connection, busy_timeout_ms: u64) -> DossierResult<()> {
    conn.execute_batch(&format!("PRAGMA busy_timeout = {busy_timeout_ms};"))
        .map_err(|e| to_store_err(e.to_string()))?;
    Ok(())
}
