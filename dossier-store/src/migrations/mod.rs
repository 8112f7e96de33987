//! Schema migrations, tracked with `PRAGMA user_version`.

mod v001_initial;

use rusqlite::Connection;

use dossier_core::errors::{DossierResult, StoreError};

use crate::to_store_err;

/// Current schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Run all pending migrations on a connection.
pub fn run_migrations(conn: &Connection) -> DossierResult<()> {
    let current: u32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| to_store_err(e.to_string()))?;

    if current < 1 {
        v001_initial::up(conn).map_err(|e| StoreError::MigrationFailed {
            version: 1,
            reason: e.to_string(),
        })?;
    }

    if current < SCHEMA_VERSION {
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)
            .map_err(|e| to_store_err(e.to_string()))?;
        tracing::info!(from = current, to = SCHEMA_VERSION, "schema migrated");
    }
    Ok(())
}
