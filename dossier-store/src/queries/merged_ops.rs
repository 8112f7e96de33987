//! Merged parsed text per case — the terminal retrieval fallback source.

use rusqlite::{params, Connection, OptionalExtension};

use dossier_core::errors::DossierResult;

use crate::to_store_err;

/// Store (or replace) a case's merged parsed text.
pub fn set_merged_text(conn: &Connection, case_id: &str, text: &str) -> DossierResult<()> {
    conn.execute(
        "INSERT INTO merged_texts (case_id, text) VALUES (?1, ?2)
         ON CONFLICT(case_id) DO UPDATE SET text = excluded.text",
        params![case_id, text],
    )
    .map_err(|e| to_store_err(e.to_string()))?;
    Ok(())
}

/// Fetch a case's merged parsed text, if any.
pub fn merged_text(conn: &Connection, case_id: &str) -> DossierResult<Option<String>> {
    conn.query_row(
        "SELECT text FROM merged_texts WHERE case_id = ?1",
        params![case_id],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| to_store_err(e.to_string()))
}
