//! Append-only query log. Entries are never updated or deleted here;
//! retention is an external concern.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use dossier_core::errors::DossierResult;
use dossier_core::models::{Citation, QueryLogEntry};

use crate::to_store_err;

/// Append one entry. Citations are stored as a JSON column.
pub fn append_entry(conn: &Connection, entry: &QueryLogEntry) -> DossierResult<()> {
    let citations = serde_json::to_string(&entry.citations)
        .map_err(|e| to_store_err(format!("citation encode: {e}")))?;
    conn.execute(
        "INSERT INTO query_log (case_id, question, answer, citations, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            entry.case_id,
            entry.question,
            entry.answer,
            citations,
            entry.timestamp.to_rfc3339(),
        ],
    )
    .map_err(|e| to_store_err(e.to_string()))?;
    Ok(())
}

/// Most recent entries for a case, newest first.
pub fn recent_entries(
    conn: &Connection,
    case_id: &str,
    limit: usize,
) -> DossierResult<Vec<QueryLogEntry>> {
    let mut stmt = conn
        .prepare(
            "SELECT case_id, question, answer, citations, timestamp
             FROM query_log WHERE case_id = ?1
             ORDER BY id DESC LIMIT ?2",
        )
        .map_err(|e| to_store_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![case_id, limit as i64], |row| {
            let citations_json: String = row.get(3)?;
            let timestamp_raw: String = row.get(4)?;
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                citations_json,
                timestamp_raw,
            ))
        })
        .map_err(|e| to_store_err(e.to_string()))?;

    let mut entries = Vec::new();
    for row in rows {
        let (case_id, question, answer, citations_json, timestamp_raw) =
            row.map_err(|e| to_store_err(e.to_string()))?;
        let citations: Vec<Citation> = serde_json::from_str(&citations_json)
            .map_err(|e| to_store_err(format!("citation decode: {e}")))?;
        let timestamp = DateTime::parse_from_rfc3339(&timestamp_raw)
            .map_err(|e| to_store_err(format!("timestamp decode: {e}")))?
            .with_timezone(&Utc);
        entries.push(QueryLogEntry {
            case_id,
            question,
            answer,
            citations,
            timestamp,
        });
    }
    Ok(entries)
}
