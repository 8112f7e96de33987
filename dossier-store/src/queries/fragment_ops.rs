//! Fragment CRUD, batch hydration, and FTS5 lexical search.

use rusqlite::{params, Connection, Row};

use dossier_core::constants::MAX_HYDRATION_BATCH;
use dossier_core::errors::DossierResult;
use dossier_core::models::{Fragment, FragmentMeta};

use crate::to_store_err;

/// Insert a fragment. Fails on duplicate id — fragments are immutable
/// once ingested.
pub fn insert_fragment(conn: &Connection, fragment: &Fragment) -> DossierResult<()> {
    let (vector, dimensions) = match &fragment.vector {
        Some(v) => (Some(f32_vec_to_bytes(v)), Some(v.len() as i64)),
        None => (None, None),
    };
    conn.execute(
        "INSERT INTO fragments (id, case_id, text, asset, page, vector, dimensions)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            fragment.id,
            fragment.case_id,
            fragment.text,
            fragment.meta.asset,
            fragment.meta.page,
            vector,
            dimensions,
        ],
    )
    .map_err(|e| to_store_err(e.to_string()))?;
    Ok(())
}

/// Insert a batch of fragments in one transaction.
pub fn insert_fragments(conn: &Connection, fragments: &[Fragment]) -> DossierResult<usize> {
    conn.execute_batch("BEGIN")
        .map_err(|e| to_store_err(e.to_string()))?;
    for fragment in fragments {
        if let Err(e) = insert_fragment(conn, fragment) {
            let _ = conn.execute_batch("ROLLBACK");
            return Err(e);
        }
    }
    conn.execute_batch("COMMIT")
        .map_err(|e| to_store_err(e.to_string()))?;
    Ok(fragments.len())
}

/// Batch-fetch fragments by id. Missing ids are silently absent from the
/// result. Large id lists are chunked to keep statements bounded.
pub fn get_by_ids(conn: &Connection, ids: &[String]) -> DossierResult<Vec<Fragment>> {
    let mut results = Vec::with_capacity(ids.len());
    for chunk in ids.chunks(MAX_HYDRATION_BATCH) {
        let placeholders = vec!["?"; chunk.len()].join(",");
        let sql = format!(
            "SELECT id, case_id, text, asset, page, vector, dimensions
             FROM fragments WHERE id IN ({placeholders})"
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| to_store_err(e.to_string()))?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(chunk.iter()), parse_fragment_row)
            .map_err(|e| to_store_err(e.to_string()))?;
        for row in rows {
            results.push(row.map_err(|e| to_store_err(e.to_string()))?);
        }
    }
    Ok(results)
}

/// Case-scoped FTS5 search ranked by BM25 relevance.
///
/// The raw question is reduced to quoted terms before matching so user
/// punctuation can never produce FTS5 syntax errors; a question with no
/// searchable terms returns no rows.
pub fn lexical_search(
    conn: &Connection,
    case_id: &str,
    query: &str,
    limit: usize,
) -> DossierResult<Vec<Fragment>> {
    let Some(match_query) = fts_query(query) else {
        return Ok(Vec::new());
    };

    let mut stmt = conn
        .prepare(
            "SELECT f.id, f.case_id, f.text, f.asset, f.page, f.vector, f.dimensions
             FROM fragment_fts fts
             JOIN fragments f ON f.rowid = fts.rowid
             WHERE fragment_fts MATCH ?1 AND f.case_id = ?2
             ORDER BY rank
             LIMIT ?3",
        )
        .map_err(|e| to_store_err(e.to_string()))?;

    let rows = stmt
        .query_map(
            params![match_query, case_id, limit as i64],
            parse_fragment_row,
        )
        .map_err(|e| to_store_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(|e| to_store_err(e.to_string()))?);
    }
    Ok(results)
}

/// Build a safe FTS5 MATCH expression: alphanumeric terms, each quoted,
/// joined with OR. Returns `None` when the input has no searchable terms.
fn fts_query(raw: &str) -> Option<String> {
    let terms: Vec<String> = raw
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|t| !t.is_empty())
        .map(|t| format!("\"{t}\""))
        .collect();
    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" OR "))
    }
}

fn parse_fragment_row(row: &Row<'_>) -> rusqlite::Result<Fragment> {
    let vector: Option<Vec<u8>> = row.get(5)?;
    let dimensions: Option<i64> = row.get(6)?;
    let vector = match (vector, dimensions) {
        (Some(blob), Some(dims)) => Some(bytes_to_f32_vec(&blob, dims as usize)),
        _ => None,
    };
    Ok(Fragment {
        id: row.get(0)?,
        case_id: row.get(1)?,
        text: row.get(2)?,
        meta: FragmentMeta {
            asset: row.get(3)?,
            page: row.get(4)?,
        },
        vector,
    })
}

/// Encode an f32 vector as little-endian bytes for BLOB storage.
pub fn f32_vec_to_bytes(vec: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(vec.len() * 4);
    for v in vec {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}

/// Decode a BLOB back into an f32 vector. Truncated blobs yield a shorter
/// vector rather than panicking.
pub fn bytes_to_f32_vec(bytes: &[u8], dims: usize) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .take(dims)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fts_query_quotes_terms() {
        assert_eq!(
            fts_query("breach of contract").as_deref(),
            Some("\"breach\" OR \"of\" OR \"contract\"")
        );
    }

    #[test]
    fn fts_query_strips_punctuation() {
        assert_eq!(fts_query("damages?! (2020)").as_deref(), Some("\"damages\" OR \"2020\""));
    }

    #[test]
    fn fts_query_keeps_cjk_runs() {
        assert_eq!(fts_query("谁是当事人？").as_deref(), Some("\"谁是当事人\""));
    }

    #[test]
    fn fts_query_empty_input() {
        assert_eq!(fts_query("?!.,"), None);
        assert_eq!(fts_query(""), None);
    }

    #[test]
    fn vector_codec_roundtrip() {
        let v = vec![0.5f32, -1.25, 3.0];
        let bytes = f32_vec_to_bytes(&v);
        assert_eq!(bytes_to_f32_vec(&bytes, 3), v);
    }

    #[test]
    fn vector_codec_truncated_blob() {
        let v = vec![0.5f32, -1.25, 3.0];
        let mut bytes = f32_vec_to_bytes(&v);
        bytes.truncate(9); // mid-float
        assert_eq!(bytes_to_f32_vec(&bytes, 3), vec![0.5, -1.25]);
    }
}
