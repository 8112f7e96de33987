//! v001: fragments + FTS5 index, merged texts, query log.

use rusqlite::Connection;

pub fn up(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS fragments (
            id          TEXT PRIMARY KEY,
            case_id     TEXT NOT NULL,
            text        TEXT NOT NULL,
            asset       TEXT NOT NULL,
            page        INTEGER,
            vector      BLOB,
            dimensions  INTEGER
        );
        CREATE INDEX IF NOT EXISTS idx_fragments_case_id ON fragments(case_id);

        CREATE VIRTUAL TABLE IF NOT EXISTS fragment_fts USING fts5(
            text,
            content='fragments',
            content_rowid='rowid'
        );

        CREATE TRIGGER IF NOT EXISTS fragments_ai AFTER INSERT ON fragments BEGIN
            INSERT INTO fragment_fts(rowid, text) VALUES (new.rowid, new.text);
        END;
        CREATE TRIGGER IF NOT EXISTS fragments_ad AFTER DELETE ON fragments BEGIN
            INSERT INTO fragment_fts(fragment_fts, rowid, text)
                VALUES ('delete', old.rowid, old.text);
        END;
        CREATE TRIGGER IF NOT EXISTS fragments_au AFTER UPDATE ON fragments BEGIN
            INSERT INTO fragment_fts(fragment_fts, rowid, text)
                VALUES ('delete', old.rowid, old.text);
            INSERT INTO fragment_fts(rowid, text) VALUES (new.rowid, new.text);
        END;

        CREATE TABLE IF NOT EXISTS merged_texts (
            case_id TEXT PRIMARY KEY,
            text    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS query_log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            case_id   TEXT NOT NULL,
            question  TEXT NOT NULL,
            answer    TEXT NOT NULL,
            citations TEXT NOT NULL,
            timestamp TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_query_log_case_id ON query_log(case_id);
        ",
    )
}
