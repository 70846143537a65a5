//! Database schema definitions
//!
//! This module contains the SQL schema for the seen-set database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Hashes of every URL already scheduled for capture
CREATE TABLE IF NOT EXISTS seen (
    hash TEXT PRIMARY KEY,
    item_type TEXT NOT NULL,
    seen_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_seen_type ON seen(item_type);
"#;

/// Initializes the database schema
///
/// Safe to call on an existing database; every statement is `IF NOT EXISTS`.
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
