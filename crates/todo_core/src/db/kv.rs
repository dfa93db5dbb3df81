//! Named string values in the `kv_store` table.
//!
//! # Invariants
//! - One row per key; `set_value` replaces the previous value atomically.
//! - `updated_at` is refreshed on every write.

use super::DbResult;
use rusqlite::{params, Connection, OptionalExtension};

/// Reads the value stored under `key`, if any.
pub fn get_value(conn: &Connection, key: &str) -> DbResult<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM kv_store WHERE key = ?1;",
            [key],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(value)
}

/// Stores `value` under `key`, replacing any previous value.
pub fn set_value(conn: &Connection, key: &str, value: &str) -> DbResult<()> {
    conn.execute(
        "INSERT INTO kv_store (key, value, updated_at)
         VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
         ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at;",
        params![key, value],
    )?;
    Ok(())
}
