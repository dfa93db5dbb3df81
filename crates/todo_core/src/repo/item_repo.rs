//! Item list persistence contract, payload codec and adapters.
//!
//! # Responsibility
//! - Serialize the whole item list as one JSON array value.
//! - Store that value under a single named key.
//!
//! # Invariants
//! - Every save rewrites the full list; there are no partial updates.
//! - Records missing `text` or the completion flag, or holding the wrong
//!   types, are dropped individually on load and reported via `warn` events.
//! - A payload that is not a JSON array loads as an empty list.

use crate::db::{self, migrations::latest_version, DbError};
use crate::model::item::ToDoItem;
use log::warn;
use rusqlite::Connection;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key the list is stored under unless configured otherwise.
pub const DEFAULT_ITEMS_KEY: &str = "items";

pub type PersistResult<T> = Result<T, PersistError>;

/// Errors raised by persistence adapters.
#[derive(Debug)]
pub enum PersistError {
    Db(DbError),
    Codec(serde_json::Error),
    /// Storage cannot be reached (adapter specific).
    Unavailable(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Codec(err) => write!(f, "item payload codec error: {err}"),
            Self::Unavailable(message) => write!(f, "item storage unavailable: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with open_db first"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Codec(err) => Some(err),
            Self::Unavailable(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for PersistError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for PersistError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(value: serde_json::Error) -> Self {
        Self::Codec(value)
    }
}

/// Durable storage boundary for the item list.
pub trait ItemPersistence {
    /// Loads the stored list, or an empty list when nothing is stored.
    fn load(&self) -> PersistResult<Vec<ToDoItem>>;
    /// Replaces the stored list with `items`.
    fn save(&mut self, items: &[ToDoItem]) -> PersistResult<()>;
}

/// Encodes items as the persisted JSON array.
pub fn encode_items(items: &[ToDoItem]) -> PersistResult<String> {
    Ok(serde_json::to_string(items)?)
}

/// Decodes a persisted JSON array, skipping malformed records.
///
/// An unreadable payload (not JSON, or not an array) decodes as an empty
/// list, the same as nothing stored.
pub fn decode_items(payload: &str) -> Vec<ToDoItem> {
    let records = match serde_json::from_str::<Value>(payload) {
        Ok(Value::Array(records)) => records,
        Ok(_) => {
            warn!("event=items_load module=repo status=empty reason=not_array");
            return Vec::new();
        }
        Err(err) => {
            warn!("event=items_load module=repo status=empty reason=not_json error={err}");
            return Vec::new();
        }
    };

    let total = records.len();
    let mut items = Vec::with_capacity(total);
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<ToDoItem>(record) {
            Ok(item) => items.push(item),
            Err(err) => {
                warn!(
                    "event=item_record_skipped module=repo index={index} reason=malformed error={err}"
                );
            }
        }
    }

    if items.len() < total {
        warn!(
            "event=items_load module=repo status=partial loaded={} skipped={}",
            items.len(),
            total - items.len()
        );
    }
    items
}

/// SQLite-backed adapter storing the list under one `kv_store` key.
pub struct SqliteItemPersistence<'conn> {
    conn: &'conn Connection,
    key: String,
}

impl<'conn> SqliteItemPersistence<'conn> {
    /// Creates an adapter using [`DEFAULT_ITEMS_KEY`].
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` when `kv_store` is absent.
    pub fn try_new(conn: &'conn Connection) -> PersistResult<Self> {
        Self::with_key(conn, DEFAULT_ITEMS_KEY)
    }

    /// Creates an adapter storing the list under `key`.
    pub fn with_key(conn: &'conn Connection, key: impl Into<String>) -> PersistResult<Self> {
        ensure_schema(conn)?;
        Ok(Self {
            conn,
            key: key.into(),
        })
    }

    /// Storage key used by this adapter.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl ItemPersistence for SqliteItemPersistence<'_> {
    fn load(&self) -> PersistResult<Vec<ToDoItem>> {
        match db::get_value(self.conn, &self.key)? {
            Some(payload) => Ok(decode_items(&payload)),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, items: &[ToDoItem]) -> PersistResult<()> {
        let payload = encode_items(items)?;
        db::set_value(self.conn, &self.key, &payload)?;
        Ok(())
    }
}

fn ensure_schema(conn: &Connection) -> PersistResult<()> {
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected_version = latest_version();
    if actual_version != expected_version {
        return Err(PersistError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let has_table: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_store'
        );",
        [],
        |row| row.get(0),
    )?;
    if has_table == 0 {
        return Err(PersistError::MissingRequiredTable("kv_store"));
    }
    Ok(())
}

/// In-process adapter holding the serialized payload.
///
/// Goes through the same codec as durable adapters, so load behaves
/// identically for hand-crafted payloads.
#[derive(Debug, Clone, Default)]
pub struct MemoryItemPersistence {
    payload: Option<String>,
    save_count: usize,
}

impl MemoryItemPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing raw payload.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
            save_count: 0,
        }
    }

    /// Raw payload written by the last save.
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    /// Number of successful saves since creation.
    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl ItemPersistence for MemoryItemPersistence {
    fn load(&self) -> PersistResult<Vec<ToDoItem>> {
        match self.payload.as_deref() {
            Some(payload) => Ok(decode_items(payload)),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, items: &[ToDoItem]) -> PersistResult<()> {
        self.payload = Some(encode_items(items)?);
        self.save_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_items, encode_items};
    use crate::model::item::ToDoItem;

    #[test]
    fn encode_uses_is_completed_field() {
        let payload = encode_items(&[ToDoItem::new("Buy milk")]).unwrap();
        assert_eq!(payload, r#"[{"text":"Buy milk","isCompleted":false}]"#);
    }

    #[test]
    fn decode_accepts_completed_alias() {
        let items = decode_items(r#"[{"text":"A","completed":true}]"#);
        assert_eq!(items.len(), 1);
        assert!(items[0].completed);
    }

    #[test]
    fn decode_prefers_is_completed_when_both_flags_are_present() {
        let items = decode_items(
            r#"[
                {"text":"A","isCompleted":true,"completed":false},
                {"text":"B","completed":true,"isCompleted":false}
            ]"#,
        );
        assert_eq!(
            items,
            vec![
                ToDoItem {
                    text: "A".to_string(),
                    completed: true,
                },
                ToDoItem::new("B"),
            ]
        );
    }

    #[test]
    fn decode_skips_records_with_missing_or_mistyped_fields() {
        let items = decode_items(
            r#"[
                {"text":"X"},
                {"isCompleted":true},
                {"text":"keep","isCompleted":false},
                {"text":"Y","isCompleted":"yes"},
                {"text":"   ","isCompleted":false},
                42
            ]"#,
        );
        assert_eq!(items, vec![ToDoItem::new("keep"), ToDoItem::new("   ")]);
    }

    #[test]
    fn decode_treats_unreadable_payload_as_empty() {
        assert!(decode_items(r#"{"text":"X","isCompleted":false}"#).is_empty());
        assert!(decode_items(r#"{"items":[]}"#).is_empty());
        assert!(decode_items("not json").is_empty());
    }
}
