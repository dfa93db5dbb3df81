//! SQLite key-value substrate for persisted application state.
//!
//! # Responsibility
//! - Open and configure SQLite connections.
//! - Apply substrate schema migrations in deterministic order.
//! - Expose string values stored under named keys.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Values must not be read or written before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod kv;
pub mod migrations;
mod open;

pub use kv::{get_value, set_value};
pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
