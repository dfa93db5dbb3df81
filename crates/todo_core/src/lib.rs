//! Core domain logic for the to-do list.
//! This crate is the single source of truth for item invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::item::{validate_text, ItemId, ItemValidationError, ToDoItem};
pub use repo::item_repo::{
    decode_items, encode_items, ItemPersistence, MemoryItemPersistence, PersistError,
    PersistResult, SqliteItemPersistence, DEFAULT_ITEMS_KEY,
};
pub use service::todo_store::{StoreError, StoreResult, ToDoStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
