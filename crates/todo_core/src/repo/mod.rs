//! Persistence adapters for the to-do list.
//!
//! # Responsibility
//! - Define the load/save contract the store depends on.
//! - Isolate the serialized payload format and storage details from the store.
//!
//! # Invariants
//! - `save` followed by `load` on the same storage yields the same items.
//! - Malformed records are skipped on load; they never abort the whole load.

pub mod item_repo;
