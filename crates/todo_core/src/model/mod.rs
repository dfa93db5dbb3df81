//! Domain model for the to-do list.
//!
//! # Responsibility
//! - Define the item record shared by the store and persistence adapters.
//!
//! # Invariants
//! - The store never accepts blank item text from callers.
//! - Items are addressed by position; there is no separate stable id.

pub mod item;
