//! Core use-case services.
//!
//! # Responsibility
//! - Own in-memory application state and drive persistence adapters.
//! - Keep presentation layers decoupled from storage details.

pub mod todo_store;
