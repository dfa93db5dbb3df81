//! To-do item domain model.
//!
//! # Responsibility
//! - Define `ToDoItem` and its wire shape.
//! - Provide text validation used by store write paths.
//!
//! # Invariants
//! - Text written through the store contains a non-whitespace character;
//!   records read back from storage keep their text as stored.
//! - New items start with `completed = false`.
//! - Serialized records use `text` + `isCompleted`. On read, `completed` is
//!   accepted when `isCompleted` is absent.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Zero-based position of an item in the current list.
///
/// Positions after a removed item shift down by one.
pub type ItemId = usize;

/// Validation failures for item fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemValidationError {
    /// Text is empty or whitespace only.
    EmptyText,
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "item text must not be empty"),
        }
    }
}

impl Error for ItemValidationError {}

/// One entry of the to-do list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ItemRecord")]
pub struct ToDoItem {
    /// Display text as entered by the user.
    pub text: String,
    /// Serialized as `isCompleted` to match the stored record layout.
    #[serde(rename = "isCompleted")]
    pub completed: bool,
}

/// Read shape of a stored record; both flag spellings may be present.
#[derive(Deserialize)]
struct ItemRecord {
    text: String,
    #[serde(rename = "isCompleted")]
    is_completed: Option<bool>,
    completed: Option<bool>,
}

impl TryFrom<ItemRecord> for ToDoItem {
    type Error = String;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        let completed = record
            .is_completed
            .or(record.completed)
            .ok_or_else(|| "missing field `isCompleted`".to_string())?;
        Ok(Self {
            text: record.text,
            completed,
        })
    }
}

impl ToDoItem {
    /// Creates an open (not completed) item.
    ///
    /// Does not validate; store write paths call [`validate_text`] first.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }
}

/// Rejects text that is empty after trimming.
pub fn validate_text(text: &str) -> Result<(), ItemValidationError> {
    if text.trim().is_empty() {
        return Err(ItemValidationError::EmptyText);
    }
    Ok(())
}
