//! To-do list store.
//!
//! # Responsibility
//! - Hold the authoritative ordered item list for one session.
//! - Write the full list through the persistence adapter after every mutation.
//!
//! # Invariants
//! - Insertion order is preserved; duplicate text is allowed.
//! - Validation and not-found failures leave the list untouched.
//! - A failed save keeps the in-memory mutation; memory stays authoritative.
//! - Item text is never written to logs.

use crate::model::item::{validate_text, ItemId, ItemValidationError, ToDoItem};
use crate::repo::item_repo::{ItemPersistence, PersistError};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by store operations.
#[derive(Debug)]
pub enum StoreError {
    Validation(ItemValidationError),
    NotFound(ItemId),
    Persistence(PersistError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "item not found: {id}"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<ItemValidationError> for StoreError {
    fn from(value: ItemValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<PersistError> for StoreError {
    fn from(value: PersistError) -> Self {
        Self::Persistence(value)
    }
}

/// In-memory to-do list with write-through persistence.
pub struct ToDoStore<P: ItemPersistence> {
    items: Vec<ToDoItem>,
    persistence: P,
}

impl<P: ItemPersistence> ToDoStore<P> {
    /// Loads the stored list and returns a ready store.
    ///
    /// An empty store is returned when nothing has been stored yet.
    pub fn load(persistence: P) -> StoreResult<Self> {
        let items = persistence.load().map_err(|err| {
            error!("event=store_load module=store status=error error={err}");
            StoreError::from(err)
        })?;
        info!(
            "event=store_load module=store status=ok count={}",
            items.len()
        );
        Ok(Self { items, persistence })
    }

    /// Appends an open item and returns its position.
    ///
    /// # Errors
    /// - `Validation` when `text` is blank.
    /// - `Persistence` when the save fails; the item stays in memory.
    pub fn add(&mut self, text: impl Into<String>) -> StoreResult<ItemId> {
        let text = text.into();
        validate_text(&text)?;

        self.items.push(ToDoItem::new(text));
        let id = self.items.len() - 1;
        self.persist("item_add", id)?;
        Ok(id)
    }

    /// Replaces the text of the item at `id`, keeping position and flag.
    ///
    /// `NotFound` is checked before text validation.
    pub fn edit(&mut self, id: ItemId, new_text: impl Into<String>) -> StoreResult<()> {
        self.ensure_exists(id)?;
        let new_text = new_text.into();
        validate_text(&new_text)?;

        self.items[id].text = new_text;
        self.persist("item_edit", id)
    }

    /// Removes the item at `id`; later items shift down by one.
    pub fn remove(&mut self, id: ItemId) -> StoreResult<ToDoItem> {
        self.ensure_exists(id)?;

        let removed = self.items.remove(id);
        self.persist("item_remove", id)?;
        Ok(removed)
    }

    /// Flips completion of the item at `id` and returns the new value.
    pub fn toggle_completed(&mut self, id: ItemId) -> StoreResult<bool> {
        self.ensure_exists(id)?;

        let completed = self.items[id].toggle();
        self.persist("item_toggle", id)?;
        Ok(completed)
    }

    /// Current items in order.
    pub fn list(&self) -> &[ToDoItem] {
        &self.items
    }

    /// Item at `id`, used to pre-fill editors.
    pub fn get(&self, id: ItemId) -> Option<&ToDoItem> {
        self.items.get(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consumes the store and returns its adapter.
    pub fn into_persistence(self) -> P {
        self.persistence
    }

    fn ensure_exists(&self, id: ItemId) -> StoreResult<()> {
        if id >= self.items.len() {
            debug!(
                "event=item_lookup module=store status=not_found id={} count={}",
                id,
                self.items.len()
            );
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn persist(&mut self, event: &str, id: ItemId) -> StoreResult<()> {
        match self.persistence.save(&self.items) {
            Ok(()) => {
                info!(
                    "event={} module=store status=ok id={} count={}",
                    event,
                    id,
                    self.items.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event={} module=store status=error id={} error_code=save_failed error={}",
                    event, id, err
                );
                Err(err.into())
            }
        }
    }
}
