//! Key-value persistence backends for the note board.

mod memory;
mod migrations;
mod sqlite;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Trait for the durable key-value layer behind a `NoteStore`
///
/// Writes are synchronous and applied in call order.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Key names of the three persisted collections
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageKeys {
    #[serde(default = "default_notes_key")]
    pub notes: String,
    #[serde(default = "default_hidden_key")]
    pub hidden: String,
    #[serde(default = "default_selected_key")]
    pub selected: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            notes: default_notes_key(),
            hidden: default_hidden_key(),
            selected: default_selected_key(),
        }
    }
}

fn default_notes_key() -> String {
    "notes".to_string()
}

fn default_hidden_key() -> String {
    "hiddenNotes".to_string()
}

fn default_selected_key() -> String {
    "selectedNotes".to_string()
}
