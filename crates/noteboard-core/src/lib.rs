//! noteboard-core - Core library for Noteboard
//!
//! This crate contains the note model, the `NoteStore` collection state
//! machine (ordering, hidden and selected membership), and the key-value
//! persistence backends it writes through to.

pub mod error;
pub mod export;
pub mod models;
pub mod storage;
pub mod store;

pub use error::{Error, Result};
pub use models::{Note, NoteId};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageKeys};
pub use store::{BoardState, BulkActions, NoteRow, NoteStore};
