//! Data models for Noteboard

mod note;

pub use note::{normalize_positions, Note, NoteId, StoredNote};
