//! Note model

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// An opaque note identifier.
///
/// Fresh ids are UUID v7 strings (time-sortable). Ids read back from storage
/// are accepted verbatim, whatever their shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Create a new unique note ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NoteId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(crate::Error::InvalidInput("Note ID cannot be empty".into()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A note on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier
    pub id: NoteId,
    /// Free-form content, never validated
    pub content: String,
    /// Ordering key, ascending
    pub position: i64,
}

impl Note {
    /// Create an empty note at the given position
    #[must_use]
    pub fn new(position: i64) -> Self {
        Self {
            id: NoteId::new(),
            content: String::new(),
            position,
        }
    }

    /// Get first line as title preview, truncated to `max_len` characters
    #[must_use]
    pub fn title_preview(&self, max_len: usize) -> String {
        self.content
            .lines()
            .next()
            .unwrap_or("")
            .chars()
            .take(max_len)
            .collect()
    }

    /// Check if note content is empty (whitespace-only counts as empty)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// A note as it may appear in persisted state, before normalization.
///
/// Older or hand-edited state can lack `content` or `position`, or carry a
/// position written as a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoredNote {
    pub id: NoteId,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "deserialize_stored_position")]
    pub position: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPosition {
    Integer(i64),
    Text(String),
    Other(serde_json::Value),
}

/// Integers and integer strings are kept; anything else counts as missing.
fn deserialize_stored_position<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let position = match Option::<RawPosition>::deserialize(deserializer)? {
        Some(RawPosition::Integer(position)) => Some(position),
        Some(RawPosition::Text(text)) => text.trim().parse().ok(),
        Some(RawPosition::Other(_)) | None => None,
    };
    Ok(position)
}

/// Turn stored notes into position-ordered notes.
///
/// A note with no position (absent, `null` or `0`) gets its 1-based index in
/// stored order. Sorting is stable, so equal positions keep stored order.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn normalize_positions(stored: Vec<StoredNote>) -> Vec<Note> {
    let mut notes = stored
        .into_iter()
        .enumerate()
        .map(|(index, note)| Note {
            id: note.id,
            content: note.content.unwrap_or_default(),
            position: match note.position {
                Some(position) if position != 0 => position,
                _ => index as i64 + 1,
            },
        })
        .collect::<Vec<_>>();

    notes.sort_by_key(|note| note.position);
    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stored(id: &str, position: Option<i64>) -> StoredNote {
        StoredNote {
            id: id.into(),
            content: Some(format!("content of {id}")),
            position,
        }
    }

    #[test]
    fn test_note_id_unique() {
        let id1 = NoteId::new();
        let id2 = NoteId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_note_id_parse_accepts_opaque_strings() {
        let parsed: NoteId = " 1718000000000 ".parse().unwrap();
        assert_eq!(parsed.as_str(), "1718000000000");
        assert!("   ".parse::<NoteId>().is_err());
    }

    #[test]
    fn test_note_id_serializes_as_plain_string() {
        let id = NoteId::from("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }

    #[test]
    fn test_note_new() {
        let note = Note::new(3);
        assert!(note.content.is_empty());
        assert_eq!(note.position, 3);
    }

    #[test]
    fn test_title_preview() {
        let mut note = Note::new(1);
        note.content = "First line\nSecond line\nThird line".to_string();
        assert_eq!(note.title_preview(50), "First line");
        assert_eq!(note.title_preview(5), "First");
    }

    #[test]
    fn test_is_empty() {
        let mut note = Note::new(1);
        note.content = "   ".to_string();
        assert!(note.is_empty());

        note.content = "Hello".to_string();
        assert!(!note.is_empty());
    }

    #[test]
    fn normalize_backfills_missing_positions_from_stored_index() {
        let notes = normalize_positions(vec![
            stored("a", None),
            stored("b", Some(0)),
            stored("c", None),
        ]);
        let positions = notes
            .iter()
            .map(|note| (note.id.as_str(), note.position))
            .collect::<Vec<_>>();
        assert_eq!(positions, vec![("a", 1), ("b", 2), ("c", 3)]);
    }

    #[test]
    fn normalize_sorts_by_position() {
        let notes = normalize_positions(vec![
            stored("a", Some(5)),
            stored("b", Some(2)),
            stored("c", None),
        ]);
        let order = notes.iter().map(|note| note.id.as_str()).collect::<Vec<_>>();
        assert_eq!(order, vec!["b", "c", "a"]);
    }

    #[test]
    fn stored_position_accepts_integer_strings() {
        let notes: Vec<StoredNote> = serde_json::from_str(
            r#"[
                {"id": "a", "position": "2"},
                {"id": "b", "position": " 7 "},
                {"id": "c", "position": "soon"},
                {"id": "d", "position": 1.5},
                {"id": "e", "position": null}
            ]"#,
        )
        .unwrap();
        let positions = notes.iter().map(|note| note.position).collect::<Vec<_>>();
        assert_eq!(positions, vec![Some(2), Some(7), None, None, None]);
    }

    #[test]
    fn normalize_defaults_missing_content() {
        let notes = normalize_positions(vec![StoredNote {
            id: "x".into(),
            content: None,
            position: Some(1),
        }]);
        assert_eq!(notes[0].content, "");
    }
}
