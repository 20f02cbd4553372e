//! The note board state machine
//!
//! `NoteStore` owns the three related collections (notes, hidden ids and
//! selected ids), keeps them consistent with each other, and writes every
//! mutation through to a [`KeyValueStore`].
//!
//! Referencing an unknown note id is a silent no-op. Persisted state that is
//! missing or unreadable loads as an empty collection, and malformed entries
//! inside a readable collection are skipped one by one. Only failures of the
//! backend itself surface as errors.

use std::collections::{HashMap, HashSet};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{normalize_positions, Note, NoteId, StoredNote};
use crate::storage::{KeyValueStore, StorageKeys};

/// Snapshot of the three collections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    /// Notes ordered by ascending position
    pub notes: Vec<Note>,
    /// Ids hidden from normal view, in the order they were hidden
    pub hidden: Vec<NoteId>,
    /// Ids marked for bulk operations, in the order they were selected
    pub selected: Vec<NoteId>,
}

/// One renderable row: a note plus its membership flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteRow<'a> {
    pub note: &'a Note,
    pub hidden: bool,
    pub selected: bool,
}

/// Which bulk actions currently have something to act on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BulkActions {
    /// At least one note exists
    pub hide_all: bool,
    /// At least one note is selected
    pub hide_selected: bool,
    /// At least one note is hidden
    pub show_hidden: bool,
}

/// Note collection with durable write-through
pub struct NoteStore<S: KeyValueStore> {
    storage: S,
    keys: StorageKeys,
    state: BoardState,
}

impl<S: KeyValueStore> NoteStore<S> {
    /// Create an empty store using the default key names
    ///
    /// Nothing is read until [`NoteStore::load`] is called.
    pub fn new(storage: S) -> Self {
        Self::with_keys(storage, StorageKeys::default())
    }

    /// Create an empty store using custom key names
    pub fn with_keys(storage: S, keys: StorageKeys) -> Self {
        Self {
            storage,
            keys,
            state: BoardState::default(),
        }
    }

    /// Create a store with default key names and load persisted state
    pub fn open(storage: S) -> Self {
        let mut store = Self::new(storage);
        store.load();
        store
    }

    /// Create a store with custom key names and load persisted state
    pub fn open_with_keys(storage: S, keys: StorageKeys) -> Self {
        let mut store = Self::with_keys(storage, keys);
        store.load();
        store
    }

    /// Replace in-memory state with what is persisted
    ///
    /// Missing or unreadable keys load as empty collections, and entries that
    /// do not parse are dropped individually. Notes without a
    /// position are backfilled from their stored index, then everything is
    /// sorted by position. Hidden and selected ids that name no note are
    /// dropped.
    pub fn load(&mut self) -> &BoardState {
        let stored_notes: Vec<StoredNote> = read_collection(&self.storage, &self.keys.notes);
        let hidden: Vec<NoteId> = read_collection(&self.storage, &self.keys.hidden);
        let selected: Vec<NoteId> = read_collection(&self.storage, &self.keys.selected);

        let mut seen = HashSet::new();
        let notes = normalize_positions(stored_notes)
            .into_iter()
            .filter(|note| seen.insert(note.id.clone()))
            .collect::<Vec<_>>();

        let known = notes.iter().map(|note| &note.id).collect::<HashSet<_>>();
        let hidden = retain_known_ids(hidden, &known);
        let selected = retain_known_ids(selected, &known);

        tracing::debug!(
            notes = notes.len(),
            hidden = hidden.len(),
            selected = selected.len(),
            "Loaded note board"
        );

        self.state = BoardState {
            notes,
            hidden,
            selected,
        };
        &self.state
    }

    /// Write all three collections to storage, in order: notes, hidden,
    /// selected
    pub fn persist(&mut self) -> Result<()> {
        let notes = serde_json::to_string(&self.state.notes)?;
        let hidden = serde_json::to_string(&self.state.hidden)?;
        let selected = serde_json::to_string(&self.state.selected)?;

        self.storage.set(&self.keys.notes, &notes)?;
        self.storage.set(&self.keys.hidden, &hidden)?;
        self.storage.set(&self.keys.selected, &selected)?;
        Ok(())
    }

    /// Append a new empty note after the current last position
    ///
    /// When the last position cannot be incremented, existing notes are
    /// renumbered `1..=n` in their current order first.
    pub fn create(&mut self) -> Result<Note> {
        let last = self.state.notes.iter().map(|note| note.position).max();
        let position = match last.map(|max| max.checked_add(1)) {
            None => 1,
            Some(Some(next)) => next,
            Some(None) => {
                tracing::warn!("Note positions exhausted, renumbering board");
                self.renumber_positions()
            }
        };

        let note = Note::new(position);
        tracing::debug!(note_id = %note.id, position, "Created note");
        self.state.notes.push(note.clone());
        self.sort_notes();
        self.persist()?;
        Ok(note)
    }

    /// Replace a note's content; unknown ids are ignored
    pub fn update_content(&mut self, id: &NoteId, content: impl Into<String>) -> Result<()> {
        let Some(note) = self.state.notes.iter_mut().find(|note| &note.id == id) else {
            tracing::debug!(note_id = %id, "Ignoring content update for unknown note");
            return Ok(());
        };

        note.content = content.into();
        self.persist()
    }

    /// Remove a note and its hidden/selected membership; unknown ids are
    /// ignored
    pub fn delete(&mut self, id: &NoteId) -> Result<()> {
        let before = self.state.notes.len();
        self.state.notes.retain(|note| &note.id != id);
        if self.state.notes.len() == before {
            tracing::debug!(note_id = %id, "Ignoring delete for unknown note");
            return Ok(());
        }

        self.state.hidden.retain(|hidden| hidden != id);
        self.state.selected.retain(|selected| selected != id);
        tracing::debug!(note_id = %id, "Deleted note");
        self.persist()
    }

    /// Mark or unmark a note for bulk operations; unknown ids are ignored
    pub fn set_selected(&mut self, id: &NoteId, selected: bool) -> Result<()> {
        if !self.contains(id) {
            tracing::debug!(note_id = %id, "Ignoring selection change for unknown note");
            return Ok(());
        }

        if selected {
            if !self.state.selected.contains(id) {
                self.state.selected.push(id.clone());
            }
        } else {
            self.state.selected.retain(|existing| existing != id);
        }
        self.persist()
    }

    /// Hide every selected note
    ///
    /// The selection itself is left untouched.
    pub fn hide_selected(&mut self) -> Result<()> {
        for id in &self.state.selected {
            if !self.state.hidden.contains(id) {
                self.state.hidden.push(id.clone());
            }
        }
        self.persist()
    }

    /// Hide every note, replacing the hidden set
    pub fn hide_all(&mut self) -> Result<()> {
        self.state.hidden = self.state.notes.iter().map(|note| note.id.clone()).collect();
        self.persist()
    }

    /// Clear the hidden set
    pub fn unhide_all(&mut self) -> Result<()> {
        self.state.hidden.clear();
        self.persist()
    }

    /// Assign `position = index + 1` following `ordered_ids`
    ///
    /// Unknown ids are skipped. Notes missing from `ordered_ids` keep their
    /// current position. When an id repeats, its last occurrence wins.
    pub fn reorder(&mut self, ordered_ids: &[NoteId]) -> Result<()> {
        let index_by_id = self
            .state
            .notes
            .iter()
            .enumerate()
            .map(|(index, note)| (note.id.clone(), index))
            .collect::<HashMap<_, _>>();

        for (position, id) in (1_i64..).zip(ordered_ids) {
            if let Some(&index) = index_by_id.get(id) {
                self.state.notes[index].position = position;
            }
        }

        self.sort_notes();
        tracing::debug!(count = ordered_ids.len(), "Reordered notes");
        self.persist()
    }

    /// Move one note to `target_index` (0-based) in the current order
    ///
    /// This is the drop half of a drag gesture: the resulting visual order
    /// is applied through [`NoteStore::reorder`]. Indices past the end move
    /// the note last. Unknown ids are ignored.
    pub fn move_note(&mut self, id: &NoteId, target_index: usize) -> Result<()> {
        let mut order = self.ordered_ids();
        let Some(current) = order.iter().position(|existing| existing == id) else {
            tracing::debug!(note_id = %id, "Ignoring move for unknown note");
            return Ok(());
        };

        let moved = order.remove(current);
        order.insert(target_index.min(order.len()), moved);
        self.reorder(&order)
    }

    /// Notes ordered by ascending position
    pub fn notes(&self) -> &[Note] {
        &self.state.notes
    }

    /// Hidden note ids
    pub fn hidden_ids(&self) -> &[NoteId] {
        &self.state.hidden
    }

    /// Selected note ids
    pub fn selected_ids(&self) -> &[NoteId] {
        &self.state.selected
    }

    /// Current snapshot of all three collections
    pub const fn state(&self) -> &BoardState {
        &self.state
    }

    /// Look up a note by id
    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.state.notes.iter().find(|note| &note.id == id)
    }

    pub fn contains(&self, id: &NoteId) -> bool {
        self.get(id).is_some()
    }

    pub fn is_hidden(&self, id: &NoteId) -> bool {
        self.state.hidden.contains(id)
    }

    pub fn is_selected(&self, id: &NoteId) -> bool {
        self.state.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.state.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.notes.is_empty()
    }

    /// Note ids in display order
    pub fn ordered_ids(&self) -> Vec<NoteId> {
        self.state.notes.iter().map(|note| note.id.clone()).collect()
    }

    /// One row per note in display order, with membership flags
    pub fn rows(&self) -> Vec<NoteRow<'_>> {
        self.state
            .notes
            .iter()
            .map(|note| NoteRow {
                note,
                hidden: self.is_hidden(&note.id),
                selected: self.is_selected(&note.id),
            })
            .collect()
    }

    /// Notes not in the hidden set, in display order
    pub fn visible_notes(&self) -> Vec<&Note> {
        self.state
            .notes
            .iter()
            .filter(|note| !self.is_hidden(&note.id))
            .collect()
    }

    /// Notes in the hidden set, in display order
    pub fn hidden_notes(&self) -> Vec<&Note> {
        self.state
            .notes
            .iter()
            .filter(|note| self.is_hidden(&note.id))
            .collect()
    }

    /// Enablement of the bulk-action controls for the current state
    pub fn controls(&self) -> BulkActions {
        BulkActions {
            hide_all: !self.state.notes.is_empty(),
            hide_selected: !self.state.selected.is_empty(),
            show_hidden: !self.state.hidden.is_empty(),
        }
    }

    /// Borrow the storage backend
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the storage backend
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn sort_notes(&mut self) {
        self.state.notes.sort_by_key(|note| note.position);
    }

    /// Rewrite positions to `1..=n` in display order, returning `n + 1`
    fn renumber_positions(&mut self) -> i64 {
        let mut next = 1;
        for note in &mut self.state.notes {
            note.position = next;
            next += 1;
        }
        next
    }
}

fn read_collection<S, T>(storage: &S, key: &str) -> Vec<T>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(error) => {
            tracing::warn!(key, %error, "Failed to read persisted collection, using empty");
            return Vec::new();
        }
    };

    let elements = match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
        Ok(elements) => elements,
        Err(error) => {
            tracing::warn!(key, %error, "Malformed persisted collection, using empty");
            return Vec::new();
        }
    };

    elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| {
            serde_json::from_value(element)
                .map_err(|error| {
                    tracing::warn!(key, index, %error, "Skipping malformed persisted entry");
                })
                .ok()
        })
        .collect()
}

fn retain_known_ids(ids: Vec<NoteId>, known: &HashSet<&NoteId>) -> Vec<NoteId> {
    let mut seen = HashSet::new();
    ids.into_iter()
        .filter(|id| known.contains(id) && seen.insert(id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, SqliteStore};
    use pretty_assertions::assert_eq;

    fn positions(store: &NoteStore<MemoryStore>) -> Vec<(NoteId, i64)> {
        store
            .notes()
            .iter()
            .map(|note| (note.id.clone(), note.position))
            .collect()
    }

    fn board_with(count: usize) -> (NoteStore<MemoryStore>, Vec<NoteId>) {
        let mut store = NoteStore::new(MemoryStore::new());
        let ids = (0..count)
            .map(|_| store.create().unwrap().id)
            .collect::<Vec<_>>();
        (store, ids)
    }

    #[test]
    fn create_assigns_increasing_positions_from_one() {
        let (store, _) = board_with(4);
        let positions = store
            .notes()
            .iter()
            .map(|note| note.position)
            .collect::<Vec<_>>();
        assert_eq!(positions, vec![1, 2, 3, 4]);
        assert!(store.notes().iter().all(|note| note.content.is_empty()));
    }

    #[test]
    fn create_uses_max_position_not_count() {
        let (mut store, ids) = board_with(3);
        store.delete(&ids[1]).unwrap();

        let created = store.create().unwrap();

        assert_eq!(created.position, 4);
        assert_eq!(store.ordered_ids().last(), Some(&created.id));
    }

    #[test]
    fn create_after_max_position_renumbers_and_appends() {
        let notes = serde_json::json!([
            { "id": "a", "content": "", "position": i64::MAX },
            { "id": "b", "content": "", "position": -4 },
        ]);
        let storage = MemoryStore::with_entries([("notes", notes.to_string())]);
        let mut store = NoteStore::open(storage);

        let created = store.create().unwrap();

        assert_eq!(created.position, 3);
        assert_eq!(
            positions(&store),
            vec![
                (NoteId::from("b"), 1),
                (NoteId::from("a"), 2),
                (created.id.clone(), 3),
            ]
        );

        let reloaded = NoteStore::open(store.into_storage());
        assert_eq!(reloaded.ordered_ids().last(), Some(&created.id));
    }

    #[test]
    fn every_mutation_writes_through() {
        let mut store = NoteStore::new(MemoryStore::new());
        let mut expected = store.storage().write_count();
        let mut check = |store: &NoteStore<MemoryStore>, label: &str| {
            expected += 3;
            assert_eq!(store.storage().write_count(), expected, "{label}");
        };

        let first = store.create().unwrap().id;
        check(&store, "create");
        let second = store.create().unwrap().id;
        check(&store, "create");
        store.update_content(&first, "hello").unwrap();
        check(&store, "update_content");
        store.set_selected(&first, true).unwrap();
        check(&store, "set_selected");
        store.hide_selected().unwrap();
        check(&store, "hide_selected");
        store.hide_all().unwrap();
        check(&store, "hide_all");
        store.unhide_all().unwrap();
        check(&store, "unhide_all");
        store.reorder(&[second.clone(), first]).unwrap();
        check(&store, "reorder");
        store.move_note(&second, 1).unwrap();
        check(&store, "move_note");
        store.delete(&second).unwrap();
        check(&store, "delete");
    }

    #[test]
    fn load_keeps_good_notes_when_some_entries_are_malformed() {
        let storage = MemoryStore::with_entries([
            (
                "notes",
                r#"[
                    {"id": "a", "content": "keep", "position": 1},
                    {"id": "b", "content": "x", "position": "2"},
                    {"id": "c", "content": 42, "position": 3},
                    "not a note"
                ]"#
                .to_string(),
            ),
            ("hiddenNotes", r#"["b", 7, "a"]"#.to_string()),
        ]);
        let mut store = NoteStore::open(storage);

        assert_eq!(
            positions(&store),
            vec![(NoteId::from("a"), 1), (NoteId::from("b"), 2)]
        );
        assert_eq!(store.hidden_ids(), &[NoteId::from("b"), NoteId::from("a")]);

        let created = store.create().unwrap();
        let reloaded = NoteStore::open(store.into_storage());
        let contents = reloaded
            .notes()
            .iter()
            .map(|note| (note.id.clone(), note.content.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(
            contents,
            vec![
                (NoteId::from("a"), "keep"),
                (NoteId::from("b"), "x"),
                (created.id, ""),
            ]
        );
    }

    #[test]
    fn update_content_replaces_content() {
        let (mut store, ids) = board_with(2);
        store.update_content(&ids[1], "<b>bold</b>").unwrap();
        assert_eq!(store.get(&ids[1]).unwrap().content, "<b>bold</b>");
        assert_eq!(store.get(&ids[0]).unwrap().content, "");
    }

    #[test]
    fn update_content_for_unknown_id_is_silent_noop() {
        let (mut store, _) = board_with(1);
        let before = store.state().clone();
        let writes = store.storage().write_count();

        store.update_content(&NoteId::from("missing"), "x").unwrap();

        assert_eq!(store.state(), &before);
        assert_eq!(store.storage().write_count(), writes);
    }

    #[test]
    fn delete_cascades_to_hidden_and_selected() {
        let (mut store, ids) = board_with(2);
        store.set_selected(&ids[0], true).unwrap();
        store.hide_selected().unwrap();

        store.delete(&ids[0]).unwrap();

        assert_eq!(store.ordered_ids(), vec![ids[1].clone()]);
        assert!(store.hidden_ids().is_empty());
        assert!(store.selected_ids().is_empty());

        store.set_selected(&ids[0], true).unwrap();
        store.hide_selected().unwrap();
        assert!(store.selected_ids().is_empty());
        assert!(store.hidden_ids().is_empty());
    }

    #[test]
    fn delete_unknown_id_changes_nothing() {
        let (mut store, _) = board_with(2);
        let before = store.state().clone();
        store.delete(&NoteId::from("nope")).unwrap();
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn set_selected_is_idempotent() {
        let (mut store, ids) = board_with(1);
        store.set_selected(&ids[0], true).unwrap();
        store.set_selected(&ids[0], true).unwrap();
        assert_eq!(store.selected_ids(), &[ids[0].clone()]);

        store.set_selected(&ids[0], false).unwrap();
        store.set_selected(&ids[0], false).unwrap();
        assert!(store.selected_ids().is_empty());
    }

    #[test]
    fn hide_selected_is_idempotent_and_keeps_selection() {
        let (mut store, ids) = board_with(3);
        store.set_selected(&ids[0], true).unwrap();
        store.set_selected(&ids[2], true).unwrap();

        store.hide_selected().unwrap();
        let once = store.hidden_ids().to_vec();
        store.hide_selected().unwrap();

        assert_eq!(store.hidden_ids(), once.as_slice());
        assert_eq!(once, vec![ids[0].clone(), ids[2].clone()]);
        assert_eq!(store.selected_ids(), &[ids[0].clone(), ids[2].clone()]);
    }

    #[test]
    fn hide_selected_unions_with_existing_hidden() {
        let (mut store, ids) = board_with(3);
        store.set_selected(&ids[1], true).unwrap();
        store.hide_selected().unwrap();
        store.set_selected(&ids[1], false).unwrap();
        store.set_selected(&ids[2], true).unwrap();
        store.hide_selected().unwrap();

        assert_eq!(store.hidden_ids(), &[ids[1].clone(), ids[2].clone()]);
    }

    #[test]
    fn hide_all_then_unhide_all_only_touches_hidden() {
        let (mut store, ids) = board_with(3);
        store.set_selected(&ids[1], true).unwrap();
        let notes_before = store.notes().to_vec();
        let selected_before = store.selected_ids().to_vec();

        store.hide_all().unwrap();
        assert_eq!(store.hidden_ids(), ids.as_slice());
        assert!(store.visible_notes().is_empty());

        store.unhide_all().unwrap();
        assert!(store.hidden_ids().is_empty());
        assert_eq!(store.notes(), notes_before.as_slice());
        assert_eq!(store.selected_ids(), selected_before.as_slice());
    }

    #[test]
    fn hide_all_replaces_rather_than_unions() {
        let (mut store, ids) = board_with(2);
        store.set_selected(&ids[1], true).unwrap();
        store.hide_selected().unwrap();
        store.hide_all().unwrap();
        assert_eq!(store.hidden_ids(), &[ids[0].clone(), ids[1].clone()]);
    }

    #[test]
    fn reorder_assigns_index_positions_regardless_of_prior_values() {
        let (mut store, ids) = board_with(3);
        let order = vec![ids[2].clone(), ids[0].clone(), ids[1].clone()];

        store.reorder(&order).unwrap();

        assert_eq!(
            positions(&store),
            vec![
                (ids[2].clone(), 1),
                (ids[0].clone(), 2),
                (ids[1].clone(), 3)
            ]
        );
    }

    #[test]
    fn reorder_ignores_unknown_ids() {
        let (mut store, ids) = board_with(2);
        let order = vec![NoteId::from("ghost"), ids[1].clone(), ids[0].clone()];

        store.reorder(&order).unwrap();

        assert_eq!(
            positions(&store),
            vec![(ids[1].clone(), 2), (ids[0].clone(), 3)]
        );
    }

    #[test]
    fn move_note_reconciles_drag_into_positions() {
        let (mut store, ids) = board_with(4);

        store.move_note(&ids[3], 1).unwrap();

        assert_eq!(
            store.ordered_ids(),
            vec![ids[0].clone(), ids[3].clone(), ids[1].clone(), ids[2].clone()]
        );
        let positions = store
            .notes()
            .iter()
            .map(|note| note.position)
            .collect::<Vec<_>>();
        assert_eq!(positions, vec![1, 2, 3, 4]);
    }

    #[test]
    fn move_note_past_end_moves_last() {
        let (mut store, ids) = board_with(3);
        store.move_note(&ids[0], 99).unwrap();
        assert_eq!(
            store.ordered_ids(),
            vec![ids[1].clone(), ids[2].clone(), ids[0].clone()]
        );
    }

    #[test]
    fn controls_follow_collection_sizes() {
        let mut store = NoteStore::new(MemoryStore::new());
        assert_eq!(store.controls(), BulkActions::default());

        let id = store.create().unwrap().id;
        assert_eq!(
            store.controls(),
            BulkActions {
                hide_all: true,
                hide_selected: false,
                show_hidden: false,
            }
        );

        store.set_selected(&id, true).unwrap();
        store.hide_selected().unwrap();
        assert_eq!(
            store.controls(),
            BulkActions {
                hide_all: true,
                hide_selected: true,
                show_hidden: true,
            }
        );
    }

    #[test]
    fn rows_carry_independent_flags() {
        let (mut store, ids) = board_with(2);
        store.set_selected(&ids[0], true).unwrap();
        store.hide_selected().unwrap();
        store.set_selected(&ids[0], false).unwrap();
        store.set_selected(&ids[1], true).unwrap();

        let flags = store
            .rows()
            .iter()
            .map(|row| (row.hidden, row.selected))
            .collect::<Vec<_>>();
        assert_eq!(flags, vec![(true, false), (false, true)]);
        assert_eq!(store.hidden_notes().len(), 1);
        assert_eq!(store.visible_notes().len(), 1);
    }

    #[test]
    fn load_from_empty_storage_is_empty() {
        let mut store = NoteStore::new(MemoryStore::new());
        assert_eq!(store.load(), &BoardState::default());
    }

    #[test]
    fn load_degrades_malformed_values_to_empty() {
        let storage = MemoryStore::with_entries([
            ("notes", "{not json"),
            ("hiddenNotes", "42"),
            ("selectedNotes", "null"),
        ]);
        let store = NoteStore::open(storage);
        assert!(store.is_empty());
        assert!(store.hidden_ids().is_empty());
        assert!(store.selected_ids().is_empty());
    }

    #[test]
    fn load_backfills_positions_and_sorts() {
        let storage = MemoryStore::with_entries([(
            "notes",
            r#"[
                {"id": "1700000000001", "content": "first"},
                {"id": "1700000000002", "content": "second", "position": 0},
                {"id": "1700000000003", "content": "third", "position": 1}
            ]"#,
        )]);

        let store = NoteStore::open(storage);

        let loaded = store
            .notes()
            .iter()
            .map(|note| (note.id.as_str(), note.position))
            .collect::<Vec<_>>();
        assert_eq!(
            loaded,
            vec![
                ("1700000000001", 1),
                ("1700000000003", 1),
                ("1700000000002", 2)
            ]
        );
    }

    #[test]
    fn load_prunes_dangling_and_duplicate_ids() {
        let storage = MemoryStore::with_entries([
            ("notes", r#"[{"id": "a", "content": "", "position": 1}]"#),
            ("hiddenNotes", r#"["a", "gone", "a"]"#),
            ("selectedNotes", r#"["gone"]"#),
        ]);

        let store = NoteStore::open(storage);

        assert_eq!(store.hidden_ids(), &[NoteId::from("a")]);
        assert!(store.selected_ids().is_empty());
    }

    #[test]
    fn persist_then_load_on_fresh_instance_roundtrips() {
        let (mut store, ids) = board_with(3);
        store.update_content(&ids[0], "alpha").unwrap();
        store.set_selected(&ids[1], true).unwrap();
        store.hide_selected().unwrap();
        store.set_selected(&ids[2], true).unwrap();
        store.persist().unwrap();
        let expected = store.state().clone();

        let reloaded = NoteStore::open(store.into_storage());

        assert_eq!(reloaded.state(), &expected);
    }

    #[test]
    fn reorder_survives_reload() {
        let (mut store, ids) = board_with(2);
        let (n1, n2) = (ids[0].clone(), ids[1].clone());
        assert_eq!(store.get(&n1).unwrap().position, 1);
        assert_eq!(store.get(&n2).unwrap().position, 2);

        store.reorder(&[n2.clone(), n1.clone()]).unwrap();
        assert_eq!(store.get(&n2).unwrap().position, 1);
        assert_eq!(store.get(&n1).unwrap().position, 2);

        let reloaded = NoteStore::open(store.into_storage());
        assert_eq!(reloaded.ordered_ids(), vec![n2, n1]);
    }

    #[test]
    fn custom_keys_are_used_for_persistence() {
        let keys = StorageKeys {
            notes: "board.notes".to_string(),
            hidden: "board.hidden".to_string(),
            selected: "board.selected".to_string(),
        };
        let mut store = NoteStore::with_keys(MemoryStore::new(), keys.clone());
        store.create().unwrap();

        let storage = store.into_storage();
        assert!(storage.get("board.notes").unwrap().is_some());
        assert!(storage.get("notes").unwrap().is_none());

        let reloaded = NoteStore::open_with_keys(storage, keys);
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn persisted_format_matches_widget_layout() {
        let mut store = NoteStore::new(MemoryStore::new());
        let id = store.create().unwrap().id;
        store.set_selected(&id, true).unwrap();

        let storage = store.into_storage();
        let notes: serde_json::Value =
            serde_json::from_str(&storage.get("notes").unwrap().unwrap()).unwrap();
        assert_eq!(
            notes,
            serde_json::json!([{ "id": id.as_str(), "content": "", "position": 1 }])
        );
        assert_eq!(
            storage.get("selectedNotes").unwrap().unwrap(),
            format!("[\"{id}\"]")
        );
        assert_eq!(storage.get("hiddenNotes").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn sqlite_backend_roundtrips_board() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.db");

        let expected = {
            let mut store = NoteStore::open(SqliteStore::open(&path).unwrap());
            let first = store.create().unwrap().id;
            let second = store.create().unwrap().id;
            store.update_content(&second, "keep me").unwrap();
            store.reorder(&[second, first.clone()]).unwrap();
            store.set_selected(&first, true).unwrap();
            store.state().clone()
        };

        let reopened = NoteStore::open(SqliteStore::open(&path).unwrap());
        assert_eq!(reopened.state(), &expected);
    }
}
