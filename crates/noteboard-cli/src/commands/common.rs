use std::env;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use noteboard_core::{BulkActions, KeyValueStore, NoteId, NoteRow, NoteStore, SqliteStore, StorageKeys};
use serde::Serialize;

use crate::config::CliConfig;
use crate::error::CliError;

pub const SHORT_ID_LEN: usize = 18;

/// Where the board lives and which keys hold its collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardTarget {
    pub db_path: PathBuf,
    pub keys: StorageKeys,
}

impl BoardTarget {
    pub fn resolve(cli_db_path: Option<PathBuf>, config: &CliConfig) -> Self {
        Self {
            db_path: resolve_db_path(cli_db_path, config),
            keys: config.keys.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: String,
    pub position: i64,
    pub hidden: bool,
    pub selected: bool,
    pub preview: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct BoardListing {
    pub notes: Vec<NoteListItem>,
    pub controls: BulkActions,
}

pub fn open_board(target: &BoardTarget) -> Result<NoteStore<SqliteStore>, CliError> {
    let storage = SqliteStore::open(&target.db_path)?;
    Ok(NoteStore::open_with_keys(storage, target.keys.clone()))
}

/// Resolve a full id or unique id prefix to a note on the board.
pub fn resolve_note_id<S: KeyValueStore>(
    note_query: &str,
    board: &NoteStore<S>,
) -> Result<NoteId, CliError> {
    let note_query = normalize_note_identifier(note_query)?;

    if let Some(note) = board.notes().iter().find(|note| note.id.as_str() == note_query) {
        return Ok(note.id.clone());
    }

    let matching_ids = board
        .notes()
        .iter()
        .filter(|note| note.id.as_str().starts_with(&note_query))
        .map(|note| note.id.clone())
        .collect::<Vec<_>>();

    match matching_ids.as_slice() {
        [] => Err(CliError::NoteNotFound(note_query)),
        [only] => Ok(only.clone()),
        _ => {
            let options = matching_ids
                .iter()
                .take(3)
                .map(short_id)
                .collect::<Vec<_>>()
                .join(", ");

            Err(CliError::AmbiguousNoteId(format!(
                "ID prefix '{note_query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

pub fn resolve_note_ids<S: KeyValueStore>(
    note_queries: &[String],
    board: &NoteStore<S>,
) -> Result<Vec<NoteId>, CliError> {
    note_queries
        .iter()
        .map(|query| resolve_note_id(query, board))
        .collect()
}

pub fn short_id(id: &NoteId) -> String {
    id.as_str().chars().take(SHORT_ID_LEN).collect()
}

pub fn format_row_lines(rows: &[NoteRow<'_>]) -> Vec<String> {
    rows.iter()
        .map(|row| {
            let short_id = short_id(&row.note.id);
            let selected = if row.selected { "[x]" } else { "[ ]" };
            let hidden = if row.hidden { "hidden" } else { "" };
            let preview = note_preview(&row.note.content, 48);

            format!(
                "{short_id:<18}  {:>4}  {selected}  {hidden:<6}  {preview}",
                row.note.position
            )
            .trim_end()
            .to_string()
        })
        .collect()
}

pub fn format_controls_line(controls: BulkActions) -> String {
    let state = |enabled: bool| if enabled { "on" } else { "off" };
    format!(
        "hide-all: {}  hide-selected: {}  show-hidden: {}",
        state(controls.hide_all),
        state(controls.hide_selected),
        state(controls.show_hidden)
    )
}

pub fn row_to_list_item(row: &NoteRow<'_>) -> NoteListItem {
    NoteListItem {
        id: row.note.id.to_string(),
        position: row.note.position,
        hidden: row.hidden,
        selected: row.selected,
        preview: note_preview(&row.note.content, 80),
        content: row.note.content.clone(),
    }
}

pub fn note_preview(content: &str, max_chars: usize) -> String {
    let first_line = content.lines().next().unwrap_or("").trim();
    let collapsed = first_line.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.is_empty() {
        "(empty)".to_string()
    } else if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn resolve_note_content(content_parts: &[String]) -> Result<String, CliError> {
    if let Some(content) = normalize_content(&content_parts.join(" ")) {
        return Ok(content);
    }

    if let Some(content) = read_piped_stdin()? {
        return Ok(content);
    }

    if let Some(content) = capture_editor_input()? {
        return Ok(content);
    }

    Err(CliError::EmptyContent)
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn normalize_note_identifier(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyNoteId)
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}

pub fn capture_editor_input() -> Result<Option<String>, CliError> {
    capture_editor_input_with_initial("")
}

pub fn capture_editor_input_with_initial(
    initial_content: &str,
) -> Result<Option<String>, CliError> {
    let editor = preferred_editor();
    let temp_file = create_temp_note_file_path();
    std::fs::write(&temp_file, initial_content)?;

    let launch_result = launch_editor(&editor, &temp_file);
    let note_content = std::fs::read_to_string(&temp_file)?;
    let _ = std::fs::remove_file(&temp_file);

    launch_result?;
    Ok(normalize_content(&note_content))
}

pub fn launch_editor(editor: &str, file_path: &Path) -> Result<(), CliError> {
    let mut parts = editor.split_whitespace();
    let Some(program) = parts.next() else {
        return Err(CliError::EditorFailed("empty EDITOR command".into()));
    };

    let status = Command::new(program).args(parts).arg(file_path).status()?;
    if status.success() {
        Ok(())
    } else {
        Err(CliError::EditorFailed(format!(
            "`{editor}` exited with status {status}"
        )))
    }
}

pub fn preferred_editor() -> String {
    env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| default_editor().to_string())
}

pub const fn default_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "vi"
    }
}

pub fn create_temp_note_file_path() -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    env::temp_dir().join(format!("noteboard-note-{}-{now}.md", std::process::id()))
}

pub fn resolve_db_path(cli_db_path: Option<PathBuf>, config: &CliConfig) -> PathBuf {
    cli_db_path
        .or_else(|| env::var_os("NOTEBOARD_DB_PATH").map(PathBuf::from))
        .or_else(|| config.db_path.clone())
        .unwrap_or_else(default_db_path)
}

pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("noteboard")
        .join("noteboard.db")
}
