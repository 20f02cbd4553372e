//! Board export helpers shared by every front end.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::store::NoteRow;

/// Export output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }
}

/// Serializable note representation used in JSON and Markdown exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportNote {
    pub id: String,
    pub content: String,
    pub position: i64,
    pub hidden: bool,
    pub selected: bool,
}

/// Convert a board row into an export record.
#[must_use]
pub fn row_to_export_item(row: &NoteRow<'_>) -> ExportNote {
    ExportNote {
        id: row.note.id.to_string(),
        content: row.note.content.clone(),
        position: row.note.position,
        hidden: row.hidden,
        selected: row.selected,
    }
}

/// Render rows as pretty-printed JSON.
pub fn render_json_export(rows: &[NoteRow<'_>]) -> serde_json::Result<String> {
    let items = rows
        .iter()
        .map(row_to_export_item)
        .collect::<Vec<ExportNote>>();
    serde_json::to_string_pretty(&items)
}

/// Render rows in Markdown with frontmatter blocks.
#[must_use]
pub fn render_markdown_export(rows: &[NoteRow<'_>]) -> String {
    let mut output = String::new();

    for (index, row) in rows.iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }

        let export_note = row_to_export_item(row);
        let _ = writeln!(output, "---");
        let _ = writeln!(output, "id: {}", export_note.id);
        let _ = writeln!(output, "position: {}", export_note.position);
        let _ = writeln!(output, "hidden: {}", export_note.hidden);
        let _ = writeln!(output, "selected: {}", export_note.selected);
        let _ = writeln!(output, "---");
        let _ = writeln!(output);
        output.push_str(&export_note.content);
        output.push('\n');
    }

    output
}

/// Render rows based on selected export format.
pub fn render_board_export(
    rows: &[NoteRow<'_>],
    format: ExportFormat,
) -> serde_json::Result<String> {
    match format {
        ExportFormat::Json => render_json_export(rows),
        ExportFormat::Markdown => Ok(render_markdown_export(rows)),
    }
}

/// Build a deterministic default file name for export flows.
#[must_use]
pub fn suggested_export_file_name(format: ExportFormat, timestamp_ms: i64) -> String {
    format!("noteboard-export-{timestamp_ms}.{}", format.extension())
}
