use crate::commands::common::{open_board, resolve_note_content, BoardTarget};
use crate::error::CliError;

pub fn run_add(content_parts: &[String], empty: bool, target: &BoardTarget) -> Result<(), CliError> {
    let content = if empty {
        None
    } else {
        Some(resolve_note_content(content_parts)?)
    };

    let mut board = open_board(target)?;
    let note = board.create()?;
    if let Some(content) = content {
        board.update_content(&note.id, content)?;
    }

    tracing::debug!(note_id = %note.id, position = note.position, "Added note");
    println!("{}", note.id);
    Ok(())
}
