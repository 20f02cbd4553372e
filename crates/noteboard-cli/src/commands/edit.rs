use crate::commands::common::{
    capture_editor_input_with_initial, normalize_content, open_board, resolve_note_id,
    BoardTarget,
};
use crate::error::CliError;

pub fn run_edit(id: &str, content: Option<&str>, target: &BoardTarget) -> Result<(), CliError> {
    let mut board = open_board(target)?;
    let note_id = resolve_note_id(id, &board)?;
    let current = board
        .get(&note_id)
        .map(|note| note.content.clone())
        .unwrap_or_default();

    let edited_content = match content {
        Some(content) => normalize_content(content),
        None => capture_editor_input_with_initial(&current)?,
    };
    let Some(edited_content) = edited_content else {
        return Err(CliError::EmptyEditedContent);
    };

    if edited_content != current {
        board.update_content(&note_id, edited_content)?;
    }

    println!("{note_id}");
    Ok(())
}
