use crate::commands::common::{
    format_row_lines, open_board, resolve_note_id, resolve_note_ids, BoardTarget,
};
use crate::error::CliError;

pub fn run_reorder(ids: &[String], target: &BoardTarget) -> Result<(), CliError> {
    let mut board = open_board(target)?;
    let ordered_ids = resolve_note_ids(ids, &board)?;

    if ordered_ids.len() < board.len() {
        tracing::warn!(
            given = ordered_ids.len(),
            total = board.len(),
            "Partial order given; unlisted notes keep their positions"
        );
    }

    board.reorder(&ordered_ids)?;
    for line in format_row_lines(&board.rows()) {
        println!("{line}");
    }
    Ok(())
}

pub fn run_move(id: &str, to: usize, target: &BoardTarget) -> Result<(), CliError> {
    let Some(target_index) = to.checked_sub(1) else {
        return Err(CliError::InvalidPosition);
    };

    let mut board = open_board(target)?;
    let note_id = resolve_note_id(id, &board)?;
    board.move_note(&note_id, target_index)?;

    for line in format_row_lines(&board.rows()) {
        println!("{line}");
    }
    Ok(())
}
