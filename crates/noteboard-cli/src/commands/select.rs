use crate::commands::common::{open_board, resolve_note_ids, BoardTarget};
use crate::error::CliError;

pub fn run_select(ids: &[String], selected: bool, target: &BoardTarget) -> Result<(), CliError> {
    let mut board = open_board(target)?;
    let note_ids = resolve_note_ids(ids, &board)?;

    for note_id in &note_ids {
        board.set_selected(note_id, selected)?;
    }

    println!("{} selected", board.selected_ids().len());
    Ok(())
}
