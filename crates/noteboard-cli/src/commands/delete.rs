use crate::commands::common::{open_board, resolve_note_ids, BoardTarget};
use crate::error::CliError;

pub fn run_delete(ids: &[String], target: &BoardTarget) -> Result<(), CliError> {
    let mut board = open_board(target)?;
    let note_ids = resolve_note_ids(ids, &board)?;

    for note_id in note_ids {
        board.delete(&note_id)?;
        println!("{note_id}");
    }
    Ok(())
}
