use crate::commands::common::{open_board, BoardTarget};
use crate::error::CliError;

pub fn run_hide_selected(target: &BoardTarget) -> Result<(), CliError> {
    let mut board = open_board(target)?;
    board.hide_selected()?;
    println!("{} hidden", board.hidden_ids().len());
    Ok(())
}

pub fn run_hide_all(target: &BoardTarget) -> Result<(), CliError> {
    let mut board = open_board(target)?;
    board.hide_all()?;
    println!("{} hidden", board.hidden_ids().len());
    Ok(())
}

pub fn run_show_hidden(target: &BoardTarget) -> Result<(), CliError> {
    let mut board = open_board(target)?;
    let shown = board.hidden_ids().len();
    board.unhide_all()?;
    println!("{shown} shown");
    Ok(())
}
