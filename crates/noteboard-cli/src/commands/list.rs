use crate::commands::common::{
    format_controls_line, format_row_lines, open_board, row_to_list_item, BoardListing,
    BoardTarget,
};
use crate::error::CliError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ListFilter {
    Visible,
    Hidden,
    All,
}

impl ListFilter {
    pub const fn from_flags(all: bool, hidden: bool) -> Self {
        if all {
            Self::All
        } else if hidden {
            Self::Hidden
        } else {
            Self::Visible
        }
    }

    pub const fn includes(self, hidden: bool) -> bool {
        match self {
            Self::Visible => !hidden,
            Self::Hidden => hidden,
            Self::All => true,
        }
    }
}

pub fn run_list(filter: ListFilter, as_json: bool, target: &BoardTarget) -> Result<(), CliError> {
    let board = open_board(target)?;
    let rows = board
        .rows()
        .into_iter()
        .filter(|row| filter.includes(row.hidden))
        .collect::<Vec<_>>();

    if as_json {
        let listing = BoardListing {
            notes: rows.iter().map(row_to_list_item).collect(),
            controls: board.controls(),
        };
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        for line in format_row_lines(&rows) {
            println!("{line}");
        }
        if !rows.is_empty() {
            println!();
        }
        println!("{}", format_controls_line(board.controls()));
    }

    Ok(())
}
