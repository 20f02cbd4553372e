//! Noteboard CLI - an ordered board of short notes in the terminal
//!
//! Every subcommand maps to one board gesture: add, edit, delete, select,
//! hide, show, reorder.

mod cli;
mod commands;
mod config;
mod error;


use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::common::BoardTarget;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::export::run_export;
use crate::commands::hide::{run_hide_all, run_hide_selected, run_show_hidden};
use crate::commands::list::{run_list, ListFilter};
use crate::commands::reorder::{run_move, run_reorder};
use crate::commands::select::run_select;
use crate::config::CliConfig;
use crate::error::CliError;

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("noteboard=info")),
        )
        .init();

    let Cli {
        command,
        db_path,
        note,
    } = Cli::parse();

    let command = match command {
        Some(Commands::Config { command }) => return run_config(command),
        other => other,
    };

    let config = CliConfig::load().map_err(CliError::Config)?;
    let target = BoardTarget::resolve(db_path, &config);
    tracing::debug!("Using board at {}", target.db_path.display());

    match command {
        Some(Commands::Add { content, empty }) => run_add(&content, empty, &target)?,
        Some(Commands::List { all, hidden, json }) => {
            run_list(ListFilter::from_flags(all, hidden), json, &target)?;
        }
        Some(Commands::Edit { id, content }) => run_edit(&id, content.as_deref(), &target)?,
        Some(Commands::Delete { ids }) => run_delete(&ids, &target)?,
        Some(Commands::Select { ids }) => run_select(&ids, true, &target)?,
        Some(Commands::Unselect { ids }) => run_select(&ids, false, &target)?,
        Some(Commands::HideSelected) => run_hide_selected(&target)?,
        Some(Commands::HideAll) => run_hide_all(&target)?,
        Some(Commands::ShowHidden) => run_show_hidden(&target)?,
        Some(Commands::Reorder { ids }) => run_reorder(&ids, &target)?,
        Some(Commands::Move { id, to }) => run_move(&id, to, &target)?,
        Some(Commands::Export { format, output }) => {
            run_export(format, output.as_deref(), &target)?;
        }
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
        Some(Commands::Config { .. }) => {}
        None => {
            // Quick capture mode: noteboard "my note"
            if note.is_empty() {
                Cli::command().print_help().map_err(CliError::Io)?;
                println!();
            } else {
                run_add(&note, false, &target)?;
            }
        }
    }

    Ok(())
}
