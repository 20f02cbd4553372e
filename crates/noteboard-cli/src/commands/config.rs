use std::path::{Path, PathBuf};

use crate::cli::ConfigCommands;
use crate::config::{default_config_path, normalize_key_name, CliConfig};
use crate::error::CliError;

pub fn run_config(command: ConfigCommands) -> Result<(), CliError> {
    let path = default_config_path();
    match command {
        ConfigCommands::Show => run_config_show(&path),
        ConfigCommands::Init {
            board_path,
            notes_key,
            hidden_key,
            selected_key,
        } => {
            let updated = run_config_init(
                &path,
                board_path,
                notes_key.as_deref(),
                hidden_key.as_deref(),
                selected_key.as_deref(),
            )?;
            println!("{}", updated.display());
            Ok(())
        }
    }
}

pub fn run_config_show(path: &Path) -> Result<(), CliError> {
    let config = CliConfig::load_from_path(path).map_err(CliError::Config)?;
    println!("# {}", path.display());
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

/// Merge explicit values into the config at `path`, keeping existing ones.
pub fn run_config_init(
    path: &Path,
    board_path: Option<PathBuf>,
    notes_key: Option<&str>,
    hidden_key: Option<&str>,
    selected_key: Option<&str>,
) -> Result<PathBuf, CliError> {
    let mut config = CliConfig::load_from_path(path).map_err(CliError::Config)?;

    if let Some(board_path) = board_path {
        config.db_path = Some(board_path);
    }
    if let Some(key) = normalize_key_name(notes_key) {
        config.keys.notes = key;
    }
    if let Some(key) = normalize_key_name(hidden_key) {
        config.keys.hidden = key;
    }
    if let Some(key) = normalize_key_name(selected_key) {
        config.keys.selected = key;
    }

    config.save_to_path(path).map_err(CliError::Config)?;
    tracing::info!("Saved configuration to {}", path.display());
    Ok(path.to_path_buf())
}
