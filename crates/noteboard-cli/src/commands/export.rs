use std::path::{Path, PathBuf};

use noteboard_core::export::{render_board_export, suggested_export_file_name};

use crate::cli::ExportFormat;
use crate::commands::common::{open_board, BoardTarget};
use crate::error::CliError;

pub fn run_export(
    format: ExportFormat,
    output_path: Option<&Path>,
    target: &BoardTarget,
) -> Result<(), CliError> {
    let board = open_board(target)?;
    let core_format = to_core_format(format);
    let rendered = render_board_export(&board.rows(), core_format)?;

    if let Some(path) = output_path {
        let path = resolve_export_path(path, core_format);
        std::fs::write(&path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}

pub const fn to_core_format(format: ExportFormat) -> noteboard_core::export::ExportFormat {
    match format {
        ExportFormat::Json => noteboard_core::export::ExportFormat::Json,
        ExportFormat::Markdown => noteboard_core::export::ExportFormat::Markdown,
    }
}

/// Directories get a generated file name; anything else is used as given.
pub fn resolve_export_path(path: &Path, format: noteboard_core::export::ExportFormat) -> PathBuf {
    if path.is_dir() {
        let timestamp_ms = chrono::Utc::now().timestamp_millis();
        path.join(suggested_export_file_name(format, timestamp_ms))
    } else {
        path.to_path_buf()
    }
}
