use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "noteboard")]
#[command(about = "Keep an ordered board of short notes from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to local board database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Quick capture: noteboard "my note here"
    #[arg(trailing_var_arg = true)]
    pub note: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a note at the end of the board
    #[command(alias = "new")]
    Add {
        /// Note content
        content: Vec<String>,
        /// Create a blank note without prompting for content
        #[arg(long, conflicts_with = "content")]
        empty: bool,
    },
    /// List notes in board order
    #[command(alias = "ls")]
    List {
        /// Include hidden notes
        #[arg(short, long, conflicts_with = "hidden")]
        all: bool,
        /// Show only hidden notes
        #[arg(long)]
        hidden: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replace the content of a note
    Edit {
        /// Note ID or unique ID prefix
        id: String,
        /// New content (opens $EDITOR when omitted)
        #[arg(short, long)]
        content: Option<String>,
    },
    /// Delete notes
    #[command(alias = "rm")]
    Delete {
        /// Note IDs or unique ID prefixes
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Mark notes for bulk actions
    Select {
        /// Note IDs or unique ID prefixes
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Clear the bulk-action mark from notes
    Unselect {
        /// Note IDs or unique ID prefixes
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Hide every selected note
    HideSelected,
    /// Hide every note
    HideAll,
    /// Show all hidden notes again
    ShowHidden,
    /// Set the board order from a full list of note IDs
    Reorder {
        /// Note IDs or unique ID prefixes, first to last
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Move one note to a new place in the board order
    Move {
        /// Note ID or unique ID prefix
        id: String,
        /// Target place, 1 being the top of the board
        #[arg(long, value_name = "INDEX")]
        to: usize,
    },
    /// Export the board
    Export {
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Optional output file or directory (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Show or update CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Markdown,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Initialize or update the configuration file
    Init {
        /// Default board database path
        #[arg(long = "board-path", value_name = "PATH")]
        board_path: Option<PathBuf>,
        /// Storage key for the note list
        #[arg(long, value_name = "KEY")]
        notes_key: Option<String>,
        /// Storage key for hidden note ids
        #[arg(long, value_name = "KEY")]
        hidden_key: Option<String>,
        /// Storage key for selected note ids
        #[arg(long, value_name = "KEY")]
        selected_key: Option<String>,
    },
}
