//! Marknote - note editing core on the command line.
//!
//! # Usage
//!
//! ```bash
//! marknote export note.json --format markdown
//! marknote import note.md > note.json
//! marknote tokenize draft.md
//! marknote apply draft.md --command bold --start 4 --end 9
//! marknote toc note.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use marknote::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use marknote::document::{ContentBlock, load_snapshot, snapshot_to_json};
use marknote::editor::{self, Command, DEFAULT_HISTORY_LIMIT, History, Selection};
use marknote::export::{self, ExportFormat, Theme};
use marknote::markdown::tokenize;

/// Export, import and edit notes
#[derive(Parser, Debug)]
#[command(name = "marknote", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Action>,

    /// Output format for exports
    #[arg(long, value_enum, global = true)]
    format: Option<ExportFormat>,

    /// Color tokens for the HTML page shell
    #[arg(long, value_enum, global = true)]
    theme: Option<ThemeMode>,

    /// Undo steps kept while applying commands
    #[arg(long, value_name = "N", global = true)]
    history_limit: Option<usize>,

    /// Emit HTML blocks without the page shell
    #[arg(long, global = true)]
    no_shell: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Render a JSON block snapshot as HTML or Markdown
    Export {
        #[arg(value_name = "SNAPSHOT")]
        file: PathBuf,
    },
    /// Read a Markdown file and print it as a JSON block snapshot
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Print the display spans of a Markdown file as JSON
    Tokenize {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Apply toolbar commands to a text file and print the result
    Apply {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Toolbar command name; repeat to chain commands
        #[arg(long = "command", required = true)]
        commands: Vec<String>,
        #[arg(long, default_value_t = 0)]
        start: usize,
        #[arg(long)]
        end: Option<usize>,
        /// Undo this many steps after applying
        #[arg(long, default_value_t = 0)]
        undo: usize,
    },
    /// Print the table of contents of a JSON block snapshot
    Toc {
        #[arg(value_name = "SNAPSHOT")]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    let Some(action) = cli.command else {
        return Ok(());
    };
    run(action, &effective)
}

fn run(action: Action, flags: &ConfigFlags) -> Result<()> {
    match action {
        Action::Export { file } => {
            let blocks = read_snapshot(&file)?;
            let theme = flags.theme.map_or_else(Theme::default, ThemeMode::theme);
            let out = match flags.format.unwrap_or_default() {
                ExportFormat::Html if flags.no_shell => export::html_fragment(&blocks),
                format => format.render(&blocks, &theme),
            };
            println!("{out}");
        }
        Action::Import { file } => {
            let source = read_text(&file)?;
            let blocks = export::from_markdown(&source);
            println!("{}", snapshot_to_json(&blocks)?);
        }
        Action::Tokenize { file } => {
            let source = read_text(&file)?;
            let spans = tokenize(&source);
            println!("{}", serde_json::to_string_pretty(&spans)?);
        }
        Action::Apply {
            file,
            commands,
            start,
            end,
            undo,
        } => {
            let text = read_text(&file)?;
            let limit = flags.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
            let (text, cursor) =
                apply_commands(text, Selection::new(start, end.unwrap_or(start)), &commands, limit, undo);
            println!("{text}");
            eprintln!("cursor: {cursor}");
        }
        Action::Toc { file } => {
            let blocks = read_snapshot(&file)?;
            let toc = export::table_of_contents(&blocks);
            let out = match flags.format.unwrap_or_default() {
                ExportFormat::Html => export::html_fragment(&toc),
                ExportFormat::Markdown => export::to_markdown(&toc),
            };
            println!("{out}");
        }
    }
    Ok(())
}

/// Run each command on the text in turn, recording every result in a
/// bounded history, then step back `undo` times.
fn apply_commands(
    text: String,
    mut selection: Selection,
    commands: &[String],
    limit: usize,
    undo: usize,
) -> (String, usize) {
    let mut history = History::with_limit((text, selection.end), limit);
    for name in commands {
        let command = match name.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                tracing::warn!(%err, "skipping command");
                continue;
            }
        };
        let edit = editor::apply(&history.present().0, selection, command);
        selection = edit
            .placeholder
            .clone()
            .map_or_else(|| Selection::caret(edit.cursor), Selection::from);
        history.update((edit.text, edit.cursor));
    }
    for _ in 0..undo {
        if !history.undo() {
            break;
        }
    }
    history.present().clone()
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn read_snapshot(path: &Path) -> Result<Vec<ContentBlock>> {
    load_snapshot(path).with_context(|| format!("Failed to load snapshot {}", path.display()))
}
