//! # Leo
//!
//! A small line-oriented task manager. Type commands, Leo keeps the list and
//! saves it after every change.
//!
//! ## Usage
//!
//! ```bash
//! # Console mode (default)
//! leo
//!
//! # Terminal dialog UI
//! leo ui
//!
//! # One-off commands, e.g. from a script
//! leo run "todo read book" "deadline return book /by 2019-12-02 1800" list
//!
//! # Dump the list as JSON
//! leo export
//! ```
//!
//! ## Commands
//!
//! *   `todo <description>`
//! *   `deadline <description> /by <time>`
//! *   `event <description> /from <start> /to <end>`
//! *   `list`, `find <keyword>`
//! *   `mark <n>`, `unmark <n>`, `delete <n>`
//! *   `undo`: reverse the last change (deletes cannot be restored)
//! *   `bye`
//!
//! Times are `yyyy-MM-dd`, `yyyy-MM-dd HHmm` or `d/M/yyyy HHmm`.
//!
//! ## Data Storage
//!
//! Tasks are saved to `data/leo.txt` relative to the working directory.
//! Override with `--file` or the `LEO_DATA` environment variable.

use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use log::{info, warn};
use leo::commands::{Executor, Response};
use leo::config::Config;
use leo::logging::init_logging;
use leo::storage::Storage;
use leo::tui::run_tui;
use leo::ui::{self, Console};

#[derive(Parser)]
#[command(name = "leo")]
#[command(about = "Line-oriented task manager", long_about = None)]
struct Cli {
    /// Data file to load and save (default: data/leo.txt)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,
    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read commands from standard input (the default)
    Repl {
        /// Show list and find results as tables
        #[arg(short, long)]
        tables: bool,
    },
    /// Open the interactive dialog UI
    Ui,
    /// Execute the given command lines in order, stopping at `bye`
    Run {
        #[arg(required = true)]
        lines: Vec<String>,
    },
    /// Print all tasks as JSON
    Export,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: Shell,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = Cli::command();
        generate(*shell, &mut cmd, "leo", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    let config = Config::resolve(cli.file, cli.log_level);
    if let Err(e) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("Logging disabled: {}", e);
    }
    info!("using data file {}", config.data_file.display());

    let (executor, skipped, load_error) = Executor::open(Storage::new(&config.data_file));
    let mut notices = Vec::new();
    if let Some(e) = &load_error {
        notices.push("Save file problem. Starting with an empty list.".to_string());
        notices.extend(ui::render_error(e));
        notices.push(format!("Changes will not be saved to {} this session.", executor.storage().path().display()));
    }
    notices.extend(ui::render_skipped(&skipped));

    let result = match cli.command {
        Some(Commands::Ui) => run_tui(executor, notices).map_err(|e| e.to_string()),
        Some(Commands::Run { lines }) => run_lines(executor, &notices, &lines).map_err(|e| e.to_string()),
        Some(Commands::Export) => export(&executor),
        Some(Commands::Repl { tables }) => repl(executor, &notices, tables).map_err(|e| e.to_string()),
        None => repl(executor, &notices, false).map_err(|e| e.to_string()),
        Some(Commands::Completions { .. }) => Ok(()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            warn!("exiting with error: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Interactive console loop: greet, then read and handle commands until `bye` or end of input.
fn repl(mut executor: Executor, notices: &[String], tables: bool) -> io::Result<()> {
    let stdin = io::stdin();
    let mut console = Console::new(BufReader::new(stdin.lock()), io::stdout(), tables);
    console.print_block(&ui::greeting())?;
    if !notices.is_empty() {
        console.print_block(notices)?;
    }

    while let Some(line) = console.read_command()? {
        match executor.handle(&line) {
            Ok(Response::Exit) => {
                console.print_response(&Response::Exit)?;
                return Ok(());
            }
            Ok(response) => console.print_response(&response)?,
            Err(e) => {
                warn!("command failed: {}", e);
                console.print_error(&e)?;
            }
        }
    }
    Ok(())
}

fn run_lines(mut executor: Executor, notices: &[String], lines: &[String]) -> io::Result<()> {
    let mut console = Console::new(io::empty(), io::stdout(), false);
    if !notices.is_empty() {
        console.print_block(notices)?;
    }
    for line in lines {
        match executor.handle(line) {
            Ok(Response::Exit) => break,
            Ok(response) => console.print_response(&response)?,
            Err(e) => console.print_error(&e)?,
        }
    }
    Ok(())
}

fn export(executor: &Executor) -> Result<(), String> {
    let tasks = executor.tasks().to_vec();
    let s = serde_json::to_string_pretty(&tasks).map_err(|e| e.to_string())?;
    println!("{}", s);
    Ok(())
}
