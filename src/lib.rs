//! Core of the Leo task manager: command parsing, the task list, the text
//! save format, and undo. The binary in `main.rs` wires these to a console
//! loop and a terminal dialog UI.

pub mod commands;
pub mod config;
pub mod datetime;
pub mod error;
pub mod history;
pub mod logging;
pub mod models;
pub mod parser;
pub mod storage;
pub mod task_list;
pub mod tui;
pub mod ui;

pub use commands::{Executor, Response, UndoOutcome};
pub use error::{LeoError, LeoResult};
pub use models::{Task, TaskKind};
pub use parser::{parse, Command};
pub use storage::Storage;
pub use task_list::TaskList;
