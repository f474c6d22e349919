use std::io::{self, BufRead, Write};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use crate::commands::{Response, UndoOutcome};
use crate::error::LeoError;
use crate::models::Task;
use crate::storage::SkippedLine;

pub const LINE: &str = "____________________________________________________________";

pub fn greeting() -> Vec<String> {
    vec!["Hello! I'm Leo".to_string(), "What can I do for you?".to_string()]
}

pub fn farewell() -> Vec<String> {
    vec!["Bye. Hope to see you again soon!".to_string()]
}

/// Plain-text lines describing a command's outcome.
pub fn render(response: &Response) -> Vec<String> {
    match response {
        Response::List { tasks } => {
            if tasks.is_empty() {
                return vec!["Your list is empty.".to_string()];
            }
            let mut lines = vec!["Here are the tasks in your list:".to_string()];
            lines.extend(numbered(tasks));
            lines
        }
        Response::Added { task, count } => vec![
            "Got it. I've added this task:".to_string(),
            format!("  {}", task),
            task_count(*count),
        ],
        Response::Marked { task } => {
            vec!["Nice! I've marked this task as done:".to_string(), format!("  {}", task)]
        }
        Response::Unmarked { task } => {
            vec!["OK, I've marked this task as not done yet:".to_string(), format!("  {}", task)]
        }
        Response::Deleted { task, count } => vec![
            "Noted. I've removed this task:".to_string(),
            format!("  {}", task),
            task_count(*count),
        ],
        Response::Found { keyword, matches } => {
            let mut lines = vec!["Here are the matching tasks in your list:".to_string()];
            if matches.is_empty() {
                lines.push(format!("No tasks found containing \"{}\".", keyword));
            } else {
                lines.extend(numbered(matches));
            }
            lines
        }
        Response::Undone(outcome) => render_undo(outcome),
        Response::Exit => farewell(),
    }
}

fn render_undo(outcome: &UndoOutcome) -> Vec<String> {
    match outcome {
        UndoOutcome::AddReverted { task, count } => vec![
            "Undone add command. Task removed:".to_string(),
            format!("  {}", task),
            task_count(*count),
        ],
        UndoOutcome::MarkReverted { task } => vec![
            "Undone mark command. Task marked as not done:".to_string(),
            format!("  {}", task),
        ],
        UndoOutcome::UnmarkReverted { task } => vec![
            "Undone unmark command. Task marked as done:".to_string(),
            format!("  {}", task),
        ],
        UndoOutcome::DeleteNotRestorable { position } => vec![
            format!("Delete command cannot be fully undone. Task was at index {}.", position),
            "Deleted tasks are not kept, so it has to be added again by hand.".to_string(),
        ],
        UndoOutcome::Stale { reason } => {
            vec!["Could not undo the last command.".to_string(), reason.clone()]
        }
    }
}

pub fn render_error(err: &LeoError) -> Vec<String> {
    err.to_string().lines().map(str::to_string).collect()
}

/// Startup notice for lines dropped while loading the data file.
pub fn render_skipped(skipped: &[SkippedLine]) -> Vec<String> {
    if skipped.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![format!(
        "Skipped {} corrupted line(s) in the save file; they will be dropped on the next save:",
        skipped.len()
    )];
    lines.extend(skipped.iter().map(|s| format!("  line {}: {}", s.line_no, s.reason)));
    lines
}

fn numbered(tasks: &[Task]) -> Vec<String> {
    tasks.iter().enumerate().map(|(i, t)| format!("{}.{}", i + 1, t)).collect()
}

fn task_count(count: usize) -> String {
    let noun = if count == 1 { "task" } else { "tasks" };
    format!("Now you have {} {} in the list.", count, noun)
}

/// Builds a table of tasks, numbered from 1 in the given order.
pub fn task_table(tasks: &[Task]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Type").add_attribute(Attribute::Bold),
            Cell::new("Description").add_attribute(Attribute::Bold),
            Cell::new("When").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    for (i, t) in tasks.iter().enumerate() {
        let status = if t.done { "Done" } else { "Pending" };
        let status_color = if t.done { Color::Green } else { Color::Yellow };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(t.kind.code()),
            Cell::new(&t.description),
            Cell::new(t.when()),
            Cell::new(status).fg(status_color),
        ]);
    }
    table
}

/// Line-oriented console front-end: reads commands from `input`, writes
/// framed replies to `output`.
pub struct Console<R, W> {
    input: R,
    output: W,
    tables: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// `tables` switches list and find output to bordered tables.
    pub fn new(input: R, output: W, tables: bool) -> Self {
        Console { input, output, tables }
    }

    /// Reads the next command line. `None` at end of input.
    pub fn read_command(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn print_block(&mut self, lines: &[String]) -> io::Result<()> {
        writeln!(self.output, "{}", LINE)?;
        for l in lines {
            writeln!(self.output, "{}", l)?;
        }
        writeln!(self.output, "{}", LINE)?;
        self.output.flush()
    }

    pub fn print_response(&mut self, response: &Response) -> io::Result<()> {
        if self.tables {
            let tasks = match response {
                Response::List { tasks } if !tasks.is_empty() => Some(tasks),
                Response::Found { matches, .. } if !matches.is_empty() => Some(matches),
                _ => None,
            };
            if let Some(tasks) = tasks {
                writeln!(self.output, "{}", task_table(tasks))?;
                return self.output.flush();
            }
        }
        self.print_block(&render(response))
    }

    pub fn print_error(&mut self, err: &LeoError) -> io::Result<()> {
        self.print_block(&render_error(err))
    }
}
