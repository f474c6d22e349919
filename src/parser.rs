use chrono::NaiveDateTime;
use crate::datetime::parse_human;
use crate::error::{LeoError, LeoResult};

/// All command words understood by [`parse`], in the order they are listed to the user.
pub const COMMAND_WORDS: [&str; 10] =
    ["todo", "deadline", "event", "list", "mark", "unmark", "delete", "find", "undo", "bye"];

/// One validated instruction from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Exit,
    AddTodo { description: String },
    AddDeadline { description: String, by: NaiveDateTime },
    AddEvent { description: String, from: NaiveDateTime, to: NaiveDateTime },
    /// `index` is 0-based.
    Mark { index: usize },
    Unmark { index: usize },
    Delete { index: usize },
    Find { keyword: String },
    Undo,
}

impl Command {
    /// Whether executing this command changes the task list (and so can be undone).
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::AddTodo { .. }
                | Command::AddDeadline { .. }
                | Command::AddEvent { .. }
                | Command::Mark { .. }
                | Command::Unmark { .. }
                | Command::Delete { .. }
        )
    }
}

/// Parses a raw input line into a [`Command`].
///
/// The command word is case-insensitive. Time keywords (`/by`, `/from`, `/to`)
/// split at their last occurrence, so descriptions may contain them.
pub fn parse(input: &str) -> LeoResult<Command> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LeoError::parse("Input cannot be empty."));
    }
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r),
        None => (trimmed, ""),
    };

    match word.to_lowercase().as_str() {
        "list" => Ok(Command::List),
        "bye" => Ok(Command::Exit),
        "undo" => Ok(Command::Undo),
        "todo" => parse_todo(rest),
        "deadline" => parse_deadline(rest),
        "event" => parse_event(rest),
        "mark" => parse_index(rest, "mark").map(|index| Command::Mark { index }),
        "unmark" => parse_index(rest, "unmark").map(|index| Command::Unmark { index }),
        "delete" => parse_index(rest, "delete").map(|index| Command::Delete { index }),
        "find" => parse_find(rest),
        _ => Err(LeoError::parse(format!(
            "Not a valid command. Please use one of the following commands:\n{}",
            COMMAND_WORDS.join(", ")
        ))),
    }
}

fn parse_todo(rest: &str) -> LeoResult<Command> {
    let description = rest.trim();
    if description.is_empty() {
        return Err(LeoError::parse("The description of a todo cannot be empty."));
    }
    check_description(description)?;
    Ok(Command::AddTodo { description: description.to_string() })
}

fn parse_deadline(rest: &str) -> LeoResult<Command> {
    const USAGE: &str = "Usage: deadline <description> /by <time>";
    if rest.trim().is_empty() {
        return Err(LeoError::parse("The description of a deadline cannot be empty."));
    }
    let by_pos = rest.rfind("/by").ok_or_else(|| LeoError::parse(USAGE))?;
    let description = rest[..by_pos].trim();
    let time = rest[by_pos + "/by".len()..].trim();
    if description.is_empty() || time.is_empty() {
        return Err(LeoError::parse(USAGE));
    }
    check_description(description)?;
    Ok(Command::AddDeadline {
        description: description.to_string(),
        by: parse_human(time)?,
    })
}

fn parse_event(rest: &str) -> LeoResult<Command> {
    const USAGE: &str = "Usage: event <description> /from <start> /to <end>";
    if rest.trim().is_empty() {
        return Err(LeoError::parse("The description of an event cannot be empty."));
    }
    let (from_pos, to_pos) = match (rest.rfind("/from"), rest.rfind("/to")) {
        (Some(f), Some(t)) if t > f => (f, t),
        _ => return Err(LeoError::parse(USAGE)),
    };
    let description = rest[..from_pos].trim();
    let start = rest[from_pos + "/from".len()..to_pos].trim();
    let end = rest[to_pos + "/to".len()..].trim();
    if description.is_empty() || start.is_empty() || end.is_empty() {
        return Err(LeoError::parse(USAGE));
    }
    check_description(description)?;
    Ok(Command::AddEvent {
        description: description.to_string(),
        from: parse_human(start)?,
        to: parse_human(end)?,
    })
}

fn parse_find(rest: &str) -> LeoResult<Command> {
    let keyword = rest.trim();
    if keyword.is_empty() {
        return Err(LeoError::parse("Usage: find <keyword>"));
    }
    Ok(Command::Find { keyword: keyword.to_string() })
}

/// Reads the 1-based task number after `mark`/`unmark`/`delete` and returns it 0-based.
fn parse_index(rest: &str, word: &str) -> LeoResult<usize> {
    let usage = || LeoError::parse(format!("Usage: {} <task number>", word));
    let token = rest.split_whitespace().next().ok_or_else(usage)?;
    let number: usize = token.parse().map_err(|_| usage())?;
    // Task 0 maps to an index no list holds; the executor rejects it with the range message.
    Ok(number.checked_sub(1).unwrap_or(usize::MAX))
}

/// `|` separates fields in the data file, so it cannot appear in a description.
fn check_description(description: &str) -> LeoResult<()> {
    if description.contains('|') {
        return Err(LeoError::parse("The description cannot contain the '|' character."));
    }
    Ok(())
}
