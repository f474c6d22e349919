use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use log::{debug, info, warn};
use crate::datetime::{format_stored, parse_stored};
use crate::error::{LeoError, LeoResult};
use crate::models::{Task, TaskKind};
use crate::task_list::TaskList;

const DELIMITER: &str = " | ";

/// A line of the data file that was skipped during load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the file.
    pub line_no: usize,
    pub reason: String,
}

/// Result of loading the data file: the tasks that could be read, plus any
/// lines that were dropped as corrupted.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub tasks: TaskList,
    pub skipped: Vec<SkippedLine>,
}

/// Reads and writes the task list as pipe-delimited text, one task per line:
///
/// ```text
/// T | 0 | read book
/// D | 1 | return book | 2019-12-02T18:00
/// E | 0 | project meeting | 2019-12-02T14:00 | 2019-12-02T16:00
/// ```
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Storage {
        Storage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads all tasks from the data file.
    ///
    /// A missing file yields an empty list. Malformed lines, including lines
    /// that are not valid UTF-8, are skipped and listed in the report; only an
    /// unreadable file is an error.
    pub fn load(&self) -> LeoResult<LoadReport> {
        let mut f = match OpenOptions::new().read(true).open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("no data file at {}, starting empty", self.path.display());
                return Ok(LoadReport::default());
            }
            Err(e) => return Err(LeoError::io(&self.path, e)),
        };
        let mut bytes = Vec::new();
        f.read_to_end(&mut bytes).map_err(|e| LeoError::io(&self.path, e))?;

        // Lines are decoded one at a time so a stray non-UTF-8 byte only costs its own line.
        let mut tasks = Vec::new();
        let mut skipped = Vec::new();
        for (i, raw) in bytes.split(|b| *b == b'\n').enumerate() {
            let decoded = std::str::from_utf8(raw)
                .map_err(|_| "line is not valid UTF-8".to_string())
                .map(str::trim);
            if decoded == Ok("") {
                continue;
            }
            match decoded.and_then(decode_line) {
                Ok(task) => tasks.push(task),
                Err(reason) => {
                    warn!("skipping line {} of {}: {}", i + 1, self.path.display(), reason);
                    skipped.push(SkippedLine { line_no: i + 1, reason });
                }
            }
        }
        info!("loaded {} tasks from {} ({} skipped)", tasks.len(), self.path.display(), skipped.len());
        Ok(LoadReport { tasks: TaskList::from(tasks), skipped })
    }

    /// Saves the given task list to the data file.
    ///
    /// Creates the parent directory if needed and overwrites the existing file.
    pub fn save(&self, tasks: &TaskList) -> LeoResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| LeoError::io(parent, e))?;
            }
        }
        let mut s = String::new();
        for t in tasks {
            s.push_str(&encode_task(t));
            s.push('\n');
        }
        let mut f = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| LeoError::io(&self.path, e))?;
        f.write_all(s.as_bytes()).map_err(|e| LeoError::io(&self.path, e))?;
        debug!("saved {} tasks to {}", tasks.len(), self.path.display());
        Ok(())
    }
}

/// Serializes one task to its line form (without the trailing newline).
pub fn encode_task(task: &Task) -> String {
    let done = if task.done { "1" } else { "0" };
    let mut fields = vec![task.kind.code().to_string(), done.to_string(), task.description.clone()];
    match &task.kind {
        TaskKind::Todo => {}
        TaskKind::Deadline { by } => fields.push(format_stored(by)),
        TaskKind::Event { from, to } => {
            fields.push(format_stored(from));
            fields.push(format_stored(to));
        }
    }
    fields.join(DELIMITER)
}

/// Parses one non-blank line. The error is a short reason suitable for the load report.
pub fn decode_line(line: &str) -> Result<Task, String> {
    let parts: Vec<&str> = line.split('|').map(str::trim).collect();
    if parts.len() < 3 {
        return Err(format!("expected at least 3 fields, found {}", parts.len()));
    }
    let done = match parts[1] {
        "1" => true,
        "0" => false,
        other => return Err(format!("unknown done flag '{}'", other)),
    };
    let desc = parts[2];
    if desc.is_empty() {
        return Err("empty description".to_string());
    }
    let expected = match parts[0] {
        "T" => 3,
        "D" => 4,
        "E" => 5,
        other => return Err(format!("unknown task type '{}'", other)),
    };
    if parts.len() != expected {
        return Err(format!("type {} needs {} fields, found {}", parts[0], expected, parts.len()));
    }
    let stored = |raw: &str| parse_stored(raw).map_err(|e| e.to_string());
    let mut task = match parts[0] {
        "D" => Task::deadline(desc, stored(parts[3])?),
        "E" => Task::event(desc, stored(parts[3])?, stored(parts[4])?),
        _ => Task::todo(desc),
    };
    task.done = done;
    Ok(task)
}
