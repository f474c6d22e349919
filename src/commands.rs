use log::{debug, info, warn};
use crate::error::{LeoError, LeoResult};
use crate::history::History;
use crate::models::Task;
use crate::parser::{parse, Command};
use crate::storage::{LoadReport, SkippedLine, Storage};
use crate::task_list::TaskList;

/// What happened when a command ran. The renderer turns this into text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    List { tasks: Vec<Task> },
    Added { task: Task, count: usize },
    Marked { task: Task },
    Unmarked { task: Task },
    Deleted { task: Task, count: usize },
    Found { keyword: String, matches: Vec<Task> },
    Undone(UndoOutcome),
    Exit,
}

/// Result of reversing one recorded command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoOutcome {
    /// The task an add created was removed again.
    AddReverted { task: Task, count: usize },
    MarkReverted { task: Task },
    UnmarkReverted { task: Task },
    /// Deleted tasks are not kept, so all we can do is say where it was.
    DeleteNotRestorable { position: usize },
    /// The list changed since the command ran; nothing was touched.
    Stale { reason: String },
}

/// Owns the task list, its storage and the undo history, and runs commands against them.
#[derive(Debug)]
pub struct Executor {
    tasks: TaskList,
    storage: Storage,
    history: History,
    /// Cleared when the data file could not be read, so a later save cannot
    /// overwrite contents we never loaded.
    persist: bool,
}

impl Executor {
    pub fn new(tasks: TaskList, storage: Storage) -> Executor {
        Executor { tasks, storage, history: History::new(), persist: true }
    }

    /// Loads the data file behind `storage` and builds an executor around it.
    ///
    /// If the file cannot be read at all, the executor starts with an empty
    /// in-memory list and the error is handed back alongside it. Changes made
    /// in that session are never written to the file.
    pub fn open(storage: Storage) -> (Executor, Vec<SkippedLine>, Option<LeoError>) {
        match storage.load() {
            Ok(LoadReport { tasks, skipped }) => (Executor::new(tasks, storage), skipped, None),
            Err(e) => {
                warn!("falling back to an empty list, saving disabled: {}", e);
                let mut executor = Executor::new(TaskList::new(), storage);
                executor.persist = false;
                (executor, Vec::new(), Some(e))
            }
        }
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Whether changes are written back to the data file.
    pub fn is_persistent(&self) -> bool {
        self.persist
    }

    /// Parses and executes one input line.
    pub fn handle(&mut self, line: &str) -> LeoResult<Response> {
        let command = parse(line)?;
        self.execute(command)
    }

    /// Executes a parsed command.
    ///
    /// Mutating commands are recorded in the history once they succeed and the
    /// list is saved afterwards. A failed save still leaves the change in memory.
    pub fn execute(&mut self, command: Command) -> LeoResult<Response> {
        debug!("executing {:?}", command);
        match &command {
            Command::List => Ok(Response::List { tasks: self.tasks.to_vec() }),
            Command::Exit => Ok(Response::Exit),
            Command::Find { keyword } => Ok(self.cmd_find(keyword)),
            Command::Undo => self.cmd_undo(),
            Command::AddEvent { from, to, .. } if to <= from => {
                Err(LeoError::validation("Event end time must be after its start time."))
            }
            Command::AddTodo { description } => self.cmd_add(Task::todo(description.as_str()), command.clone()),
            Command::AddDeadline { description, by } => {
                self.cmd_add(Task::deadline(description.as_str(), *by), command.clone())
            }
            Command::AddEvent { description, from, to } => {
                self.cmd_add(Task::event(description.as_str(), *from, *to), command.clone())
            }
            Command::Mark { index } => {
                let index = *index;
                self.validate_index(index, "mark")?;
                let task = self.tasks.mark_done(index)?.clone();
                self.commit(command.clone())?;
                Ok(Response::Marked { task })
            }
            Command::Unmark { index } => {
                let index = *index;
                self.validate_index(index, "unmark")?;
                let task = self.tasks.mark_not_done(index)?.clone();
                self.commit(command.clone())?;
                Ok(Response::Unmarked { task })
            }
            Command::Delete { index } => {
                let index = *index;
                self.validate_index(index, "delete")?;
                let task = self.tasks.remove(index)?;
                self.commit(command.clone())?;
                Ok(Response::Deleted { task, count: self.tasks.len() })
            }
        }
    }

    fn cmd_add(&mut self, task: Task, command: Command) -> LeoResult<Response> {
        self.tasks.add(task.clone())?;
        info!("added {}", task);
        self.commit(command)?;
        Ok(Response::Added { task, count: self.tasks.len() })
    }

    fn cmd_find(&self, keyword: &str) -> Response {
        Response::Found { keyword: keyword.to_string(), matches: self.tasks.find(keyword) }
    }

    fn cmd_undo(&mut self) -> LeoResult<Response> {
        let command = match self.history.last_command() {
            Some(c) => c.clone(),
            None => return Err(LeoError::validation("Nothing to undo.")),
        };
        self.history.step_back();
        info!("undoing {:?}", command);

        let outcome = match command {
            Command::AddTodo { description } => self.revert_add(Task::todo(description)),
            Command::AddDeadline { description, by } => self.revert_add(Task::deadline(description, by)),
            Command::AddEvent { description, from, to } => self.revert_add(Task::event(description, from, to)),
            Command::Mark { index } => match self.tasks.mark_not_done(index) {
                Ok(task) => UndoOutcome::MarkReverted { task: task.clone() },
                Err(_) => stale_index(index),
            },
            Command::Unmark { index } => match self.tasks.mark_done(index) {
                Ok(task) => UndoOutcome::UnmarkReverted { task: task.clone() },
                Err(_) => stale_index(index),
            },
            Command::Delete { index } => UndoOutcome::DeleteNotRestorable { position: index + 1 },
            Command::List | Command::Exit | Command::Find { .. } | Command::Undo => {
                unreachable!("only mutating commands are recorded")
            }
        };

        if matches!(
            outcome,
            UndoOutcome::AddReverted { .. } | UndoOutcome::MarkReverted { .. } | UndoOutcome::UnmarkReverted { .. }
        ) {
            self.save()?;
        }
        Ok(Response::Undone(outcome))
    }

    /// Removes the last task, provided it is still the one the add created.
    fn revert_add(&mut self, added: Task) -> UndoOutcome {
        match self.tasks.last() {
            Some(last) if last.is_duplicate_of(&added) => {}
            _ => {
                return UndoOutcome::Stale {
                    reason: format!("The added task \"{}\" is no longer at the end of the list.", added.description),
                }
            }
        }
        let last = self.tasks.len() - 1;
        match self.tasks.remove(last) {
            Ok(task) => UndoOutcome::AddReverted { task, count: self.tasks.len() },
            Err(e) => UndoOutcome::Stale { reason: e.to_string() },
        }
    }

    fn validate_index(&self, index: usize, word: &str) -> LeoResult<()> {
        if self.tasks.is_empty() {
            return Err(LeoError::validation(format!("There are no tasks to {}.", word)));
        }
        if index >= self.tasks.len() {
            return Err(LeoError::validation(format!("Please give a valid task number to {}.", word)));
        }
        Ok(())
    }

    fn commit(&mut self, command: Command) -> LeoResult<()> {
        debug_assert!(command.is_mutating());
        self.history.record(command);
        self.save()
    }

    fn save(&self) -> LeoResult<()> {
        if !self.persist {
            debug!("not saving to {}: the file was never loaded", self.storage.path().display());
            return Ok(());
        }
        self.storage.save(&self.tasks)
    }
}

fn stale_index(index: usize) -> UndoOutcome {
    UndoOutcome::Stale { reason: format!("There is no longer a task {} in the list.", index + 1) }
}
