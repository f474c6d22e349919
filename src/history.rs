use crate::parser::Command;

/// Linear record of executed mutating commands, with a cursor marking the most
/// recent entry that has not been undone yet.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<Command>,
    /// Number of entries that can still be undone; the cursor sits at `current - 1`.
    current: usize,
}

impl History {
    pub fn new() -> History {
        History::default()
    }

    /// Records a command. Anything after the cursor (undone entries) is dropped first.
    pub fn record(&mut self, command: Command) {
        self.entries.truncate(self.current);
        self.entries.push(command);
        self.current += 1;
    }

    pub fn can_undo(&self) -> bool {
        self.current > 0
    }

    /// The most recent command that has not been undone.
    pub fn last_command(&self) -> Option<&Command> {
        self.current.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// Moves the cursor back one entry. Returns `false` when there was nothing to step over.
    pub fn step_back(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    pub fn undo_count(&self) -> usize {
        self.current
    }

    /// Total entries held, including undone ones still past the cursor.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
