use crate::error::{LeoError, LeoResult};
use crate::models::Task;

/// Ordered list of tasks. Position in the list is the task's user-facing number minus one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> TaskList {
        TaskList::default()
    }

    /// Appends a task, rejecting it if a duplicate is already present.
    pub fn add(&mut self, task: Task) -> LeoResult<()> {
        if self.tasks.iter().any(|t| t.is_duplicate_of(&task)) {
            return Err(LeoError::Duplicate(task.to_string()));
        }
        self.tasks.push(task);
        Ok(())
    }

    pub fn get(&self, index: usize) -> LeoResult<&Task> {
        self.tasks.get(index).ok_or(LeoError::IndexOutOfRange { index, len: self.tasks.len() })
    }

    /// Removes and returns the task at `index`, shifting later tasks down.
    pub fn remove(&mut self, index: usize) -> LeoResult<Task> {
        self.check(index)?;
        Ok(self.tasks.remove(index))
    }

    pub fn mark_done(&mut self, index: usize) -> LeoResult<&Task> {
        self.check(index)?;
        let task = &mut self.tasks[index];
        task.mark_done();
        Ok(task)
    }

    pub fn mark_not_done(&mut self, index: usize) -> LeoResult<&Task> {
        self.check(index)?;
        let task = &mut self.tasks[index];
        task.mark_not_done();
        Ok(task)
    }

    /// Tasks whose description contains `keyword`, ignoring case, in list order.
    pub fn find(&self, keyword: &str) -> Vec<Task> {
        let needle = keyword.to_lowercase();
        self.tasks
            .iter()
            .filter(|t| t.description.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    pub fn last(&self) -> Option<&Task> {
        self.tasks.last()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn to_vec(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    fn check(&self, index: usize) -> LeoResult<()> {
        if index >= self.tasks.len() {
            return Err(LeoError::IndexOutOfRange { index, len: self.tasks.len() });
        }
        Ok(())
    }
}

/// Builds a list without the duplicate check. Used when loading from disk,
/// where whatever was saved is taken as-is.
impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        TaskList { tasks }
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
