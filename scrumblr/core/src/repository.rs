use crate::column::Column;
use crate::task::{Status, Task};
use std::collections::HashMap;

/// In-memory cache of the board's tasks for the current session.
///
/// Tasks are keyed by id; the order in which ids first arrived is kept so cards can be
/// rendered in the order the store listed them. Access is single-threaded: wrap it in a
/// lock before sharing it between threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskRepository {
    tasks: HashMap<String, Task>,
    order: Vec<String>,
}

impl TaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards everything held so far and takes `tasks` as the new state.
    pub fn replace_all(&mut self, tasks: impl IntoIterator<Item = Task>) {
        self.tasks.clear();
        self.order.clear();
        for task in tasks {
            self.upsert(task);
        }
    }

    /// Inserts the task, or overwrites the one with the same id. Returns the replaced task.
    pub fn upsert(&mut self, task: Task) -> Option<Task> {
        let id = task.id.clone();
        let previous = self.tasks.insert(id.clone(), task);
        if previous.is_none() {
            self.order.push(id);
        }
        previous
    }

    /// Removes the task with `id`. Absent ids are a no-op.
    pub fn remove(&mut self, id: &str) -> Option<Task> {
        let removed = self.tasks.remove(id);
        if removed.is_some() {
            self.order.retain(|known| known != id);
        }
        removed
    }

    pub fn find(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tasks.contains_key(id)
    }

    /// Sets the status of the task with `id` and returns the status it had before.
    pub fn set_status(&mut self, id: &str, status: Status) -> Option<Status> {
        let task = self.tasks.get_mut(id)?;
        Some(std::mem::replace(&mut task.status, status))
    }

    /// All tasks in arrival order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.order.iter().filter_map(|id| self.tasks.get(id))
    }

    /// Tasks rendered in `column`, in arrival order.
    pub fn in_column(&self, column: Column) -> Vec<&Task> {
        self.tasks()
            .filter(|task| Column::for_status(task.status) == column)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
