//! Turns board interactions into repository changes and store requests.
//!
//! Policy per interaction:
//! - create and delete wait for the store before touching the repository or the view;
//! - drags and edits are applied locally first (the view has already moved the card by
//!   the time a drag is reported) and are rolled back, both in the repository and on
//!   screen, when the store does not confirm them.
//!
//! Confirmed updates overwrite the cached task with the store's copy, so when two
//! requests for the same task overlap the last one to complete wins.

use crate::sync::{SyncClient, SyncError};
use crate::view::BoardView;
use scrumblr_core::{Column, NewTask, Task, TaskEdit, TaskRepository, ValidationError};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum BoardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Sync(#[from] SyncError),
    #[error("Task {0} is not on the board")]
    TaskNotFound(String),
}

/// A card was dropped into a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEvent {
    pub task_id: String,
    pub from: Column,
    pub to: Column,
}

impl DragEvent {
    pub fn new(task_id: impl Into<String>, from: Column, to: Column) -> Self {
        Self {
            task_id: task_id.into(),
            from,
            to,
        }
    }
}

pub struct BoardController<'a, S: SyncClient, V: BoardView> {
    client: &'a S,
    view: &'a V,
    repository: TaskRepository,
}

impl<'a, S: SyncClient, V: BoardView> BoardController<'a, S, V> {
    pub fn new(client: &'a S, view: &'a V, repository: TaskRepository) -> Self {
        Self {
            client,
            view,
            repository,
        }
    }

    pub fn repository(&self) -> &TaskRepository {
        &self.repository
    }

    /// Initial load: fetches the board, replaces the cache and renders one card per task.
    /// On failure the cache is left as it was.
    #[tracing::instrument(skip(self))]
    pub async fn load(&mut self) -> Result<(), BoardError> {
        let snapshot = match self.client.fetch_board().await {
            Ok(snapshot) => snapshot,
            Err(err) => return Err(self.report("Could not load the board", err.into())),
        };

        self.repository.replace_all(snapshot.tasks.iter().cloned());
        self.view.clear();
        self.view.render_header(&snapshot);
        for task in self.repository.tasks() {
            self.view.render_card(task, Column::for_status(task.status));
        }
        info!(tasks = self.repository.len(), "Board loaded");
        Ok(())
    }

    /// Stores a new task. Nothing is added locally until the store has assigned an id.
    #[tracing::instrument(skip(self))]
    pub async fn create_task(&mut self, draft: NewTask) -> Result<Task, BoardError> {
        if let Err(err) = draft.validate() {
            return Err(self.report("Task not saved", err.into()));
        }

        match self.client.create_task(&draft).await {
            Ok(task) => {
                self.view.render_card(&task, Column::for_status(task.status));
                self.repository.upsert(task.clone());
                info!(task_id = %task.id, "Task created");
                Ok(task)
            }
            Err(err) => Err(self.report("Could not save task", err.into())),
        }
    }

    /// Reconciles a card the view has already moved from `event.from` to `event.to`.
    /// A drop into the column it came from sends nothing.
    #[tracing::instrument(skip(self))]
    pub async fn move_task(&mut self, event: DragEvent) -> Result<(), BoardError> {
        let Some(current) = self.repository.find(&event.task_id).cloned() else {
            self.view.move_card(&event.task_id, event.from);
            return Err(self.report(
                "Could not move task",
                BoardError::TaskNotFound(event.task_id),
            ));
        };

        let target = event.to.status();
        if event.from == event.to || current.status == target {
            debug!("Card dropped back into its own column");
            return Ok(());
        }
        if Column::for_status(current.status) != event.from {
            warn!(
                status = %current.status,
                from = %event.from,
                "Drag source does not match the cached status"
            );
        }

        let previous = current.status;
        let mut moved = current;
        moved.status = target;
        self.repository.upsert(moved.clone());

        match self.client.update_task_status(&moved).await {
            Ok(confirmed) => {
                let column = Column::for_status(confirmed.status);
                if column != event.to {
                    self.view.move_card(&confirmed.id, column);
                }
                info!(task_id = %confirmed.id, status = %confirmed.status, "Task moved");
                self.repository.upsert(confirmed);
                Ok(())
            }
            Err(err) => {
                // The card goes back to the column the cache holds, not `event.from`.
                self.repository.set_status(&event.task_id, previous);
                self.view.move_card(&event.task_id, Column::for_status(previous));
                warn!(task_id = %event.task_id, status = %previous, "Move reverted");
                Err(self.report("Could not move task", err.into()))
            }
        }
    }

    /// Deletes a task. The card stays until the store confirms the delete.
    #[tracing::instrument(skip(self))]
    pub async fn delete_task(&mut self, task_id: &str) -> Result<(), BoardError> {
        if !self.repository.contains(task_id) {
            return Err(self.report(
                "Could not delete task",
                BoardError::TaskNotFound(task_id.to_string()),
            ));
        }

        match self.client.delete_task(task_id).await {
            Ok(()) => {
                self.repository.remove(task_id);
                self.view.remove_card(task_id);
                info!(task_id, "Task deleted");
                Ok(())
            }
            Err(err) => Err(self.report("Could not delete task", err.into())),
        }
    }

    /// Edits title, assignee or due date. The store upserts whole records, so the edit is
    /// pushed the same way a status change is, and rolled back if it is refused.
    #[tracing::instrument(skip(self))]
    pub async fn edit_task(&mut self, task_id: &str, edit: TaskEdit) -> Result<Task, BoardError> {
        if let Err(err) = edit.validate() {
            return Err(self.report("Task not saved", err.into()));
        }
        let Some(original) = self.repository.find(task_id).cloned() else {
            return Err(self.report(
                "Could not update task",
                BoardError::TaskNotFound(task_id.to_string()),
            ));
        };
        if edit.is_empty() {
            return Ok(original);
        }

        let mut edited = original.clone();
        edited.apply(&edit);
        self.repository.upsert(edited.clone());
        self.view.update_card(&edited);

        match self.client.update_task_status(&edited).await {
            Ok(confirmed) => {
                if confirmed != edited {
                    self.view.update_card(&confirmed);
                }
                info!(task_id, "Task updated");
                self.repository.upsert(confirmed.clone());
                Ok(confirmed)
            }
            Err(err) => {
                self.view.update_card(&original);
                self.repository.upsert(original);
                Err(self.report("Could not update task", err.into()))
            }
        }
    }

    fn report(&self, context: &str, error: BoardError) -> BoardError {
        warn!(%error, "{context}");
        self.view.notify(&format!("{context}: {error}"));
        error
    }
}
