//! Presentation side of the board.
//!
//! The controller never touches a concrete UI. It talks to a [`BoardView`], which may be
//! a browser page driven by a drag-and-drop library, a terminal, or a test double.

#[cfg(test)]
use mockall::automock;
use scrumblr_core::{BoardSnapshot, Column, Task, TaskRepository};
use std::cell::RefCell;
use std::io::Write;

#[cfg_attr(test, automock)]
pub trait BoardView {
    /// Removes every card and the header.
    fn clear(&self);
    /// Shows the project title, due date, goals and team members.
    fn render_header(&self, snapshot: &BoardSnapshot);
    /// Adds a card for `task` at the end of `column`.
    fn render_card(&self, task: &Task, column: Column);
    /// Places an existing card in `column`.
    fn move_card(&self, task_id: &str, column: Column);
    /// Refreshes the title, assignee and due date shown on a card.
    fn update_card(&self, task: &Task);
    fn remove_card(&self, task_id: &str);
    /// The one path through which the user learns about failures.
    fn notify(&self, message: &str);
}

/// Writes board changes as plain text lines.
pub struct ConsoleView<W: Write> {
    out: RefCell<W>,
}

impl ConsoleView<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    /// Prints every column with its cards, in board order.
    pub fn print_board(&self, repository: &TaskRepository) {
        for column in Column::ALL {
            let tasks = repository.in_column(column);
            self.line(format!("== {} ({}) ==", column, tasks.len()));
            for task in tasks {
                self.line(format!("  {}", card(task)));
            }
        }
    }

    fn line(&self, text: String) {
        // Output is best-effort; a closed stdout must not abort the board.
        let _ = writeln!(self.out.borrow_mut(), "{text}");
    }
}

impl<W: Write> BoardView for ConsoleView<W> {
    fn clear(&self) {}

    fn render_header(&self, snapshot: &BoardSnapshot) {
        if let Some(project) = &snapshot.project {
            self.line(format!("# {} ({})", project.title(), project.due_label()));
            self.line(format!("Goals: {}", project.goals()));
        }
        if !snapshot.members.is_empty() {
            let names: Vec<&str> = snapshot.members.iter().map(|m| m.name.as_str()).collect();
            self.line(format!("Team: {}", names.join(", ")));
        }
    }

    fn render_card(&self, task: &Task, column: Column) {
        tracing::debug!(task_id = %task.id, %column, "Card rendered");
    }

    fn move_card(&self, task_id: &str, column: Column) {
        self.line(format!("-> {task_id} is now in {column}"));
    }

    fn update_card(&self, task: &Task) {
        self.line(format!("~ {}", card(task)));
    }

    fn remove_card(&self, task_id: &str) {
        self.line(format!("- {task_id} removed"));
    }

    fn notify(&self, message: &str) {
        self.line(format!("! {message}"));
    }
}

fn card(task: &Task) -> String {
    let assignee = if task.assignee.is_empty() {
        "unassigned"
    } else {
        task.assignee.as_str()
    };
    format!(
        "[{}] {} ({}, Due: {})",
        task.id,
        task.title,
        assignee,
        task.due_label()
    )
}
