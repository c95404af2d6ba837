//! The three fixed columns of the board and their one-to-one mapping onto [`Status`].
use crate::task::Status;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Start,
    Progress,
    Completed,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown column '{0}'")]
pub struct ColumnError(pub String);

impl Column {
    /// Columns in the order they appear on the board, left to right.
    pub const ALL: [Column; 3] = [Column::Start, Column::Progress, Column::Completed];

    /// Column a task with `status` is rendered in.
    pub fn for_status(status: Status) -> Self {
        match status {
            Status::NotStarted => Column::Start,
            Status::InProgress => Column::Progress,
            Status::Completed => Column::Completed,
        }
    }

    /// Status a card takes when dropped into this column.
    pub fn status(&self) -> Status {
        match self {
            Column::Start => Status::NotStarted,
            Column::Progress => Status::InProgress,
            Column::Completed => Status::Completed,
        }
    }

    /// Identifier of the list element holding the column's cards.
    pub fn list_id(&self) -> &'static str {
        match self {
            Column::Start => "start-list",
            Column::Progress => "progress-list",
            Column::Completed => "completed-list",
        }
    }

    /// Resolves a list identifier back to its column.
    pub fn from_list_id(list_id: &str) -> Option<Self> {
        Column::ALL
            .into_iter()
            .find(|column| column.list_id() == list_id)
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.status().as_str())
    }
}

impl FromStr for Column {
    type Err = ColumnError;

    /// Accepts list ids (`start-list`), short names (`start`) and status names (`In Progress`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        if let Some(column) = Column::from_list_id(&key) {
            return Ok(column);
        }
        match key.as_str() {
            "start" | "todo" | "not started" | "not-started" => Ok(Column::Start),
            "progress" | "doing" | "in progress" | "in-progress" => Ok(Column::Progress),
            "completed" | "done" => Ok(Column::Completed),
            _ => Err(ColumnError(s.to_string())),
        }
    }
}
