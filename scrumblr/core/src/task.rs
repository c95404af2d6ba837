use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Format the board prompts for when asking for a due date.
pub const DUE_DATE_FORMAT: &str = "%m-%d-%Y";

const TBD: &str = "TBD";

/// Progress of a task. Each value is shown in exactly one column of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::NotStarted, Status::InProgress, Status::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::NotStarted => "Not Started",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// User input that cannot be sent to the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Task title is required")]
    EmptyTitle,
    #[error("Due date '{0}' is not in MM-DD-YYYY format")]
    InvalidDueDate(String),
}

/// A task as the board knows it. The id is always the one assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub assignee: String,
    pub due_date: String,
    pub status: Status,
}

impl Task {
    /// Due date as shown on a card.
    pub fn due_label(&self) -> &str {
        if self.due_date.trim().is_empty() {
            TBD
        } else {
            &self.due_date
        }
    }

    /// Applies the fields present in `edit`, leaving the rest untouched.
    pub fn apply(&mut self, edit: &TaskEdit) {
        if let Some(title) = &edit.title {
            self.title = title.trim().to_string();
        }
        if let Some(assignee) = &edit.assignee {
            self.assignee = assignee.trim().to_string();
        }
        if let Some(due_date) = &edit.due_date {
            self.due_date = due_date.trim().to_string();
        }
    }
}

/// Task as it travels over the wire. The store and its proxies disagree on the name of
/// the identifier, so all known spellings are accepted here and nowhere else.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TaskRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "taskId")]
    pub task_id: Option<String>,
    #[serde(default, rename = "taskID")]
    pub task_id_upper: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default, rename = "dueDate")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl TaskRecord {
    /// The identifier, preferring `taskId`, then `id`, then `taskID`. Blank ids count as missing.
    pub fn identifier(&self) -> Option<&str> {
        [&self.task_id, &self.id, &self.task_id_upper]
            .into_iter()
            .flatten()
            .map(|id| id.as_str())
            .find(|id| !id.trim().is_empty())
    }

    /// Converts into a [`Task`], or `None` when the record carries no usable id.
    ///
    /// A missing status means "Not Started". An unrecognised one is logged and placed
    /// in the first column as well.
    pub fn into_task(self) -> Option<Task> {
        let id = self.identifier()?.to_string();
        let status = match self.status.as_deref() {
            None | Some("") => Status::default(),
            Some(raw) => raw.parse::<Status>().unwrap_or_else(|err| {
                tracing::warn!(task_id = %id, "{err}, placing task in the first column");
                Status::default()
            }),
        };
        Some(Task {
            id,
            title: self.title.unwrap_or_default(),
            assignee: self.assignee.unwrap_or_default(),
            due_date: self.due_date.unwrap_or_default(),
            status,
        })
    }
}

/// A task that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub assignee: String,
    pub due_date: String,
    pub status: Status,
}

impl NewTask {
    pub fn new(
        title: impl Into<String>,
        assignee: impl Into<String>,
        due_date: impl Into<String>,
        status: Status,
    ) -> Self {
        Self {
            title: title.into().trim().to_string(),
            assignee: assignee.into().trim().to_string(),
            due_date: due_date.into().trim().to_string(),
            status,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)?;
        validate_due_date(&self.due_date)
    }
}

/// Field changes requested from the edit dialog. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    pub title: Option<String>,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
}

impl TaskEdit {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.assignee.is_none() && self.due_date.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        match &self.due_date {
            Some(due_date) => validate_due_date(due_date),
            None => Ok(()),
        }
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}

fn validate_due_date(due_date: &str) -> Result<(), ValidationError> {
    let due_date = due_date.trim();
    if due_date.is_empty() {
        return Ok(());
    }
    NaiveDate::parse_from_str(due_date, DUE_DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidDueDate(due_date.to_string()))
}
