use crate::envelope::LogicalPayload;
use crate::task::{Task, TaskRecord};
use serde::Deserialize;
use serde_json::Value;

const DEFAULT_TITLE: &str = "Scrumblr Board";
const NO_GOALS: &str = "No goals defined";

/// Project shown in the board header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Project {
    #[serde(default, rename = "project_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub goals: Option<String>,
}

impl Project {
    pub fn title(&self) -> &str {
        non_blank(&self.title).unwrap_or(DEFAULT_TITLE)
    }

    pub fn due_label(&self) -> String {
        match non_blank(&self.due_date) {
            Some(due_date) => format!("DUE DATE {due_date}"),
            None => "DUE DATE TBD".to_string(),
        }
    }

    pub fn goals(&self) -> &str {
        non_blank(&self.goals).unwrap_or(NO_GOALS)
    }
}

/// Team member listed next to the board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Member {
    #[serde(default, rename = "user_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Board snapshot as the listing endpoint sends it. Task records stay raw until
/// [`BoardSnapshot::from_payload`] so one bad record cannot sink the whole listing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BoardRecord {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub users: Vec<Member>,
    #[serde(default)]
    pub tasks: Vec<Value>,
}

/// Everything the initial load brings back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub project: Option<Project>,
    pub members: Vec<Member>,
    pub tasks: Vec<Task>,
}

impl BoardSnapshot {
    /// Builds the snapshot from a successful listing payload. A board snapshot under
    /// `mockData` wins; a bare `items` list is accepted otherwise. Records that are
    /// malformed or lack an id are dropped with a warning.
    pub fn from_payload(payload: LogicalPayload) -> Self {
        let (project, members, records) = match payload.board {
            Some(board) => (board.projects.into_iter().next(), board.users, board.tasks),
            None => (None, Vec::new(), payload.items.unwrap_or_default()),
        };
        let tasks = records.into_iter().filter_map(task_from_value).collect();
        Self {
            project,
            members,
            tasks,
        }
    }
}

fn task_from_value(value: Value) -> Option<Task> {
    let record = match serde_json::from_value::<TaskRecord>(value) {
        Ok(record) => record,
        Err(err) => {
            tracing::warn!(%err, "Dropping malformed task record");
            return None;
        }
    };
    let title = record.title.clone();
    let task = record.into_task();
    if task.is_none() {
        tracing::warn!(?title, "Dropping task without an id");
    }
    task
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
