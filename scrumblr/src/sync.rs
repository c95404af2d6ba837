//! Requests against the board endpoint of the task store.
//!
//! Every reply, whatever its shape, goes through the envelope normalizer before its
//! `success` flag is looked at. Transport, envelope and API failures all come back as a
//! [`SyncError`], so callers never see a raw parse error.

use crate::connectors::http::{HttpResponse, Transport, TransportError};
#[cfg(test)]
use mockall::automock;
use scrumblr_core::{
    ApiError, BoardSnapshot, Envelope, EnvelopeError, LogicalPayload, NewTask, Task,
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Could not reach the task store: {0}")]
    Transport(#[from] TransportError),
    #[error("Could not read the task store's reply: {0}")]
    Envelope(#[from] EnvelopeError),
    #[error("The task store refused the request: {0}")]
    Api(#[from] ApiError),
}

#[cfg_attr(test, automock)]
pub trait SyncClient {
    /// Fetches the whole board: project header, members and tasks.
    async fn fetch_board(&self) -> Result<BoardSnapshot, SyncError>;
    /// Fetches only the tasks of the board.
    async fn list_tasks(&self) -> Result<Vec<Task>, SyncError>;
    /// Stores a new task and returns it with the id the store assigned.
    async fn create_task(&self, draft: &NewTask) -> Result<Task, SyncError>;
    /// Sends the full task record; the store upserts it by id.
    async fn update_task_status(&self, task: &Task) -> Result<Task, SyncError>;
    async fn delete_task(&self, id: &str) -> Result<(), SyncError>;
}

/// [`SyncClient`] speaking JSON over a [`Transport`].
pub struct HttpSyncClient<T: Transport> {
    transport: T,
    endpoint: String,
}

impl<T: Transport> HttpSyncClient<T> {
    pub fn new(transport: T, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Transport> SyncClient for HttpSyncClient<T> {
    #[tracing::instrument(skip(self))]
    async fn fetch_board(&self) -> Result<BoardSnapshot, SyncError> {
        let response = self.transport.get(&self.endpoint).await;
        let payload = interpret(response)?;
        Ok(BoardSnapshot::from_payload(payload))
    }

    #[tracing::instrument(skip(self))]
    async fn list_tasks(&self) -> Result<Vec<Task>, SyncError> {
        Ok(self.fetch_board().await?.tasks)
    }

    #[tracing::instrument(skip(self))]
    async fn create_task(&self, draft: &NewTask) -> Result<Task, SyncError> {
        let body = json!({
            "title": draft.title,
            "assignee": draft.assignee,
            "dueDate": draft.due_date,
            "status": draft.status,
        });
        let response = self.transport.post_json(&self.endpoint, &body).await;
        Ok(interpret(response)?.into_task()?)
    }

    #[tracing::instrument(skip(self))]
    async fn update_task_status(&self, task: &Task) -> Result<Task, SyncError> {
        let body = json!({
            "id": task.id,
            "title": task.title,
            "assignee": task.assignee,
            "dueDate": task.due_date,
            "status": task.status,
        });
        let response = self.transport.post_json(&self.endpoint, &body).await;
        Ok(interpret(response)?.into_task()?)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_task(&self, id: &str) -> Result<(), SyncError> {
        // The store multiplexes deletes through the same POST, flagged by `delete`.
        let body = json!({ "id": id, "delete": true });
        let response = self.transport.post_json(&self.endpoint, &body).await;
        interpret(response)?;
        Ok(())
    }
}

fn interpret(
    response: Result<HttpResponse, TransportError>,
) -> Result<LogicalPayload, SyncError> {
    let result = response.map_err(SyncError::from).and_then(read_payload);
    if let Err(err) = &result {
        warn!(%err, "Task store request failed");
    }
    result
}

fn read_payload(response: HttpResponse) -> Result<LogicalPayload, SyncError> {
    debug!(status = response.status, body = %response.body, "Raw response");
    let status = response.status;
    let payload = match Envelope::parse(&response.body).and_then(Envelope::into_payload) {
        Ok(payload) => payload,
        Err(_) if !response.is_success() => return Err(TransportError::Status { status }.into()),
        Err(err) => return Err(err.into()),
    };
    debug!(?payload, "Unwrapped response");

    if !response.is_success() {
        return Err(match payload.failure_message() {
            Some(message) => ApiError::Rejected(message.to_string()).into(),
            None => TransportError::Status { status }.into(),
        });
    }
    Ok(payload.ensure_success()?)
}
