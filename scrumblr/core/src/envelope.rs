//! Interpretation of the store's replies.
//!
//! Depending on how the handler is wired behind the gateway, the store answers either
//! with its payload directly (`{ "success": true, "task": {..} }`) or with the payload
//! serialized a second time under a `body` key (`{ "body": "{\"success\":true,..}" }`).
//! [`normalize`] hides that difference so callers only ever see a [`LogicalPayload`].
use crate::board::BoardRecord;
use crate::task::{Task, TaskRecord};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

const GENERIC_FAILURE: &str = "The server could not complete the request";

/// A body was received but could not be read as an envelope.
#[derive(Error, Debug)]
pub enum EnvelopeError {
    #[error("malformed nested body")]
    MalformedNestedBody(#[source] serde_json::Error),
    #[error("response body is not JSON")]
    NotJson(#[source] serde_json::Error),
    #[error("unexpected response shape")]
    UnexpectedShape(#[source] serde_json::Error),
}

/// A well-formed envelope that reports a failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    Rejected(String),
    #[error("Response did not include a task")]
    MissingTask,
    #[error("Response task has no id")]
    MissingTaskId,
}

/// The two shapes a reply can take.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// The payload serialized as a string under `body`.
    Wrapped(String),
    /// The payload itself.
    Direct(Value),
}

impl Envelope {
    /// Sorts a parsed response into one of the two shapes. Only a string-typed `body`
    /// counts as wrapping; anything else is taken as the payload.
    pub fn classify(value: Value) -> Self {
        match value {
            Value::Object(mut fields) => match fields.remove("body") {
                Some(Value::String(body)) => Envelope::Wrapped(body),
                Some(other) => {
                    fields.insert("body".to_string(), other);
                    Envelope::Direct(Value::Object(fields))
                }
                None => Envelope::Direct(Value::Object(fields)),
            },
            other => Envelope::Direct(other),
        }
    }

    /// Parses raw response text and classifies it.
    pub fn parse(raw: &str) -> Result<Self, EnvelopeError> {
        let value = serde_json::from_str(raw).map_err(EnvelopeError::NotJson)?;
        Ok(Self::classify(value))
    }

    /// The logical payload as untyped JSON.
    pub fn into_value(self) -> Result<Value, EnvelopeError> {
        match self {
            Envelope::Wrapped(body) => {
                serde_json::from_str(&body).map_err(EnvelopeError::MalformedNestedBody)
            }
            Envelope::Direct(value) => Ok(value),
        }
    }

    pub fn into_payload(self) -> Result<LogicalPayload, EnvelopeError> {
        serde_json::from_value(self.into_value()?).map_err(EnvelopeError::UnexpectedShape)
    }
}

/// Unwraps a parsed response into its logical payload. Applying it to a payload that
/// was never wrapped is a pass-through.
pub fn normalize(value: Value) -> Result<LogicalPayload, EnvelopeError> {
    Envelope::classify(value).into_payload()
}

/// What the store actually said, whichever way it was delivered.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LogicalPayload {
    /// Missing means failed.
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub task: Option<TaskRecord>,
    #[serde(default)]
    pub items: Option<Vec<Value>>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Board snapshot returned by the listing endpoint.
    #[serde(default, rename = "mockData")]
    pub board: Option<BoardRecord>,
}

impl LogicalPayload {
    /// The store's own explanation of a failure, if it gave one.
    pub fn failure_message(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or(self.message.as_deref())
            .filter(|message| !message.trim().is_empty())
    }

    /// Passes the payload through when `success` is set, otherwise turns it into an [`ApiError`].
    pub fn ensure_success(self) -> Result<Self, ApiError> {
        if self.success {
            return Ok(self);
        }
        let message = self.failure_message().unwrap_or(GENERIC_FAILURE);
        Err(ApiError::Rejected(message.to_string()))
    }

    /// The task the store echoed back after a create or update.
    pub fn into_task(self) -> Result<Task, ApiError> {
        self.task
            .ok_or(ApiError::MissingTask)?
            .into_task()
            .ok_or(ApiError::MissingTaskId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Status;
    use serde_json::json;

    fn task_json() -> Value {
        json!({
            "id": "t-1",
            "title": "Write spec",
            "assignee": "Dana",
            "dueDate": "12-01-2025",
            "status": "Not Started"
        })
    }

    #[test]
    fn test_wrapped_and_direct_normalize_to_the_same_payload() {
        // Arrange
        let direct = json!({ "success": true, "task": task_json() });
        let wrapped = json!({ "body": direct.to_string() });

        // Act
        let from_direct = normalize(direct).unwrap();
        let from_wrapped = normalize(wrapped).unwrap();

        // Assert
        assert_eq!(from_direct, from_wrapped);
        assert!(from_direct.success);
    }

    #[test]
    fn test_wrapped_envelope_with_gateway_fields() {
        let wrapped = json!({
            "statusCode": 201,
            "headers": { "Content-Type": "application/json" },
            "body": json!({ "success": true, "task": task_json() }).to_string()
        });

        let payload = normalize(wrapped).unwrap();

        assert_eq!(payload.into_task().unwrap().id, "t-1");
    }

    #[test]
    fn test_classify_detects_string_body_only() {
        assert_eq!(
            Envelope::classify(json!({ "body": "{}" })),
            Envelope::Wrapped("{}".to_string())
        );
        assert_eq!(
            Envelope::classify(json!({ "success": true, "body": { "nested": 1 } })),
            Envelope::Direct(json!({ "success": true, "body": { "nested": 1 } }))
        );
    }

    #[test]
    fn test_malformed_nested_body_is_an_envelope_error() {
        let result = normalize(json!({ "body": "{not json" }));

        assert!(matches!(result, Err(EnvelopeError::MalformedNestedBody(_))));
        assert_eq!(result.unwrap_err().to_string(), "malformed nested body");
    }

    #[test]
    fn test_non_json_text_is_an_envelope_error() {
        let result = Envelope::parse("<html>Bad Gateway</html>");

        assert!(matches!(result, Err(EnvelopeError::NotJson(_))));
    }

    #[test]
    fn test_wrong_field_types_are_an_envelope_error() {
        let result = normalize(json!({ "success": "yes" }));

        assert!(matches!(result, Err(EnvelopeError::UnexpectedShape(_))));
    }

    #[test]
    fn test_missing_success_counts_as_failure() {
        let payload = normalize(json!({ "task": task_json() })).unwrap();

        let result = payload.ensure_success();

        assert_eq!(
            result,
            Err(ApiError::Rejected(GENERIC_FAILURE.to_string()))
        );
    }

    #[test]
    fn test_failure_surfaces_error_then_message() {
        let with_error = normalize(json!({ "success": false, "error": "Table missing" })).unwrap();
        let with_message =
            normalize(json!({ "success": false, "message": "Task id is required for delete" }))
                .unwrap();

        assert_eq!(
            with_error.ensure_success(),
            Err(ApiError::Rejected("Table missing".to_string()))
        );
        assert_eq!(
            with_message.ensure_success(),
            Err(ApiError::Rejected("Task id is required for delete".to_string()))
        );
    }

    #[test]
    fn test_into_task_requires_task_with_id() {
        let without_task = normalize(json!({ "success": true })).unwrap();
        let without_id = normalize(json!({ "success": true, "task": { "title": "x" } })).unwrap();

        assert_eq!(without_task.into_task(), Err(ApiError::MissingTask));
        assert_eq!(without_id.into_task(), Err(ApiError::MissingTaskId));
    }

    #[test]
    fn test_into_task_maps_fields() {
        let payload = normalize(json!({ "success": true, "task": task_json() })).unwrap();

        let task = payload.into_task().unwrap();

        assert_eq!(task.title, "Write spec");
        assert_eq!(task.assignee, "Dana");
        assert_eq!(task.due_date, "12-01-2025");
        assert_eq!(task.status, Status::NotStarted);
    }
}
