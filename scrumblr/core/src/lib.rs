//! Core domain models for the Scrumblr board: tasks, columns, the board snapshot,
//! the response envelope and the client-side task cache.
pub mod board;
pub mod column;
pub mod envelope;
pub mod repository;
pub mod task;

pub use board::{BoardSnapshot, Member, Project};
pub use column::{Column, ColumnError};
pub use envelope::{ApiError, Envelope, EnvelopeError, LogicalPayload, normalize};
pub use repository::TaskRepository;
pub use task::{NewTask, Status, Task, TaskEdit, TaskRecord, ValidationError};
