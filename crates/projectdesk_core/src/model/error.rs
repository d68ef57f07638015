//! Failure taxonomy for core domain operations.
//!
//! # Invariants
//! - Every variant is local, synchronous and non-retryable.
//! - Lookup failures (`NotFound`) belong to the service layer, which wraps
//!   this type rather than extending it.

use crate::model::enum_codec::UnknownEnumValue;
use crate::model::project::ProjectId;
use crate::model::task::TaskId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed or semantically illegal value (blank required string,
    /// unparsable date, unknown enum token, illegal null).
    InvalidInput(String),
    /// Attempt to change an identity field to a different value.
    ImmutableField(&'static str),
    /// Illegal task lifecycle transition.
    InvalidTaskState(String),
    /// Task already references a different project.
    AlreadyOwned {
        task_id: TaskId,
        owner: ProjectId,
    },
    /// Project collection already holds a task with this id.
    DuplicateTask(TaskId),
    /// Project collection holds no task with this id.
    UnknownTask(TaskId),
}

impl DomainError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Short stable kind label, suitable for `key=value` log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::ImmutableField(_) => "immutable_field",
            Self::InvalidTaskState(_) => "invalid_task_state",
            Self::AlreadyOwned { .. } => "already_owned",
            Self::DuplicateTask(_) => "duplicate_task",
            Self::UnknownTask(_) => "unknown_task",
        }
    }
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(message) => write!(f, "{message}"),
            Self::ImmutableField(field) => write!(f, "{field} is immutable"),
            Self::InvalidTaskState(message) => write!(f, "{message}"),
            Self::AlreadyOwned { task_id, owner } => write!(
                f,
                "task {task_id} already belongs to another project (id={owner})"
            ),
            Self::DuplicateTask(task_id) => {
                write!(f, "task {task_id} is already part of this project")
            }
            Self::UnknownTask(task_id) => write!(f, "task {task_id} is not part of this project"),
        }
    }
}

impl Error for DomainError {}

impl From<UnknownEnumValue> for DomainError {
    fn from(value: UnknownEnumValue) -> Self {
        Self::InvalidInput(value.to_string())
    }
}

/// Rejects blank (empty or whitespace-only) required strings.
pub(crate) fn require_non_blank(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid_input(format!(
            "{field} must not be blank"
        )));
    }
    Ok(())
}
