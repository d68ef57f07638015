//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate load -> mutate -> store sequences for projects and tasks.
//! - Compose repository lookup failures with domain failures.
//!
//! # Invariants
//! - Services mutate a loaded copy and write back only on success.
//! - Tasks are attached/detached only via `Project::add_task` /
//!   `Project::remove_task`.

pub mod project_service;
pub mod task_service;

use crate::model::error::DomainError;
use crate::model::project::ProjectId;
use crate::model::task::TaskId;
use crate::repo::project_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for project/task use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Target project does not exist.
    ProjectNotFound(ProjectId),
    /// Target task does not exist.
    TaskNotFound(TaskId),
    /// Domain rule rejected the request.
    Domain(DomainError),
    /// Repository-level failure.
    Repo(RepoError),
}

impl ServiceError {
    /// Short stable kind label, suitable for `key=value` log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ProjectNotFound(_) | Self::TaskNotFound(_) => "not_found",
            Self::Domain(err) => err.kind(),
            Self::Repo(_) => "repo",
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProjectNotFound(id) => write!(f, "project with id {id} not found"),
            Self::TaskNotFound(id) => write!(f, "task with id {id} not found"),
            Self::Domain(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Domain(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(value: DomainError) -> Self {
        Self::Domain(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::ProjectNotFound(id),
            other => Self::Repo(other),
        }
    }
}
