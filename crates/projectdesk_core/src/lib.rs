//! Core domain logic for ProjectDesk.
//! This crate is the single source of truth for project/task invariants:
//! partial-update semantics, the task lifecycle and aggregate ownership.

pub mod logging;
pub mod model;
pub mod patch;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, init_logging_with, logging_status, LoggingConfig};
pub use model::enum_codec::{decode, encode, CodecEnum, UnknownEnumValue};
pub use model::error::{DomainError, DomainResult};
pub use model::project::{Project, ProjectId};
pub use model::status::{ProjectStatus, TaskPriority, TaskStatus};
pub use model::task::{Task, TaskId};
pub use patch::field::PatchField;
pub use patch::project_patch::ProjectPatch;
pub use patch::replace::{ProjectReplacement, TaskReplacement};
pub use patch::task_patch::TaskPatch;
pub use patch::{apply, EntityPatch};
pub use repo::project_repo::{
    MemoryProjectRepository, ProjectRepository, ProjectStore, RepoError, RepoResult,
};
pub use service::project_service::{NewProject, ProjectService};
pub use service::task_service::{NewTask, TaskService};
pub use service::{ServiceError, ServiceResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
