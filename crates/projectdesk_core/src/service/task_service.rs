//! Task use-case service.
//!
//! # Responsibility
//! - Provide create/get/list/update/patch/delete entry points for tasks.
//! - Resolve a task id to its owning aggregate before mutating.
//!
//! # Invariants
//! - Creation attaches through `Project::add_task`; deletion detaches
//!   through `Project::remove_task`.
//! - The initial status of a new task is reached from `TODO` through the
//!   state machine, so a task created as `DONE` carries `completed_at`.

use crate::model::error::{require_non_blank, DomainError};
use crate::model::project::{Project, ProjectId};
use crate::model::status::{TaskPriority, TaskStatus};
use crate::model::task::{Task, TaskId};
use crate::patch::replace::TaskReplacement;
use crate::patch::task_patch::TaskPatch;
use crate::patch::EntityPatch;
use crate::repo::project_repo::ProjectRepository;
use crate::service::{ServiceError, ServiceResult};
use chrono::NaiveDate;
use log::{info, warn};
use serde_json::Value;

/// Request model for creating a task inside an existing project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub project_id: ProjectId,
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `TODO`.
    pub status: Option<TaskStatus>,
    /// Defaults to `MEDIUM`.
    pub priority: Option<TaskPriority>,
    pub due_date: Option<NaiveDate>,
    pub assignee: Option<String>,
}

impl NewTask {
    /// Minimal request: title only, every optional field at its default.
    pub fn titled(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
            description: None,
            status: None,
            priority: None,
            due_date: None,
            assignee: None,
        }
    }
}

/// Task service facade over repository implementations.
pub struct TaskService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every task across all projects, ordered by id.
    pub fn list_tasks(&self) -> ServiceResult<Vec<Task>> {
        let projects = self
            .repo
            .list_projects()
            .map_err(|err| log_failure("task_list", None, None, err.into()))?;
        let mut tasks: Vec<Task> = projects
            .into_iter()
            .flat_map(|project| project.tasks().to_vec())
            .collect();
        tasks.sort_by_key(Task::id);
        info!(
            "event=task_list module=service status=ok count={}",
            tasks.len()
        );
        Ok(tasks)
    }

    /// # Errors
    /// - `TaskNotFound` when no project owns a task with this id.
    pub fn get_task(&self, id: TaskId) -> ServiceResult<Task> {
        let task = self
            .load_owner(id)
            .and_then(|project| {
                project
                    .task(id)
                    .cloned()
                    .ok_or(ServiceError::TaskNotFound(id))
            })
            .map_err(|err| log_failure("task_get", None, Some(id), err))?;
        info!(
            "event=task_get module=service status=ok project_id={} task_id={id}",
            task.project_id().map_or_else(|| "-".to_string(), |value| value.to_string())
        );
        Ok(task)
    }

    /// # Errors
    /// - `ProjectNotFound` when `request.project_id` does not exist.
    /// - `InvalidInput` for a blank title.
    pub fn create_task(&self, request: NewTask) -> ServiceResult<Task> {
        let project_id = request.project_id;
        self.try_create(request)
            .map_err(|err| log_failure("task_create", Some(project_id), None, err))
    }

    /// Replaces every mutable field (PUT semantics); status is a transition request.
    pub fn update_task(&self, id: TaskId, replacement: &TaskReplacement) -> ServiceResult<Task> {
        let task = self.mutate("task_update", id, |task| replacement.apply_to(task))?;
        info!("event=task_update module=service status=ok task_id={id}");
        Ok(task)
    }

    /// Applies a parsed partial update.
    pub fn patch_task(&self, id: TaskId, patch: &TaskPatch) -> ServiceResult<Task> {
        let task = self.mutate("task_patch", id, |task| patch.apply_to(task))?;
        info!(
            "event=task_patch module=service status=ok task_id={} fields={} task_status={}",
            id,
            patch.present_fields().join(","),
            task.status()
        );
        Ok(task)
    }

    /// Parses a raw JSON payload and applies it as a partial update.
    pub fn patch_task_json(&self, id: TaskId, payload: &Value) -> ServiceResult<Task> {
        let patch = TaskPatch::from_json(payload)
            .map_err(|err| log_failure("task_patch", None, Some(id), err.into()))?;
        self.patch_task(id, &patch)
    }

    /// Detaches the task from its project, then drops it.
    pub fn delete_task(&self, id: TaskId) -> ServiceResult<()> {
        let result = self.load_owner(id).and_then(|mut project| {
            project
                .remove_task(id)
                .ok_or(ServiceError::TaskNotFound(id))?;
            self.repo.save_project(&project)?;
            Ok(project.id())
        });
        let project_id = result.map_err(|err| log_failure("task_delete", None, Some(id), err))?;
        info!("event=task_delete module=service status=ok project_id={project_id} task_id={id}");
        Ok(())
    }

    fn try_create(&self, request: NewTask) -> ServiceResult<Task> {
        require_non_blank("title", &request.title)?;
        let mut project = self
            .repo
            .get_project(request.project_id)?
            .ok_or(ServiceError::ProjectNotFound(request.project_id))?;

        let mut task = Task::new(self.repo.next_task_id(), request.title)?;
        task.set_description(request.description);
        task.set_due_date(request.due_date);
        task.set_assignee(request.assignee);
        task.set_priority(request.priority.unwrap_or_default());
        task.change_status(request.status.unwrap_or_default())?;

        let created = project.add_task(task)?.clone();
        self.repo.save_project(&project)?;

        info!(
            "event=task_create module=service status=ok project_id={} task_id={}",
            project.id(),
            created.id()
        );
        Ok(created)
    }

    fn load_owner(&self, task_id: TaskId) -> ServiceResult<Project> {
        let owner = self
            .repo
            .find_task_owner(task_id)?
            .ok_or(ServiceError::TaskNotFound(task_id))?;
        self.repo
            .get_project(owner)?
            .ok_or(ServiceError::TaskNotFound(task_id))
    }

    fn mutate(
        &self,
        event: &'static str,
        id: TaskId,
        change: impl FnOnce(&mut Task) -> Result<(), DomainError>,
    ) -> ServiceResult<Task> {
        self.load_change_store(id, change)
            .map_err(|err| log_failure(event, None, Some(id), err))
    }

    fn load_change_store(
        &self,
        id: TaskId,
        change: impl FnOnce(&mut Task) -> Result<(), DomainError>,
    ) -> ServiceResult<Task> {
        let mut project = self.load_owner(id)?;
        if !project.contains_task(id) {
            return Err(ServiceError::TaskNotFound(id));
        }
        let updated = project.update_task(id, change)?.clone();
        self.repo.save_project(&project)?;
        Ok(updated)
    }
}

fn log_failure(
    event: &'static str,
    project_id: Option<ProjectId>,
    task_id: Option<TaskId>,
    err: ServiceError,
) -> ServiceError {
    let render = |value: Option<i64>| value.map_or_else(|| "-".to_string(), |id| id.to_string());
    warn!(
        "event={event} module=service status=error project_id={} task_id={} error_kind={}",
        render(project_id),
        render(task_id),
        err.kind()
    );
    err
}
