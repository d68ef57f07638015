//! Project use-case service.
//!
//! # Responsibility
//! - Provide create/get/list/update/patch/delete entry points for projects.
//!
//! # Invariants
//! - New projects default to `PLANNED` when no status is requested.
//! - Deleting a project drops its tasks with it.

use crate::model::error::{require_non_blank, DomainError};
use crate::model::project::{Project, ProjectId};
use crate::model::status::ProjectStatus;
use crate::patch::project_patch::ProjectPatch;
use crate::patch::replace::ProjectReplacement;
use crate::patch::EntityPatch;
use crate::repo::project_repo::ProjectRepository;
use crate::service::{ServiceError, ServiceResult};
use chrono::NaiveDate;
use log::{info, warn};
use serde_json::Value;

/// Request model for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    /// Defaults to `PLANNED`.
    pub status: Option<ProjectStatus>,
}

/// Project service facade over repository implementations.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all projects ordered by id.
    pub fn list_projects(&self) -> ServiceResult<Vec<Project>> {
        let projects = self
            .repo
            .list_projects()
            .map_err(|err| log_failure("project_list", None, err.into()))?;
        info!(
            "event=project_list module=service status=ok count={}",
            projects.len()
        );
        Ok(projects)
    }

    pub fn create_project(&self, request: NewProject) -> ServiceResult<Project> {
        // Validate before consuming an id.
        require_non_blank("name", &request.name)
            .map_err(|err| log_failure("project_create", None, err.into()))?;

        let mut project =
            Project::new(self.repo.next_project_id(), request.name, request.start_date)?;
        project.set_description(request.description);
        project.set_end_date(request.end_date);
        project.set_status(request.status.unwrap_or_default());
        self.repo.save_project(&project)?;

        info!(
            "event=project_create module=service status=ok project_id={}",
            project.id()
        );
        Ok(project)
    }

    /// # Errors
    /// - `ProjectNotFound` when no project has this id.
    pub fn get_project(&self, id: ProjectId) -> ServiceResult<Project> {
        let project = self
            .load(id)
            .map_err(|err| log_failure("project_get", Some(id), err))?;
        info!(
            "event=project_get module=service status=ok project_id={id} task_count={}",
            project.tasks().len()
        );
        Ok(project)
    }

    /// Replaces every mutable field (PUT semantics).
    pub fn update_project(
        &self,
        id: ProjectId,
        replacement: &ProjectReplacement,
    ) -> ServiceResult<Project> {
        let project = self.mutate("project_update", id, |project| replacement.apply_to(project))?;
        info!("event=project_update module=service status=ok project_id={id}");
        Ok(project)
    }

    /// Applies a parsed partial update.
    pub fn patch_project(&self, id: ProjectId, patch: &ProjectPatch) -> ServiceResult<Project> {
        let project = self.mutate("project_patch", id, |project| patch.apply_to(project))?;
        info!(
            "event=project_patch module=service status=ok project_id={} fields={}",
            id,
            patch.present_fields().join(",")
        );
        Ok(project)
    }

    /// Parses a raw JSON payload and applies it as a partial update.
    pub fn patch_project_json(&self, id: ProjectId, payload: &Value) -> ServiceResult<Project> {
        let patch = ProjectPatch::from_json(payload)
            .map_err(|err| log_failure("project_patch", Some(id), err.into()))?;
        self.patch_project(id, &patch)
    }

    pub fn delete_project(&self, id: ProjectId) -> ServiceResult<()> {
        self.repo
            .delete_project(id)
            .map_err(|err| log_failure("project_delete", Some(id), err.into()))?;
        info!("event=project_delete module=service status=ok project_id={id}");
        Ok(())
    }

    fn load(&self, id: ProjectId) -> ServiceResult<Project> {
        self.repo
            .get_project(id)?
            .ok_or(ServiceError::ProjectNotFound(id))
    }

    fn mutate(
        &self,
        event: &'static str,
        id: ProjectId,
        change: impl FnOnce(&mut Project) -> Result<(), DomainError>,
    ) -> ServiceResult<Project> {
        self.load_change_store(id, change)
            .map_err(|err| log_failure(event, Some(id), err))
    }

    fn load_change_store(
        &self,
        id: ProjectId,
        change: impl FnOnce(&mut Project) -> Result<(), DomainError>,
    ) -> ServiceResult<Project> {
        let mut project = self.load(id)?;
        change(&mut project)?;
        self.repo.save_project(&project)?;
        Ok(project)
    }
}

fn log_failure(event: &'static str, id: Option<ProjectId>, err: ServiceError) -> ServiceError {
    let id = id.map_or_else(|| "-".to_string(), |value| value.to_string());
    warn!(
        "event={event} module=service status=error project_id={id} error_kind={}",
        err.kind()
    );
    err
}
