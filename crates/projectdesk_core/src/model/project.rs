//! Project entity and the Project/Task aggregate.
//!
//! # Responsibility
//! - Own project fields and the collection of tasks.
//! - Provide the only sanctioned way to attach/detach tasks.
//!
//! # Invariants
//! - Every task in `tasks` has `project_id == Some(self.id)`.
//! - A task referencing another project is never inserted.
//! - Task ids are unique within one project.
//! - No `&mut Task` into `tasks` leaves this type; edits go through
//!   `update_task`.

use crate::model::error::{require_non_blank, DomainError, DomainResult};
use crate::model::status::ProjectStatus;
use crate::model::task::{Task, TaskId, TaskRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type ProjectId = i64;

/// Aggregate root for a project and the tasks it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ProjectRecord")]
pub struct Project {
    id: ProjectId,
    name: String,
    description: Option<String>,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    status: ProjectStatus,
    tasks: Vec<Task>,
}

impl Project {
    /// Creates a `PLANNED` project with no tasks.
    ///
    /// # Errors
    /// - `InvalidInput` when `name` is blank.
    pub fn new(id: ProjectId, name: impl Into<String>, start_date: NaiveDate) -> DomainResult<Self> {
        let name = name.into();
        require_non_blank("name", &name)?;
        Ok(Self {
            id,
            name,
            description: None,
            start_date,
            end_date: None,
            status: ProjectStatus::Planned,
            tasks: Vec::new(),
        })
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> DomainResult<()> {
        let name = name.into();
        require_non_blank("name", &name)?;
        self.name = name;
        Ok(())
    }

    /// `None` clears the description.
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub fn set_start_date(&mut self, start_date: NaiveDate) {
        self.start_date = start_date;
    }

    /// `None` clears the end date.
    pub fn set_end_date(&mut self, end_date: Option<NaiveDate>) {
        self.end_date = end_date;
    }

    /// Project status has no transition rules; any value is accepted.
    pub fn set_status(&mut self, status: ProjectStatus) {
        self.status = status;
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == task_id)
    }

    /// Runs `change` against a copy of the task and commits the copy only
    /// when `change` succeeds and the task still carries its own id and this
    /// project's id.
    ///
    /// # Errors
    /// - `UnknownTask` when no task with `task_id` is attached.
    /// - `ImmutableField` when `change` swapped in a task with another
    ///   identity or owner.
    /// - Any error returned by `change`.
    ///
    /// Every failure leaves the project unchanged.
    pub fn update_task(
        &mut self,
        task_id: TaskId,
        change: impl FnOnce(&mut Task) -> DomainResult<()>,
    ) -> DomainResult<&Task> {
        let index = self
            .tasks
            .iter()
            .position(|task| task.id() == task_id)
            .ok_or(DomainError::UnknownTask(task_id))?;

        let mut draft = self.tasks[index].clone();
        change(&mut draft)?;
        if draft.id() != task_id {
            return Err(DomainError::ImmutableField("id"));
        }
        if draft.project_id() != Some(self.id) {
            return Err(DomainError::ImmutableField("project id"));
        }

        self.tasks[index] = draft;
        Ok(&self.tasks[index])
    }

    pub fn contains_task(&self, task_id: TaskId) -> bool {
        self.task(task_id).is_some()
    }

    /// Attaches `task` to this project and returns the stored copy.
    ///
    /// # Errors
    /// - `AlreadyOwned` when `task` references a different project.
    /// - `DuplicateTask` when a task with the same id is already attached.
    ///
    /// Neither failure mutates this project.
    pub fn add_task(&mut self, mut task: Task) -> DomainResult<&Task> {
        if let Some(owner) = task.project_id() {
            if owner != self.id {
                return Err(DomainError::AlreadyOwned {
                    task_id: task.id(),
                    owner,
                });
            }
        }
        if self.contains_task(task.id()) {
            return Err(DomainError::DuplicateTask(task.id()));
        }

        task.attach_to(self.id);
        self.tasks.push(task);
        let index = self.tasks.len() - 1;
        Ok(&self.tasks[index])
    }

    /// Detaches a task and hands it back with its back-reference cleared.
    ///
    /// Returns `None` when no task with `task_id` is attached.
    pub fn remove_task(&mut self, task_id: TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id() == task_id)?;
        let mut task = self.tasks.remove(index);
        task.detach();
        Some(task)
    }
}

/// Wire shape accepted when rehydrating a project from its JSON projection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
}

impl TryFrom<ProjectRecord> for Project {
    type Error = DomainError;

    fn try_from(record: ProjectRecord) -> Result<Self, Self::Error> {
        let mut project = Self::new(record.id, record.name, record.start_date)?;
        project.description = record.description;
        project.end_date = record.end_date;
        project.status = record.status;
        for task in record.tasks {
            // Stored owner must be absent (back-filled) or this project.
            if let Some(owner) = task.project_id.filter(|owner| *owner != project.id) {
                return Err(DomainError::AlreadyOwned {
                    task_id: task.id,
                    owner,
                });
            }
            project.add_task(Task::try_from(task)?)?;
        }
        Ok(project)
    }
}
