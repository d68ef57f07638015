//! Partial update command for tasks.

use crate::model::error::{DomainError, DomainResult};
use crate::model::project::ProjectId;
use crate::model::status::{TaskPriority, TaskStatus};
use crate::model::task::{Task, TaskId};
use crate::patch::field::{parse_date, parse_enum, parse_id, parse_string, PatchField, Payload};
use crate::patch::EntityPatch;
use chrono::NaiveDate;
use serde_json::Value;

/// Parsed task PATCH payload.
///
/// `id` and `projectId` may only repeat the current values. `description`,
/// `dueDate` and `assignee` accept `null` as "clear"; every other field can
/// be omitted but not nulled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    id: Option<TaskId>,
    project_id: Option<ProjectId>,
    title: Option<String>,
    description: PatchField<String>,
    due_date: PatchField<NaiveDate>,
    assignee: PatchField<String>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
}

impl TaskPatch {
    /// Parses a JSON object; unknown keys are ignored.
    pub fn from_json(payload: &Value) -> DomainResult<Self> {
        let payload = Payload::from_value(payload)?;
        Ok(Self {
            id: payload.required("id", parse_id)?,
            project_id: payload.required("projectId", parse_id)?,
            title: payload.required("title", parse_string)?,
            description: payload.clearable("description", parse_string)?,
            due_date: payload.clearable("dueDate", parse_date)?,
            assignee: payload.clearable("assignee", parse_string)?,
            status: payload.required("status", parse_enum::<TaskStatus>)?,
            priority: payload.required("priority", parse_enum::<TaskPriority>)?,
        })
    }

    pub fn with_id(mut self, id: TaskId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_project_id(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: PatchField<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_due_date(mut self, due_date: PatchField<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    pub fn with_assignee(mut self, assignee: PatchField<String>) -> Self {
        self.assignee = assignee;
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn id(&self) -> Option<TaskId> {
        self.id
    }

    pub fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> &PatchField<String> {
        &self.description
    }

    pub fn is_description_present(&self) -> bool {
        self.description.is_present()
    }

    pub fn due_date(&self) -> &PatchField<NaiveDate> {
        &self.due_date
    }

    pub fn is_due_date_present(&self) -> bool {
        self.due_date.is_present()
    }

    pub fn assignee(&self) -> &PatchField<String> {
        &self.assignee
    }

    pub fn is_assignee_present(&self) -> bool {
        self.assignee.is_present()
    }

    pub fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    pub fn priority(&self) -> Option<TaskPriority> {
        self.priority
    }

    pub fn present_fields(&self) -> Vec<&'static str> {
        [
            ("id", self.id.is_some()),
            ("projectId", self.project_id.is_some()),
            ("title", self.title.is_some()),
            ("description", self.description.is_present()),
            ("dueDate", self.due_date.is_present()),
            ("assignee", self.assignee.is_present()),
            ("status", self.status.is_some()),
            ("priority", self.priority.is_some()),
        ]
        .into_iter()
        .filter_map(|(key, present)| present.then_some(key))
        .collect()
    }

    fn check_identity(&self, task: &Task) -> DomainResult<()> {
        if let Some(project_id) = self.project_id {
            if task.project_id() != Some(project_id) {
                return Err(DomainError::ImmutableField("project id"));
            }
        }
        if let Some(id) = self.id {
            if id != task.id() {
                return Err(DomainError::ImmutableField("id"));
            }
        }
        Ok(())
    }
}

impl EntityPatch for TaskPatch {
    type Target = Task;

    /// Applies present fields; status goes through `Task::change_status`.
    ///
    /// Work happens on a draft so any failure leaves `task` unchanged.
    fn apply_to(&self, task: &mut Task) -> DomainResult<()> {
        self.check_identity(task)?;

        let mut draft = task.clone();
        if let Some(title) = &self.title {
            draft.set_title(title.as_str())?;
        }
        if let Some(description) = self.description.to_update() {
            draft.set_description(description);
        }
        if let Some(due_date) = self.due_date.to_update() {
            draft.set_due_date(due_date);
        }
        if let Some(assignee) = self.assignee.to_update() {
            draft.set_assignee(assignee);
        }
        if let Some(status) = self.status {
            draft.change_status(status)?;
        }
        if let Some(priority) = self.priority {
            draft.set_priority(priority);
        }

        *task = draft;
        Ok(())
    }
}
