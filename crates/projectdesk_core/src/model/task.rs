//! Task entity and its lifecycle state machine.
//!
//! # Responsibility
//! - Own task fields and the TODO -> IN_PROGRESS -> DONE lifecycle.
//! - Guard identity fields (`id`, owning project, `created_at`).
//!
//! # Invariants
//! - `DONE` is terminal; same-state requests are successful no-ops.
//! - `completed_at` is stamped exactly once, when status first becomes `DONE`.
//! - The owning-project back-reference is only changed by
//!   `Project::add_task` / `Project::remove_task`.

use crate::model::error::{require_non_blank, DomainError, DomainResult};
use crate::model::project::ProjectId;
use crate::model::status::{TaskPriority, TaskStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub type TaskId = i64;

/// A unit of work owned by exactly one project.
///
/// Fields are private so status changes always pass through
/// [`Task::change_status`] and the back-reference cannot be set directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "TaskRecord")]
pub struct Task {
    id: TaskId,
    project_id: Option<ProjectId>,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<NaiveDate>,
    assignee: Option<String>,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a detached `TODO` task with `MEDIUM` priority.
    ///
    /// # Errors
    /// - `InvalidInput` when `title` is blank.
    pub fn new(id: TaskId, title: impl Into<String>) -> DomainResult<Self> {
        let title = title.into();
        require_non_blank("title", &title)?;
        Ok(Self {
            id,
            project_id: None,
            title,
            description: None,
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            due_date: None,
            assignee: None,
            created_at: Utc::now(),
            completed_at: None,
        })
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Owning project, or `None` for a task not (or no longer) attached.
    pub fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn priority(&self) -> TaskPriority {
        self.priority
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn assignee(&self) -> Option<&str> {
        self.assignee.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    /// Replaces the title; blank titles are rejected and leave the task unchanged.
    pub fn set_title(&mut self, title: impl Into<String>) -> DomainResult<()> {
        let title = title.into();
        require_non_blank("title", &title)?;
        self.title = title;
        Ok(())
    }

    /// `None` clears the description.
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub fn set_due_date(&mut self, due_date: Option<NaiveDate>) {
        self.due_date = due_date;
    }

    pub fn set_assignee(&mut self, assignee: Option<String>) {
        self.assignee = assignee;
    }

    pub fn set_priority(&mut self, priority: TaskPriority) {
        self.priority = priority;
    }

    /// Moves the task to `IN_PROGRESS`.
    ///
    /// # Errors
    /// - `InvalidTaskState` when the task is already `DONE`.
    pub fn start(&mut self) -> DomainResult<()> {
        if self.is_done() {
            return Err(DomainError::InvalidTaskState(
                "completed task cannot be restarted".to_string(),
            ));
        }
        self.status = TaskStatus::InProgress;
        Ok(())
    }

    /// Moves the task to `DONE`. Idempotent: an already completed task keeps
    /// its original `completed_at`.
    pub fn mark_done(&mut self) {
        if self.is_done() {
            return;
        }
        self.status = TaskStatus::Done;
        if self.completed_at.is_none() {
            self.completed_at = Some(Utc::now());
        }
    }

    /// Requests a transition to `target`.
    ///
    /// Same-state requests succeed without side effects. Only forward moves
    /// are defined: any request for `TODO` from another state is rejected,
    /// as is leaving `DONE`.
    ///
    /// # Errors
    /// - `InvalidTaskState` for backward transitions or leaving `DONE`.
    pub fn change_status(&mut self, target: TaskStatus) -> DomainResult<()> {
        if target == self.status {
            return Ok(());
        }

        match target {
            TaskStatus::InProgress => self.start(),
            TaskStatus::Done => {
                self.mark_done();
                Ok(())
            }
            TaskStatus::Todo => Err(DomainError::InvalidTaskState(format!(
                "illegal transition from {} to {}",
                self.status, target
            ))),
        }
    }

    pub(crate) fn attach_to(&mut self, project_id: ProjectId) {
        self.project_id = Some(project_id);
    }

    pub(crate) fn detach(&mut self) {
        self.project_id = None;
    }
}

/// Wire shape accepted when rehydrating a task from its JSON projection.
///
/// `project_id` is read but never trusted: a decoded task is always
/// detached, and only `Project` rehydration checks the stored owner before
/// attaching it through `Project::add_task`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: TaskId,
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub assignee: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl TryFrom<TaskRecord> for Task {
    type Error = DomainError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        require_non_blank("title", &record.title)?;
        match (record.status, record.completed_at) {
            (TaskStatus::Done, None) => {
                return Err(DomainError::invalid_input(format!(
                    "task {} is DONE but has no completedAt",
                    record.id
                )));
            }
            (status, Some(_)) if status != TaskStatus::Done => {
                return Err(DomainError::invalid_input(format!(
                    "task {} has completedAt but status {status}",
                    record.id
                )));
            }
            _ => {}
        }

        Ok(Self {
            id: record.id,
            project_id: None,
            title: record.title,
            description: record.description,
            status: record.status,
            priority: record.priority,
            due_date: record.due_date,
            assignee: record.assignee,
            created_at: record.created_at,
            completed_at: record.completed_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Task;
    use crate::model::error::DomainError;
    use crate::model::status::TaskStatus;

    fn task_in(status: TaskStatus) -> Task {
        let mut task = Task::new(7, "write docs").unwrap();
        match status {
            TaskStatus::Todo => {}
            TaskStatus::InProgress => task.start().unwrap(),
            TaskStatus::Done => task.mark_done(),
        }
        task
    }

    #[test]
    fn new_task_starts_as_todo_and_detached() {
        let task = task_in(TaskStatus::Todo);
        assert_eq!(task.status(), TaskStatus::Todo);
        assert_eq!(task.project_id(), None);
        assert_eq!(task.completed_at(), None);
    }

    #[test]
    fn new_rejects_blank_title() {
        let err = Task::new(1, "   ").unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidInput("title must not be blank".to_string())
        );
    }

    #[test]
    fn same_state_requests_are_no_ops() {
        for status in [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done] {
            let mut task = task_in(status);
            let before = task.clone();
            task.change_status(status).unwrap();
            assert_eq!(task, before);
        }
    }

    #[test]
    fn forward_transitions_succeed() {
        let mut task = task_in(TaskStatus::Todo);
        task.change_status(TaskStatus::InProgress).unwrap();
        assert_eq!(task.status(), TaskStatus::InProgress);
        assert_eq!(task.completed_at(), None);

        task.change_status(TaskStatus::Done).unwrap();
        assert_eq!(task.status(), TaskStatus::Done);
        assert!(task.completed_at().is_some());

        let mut skipped = task_in(TaskStatus::Todo);
        skipped.change_status(TaskStatus::Done).unwrap();
        assert!(skipped.completed_at().is_some());
    }

    #[test]
    fn backward_transition_to_todo_is_rejected() {
        let mut task = task_in(TaskStatus::InProgress);
        let err = task.change_status(TaskStatus::Todo).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTaskState(_)));
        assert_eq!(task.status(), TaskStatus::InProgress);
    }

    #[test]
    fn done_is_terminal() {
        let mut task = task_in(TaskStatus::Done);
        let before = task.clone();

        let err = task.change_status(TaskStatus::InProgress).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidTaskState("completed task cannot be restarted".to_string())
        );
        assert!(task.change_status(TaskStatus::Todo).is_err());
        assert!(task.start().is_err());
        assert_eq!(task, before);
    }

    #[test]
    fn mark_done_stamps_completed_at_once() {
        let mut task = task_in(TaskStatus::Todo);
        task.mark_done();
        let first = task.completed_at();
        assert!(first.is_some());

        task.mark_done();
        task.change_status(TaskStatus::Done).unwrap();
        assert_eq!(task.completed_at(), first);
    }

    #[test]
    fn rehydration_rejects_inconsistent_completion() {
        let done_without_stamp = serde_json::json!({
            "id": 3,
            "title": "ship",
            "status": "DONE",
            "createdAt": "2026-01-01T00:00:00Z"
        });
        let err = serde_json::from_value::<Task>(done_without_stamp)
            .unwrap_err()
            .to_string();
        assert!(err.contains("has no completedAt"), "unexpected: {err}");

        let todo_with_stamp = serde_json::json!({
            "id": 3,
            "title": "ship",
            "status": "todo",
            "createdAt": "2026-01-01T00:00:00Z",
            "completedAt": "2026-01-02T00:00:00Z"
        });
        assert!(serde_json::from_value::<Task>(todo_with_stamp).is_err());
    }

    #[test]
    fn standalone_rehydration_yields_a_detached_task() {
        let claimed_owner = serde_json::json!({
            "id": 3,
            "projectId": 2,
            "title": "ship",
            "createdAt": "2026-01-01T00:00:00Z"
        });
        let task: Task = serde_json::from_value(claimed_owner).unwrap();
        assert_eq!(task.project_id(), None);
    }
}
