//! Full-replace (PUT) commands.
//!
//! Callers must have checked required-field presence already; these types
//! carry every mutable field, so only semantic rules are checked here.

use crate::model::error::DomainResult;
use crate::model::project::Project;
use crate::model::status::{ProjectStatus, TaskPriority, TaskStatus};
use crate::model::task::Task;
use crate::patch::EntityPatch;
use chrono::NaiveDate;

/// New state for every mutable project field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectReplacement {
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: ProjectStatus,
}

impl EntityPatch for ProjectReplacement {
    type Target = Project;

    fn apply_to(&self, project: &mut Project) -> DomainResult<()> {
        project.set_name(self.name.as_str())?;
        project.set_description(self.description.clone());
        project.set_start_date(self.start_date);
        project.set_end_date(self.end_date);
        project.set_status(self.status);
        Ok(())
    }
}

/// New state for every mutable task field.
///
/// `status` is a transition request, not an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReplacement {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub assignee: Option<String>,
}

impl EntityPatch for TaskReplacement {
    type Target = Task;

    fn apply_to(&self, task: &mut Task) -> DomainResult<()> {
        let mut draft = task.clone();
        draft.set_title(self.title.as_str())?;
        draft.set_description(self.description.clone());
        draft.set_due_date(self.due_date);
        draft.set_assignee(self.assignee.clone());
        draft.change_status(self.status)?;
        draft.set_priority(self.priority);
        *task = draft;
        Ok(())
    }
}
