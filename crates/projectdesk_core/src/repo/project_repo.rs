//! Project aggregate repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Load and store whole Project aggregates (project plus owned tasks).
//! - Assign project and task ids.
//!
//! # Invariants
//! - Reads hand out copies; callers write back with `save_project`, so a
//!   failed mutation never reaches stored state.
//! - Ids are assigned monotonically from 1 and never reused.
//! - A task id is owned by at most one stored project.

use crate::model::project::{Project, ProjectId};
use crate::model::task::TaskId;
use log::debug;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    NotFound(ProjectId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "project not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid stored project data: {message}"),
        }
    }
}

impl Error for RepoError {}

/// Repository interface for Project aggregates.
pub trait ProjectRepository {
    fn next_project_id(&self) -> ProjectId;
    fn next_task_id(&self) -> TaskId;
    fn list_projects(&self) -> RepoResult<Vec<Project>>;
    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    /// Returns the id of the project that owns `task_id`, if any.
    fn find_task_owner(&self, task_id: TaskId) -> RepoResult<Option<ProjectId>>;
    /// Inserts or replaces the aggregate keyed by `project.id()`.
    fn save_project(&self, project: &Project) -> RepoResult<()>;
    fn delete_project(&self, id: ProjectId) -> RepoResult<()>;
}

/// Process-local backing store shared by repository handles.
#[derive(Debug, Default)]
pub struct ProjectStore {
    projects: RefCell<BTreeMap<ProjectId, Project>>,
    last_project_id: Cell<ProjectId>,
    last_task_id: Cell<TaskId>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.projects.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.borrow().is_empty()
    }
}

/// Repository handle over a shared [`ProjectStore`].
pub struct MemoryProjectRepository<'store> {
    store: &'store ProjectStore,
}

impl<'store> MemoryProjectRepository<'store> {
    pub fn new(store: &'store ProjectStore) -> Self {
        Self { store }
    }
}

impl MemoryProjectRepository<'_> {
    /// First task of `project` whose id is already owned by another stored project.
    fn foreign_task_owner(&self, project: &Project) -> Option<(TaskId, ProjectId)> {
        let projects = self.store.projects.borrow();
        project.tasks().iter().find_map(|task| {
            projects
                .values()
                .find(|stored| stored.id() != project.id() && stored.contains_task(task.id()))
                .map(|stored| (task.id(), stored.id()))
        })
    }
}

impl ProjectRepository for MemoryProjectRepository<'_> {
    fn next_project_id(&self) -> ProjectId {
        let id = self.store.last_project_id.get() + 1;
        self.store.last_project_id.set(id);
        id
    }

    fn next_task_id(&self) -> TaskId {
        let id = self.store.last_task_id.get() + 1;
        self.store.last_task_id.set(id);
        id
    }

    fn list_projects(&self) -> RepoResult<Vec<Project>> {
        Ok(self.store.projects.borrow().values().cloned().collect())
    }

    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        Ok(self.store.projects.borrow().get(&id).cloned())
    }

    fn find_task_owner(&self, task_id: TaskId) -> RepoResult<Option<ProjectId>> {
        Ok(self
            .store
            .projects
            .borrow()
            .values()
            .find(|project| project.contains_task(task_id))
            .map(Project::id))
    }

    fn save_project(&self, project: &Project) -> RepoResult<()> {
        if let Some(stray) = project
            .tasks()
            .iter()
            .find(|task| task.project_id() != Some(project.id()))
        {
            return Err(RepoError::InvalidData(format!(
                "task {} does not reference project {}",
                stray.id(),
                project.id()
            )));
        }

        if let Some((task_id, owner)) = self.foreign_task_owner(project) {
            return Err(RepoError::InvalidData(format!(
                "task {task_id} already belongs to project {owner}"
            )));
        }

        // Keep id counters ahead of anything saved with a caller-chosen id.
        if project.id() > self.store.last_project_id.get() {
            self.store.last_project_id.set(project.id());
        }
        if let Some(max_task_id) = project.tasks().iter().map(|task| task.id()).max() {
            if max_task_id > self.store.last_task_id.get() {
                self.store.last_task_id.set(max_task_id);
            }
        }

        debug!(
            "event=project_save module=repo status=ok project_id={} task_count={}",
            project.id(),
            project.tasks().len()
        );
        self.store
            .projects
            .borrow_mut()
            .insert(project.id(), project.clone());
        Ok(())
    }

    fn delete_project(&self, id: ProjectId) -> RepoResult<()> {
        match self.store.projects.borrow_mut().remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryProjectRepository, ProjectRepository, ProjectStore, RepoError};
    use crate::model::project::Project;
    use crate::model::task::Task;
    use chrono::NaiveDate;

    fn project(id: i64) -> Project {
        Project::new(id, "Website", NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()).unwrap()
    }

    #[test]
    fn ids_are_monotonic_and_shared_between_handles() {
        let store = ProjectStore::new();
        let first = MemoryProjectRepository::new(&store);
        let second = MemoryProjectRepository::new(&store);

        assert_eq!(first.next_project_id(), 1);
        assert_eq!(second.next_project_id(), 2);
        assert_eq!(first.next_task_id(), 1);
    }

    #[test]
    fn save_get_and_find_owner() {
        let store = ProjectStore::new();
        let repo = MemoryProjectRepository::new(&store);
        let mut stored = project(3);
        stored.add_task(Task::new(11, "copy").unwrap()).unwrap();
        repo.save_project(&stored).unwrap();

        assert_eq!(repo.get_project(3).unwrap(), Some(stored));
        assert_eq!(repo.find_task_owner(11).unwrap(), Some(3));
        assert_eq!(repo.find_task_owner(12).unwrap(), None);
        assert_eq!(repo.next_project_id(), 4);
        assert_eq!(repo.next_task_id(), 12);
    }

    #[test]
    fn reads_are_copies() {
        let store = ProjectStore::new();
        let repo = MemoryProjectRepository::new(&store);
        repo.save_project(&project(1)).unwrap();

        let mut loaded = repo.get_project(1).unwrap().unwrap();
        loaded.set_name("Changed").unwrap();

        assert_eq!(repo.get_project(1).unwrap().unwrap().name(), "Website");
    }

    #[test]
    fn save_rejects_task_id_owned_by_another_project() {
        let store = ProjectStore::new();
        let repo = MemoryProjectRepository::new(&store);
        let mut first = project(1);
        first.add_task(Task::new(11, "design").unwrap()).unwrap();
        repo.save_project(&first).unwrap();

        let mut second = project(2);
        second.add_task(Task::new(11, "clash").unwrap()).unwrap();
        let err = repo.save_project(&second).unwrap_err();

        assert_eq!(
            err,
            RepoError::InvalidData("task 11 already belongs to project 1".to_string())
        );
        assert_eq!(repo.get_project(2).unwrap(), None);
        assert_eq!(repo.find_task_owner(11).unwrap(), Some(1));

        // Re-saving the owner with the same task is fine.
        repo.save_project(&first).unwrap();
    }

    #[test]
    fn delete_missing_project_is_not_found() {
        let store = ProjectStore::new();
        let repo = MemoryProjectRepository::new(&store);
        assert_eq!(repo.delete_project(9), Err(RepoError::NotFound(9)));
        assert!(store.is_empty());
    }
}
