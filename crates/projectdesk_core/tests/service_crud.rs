use chrono::NaiveDate;
use projectdesk_core::{
    DomainError, MemoryProjectRepository, NewProject, NewTask, ProjectReplacement,
    ProjectService, ProjectStatus, ProjectStore, ServiceError, TaskPriority, TaskReplacement,
    TaskService, TaskStatus,
};
use serde_json::json;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_project(name: &str) -> NewProject {
    NewProject {
        name: name.to_string(),
        description: Some("Complete overhaul of the company website".to_string()),
        start_date: date(2026, 1, 15),
        end_date: Some(date(2026, 6, 30)),
        status: None,
    }
}

#[test]
fn create_and_get_project_roundtrip() {
    let store = ProjectStore::new();
    let projects = ProjectService::new(MemoryProjectRepository::new(&store));

    let created = projects.create_project(new_project("Website")).unwrap();
    assert_eq!(created.id(), 1);
    assert_eq!(created.status(), ProjectStatus::Planned);

    let loaded = projects.get_project(created.id()).unwrap();
    assert_eq!(loaded, created);
    assert_eq!(projects.list_projects().unwrap().len(), 1);
}

#[test]
fn create_project_rejects_blank_name_without_consuming_an_id() {
    let store = ProjectStore::new();
    let projects = ProjectService::new(MemoryProjectRepository::new(&store));

    let err = projects.create_project(new_project(" ")).unwrap_err();
    assert_eq!(
        err,
        ServiceError::Domain(DomainError::InvalidInput(
            "name must not be blank".to_string()
        ))
    );

    let created = projects.create_project(new_project("Website")).unwrap();
    assert_eq!(created.id(), 1);
}

#[test]
fn missing_entities_are_not_found() {
    let store = ProjectStore::new();
    let projects = ProjectService::new(MemoryProjectRepository::new(&store));
    let tasks = TaskService::new(MemoryProjectRepository::new(&store));

    assert_eq!(
        projects.get_project(42).unwrap_err(),
        ServiceError::ProjectNotFound(42)
    );
    assert_eq!(
        projects.patch_project_json(42, &json!({})).unwrap_err(),
        ServiceError::ProjectNotFound(42)
    );
    assert_eq!(
        projects.delete_project(42).unwrap_err(),
        ServiceError::ProjectNotFound(42)
    );
    assert_eq!(tasks.get_task(7).unwrap_err(), ServiceError::TaskNotFound(7));
    assert_eq!(
        tasks.create_task(NewTask::titled(42, "orphan")).unwrap_err(),
        ServiceError::ProjectNotFound(42)
    );
    assert_eq!(tasks.delete_task(7).unwrap_err(), ServiceError::TaskNotFound(7));
}

#[test]
fn patch_project_json_persists_changes() {
    let store = ProjectStore::new();
    let projects = ProjectService::new(MemoryProjectRepository::new(&store));
    let project = projects.create_project(new_project("Website")).unwrap();

    let patched = projects
        .patch_project_json(project.id(), &json!({"description": null, "status": "in-progress"}))
        .unwrap();
    assert_eq!(patched.description(), None);

    let loaded = projects.get_project(project.id()).unwrap();
    assert_eq!(loaded.description(), None);
    assert_eq!(loaded.status(), ProjectStatus::InProgress);
    assert_eq!(loaded.end_date(), Some(date(2026, 6, 30)));
}

#[test]
fn rejected_patch_leaves_stored_project_untouched() {
    let store = ProjectStore::new();
    let projects = ProjectService::new(MemoryProjectRepository::new(&store));
    let project = projects.create_project(new_project("Website")).unwrap();

    let err = projects
        .patch_project_json(project.id(), &json!({"name": "", "description": "changed"}))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::InvalidInput(_))));

    assert_eq!(projects.get_project(project.id()).unwrap(), project);
}

#[test]
fn update_project_replaces_every_field() {
    let store = ProjectStore::new();
    let projects = ProjectService::new(MemoryProjectRepository::new(&store));
    let project = projects.create_project(new_project("Website")).unwrap();

    let replacement = ProjectReplacement {
        name: "Website v2".to_string(),
        description: None,
        start_date: date(2026, 3, 1),
        end_date: None,
        status: ProjectStatus::Cancelled,
    };
    let updated = projects.update_project(project.id(), &replacement).unwrap();

    assert_eq!(updated.name(), "Website v2");
    assert_eq!(updated.description(), None);
    assert_eq!(updated.start_date(), date(2026, 3, 1));
    assert_eq!(updated.end_date(), None);
    assert_eq!(updated.status(), ProjectStatus::Cancelled);
}

#[test]
fn create_task_attaches_to_project_with_defaults() {
    let store = ProjectStore::new();
    let projects = ProjectService::new(MemoryProjectRepository::new(&store));
    let tasks = TaskService::new(MemoryProjectRepository::new(&store));
    let project = projects.create_project(new_project("Website")).unwrap();

    let task = tasks
        .create_task(NewTask::titled(project.id(), "Implement login"))
        .unwrap();

    assert_eq!(task.id(), 1);
    assert_eq!(task.project_id(), Some(project.id()));
    assert_eq!(task.status(), TaskStatus::Todo);
    assert_eq!(task.priority(), TaskPriority::Medium);
    assert_eq!(task.completed_at(), None);

    let owner = projects.get_project(project.id()).unwrap();
    assert!(owner.contains_task(task.id()));
    assert_eq!(tasks.get_task(task.id()).unwrap(), task);
}

#[test]
fn create_task_as_done_stamps_completion() {
    let store = ProjectStore::new();
    let projects = ProjectService::new(MemoryProjectRepository::new(&store));
    let tasks = TaskService::new(MemoryProjectRepository::new(&store));
    let project = projects.create_project(new_project("Website")).unwrap();

    let mut request = NewTask::titled(project.id(), "Backfill");
    request.status = Some(TaskStatus::Done);
    request.priority = Some(TaskPriority::Low);
    let task = tasks.create_task(request).unwrap();

    assert_eq!(task.status(), TaskStatus::Done);
    assert!(task.completed_at().is_some());
    assert_eq!(task.priority(), TaskPriority::Low);
}

#[test]
fn patch_task_json_goes_through_lifecycle() {
    let store = ProjectStore::new();
    let projects = ProjectService::new(MemoryProjectRepository::new(&store));
    let tasks = TaskService::new(MemoryProjectRepository::new(&store));
    let project = projects.create_project(new_project("Website")).unwrap();
    let task = tasks
        .create_task(NewTask::titled(project.id(), "Implement login"))
        .unwrap();

    let done = tasks
        .patch_task_json(task.id(), &json!({"status": "DONE"}))
        .unwrap();
    let completed_at = done.completed_at();
    assert!(completed_at.is_some());

    let again = tasks
        .patch_task_json(task.id(), &json!({"status": "done"}))
        .unwrap();
    assert_eq!(again.completed_at(), completed_at);

    let err = tasks
        .patch_task_json(task.id(), &json!({"status": "IN_PROGRESS"}))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::InvalidTaskState(_))
    ));
    assert_eq!(tasks.get_task(task.id()).unwrap().status(), TaskStatus::Done);
}

#[test]
fn patch_task_rejects_project_move() {
    let store = ProjectStore::new();
    let projects = ProjectService::new(MemoryProjectRepository::new(&store));
    let tasks = TaskService::new(MemoryProjectRepository::new(&store));
    let first = projects.create_project(new_project("Website")).unwrap();
    let second = projects.create_project(new_project("Mobile")).unwrap();
    let task = tasks
        .create_task(NewTask::titled(first.id(), "Implement login"))
        .unwrap();

    let err = tasks
        .patch_task_json(task.id(), &json!({"projectId": second.id()}))
        .unwrap_err();

    assert_eq!(
        err,
        ServiceError::Domain(DomainError::ImmutableField("project id"))
    );
    assert_eq!(tasks.get_task(task.id()).unwrap().project_id(), Some(first.id()));
    assert!(projects.get_project(second.id()).unwrap().tasks().is_empty());
}

#[test]
fn update_task_replaces_fields_and_routes_status() {
    let store = ProjectStore::new();
    let projects = ProjectService::new(MemoryProjectRepository::new(&store));
    let tasks = TaskService::new(MemoryProjectRepository::new(&store));
    let project = projects.create_project(new_project("Website")).unwrap();
    let task = tasks
        .create_task(NewTask::titled(project.id(), "Implement login"))
        .unwrap();

    let replacement = TaskReplacement {
        title: "Implement SSO".to_string(),
        description: Some("SAML".to_string()),
        status: TaskStatus::InProgress,
        priority: TaskPriority::High,
        due_date: Some(date(2026, 2, 28)),
        assignee: Some("jane@example.com".to_string()),
    };
    let updated = tasks.update_task(task.id(), &replacement).unwrap();

    assert_eq!(updated.title(), "Implement SSO");
    assert_eq!(updated.status(), TaskStatus::InProgress);
    assert_eq!(updated.priority(), TaskPriority::High);

    let backwards = TaskReplacement {
        status: TaskStatus::Todo,
        ..replacement
    };
    let err = tasks.update_task(task.id(), &backwards).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::InvalidTaskState(_))
    ));
}

#[test]
fn delete_task_detaches_from_project() {
    let store = ProjectStore::new();
    let projects = ProjectService::new(MemoryProjectRepository::new(&store));
    let tasks = TaskService::new(MemoryProjectRepository::new(&store));
    let project = projects.create_project(new_project("Website")).unwrap();
    let keep = tasks
        .create_task(NewTask::titled(project.id(), "keep"))
        .unwrap();
    let dropped = tasks
        .create_task(NewTask::titled(project.id(), "drop"))
        .unwrap();

    tasks.delete_task(dropped.id()).unwrap();

    let owner = projects.get_project(project.id()).unwrap();
    assert!(!owner.contains_task(dropped.id()));
    assert!(owner.contains_task(keep.id()));
    assert_eq!(tasks.get_task(dropped.id()).unwrap_err(), ServiceError::TaskNotFound(dropped.id()));
    assert_eq!(tasks.list_tasks().unwrap().len(), 1);
}

#[test]
fn delete_project_drops_its_tasks() {
    let store = ProjectStore::new();
    let projects = ProjectService::new(MemoryProjectRepository::new(&store));
    let tasks = TaskService::new(MemoryProjectRepository::new(&store));
    let website = projects.create_project(new_project("Website")).unwrap();
    let mobile = projects.create_project(new_project("Mobile")).unwrap();
    tasks.create_task(NewTask::titled(website.id(), "a")).unwrap();
    let survivor = tasks.create_task(NewTask::titled(mobile.id(), "b")).unwrap();

    projects.delete_project(website.id()).unwrap();

    let remaining = tasks.list_tasks().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id(), survivor.id());
    assert_eq!(store.len(), 1);
}

#[test]
fn service_error_messages() {
    assert_eq!(
        ServiceError::ProjectNotFound(3).to_string(),
        "project with id 3 not found"
    );
    assert_eq!(ServiceError::TaskNotFound(4).kind(), "not_found");
    assert_eq!(
        ServiceError::Domain(DomainError::ImmutableField("id")).kind(),
        "immutable_field"
    );
}

#[test]
fn list_and_get_report_across_projects() {
    let store = ProjectStore::new();
    let projects = ProjectService::new(MemoryProjectRepository::new(&store));
    let tasks = TaskService::new(MemoryProjectRepository::new(&store));
    let website = projects.create_project(new_project("Website")).unwrap();
    let mobile = projects.create_project(new_project("Mobile")).unwrap();
    let first = tasks.create_task(NewTask::titled(mobile.id(), "port")).unwrap();
    let second = tasks.create_task(NewTask::titled(website.id(), "design")).unwrap();

    let listed: Vec<i64> = tasks.list_tasks().unwrap().iter().map(|task| task.id()).collect();
    assert_eq!(listed, vec![first.id(), second.id()]);

    let names: Vec<String> = projects
        .list_projects()
        .unwrap()
        .iter()
        .map(|project| project.name().to_string())
        .collect();
    assert_eq!(names, vec!["Website".to_string(), "Mobile".to_string()]);

    assert_eq!(tasks.get_task(second.id()).unwrap().project_id(), Some(website.id()));
    assert_eq!(tasks.get_task(99).unwrap_err(), ServiceError::TaskNotFound(99));
}
