//! Command-line driver over `projectdesk_core`.
//!
//! # Responsibility
//! - Keep a `ping`/`version` probe to validate core crate wiring.
//! - Apply JSON patch files to a project document and print the result.
//!
//! # Exit codes
//! - `1`: usage error, unreadable or malformed input file.
//! - `2`: the core rejected the request.

use clap::{Parser, Subcommand};
use log::info;
use projectdesk_core::{
    MemoryProjectRepository, Project, ProjectRepository, ProjectService, ProjectStore,
    ServiceError, TaskService,
};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "projectdesk_cli")]
#[command(about = "Apply partial updates to ProjectDesk project documents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check that the core library is linked
    Ping,
    /// Print the core library version
    Version,
    /// Apply a patch document to a project and print the patched project
    PatchProject {
        /// Project document (JSON projection)
        project: PathBuf,
        /// Patch payload (JSON object)
        patch: PathBuf,
    },
    /// Apply a patch document to one task of a project and print the task
    PatchTask {
        /// Project document (JSON projection)
        project: PathBuf,
        /// Id of the task to patch
        task_id: i64,
        /// Patch payload (JSON object)
        patch: PathBuf,
    },
}

#[derive(Debug)]
enum CliError {
    Input(String),
    Service(ServiceError),
}

impl From<ServiceError> for CliError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

fn main() -> ExitCode {
    match projectdesk_core::LoggingConfig::from_env() {
        Ok(Some(config)) => {
            if let Err(err) = projectdesk_core::init_logging_with(&config) {
                eprintln!("logging disabled: {err}");
            }
        }
        Ok(None) => {}
        Err(err) => eprintln!("logging disabled: {err}"),
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // `--help` is not a failure.
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    match run(cli.command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(CliError::Input(message)) => {
            eprintln!("{message}");
            ExitCode::from(1)
        }
        Err(CliError::Service(err)) => {
            eprintln!("error[{}]: {err}", err.kind());
            ExitCode::from(2)
        }
    }
}

fn run(command: Command) -> Result<String, CliError> {
    match command {
        Command::Ping => Ok(format!(
            "projectdesk_core ping={}",
            projectdesk_core::ping()
        )),
        Command::Version => Ok(format!(
            "projectdesk_core version={}",
            projectdesk_core::core_version()
        )),
        Command::PatchProject { project, patch } => patch_project(&project, &patch),
        Command::PatchTask {
            project,
            task_id,
            patch,
        } => patch_task(&project, task_id, &patch),
    }
}

fn patch_project(project_path: &Path, patch_path: &Path) -> Result<String, CliError> {
    let project = load_project(project_path)?;
    let payload = read_json(patch_path)?;

    let store = ProjectStore::new();
    let service = ProjectService::new(MemoryProjectRepository::new(&store));
    let id = seed(&store, &project)?;
    let patched = service.patch_project_json(id, &payload)?;

    info!("event=cli_patch_project module=cli status=ok project_id={id}");
    to_pretty(&patched)
}

fn patch_task(project_path: &Path, task_id: i64, patch_path: &Path) -> Result<String, CliError> {
    let project = load_project(project_path)?;
    let payload = read_json(patch_path)?;

    let store = ProjectStore::new();
    let service = TaskService::new(MemoryProjectRepository::new(&store));
    seed(&store, &project)?;
    let patched = service.patch_task_json(task_id, &payload)?;

    info!("event=cli_patch_task module=cli status=ok task_id={task_id}");
    to_pretty(&patched)
}

fn seed(store: &ProjectStore, project: &Project) -> Result<i64, CliError> {
    MemoryProjectRepository::new(store)
        .save_project(project)
        .map_err(ServiceError::from)?;
    Ok(project.id())
}

fn load_project(path: &Path) -> Result<Project, CliError> {
    serde_json::from_value(read_json(path)?).map_err(|err| {
        CliError::Input(format!(
            "invalid project document `{}`: {err}",
            path.display()
        ))
    })
}

fn read_json(path: &Path) -> Result<Value, CliError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| CliError::Input(format!("failed to read `{}`: {err}", path.display())))?;
    serde_json::from_str(&raw)
        .map_err(|err| CliError::Input(format!("malformed JSON in `{}`: {err}", path.display())))
}

fn to_pretty(value: &impl serde::Serialize) -> Result<String, CliError> {
    serde_json::to_string_pretty(value)
        .map_err(|err| CliError::Input(format!("failed to encode result: {err}")))
}
