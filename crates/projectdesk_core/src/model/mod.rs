//! Domain model for projects and their tasks.
//!
//! # Responsibility
//! - Define the Project aggregate, the Task entity and their enums.
//! - Keep every cross-entity rule inside paired aggregate operations.
//!
//! # Invariants
//! - Projects and tasks are identified by store-assigned integer ids.
//! - Task status only changes through the lifecycle state machine.

pub mod enum_codec;
pub mod error;
pub mod project;
pub mod status;
pub mod task;
