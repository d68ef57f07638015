//! Repository layer abstractions and the in-memory implementation.
//!
//! # Responsibility
//! - Define the lookup/store contract the services depend on.
//! - Keep storage details out of the domain model and services.
//!
//! # Invariants
//! - Repositories store whole aggregates; tasks are never stored apart from
//!   their project.
//! - Repository APIs report missing aggregates as `NotFound`.

pub mod project_repo;
