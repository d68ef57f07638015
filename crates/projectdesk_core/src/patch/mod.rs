//! Partial-update (PATCH) commands and their appliers.
//!
//! # Responsibility
//! - Parse untyped JSON patch payloads into per-field tri-state commands.
//! - Apply only the fields present in a command to an existing entity.
//!
//! # Invariants
//! - A key absent from the payload never changes the entity.
//! - `null` clears clearable fields and is rejected for all others.
//! - Task status changes go through the lifecycle state machine, never by
//!   direct assignment.
//! - Applying the same command twice yields the same entity state.

pub mod field;
pub mod project_patch;
pub mod replace;
pub mod task_patch;

use crate::model::error::DomainResult;

/// A parsed partial update for one entity type.
pub trait EntityPatch {
    type Target;

    /// Mutates `target` in place. On error `target` is left unchanged.
    fn apply_to(&self, target: &mut Self::Target) -> DomainResult<()>;
}

/// Applies `patch` to `target` and hands the mutated entity back.
pub fn apply<'a, P: EntityPatch>(
    target: &'a mut P::Target,
    patch: &P,
) -> DomainResult<&'a mut P::Target> {
    patch.apply_to(target)?;
    Ok(target)
}
