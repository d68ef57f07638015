//! Enum-valued fields of projects and tasks.
//!
//! All three enums go through [`crate::model::enum_codec`] for parsing and
//! JSON projection.

use crate::model::enum_codec::{codec_serde, CodecEnum};

/// Project lifecycle status. Assigned directly; no transition rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProjectStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl CodecEnum for ProjectStatus {
    const TYPE_NAME: &'static str = "ProjectStatus";
    const MEMBERS: &'static [Self] = &[
        Self::Planned,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    fn canonical_name(self) -> &'static str {
        match self {
            Self::Planned => "PLANNED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

codec_serde!(ProjectStatus);

/// Task lifecycle state. `Done` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    /// Created but not started.
    #[default]
    Todo,
    /// Work is in progress.
    InProgress,
    /// Completed; no transition out is permitted.
    Done,
}

impl CodecEnum for TaskStatus {
    const TYPE_NAME: &'static str = "TaskStatus";
    const MEMBERS: &'static [Self] = &[Self::Todo, Self::InProgress, Self::Done];

    fn canonical_name(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
        }
    }
}

codec_serde!(TaskStatus);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl CodecEnum for TaskPriority {
    const TYPE_NAME: &'static str = "TaskPriority";
    const MEMBERS: &'static [Self] = &[Self::Low, Self::Medium, Self::High, Self::Critical];

    fn canonical_name(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

codec_serde!(TaskPriority);
