//! Drag-and-drop payload contract between board columns.
//!
//! A drag carries `(task_id, source_column)` as raw strings. Only a drop on
//! a column mutates state; drag-over has no entry point here at all.

use crate::model::board::{Column, MoveOutcome};
use crate::model::task::TaskId;

/// Validated drag payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    pub task_id: TaskId,
    pub source: Column,
}

impl DragPayload {
    pub fn new(task_id: TaskId, source: Column) -> Self {
        Self { task_id, source }
    }

    /// Parses raw drag data. Returns `None` for a blank id or an unknown column.
    pub fn parse(task_id: &str, source_column: &str) -> Option<Self> {
        let task_id = task_id.trim();
        if task_id.is_empty() {
            return None;
        }
        let source = source_column.parse().ok()?;
        Some(Self::new(TaskId::new(task_id), source))
    }
}

/// Why a drop left the board unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    MalformedPayload,
    UnknownTarget,
    MalformedWeek,
    SameColumn,
    TaskNotFound,
}

impl IgnoreReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MalformedPayload => "malformed_payload",
            Self::UnknownTarget => "unknown_target",
            Self::MalformedWeek => "malformed_week",
            Self::SameColumn => "same_column",
            Self::TaskNotFound => "task_not_found",
        }
    }
}

/// Result of handling a drop event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Moved,
    Ignored(IgnoreReason),
}

impl From<MoveOutcome> for DropOutcome {
    fn from(value: MoveOutcome) -> Self {
        match value {
            MoveOutcome::Moved => Self::Moved,
            MoveOutcome::SameColumn => Self::Ignored(IgnoreReason::SameColumn),
            MoveOutcome::TaskNotFound => Self::Ignored(IgnoreReason::TaskNotFound),
        }
    }
}
