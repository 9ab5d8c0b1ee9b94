//! Board model: three ordered task columns for one project week.
//!
//! # Invariants
//! - A task id appears in at most one column of a board.
//! - Moves transfer a task; they never copy it.
//! - Moved tasks are appended to the tail of the target column.

use crate::model::task::{Task, TaskEntry, TaskId, TaskValidationError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// One of the three fixed task states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Column {
    Todo,
    InProgress,
    Done,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::Todo, Column::InProgress, Column::Done];

    /// Wire name used by drag payloads and serialized boards.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "inProgress",
            Self::Done => "done",
        }
    }

    /// Human-readable column header.
    pub fn title(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = ColumnParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "todo" => Ok(Self::Todo),
            "inProgress" | "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            other => Err(ColumnParseError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnParseError(String);

impl Display for ColumnParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown column `{}`; expected todo|inProgress|done",
            self.0
        )
    }
}

impl Error for ColumnParseError {}

/// Result of a move request. Every variant other than `Moved` is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    SameColumn,
    TaskNotFound,
}

/// Task columns for one (project, week) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    #[serde(default)]
    pub todo: Vec<Task>,
    #[serde(default)]
    pub in_progress: Vec<Task>,
    #[serde(default)]
    pub done: Vec<Task>,
}

impl Board {
    pub fn column(&self, column: Column) -> &[Task] {
        match column {
            Column::Todo => &self.todo,
            Column::InProgress => &self.in_progress,
            Column::Done => &self.done,
        }
    }

    pub fn column_mut(&mut self, column: Column) -> &mut Vec<Task> {
        match column {
            Column::Todo => &mut self.todo,
            Column::InProgress => &mut self.in_progress,
            Column::Done => &mut self.done,
        }
    }

    pub fn is_empty(&self) -> bool {
        Column::ALL.iter().all(|column| self.column(*column).is_empty())
    }

    pub fn task_count(&self) -> usize {
        Column::ALL
            .iter()
            .map(|column| self.column(*column).len())
            .sum()
    }

    /// Finds the column currently holding `task_id`.
    pub fn locate(&self, task_id: &TaskId) -> Option<Column> {
        Column::ALL
            .into_iter()
            .find(|column| self.position(*column, task_id).is_some())
    }

    pub fn contains(&self, task_id: &TaskId) -> bool {
        self.locate(task_id).is_some()
    }

    fn position(&self, column: Column, task_id: &TaskId) -> Option<usize> {
        self.column(column)
            .iter()
            .position(|task| &task.id == task_id)
    }

    /// Transfers `task_id` from `source` to the tail of `target`.
    pub fn move_task(&mut self, task_id: &TaskId, source: Column, target: Column) -> MoveOutcome {
        if source == target {
            return MoveOutcome::SameColumn;
        }
        let Some(index) = self.position(source, task_id) else {
            return MoveOutcome::TaskNotFound;
        };
        let task = self.column_mut(source).remove(index);
        self.column_mut(target).push(task);
        MoveOutcome::Moved
    }

    pub fn push_task(&mut self, column: Column, task: Task) {
        self.column_mut(column).push(task);
    }

    /// Replaces the task with `task_id` at the same index.
    ///
    /// The stored record keeps `task_id` even if `updated` carries another id.
    pub fn replace_task(&mut self, column: Column, task_id: &TaskId, mut updated: Task) -> bool {
        let Some(index) = self.position(column, task_id) else {
            return false;
        };
        updated.id = task_id.clone();
        self.column_mut(column)[index] = updated;
        true
    }

    pub fn remove_task(&mut self, column: Column, task_id: &TaskId) -> Option<Task> {
        let index = self.position(column, task_id)?;
        Some(self.column_mut(column).remove(index))
    }

    /// Builds a canonical board from possibly legacy-shaped entries.
    pub fn from_entries(
        todo: Vec<TaskEntry>,
        in_progress: Vec<TaskEntry>,
        done: Vec<TaskEntry>,
    ) -> Self {
        Self {
            todo: todo.into_iter().map(TaskEntry::migrate).collect(),
            in_progress: in_progress.into_iter().map(TaskEntry::migrate).collect(),
            done: done.into_iter().map(TaskEntry::migrate).collect(),
        }
    }

    /// Checks stored-task invariants for a board built outside the services.
    ///
    /// # Errors
    /// - `BlankId` when a task id is empty after trim.
    /// - `DuplicateId` when an id appears twice anywhere on the board.
    /// - `InvalidTask` when a task fails [`Task::validate`].
    pub fn check_integrity(&self) -> Result<(), BoardIntegrityError> {
        let mut seen = HashSet::new();
        for column in Column::ALL {
            for task in self.column(column) {
                if task.id.as_str().trim().is_empty() {
                    return Err(BoardIntegrityError::BlankId { column });
                }
                if !seen.insert(&task.id) {
                    return Err(BoardIntegrityError::DuplicateId(task.id.clone()));
                }
                task.validate().map_err(|source| BoardIntegrityError::InvalidTask {
                    id: task.id.clone(),
                    source,
                })?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardIntegrityError {
    BlankId { column: Column },
    DuplicateId(TaskId),
    InvalidTask { id: TaskId, source: TaskValidationError },
}

impl Display for BoardIntegrityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankId { column } => write!(f, "task in `{column}` has a blank id"),
            Self::DuplicateId(id) => write!(f, "task id `{id}` appears more than once"),
            Self::InvalidTask { id, source } => write!(f, "task `{id}` is invalid: {source}"),
        }
    }
}

impl Error for BoardIntegrityError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidTask { source, .. } => Some(source),
            _ => None,
        }
    }
}
