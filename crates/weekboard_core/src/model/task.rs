//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record stored in board columns.
//! - Migrate legacy bare-string entries into canonical records.
//! - Validate user-supplied task fields before they reach a board.
//!
//! # Invariants
//! - `id` is stable for the task lifetime; edits never change it.
//! - `title` is non-blank after trim for every validated task.
//! - `due_date`, when set, is an ISO-8601 date or timestamp.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TASK_ID_LEN: usize = 9;
const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Local date-time layouts accepted without an offset.
const LOCAL_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Board-local task identifier.
///
/// Generated ids are short random base-36 tokens; seed and caller-provided
/// ids are accepted verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Wraps an existing identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(encode_base36(Uuid::new_v4().as_u128(), TASK_ID_LEN))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Task priority shown as a colored tag by board views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Parses the lowercase wire label.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// ISO-8601 date or timestamp; `None` when unscheduled.
    #[serde(default)]
    pub due_date: Option<String>,
}

impl Task {
    /// Creates a task with a freshly generated id and no optional fields.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(TaskId::generate(), title)
    }

    /// Creates a task with a caller-provided id.
    ///
    /// Does not validate; use [`Task::validate`] before storing user input.
    pub fn with_id(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            priority: None,
            due_date: None,
        }
    }

    /// Checks user-facing field invariants.
    ///
    /// # Errors
    /// - `BlankTitle` when the title is empty after trim.
    /// - `InvalidDueDate` when a due date is set but not ISO-8601.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::BlankTitle);
        }
        if let Some(due) = self.due_date.as_deref() {
            if !is_iso_8601(due) {
                return Err(TaskValidationError::InvalidDueDate(due.to_string()));
            }
        }
        Ok(())
    }
}

/// User-editable task fields, as submitted by a create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<String>,
}

impl TaskDraft {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Builds a validated task carrying `id`.
    ///
    /// Title and description are trimmed; a blank description or due date
    /// is treated as absent.
    pub fn into_task(self, id: TaskId) -> Result<Task, TaskValidationError> {
        let task = Task {
            id,
            title: self.title.trim().to_string(),
            description: non_blank(self.description),
            priority: self.priority,
            due_date: non_blank(self.due_date),
        };
        task.validate()?;
        Ok(task)
    }
}

/// A stored column entry in either the legacy or the canonical shape.
///
/// Early seed data kept tasks as bare strings. This type exists only at the
/// import boundary; boards always hold [`Task`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskEntry {
    Legacy(String),
    Record(Task),
}

impl TaskEntry {
    /// Converts the entry into a canonical record.
    ///
    /// Legacy strings get a generated id and `Priority::Medium`.
    pub fn migrate(self) -> Task {
        match self {
            Self::Legacy(title) => {
                let mut task = Task::new(title);
                task.priority = Some(Priority::Medium);
                task
            }
            Self::Record(task) => task,
        }
    }
}

impl From<Task> for TaskEntry {
    fn from(value: Task) -> Self {
        Self::Record(value)
    }
}

impl From<&str> for TaskEntry {
    fn from(value: &str) -> Self {
        Self::Legacy(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    BlankTitle,
    InvalidDueDate(String),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "task title must not be blank"),
            Self::InvalidDueDate(value) => {
                write!(f, "task due date `{value}` is not an ISO-8601 date")
            }
        }
    }
}

impl Error for TaskValidationError {}

/// Returns whether `value` is an ISO-8601 calendar date or date-time.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and offset-less
/// `YYYY-MM-DDTHH:MM[:SS[.f]]`. The calendar date must exist.
pub fn is_iso_8601(value: &str) -> bool {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || DateTime::parse_from_rfc3339(value).is_ok()
        || LOCAL_DATE_TIME_FORMATS
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(value, format).is_ok())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

fn encode_base36(mut value: u128, len: usize) -> String {
    let mut out = Vec::with_capacity(len);
    for _ in 0..len {
        out.push(BASE36_ALPHABET[(value % 36) as usize]);
        value /= 36;
    }
    out.into_iter().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::{
        encode_base36, is_iso_8601, Priority, Task, TaskDraft, TaskEntry, TaskId,
        TaskValidationError,
    };

    #[test]
    fn generated_ids_are_short_base36_tokens() {
        let id = TaskId::generate();
        assert_eq!(id.as_str().len(), 9);
        assert!(id
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_ne!(TaskId::generate(), TaskId::generate());
    }

    #[test]
    fn base36_encoding_is_little_endian_and_padded() {
        assert_eq!(encode_base36(0, 3), "000");
        assert_eq!(encode_base36(35, 2), "z0");
        assert_eq!(encode_base36(36, 2), "01");
    }

    #[test]
    fn validate_rejects_blank_title() {
        let task = Task::with_id(TaskId::new("t1"), "   ");
        assert_eq!(task.validate(), Err(TaskValidationError::BlankTitle));
    }

    #[test]
    fn iso_dates_accept_dates_and_timestamps() {
        assert!(is_iso_8601("2024-03-01"));
        assert!(is_iso_8601("2024-03-01T09:30"));
        assert!(is_iso_8601("2024-03-01T09:30:15.123Z"));
        assert!(is_iso_8601("2024-03-01T09:30:15+02:00"));
        assert!(!is_iso_8601("01/03/2024"));
        assert!(!is_iso_8601("2024-13-01"));
        assert!(!is_iso_8601("tomorrow"));
    }

    #[test]
    fn iso_dates_reject_impossible_calendar_days() {
        assert!(is_iso_8601("2024-02-29"));
        assert!(!is_iso_8601("2024-02-31"));
        assert!(!is_iso_8601("2023-02-29"));
        assert!(!is_iso_8601("2024-04-31T10:00:00Z"));
        assert!(!is_iso_8601("2024-04-31T10:00"));
        assert!(!is_iso_8601("2024-03-01T25:00"));
    }

    #[test]
    fn draft_trims_and_drops_blank_optionals() {
        let draft = TaskDraft {
            title: "  Write tests ".to_string(),
            description: Some("   ".to_string()),
            priority: Some(Priority::High),
            due_date: Some(String::new()),
        };
        let task = draft.into_task(TaskId::new("abc")).unwrap();
        assert_eq!(task.title, "Write tests");
        assert_eq!(task.description, None);
        assert_eq!(task.due_date, None);
        assert_eq!(task.priority, Some(Priority::High));
    }

    #[test]
    fn draft_rejects_bad_due_date() {
        let draft = TaskDraft {
            due_date: Some("next friday".to_string()),
            ..TaskDraft::titled("Ship")
        };
        assert!(matches!(
            draft.into_task(TaskId::new("x")),
            Err(TaskValidationError::InvalidDueDate(_))
        ));
    }

    #[test]
    fn legacy_entry_migrates_with_medium_priority() {
        let task = TaskEntry::from("Create wireframes").migrate();
        assert_eq!(task.title, "Create wireframes");
        assert_eq!(task.priority, Some(Priority::Medium));
        assert!(!task.id.as_str().is_empty());
    }

    #[test]
    fn entries_decode_from_mixed_json() {
        let entries: Vec<TaskEntry> = serde_json::from_str(
            r#"["bare", {"id": "k1", "title": "record", "priority": "low", "dueDate": null}]"#,
        )
        .unwrap();
        assert_eq!(entries[0], TaskEntry::Legacy("bare".to_string()));
        match &entries[1] {
            TaskEntry::Record(task) => {
                assert_eq!(task.id, TaskId::new("k1"));
                assert_eq!(task.priority, Some(Priority::Low));
            }
            other => panic!("expected record, got {other:?}"),
        }
    }
}
