//! Project catalog model.
//!
//! # Responsibility
//! - Define project records and their ordered week labels.
//! - Define the `week-<n>` key used to address a project's boards.
//!
//! # Invariants
//! - `ProjectId` is unique within a catalog.
//! - `weeks` only grows; labels are appended as `Week <n>`.
//! - `WeekKey` numbers are 1-based.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static WEEK_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^week-([1-9]\d{0,8})$").expect("valid week key regex"));

/// Stable catalog identifier, e.g. `project-a` or `project-1700000000000`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// 1-based week index rendered as `week-<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekKey(u32);

impl WeekKey {
    /// Builds a key from a 1-based week number. Returns `None` for zero.
    pub fn new(number: u32) -> Option<Self> {
        (number >= 1).then_some(Self(number))
    }

    /// Builds the key for a 0-based position in `Project::weeks`.
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index)
            .ok()
            .and_then(|value| value.checked_add(1))
            .map(Self)
    }

    pub fn number(self) -> u32 {
        self.0
    }
}

impl Display for WeekKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "week-{}", self.0)
    }
}

impl FromStr for WeekKey {
    type Err = WeekKeyParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        WEEK_KEY_RE
            .captures(value.trim())
            .and_then(|caps| caps.get(1))
            .and_then(|number| number.as_str().parse::<u32>().ok())
            .and_then(Self::new)
            .ok_or_else(|| WeekKeyParseError(value.to_string()))
    }
}

impl Serialize for WeekKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WeekKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekKeyParseError(String);

impl Display for WeekKeyParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed week key `{}`; expected week-<n>", self.0)
    }
}

impl Error for WeekKeyParseError {}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub weeks: Vec<String>,
}

impl Project {
    /// Creates a project starting with a single `Week 1`.
    pub fn new(id: ProjectId, name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description,
            weeks: vec![format_week_label(1)],
        }
    }

    /// Appends the next `Week <n>` label and returns its key.
    pub fn push_week(&mut self) -> WeekKey {
        let next = self.weeks.len() + 1;
        self.weeks.push(format_week_label(next));
        WeekKey(u32::try_from(next).unwrap_or(u32::MAX))
    }

    /// Keys for every listed week, in label order.
    pub fn week_keys(&self) -> Vec<WeekKey> {
        (0..self.weeks.len()).filter_map(WeekKey::from_index).collect()
    }

    /// Label for `key`, when the project lists that week.
    pub fn week_label(&self, key: WeekKey) -> Option<&str> {
        let index = usize::try_from(key.0).ok()?.checked_sub(1)?;
        self.weeks.get(index).map(String::as_str)
    }
}

/// Partial project edit. `None` leaves a field untouched.
///
/// `description: Some(String::new())` clears the description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    BlankName,
}

impl Display for ProjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "project name must not be blank"),
        }
    }
}

impl Error for ProjectValidationError {}

/// Trims a user-entered project name.
pub fn normalize_project_name(value: &str) -> Result<String, ProjectValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ProjectValidationError::BlankName);
    }
    Ok(trimmed.to_string())
}

fn format_week_label(number: usize) -> String {
    format!("Week {number}")
}
