//! FFI use-case API for the dashboard UI shell.
//!
//! # Responsibility
//! - Expose sync, use-case-level functions over one process-wide session.
//! - Translate raw UI strings (week keys, column names, priorities) into
//!   core types at this boundary.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Malformed ids, week keys or column names degrade to empty results or
//!   `ok = false` responses; they never mutate state.

use log::warn;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use weekboard_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Board, Column, DropOutcome, IgnoreReason, Priority, Project, ProjectId, ProjectPatch,
    Session, SessionConfig, StatusCounts, Task, TaskDraft, TaskId, WeekKey,
};

static SESSION: OnceLock<Mutex<Session>> = OnceLock::new();

/// Minimal health-check API.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Core crate version.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// Returns an empty string on success and an error message on failure.
/// Repeating the same `level + log_dir` is idempotent.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Project card data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub weeks: Vec<String>,
    /// `week-<n>` keys aligned with `weeks`.
    pub week_keys: Vec<String>,
}

/// Task card data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// `high|medium|low`.
    pub priority: Option<String>,
    pub due_date: Option<String>,
}

/// Board snapshot for one project week.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardView {
    pub todo: Vec<TaskItem>,
    pub in_progress: Vec<TaskItem>,
    pub done: Vec<TaskItem>,
}

/// Aggregate counters for dashboard and project progress cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsView {
    pub total: u32,
    pub todo: u32,
    pub in_progress: u32,
    pub done: u32,
    pub completion_rate: u8,
}

/// One labelled row of an analytics read-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledStats {
    /// Week key or project display name, depending on the grouping.
    pub label: String,
    pub stats: StatsView,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the operation changed state as requested.
    pub ok: bool,
    /// Id of the created or affected record, when there is one.
    pub id: Option<String>,
    /// Human-readable message for inline UI feedback.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            ok: true,
            id: Some(id.into()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Task form fields as submitted by the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
}

#[flutter_rust_bridge::frb(sync)]
pub fn list_projects() -> Vec<ProjectItem> {
    with_session(|session| {
        session
            .projects
            .list_projects()
            .iter()
            .map(to_project_item)
            .collect()
    })
}

/// Returns `None` when the project does not exist.
#[flutter_rust_bridge::frb(sync)]
pub fn get_project(project_id: String) -> Option<ProjectItem> {
    with_session(|session| {
        session
            .projects
            .get_project(&ProjectId::new(project_id))
            .as_ref()
            .map(to_project_item)
    })
}

/// Board header name; falls back to the raw id for unknown projects.
#[flutter_rust_bridge::frb(sync)]
pub fn project_display_name(project_id: String) -> String {
    with_session(|session| {
        session
            .projects
            .project_display_name(&ProjectId::new(project_id))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn create_project(name: String, description: Option<String>) -> ActionResponse {
    with_session(
        |session| match session.projects.create_project(&name, description) {
            Ok(project) => ActionResponse::success("Project created.", project.id.to_string()),
            Err(err) => ActionResponse::failure(format!("create_project failed: {err}")),
        },
    )
}

/// Partial update; `None` fields are left untouched.
#[flutter_rust_bridge::frb(sync)]
pub fn update_project(
    project_id: String,
    name: Option<String>,
    description: Option<String>,
) -> ActionResponse {
    let patch = ProjectPatch { name, description };
    with_session(|session| {
        match session
            .projects
            .update_project(&ProjectId::new(project_id), &patch)
        {
            Ok(project) => ActionResponse::success("Project updated.", project.id.to_string()),
            Err(err) => ActionResponse::failure(format!("update_project failed: {err}")),
        }
    })
}

/// Idempotent; always reports success.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_project(project_id: String) -> ActionResponse {
    with_session(|session| {
        let id = ProjectId::new(project_id);
        let message = if session.delete_project(&id) {
            "Project deleted."
        } else {
            "Project already absent."
        };
        ActionResponse::success(message, id.to_string())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn add_week(project_id: String) -> ActionResponse {
    with_session(
        |session| match session.projects.add_week(&ProjectId::new(project_id)) {
            Ok(project) => ActionResponse::success(
                format!("Added {}.", project.weeks.last().map_or("week", String::as_str)),
                project.id.to_string(),
            ),
            Err(err) => ActionResponse::failure(format!("add_week failed: {err}")),
        },
    )
}

/// Board snapshot. Malformed week keys read as an empty board.
#[flutter_rust_bridge::frb(sync)]
pub fn get_board(project_id: String, week_key: String) -> BoardView {
    let Ok(week) = week_key.parse::<WeekKey>() else {
        return BoardView::default();
    };
    with_session(|session| to_board_view(&session.boards.board(&ProjectId::new(project_id), week)))
}

/// Handles a drop of `(task_id, source_column)` onto `target_column`.
///
/// `ok` is `true` only when the task moved.
#[flutter_rust_bridge::frb(sync)]
pub fn drop_task(
    project_id: String,
    week_key: String,
    task_id: String,
    source_column: String,
    target_column: String,
) -> ActionResponse {
    let Ok(week) = week_key.parse::<WeekKey>() else {
        return ignored_drop(IgnoreReason::MalformedWeek);
    };
    let outcome = with_session(|session| {
        session.boards.handle_drop(
            &ProjectId::new(project_id),
            week,
            &task_id,
            &source_column,
            &target_column,
        )
    });
    match outcome {
        DropOutcome::Moved => ActionResponse::success("Task moved.", task_id.trim()),
        DropOutcome::Ignored(reason) => ignored_drop(reason),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn add_task(
    project_id: String,
    week_key: String,
    column: String,
    form: TaskForm,
) -> ActionResponse {
    let (week, column, draft) = match parse_task_target(&week_key, &column, form) {
        Ok(parsed) => parsed,
        Err(message) => return ActionResponse::failure(format!("add_task failed: {message}")),
    };
    with_session(|session| {
        match session
            .boards
            .create_task(&ProjectId::new(project_id), week, column, draft)
        {
            Ok(task) => ActionResponse::success("Task added.", task.id.to_string()),
            Err(err) => ActionResponse::failure(format!("add_task failed: {err}")),
        }
    })
}

/// Edits a task in place. A stale id yields `ok = false` with no change.
#[flutter_rust_bridge::frb(sync)]
pub fn update_task(
    project_id: String,
    week_key: String,
    column: String,
    task_id: String,
    form: TaskForm,
) -> ActionResponse {
    let (week, column, draft) = match parse_task_target(&week_key, &column, form) {
        Ok(parsed) => parsed,
        Err(message) => return ActionResponse::failure(format!("update_task failed: {message}")),
    };
    let task_id = TaskId::new(task_id.trim());
    with_session(|session| {
        match session
            .boards
            .edit_task(&ProjectId::new(project_id), week, column, &task_id, draft)
        {
            Ok(true) => ActionResponse::success("Task updated.", task_id.to_string()),
            Ok(false) => ActionResponse::failure("update_task ignored: task not found"),
            Err(err) => ActionResponse::failure(format!("update_task failed: {err}")),
        }
    })
}

/// Deletes a task. A stale id yields `ok = false` with no change.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_task(
    project_id: String,
    week_key: String,
    column: String,
    task_id: String,
) -> ActionResponse {
    let (Ok(week), Ok(column)) = (week_key.parse::<WeekKey>(), column.parse::<Column>()) else {
        return ActionResponse::failure("delete_task ignored: malformed week or column");
    };
    let task_id = TaskId::new(task_id.trim());
    let removed = with_session(|session| {
        session
            .boards
            .remove_task(&ProjectId::new(project_id), week, column, &task_id)
    });
    if removed {
        ActionResponse::success("Task deleted.", task_id.to_string())
    } else {
        ActionResponse::failure("delete_task ignored: task not found")
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_stats() -> StatsView {
    with_session(|session| to_stats_view(session.dashboard_stats()))
}

#[flutter_rust_bridge::frb(sync)]
pub fn project_stats(project_id: String) -> StatsView {
    with_session(|session| to_stats_view(session.project_stats(&ProjectId::new(project_id))))
}

/// Per-week counters of one project, in week order.
///
/// Labels are `week-<n>` keys; weeks without a stored board are omitted.
#[flutter_rust_bridge::frb(sync)]
pub fn week_stats(project_id: String) -> Vec<LabeledStats> {
    with_session(|session| {
        session
            .week_stats(&ProjectId::new(project_id))
            .into_iter()
            .map(|(week, counts)| to_labeled_stats(week.to_string(), counts))
            .collect()
    })
}

/// Per-project counters labelled with display names.
///
/// Catalog projects come first in catalog order, then orphaned boards.
#[flutter_rust_bridge::frb(sync)]
pub fn stats_by_project() -> Vec<LabeledStats> {
    with_session(|session| {
        session
            .stats_by_project()
            .into_iter()
            .map(|(label, counts)| to_labeled_stats(label, counts))
            .collect()
    })
}

/// Per-week-key counters summed across projects.
#[flutter_rust_bridge::frb(sync)]
pub fn stats_by_week() -> Vec<LabeledStats> {
    with_session(|session| {
        session
            .stats_by_week()
            .into_iter()
            .map(|(week, counts)| to_labeled_stats(week.to_string(), counts))
            .collect()
    })
}

fn with_session<T>(f: impl FnOnce(&mut Session) -> T) -> T {
    let mut guard: MutexGuard<'_, Session> = SESSION
        .get_or_init(|| Mutex::new(open_session()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

fn open_session() -> Session {
    let opened = SessionConfig::from_env()
        .map_err(|err| err.to_string())
        .and_then(|config| Session::from_config(&config).map_err(|err| err.to_string()));
    match opened {
        Ok(session) => session,
        Err(message) => {
            warn!("event=session_open module=ffi status=fallback reason={message}");
            Session::seeded().unwrap_or_else(|_| Session::empty())
        }
    }
}

fn parse_task_target(
    week_key: &str,
    column: &str,
    form: TaskForm,
) -> Result<(WeekKey, Column, TaskDraft), String> {
    let week = week_key.parse::<WeekKey>().map_err(|err| err.to_string())?;
    let column = column.parse::<Column>().map_err(|err| err.to_string())?;
    let priority = match form.priority.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(Priority::parse(raw).ok_or_else(|| {
            format!("unknown priority `{raw}`; expected high|medium|low")
        })?),
    };
    let draft = TaskDraft {
        title: form.title,
        description: form.description,
        priority,
        due_date: form.due_date,
    };
    Ok((week, column, draft))
}

fn ignored_drop(reason: IgnoreReason) -> ActionResponse {
    ActionResponse::failure(format!("drop ignored: {}", reason.as_str()))
}

fn to_project_item(project: &Project) -> ProjectItem {
    ProjectItem {
        id: project.id.to_string(),
        name: project.name.clone(),
        description: project.description.clone(),
        weeks: project.weeks.clone(),
        week_keys: project.week_keys().iter().map(ToString::to_string).collect(),
    }
}

fn to_task_item(task: &Task) -> TaskItem {
    TaskItem {
        id: task.id.to_string(),
        title: task.title.clone(),
        description: task.description.clone(),
        priority: task.priority.map(|p| p.as_str().to_string()),
        due_date: task.due_date.clone(),
    }
}

fn to_board_view(board: &Board) -> BoardView {
    let items =
        |column: Column| -> Vec<TaskItem> { board.column(column).iter().map(to_task_item).collect() };
    BoardView {
        todo: items(Column::Todo),
        in_progress: items(Column::InProgress),
        done: items(Column::Done),
    }
}

fn to_stats_view(counts: StatusCounts) -> StatsView {
    let clamp = |value: usize| u32::try_from(value).unwrap_or(u32::MAX);
    StatsView {
        total: clamp(counts.total()),
        todo: clamp(counts.todo),
        in_progress: clamp(counts.in_progress),
        done: clamp(counts.done),
        completion_rate: counts.completion_rate(),
    }
}

fn to_labeled_stats(label: String, counts: StatusCounts) -> LabeledStats {
    LabeledStats {
        label,
        stats: to_stats_view(counts),
    }
}
