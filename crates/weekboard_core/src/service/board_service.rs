//! Board use-case service.
//!
//! # Responsibility
//! - Validate task form input before it reaches a board.
//! - Generate task ids that are unique within their board.
//! - Resolve raw drop events into moves or no-ops.
//!
//! # Invariants
//! - A validation failure leaves every board unchanged.
//! - Malformed drops never mutate state.

use crate::model::board::{Board, Column, MoveOutcome};
use crate::model::project::{ProjectId, WeekKey};
use crate::model::task::{Task, TaskDraft, TaskId, TaskValidationError};
use crate::repo::board_repo::BoardRepository;
use crate::service::drag::{DragPayload, DropOutcome, IgnoreReason};
use log::{debug, warn};

/// Use-case wrapper for board and task operations.
pub struct BoardService<R: BoardRepository> {
    repo: R,
}

impl<R: BoardRepository> BoardService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Board snapshot; empty when nothing was stored for the pair.
    pub fn board(&self, project_id: &ProjectId, week: WeekKey) -> Board {
        self.repo.get_board(project_id, week)
    }

    /// Validates `draft`, assigns a fresh id and appends it to `column`.
    ///
    /// # Errors
    /// - `TaskValidationError` when the title is blank or the due date is
    ///   not ISO-8601. Nothing is stored in that case.
    pub fn create_task(
        &mut self,
        project_id: &ProjectId,
        week: WeekKey,
        column: Column,
        draft: TaskDraft,
    ) -> Result<Task, TaskValidationError> {
        let board = self.repo.get_board(project_id, week);
        let task = draft.into_task(unused_task_id(&board))?;
        self.repo.add_task(project_id, week, column, task.clone());
        Ok(task)
    }

    /// Validates `draft` and replaces the task in place.
    ///
    /// Returns `Ok(false)` when `task_id` is not in `column`.
    pub fn edit_task(
        &mut self,
        project_id: &ProjectId,
        week: WeekKey,
        column: Column,
        task_id: &TaskId,
        draft: TaskDraft,
    ) -> Result<bool, TaskValidationError> {
        let task = draft.into_task(task_id.clone())?;
        Ok(self
            .repo
            .update_task(project_id, week, column, task_id, task))
    }

    pub fn remove_task(
        &mut self,
        project_id: &ProjectId,
        week: WeekKey,
        column: Column,
        task_id: &TaskId,
    ) -> bool {
        self.repo.delete_task(project_id, week, column, task_id)
    }

    pub fn move_task(
        &mut self,
        project_id: &ProjectId,
        week: WeekKey,
        task_id: &TaskId,
        source: Column,
        target: Column,
    ) -> MoveOutcome {
        self.repo
            .move_task(project_id, week, task_id, source, target)
    }

    /// Applies a validated drag payload dropped on `target`.
    pub fn drop_payload(
        &mut self,
        project_id: &ProjectId,
        week: WeekKey,
        payload: &DragPayload,
        target: Column,
    ) -> DropOutcome {
        self.move_task(project_id, week, &payload.task_id, payload.source, target)
            .into()
    }

    /// Handles a raw drop event.
    ///
    /// Any malformed part of the event resolves to `DropOutcome::Ignored`.
    pub fn handle_drop(
        &mut self,
        project_id: &ProjectId,
        week: WeekKey,
        raw_task_id: &str,
        raw_source: &str,
        raw_target: &str,
    ) -> DropOutcome {
        let Some(payload) = DragPayload::parse(raw_task_id, raw_source) else {
            return ignored(project_id, week, IgnoreReason::MalformedPayload);
        };
        let Ok(target) = raw_target.parse::<Column>() else {
            return ignored(project_id, week, IgnoreReason::UnknownTarget);
        };
        self.drop_payload(project_id, week, &payload, target)
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn repo_mut(&mut self) -> &mut R {
        &mut self.repo
    }
}

fn ignored(project_id: &ProjectId, week: WeekKey, reason: IgnoreReason) -> DropOutcome {
    warn!(
        "event=task_drop module=board status=ignored reason={} project={project_id} week={week}",
        reason.as_str()
    );
    DropOutcome::Ignored(reason)
}

fn unused_task_id(board: &Board) -> TaskId {
    loop {
        let candidate = TaskId::generate();
        if !board.contains(&candidate) {
            return candidate;
        }
        debug!("event=task_id_collision module=board status=retry task={candidate}");
    }
}

#[cfg(test)]
mod tests {
    use super::BoardService;
    use crate::model::board::Column;
    use crate::model::project::{ProjectId, WeekKey};
    use crate::model::task::TaskDraft;
    use crate::repo::board_repo::InMemoryBoards;
    use crate::service::drag::{DropOutcome, IgnoreReason};

    #[test]
    fn handle_drop_ignores_unknown_target() {
        let mut service = BoardService::new(InMemoryBoards::new());
        let project = ProjectId::new("p");
        let week = WeekKey::new(1).unwrap();
        let task = service
            .create_task(&project, week, Column::Todo, TaskDraft::titled("t"))
            .unwrap();

        let before = service.board(&project, week);
        let outcome = service.handle_drop(&project, week, task.id.as_str(), "todo", "trash");
        assert_eq!(outcome, DropOutcome::Ignored(IgnoreReason::UnknownTarget));
        assert_eq!(service.board(&project, week), before);
    }
}
