//! Board store contracts and in-memory implementation.
//!
//! # Responsibility
//! - Own every board and task for one session.
//! - Provide total task operations keyed by (project, week, column).
//!
//! # Invariants
//! - `get_board` never fails; unknown keys read as an empty board.
//! - Every mutation reads a snapshot, edits it, and writes it back whole via
//!   `set_board`.
//! - Stale ids degrade to no-ops; only `import_board` can fail, and it
//!   stores nothing when it does.

use crate::model::board::{Board, BoardIntegrityError, Column, MoveOutcome};
use crate::model::project::{ProjectId, WeekKey};
use crate::model::task::{Task, TaskEntry, TaskId};
use log::{debug, warn};
use std::collections::BTreeMap;

/// Repository interface for board snapshots.
///
/// Implementors supply storage (`get_board`, `set_board`, enumeration); the
/// task operations are provided on top of snapshot replacement.
pub trait BoardRepository {
    fn get_board(&self, project_id: &ProjectId, week: WeekKey) -> Board;
    fn set_board(&mut self, project_id: &ProjectId, week: WeekKey, board: Board);
    /// Stored boards of one project, ordered by week number.
    fn boards_for_project(&self, project_id: &ProjectId) -> Vec<(WeekKey, Board)>;
    /// Every stored board, including boards of deleted projects.
    fn all_boards(&self) -> Vec<(ProjectId, WeekKey, Board)>;

    fn move_task(
        &mut self,
        project_id: &ProjectId,
        week: WeekKey,
        task_id: &TaskId,
        source: Column,
        target: Column,
    ) -> MoveOutcome {
        if source == target {
            debug!(
                "event=task_move module=board status=noop reason=same_column project={project_id} week={week} task={task_id}"
            );
            return MoveOutcome::SameColumn;
        }
        let mut board = self.get_board(project_id, week);
        let outcome = board.move_task(task_id, source, target);
        match outcome {
            MoveOutcome::Moved => {
                self.set_board(project_id, week, board);
                debug!(
                    "event=task_move module=board status=ok project={project_id} week={week} task={task_id} from={source} to={target}"
                );
            }
            MoveOutcome::SameColumn | MoveOutcome::TaskNotFound => debug!(
                "event=task_move module=board status=noop reason=task_not_found project={project_id} week={week} task={task_id} from={source}"
            ),
        }
        outcome
    }

    /// Appends `task` to the tail of `column`. Id uniqueness is the caller's.
    fn add_task(&mut self, project_id: &ProjectId, week: WeekKey, column: Column, task: Task) {
        let mut board = self.get_board(project_id, week);
        debug!(
            "event=task_add module=board status=ok project={project_id} week={week} column={column} task={}",
            task.id
        );
        board.push_task(column, task);
        self.set_board(project_id, week, board);
    }

    /// Replaces the matching task in place. Returns `false` on a stale id.
    fn update_task(
        &mut self,
        project_id: &ProjectId,
        week: WeekKey,
        column: Column,
        task_id: &TaskId,
        updated: Task,
    ) -> bool {
        let mut board = self.get_board(project_id, week);
        let replaced = board.replace_task(column, task_id, updated);
        if replaced {
            self.set_board(project_id, week, board);
        }
        debug!(
            "event=task_update module=board status={} project={project_id} week={week} column={column} task={task_id}",
            if replaced { "ok" } else { "noop" }
        );
        replaced
    }

    /// Removes the matching task. Returns `false` on a stale id.
    fn delete_task(
        &mut self,
        project_id: &ProjectId,
        week: WeekKey,
        column: Column,
        task_id: &TaskId,
    ) -> bool {
        let mut board = self.get_board(project_id, week);
        let removed = board.remove_task(column, task_id).is_some();
        if removed {
            self.set_board(project_id, week, board);
        }
        debug!(
            "event=task_delete module=board status={} project={project_id} week={week} column={column} task={task_id}",
            if removed { "ok" } else { "noop" }
        );
        removed
    }

    /// Stores a board built from legacy-or-canonical entries.
    ///
    /// This is the single migration point for bare-string tasks. Boards that
    /// break [`Board::check_integrity`] are rejected and nothing is stored.
    fn import_board(
        &mut self,
        project_id: &ProjectId,
        week: WeekKey,
        todo: Vec<TaskEntry>,
        in_progress: Vec<TaskEntry>,
        done: Vec<TaskEntry>,
    ) -> Result<(), BoardIntegrityError> {
        let board = Board::from_entries(todo, in_progress, done);
        if let Err(err) = board.check_integrity() {
            warn!(
                "event=board_import module=board status=rejected project={project_id} week={week} reason={err}"
            );
            return Err(err);
        }
        debug!(
            "event=board_import module=board status=ok project={project_id} week={week} tasks={}",
            board.task_count()
        );
        self.set_board(project_id, week, board);
        Ok(())
    }
}

/// Map-backed board store ordered by (project, week).
#[derive(Debug, Default, Clone)]
pub struct InMemoryBoards {
    boards: BTreeMap<(ProjectId, WeekKey), Board>,
}

impl InMemoryBoards {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored boards, including orphaned ones.
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

impl BoardRepository for InMemoryBoards {
    fn get_board(&self, project_id: &ProjectId, week: WeekKey) -> Board {
        self.boards
            .get(&(project_id.clone(), week))
            .cloned()
            .unwrap_or_default()
    }

    fn set_board(&mut self, project_id: &ProjectId, week: WeekKey, board: Board) {
        self.boards.insert((project_id.clone(), week), board);
    }

    fn boards_for_project(&self, project_id: &ProjectId) -> Vec<(WeekKey, Board)> {
        self.boards
            .iter()
            .filter(|((owner, _), _)| owner == project_id)
            .map(|((_, week), board)| (*week, board.clone()))
            .collect()
    }

    fn all_boards(&self) -> Vec<(ProjectId, WeekKey, Board)> {
        self.boards
            .iter()
            .map(|((project_id, week), board)| (project_id.clone(), *week, board.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{BoardRepository, InMemoryBoards};
    use crate::model::board::{Board, BoardIntegrityError, Column};
    use crate::model::project::{ProjectId, WeekKey};
    use crate::model::task::{Task, TaskEntry, TaskId};

    fn week(n: u32) -> WeekKey {
        WeekKey::new(n).unwrap()
    }

    #[test]
    fn unknown_key_reads_as_empty_board_without_storing_it() {
        let store = InMemoryBoards::new();
        assert_eq!(store.get_board(&ProjectId::new("nope"), week(7)), Board::default());
        assert!(store.is_empty());
    }

    #[test]
    fn noop_mutations_do_not_materialize_boards() {
        let mut store = InMemoryBoards::new();
        let project = ProjectId::new("p");
        assert!(!store.delete_task(&project, week(1), Column::Todo, &TaskId::new("x")));
        assert!(!store.update_task(
            &project,
            week(1),
            Column::Todo,
            &TaskId::new("x"),
            Task::new("t")
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn boards_for_project_are_week_ordered() {
        let mut store = InMemoryBoards::new();
        let project = ProjectId::new("p");
        store.add_task(&project, week(10), Column::Todo, Task::new("late"));
        store.add_task(&project, week(2), Column::Todo, Task::new("early"));
        store.add_task(&ProjectId::new("other"), week(1), Column::Done, Task::new("x"));

        let weeks: Vec<u32> = store
            .boards_for_project(&project)
            .into_iter()
            .map(|(key, _)| key.number())
            .collect();
        assert_eq!(weeks, vec![2, 10]);
        assert_eq!(store.all_boards().len(), 3);
    }

    #[test]
    fn import_migrates_legacy_entries() {
        let mut store = InMemoryBoards::new();
        let project = ProjectId::new("p");
        store.import_board(
            &project,
            week(1),
            vec![TaskEntry::from("a"), TaskEntry::from("b")],
            Vec::new(),
            vec![TaskEntry::from(Task::with_id(TaskId::new("kept"), "c"))],
        )
        .unwrap();
        let board = store.get_board(&project, week(1));
        assert_eq!(board.todo.len(), 2);
        assert_ne!(board.todo[0].id, board.todo[1].id);
        assert_eq!(board.done[0].id, TaskId::new("kept"));
    }

    #[test]
    fn import_rejects_duplicate_ids_without_storing() {
        let mut store = InMemoryBoards::new();
        let project = ProjectId::new("p");
        let result = store.import_board(
            &project,
            week(1),
            vec![TaskEntry::from(Task::with_id(TaskId::new("dup"), "a"))],
            Vec::new(),
            vec![TaskEntry::from(Task::with_id(TaskId::new("dup"), "b"))],
        );
        assert_eq!(
            result,
            Err(BoardIntegrityError::DuplicateId(TaskId::new("dup")))
        );
        assert!(store.all_boards().is_empty());
    }
}
