//! Aggregate task counters for dashboard, project and analytics read-outs.
//!
//! All aggregates run over stored boards, so orphaned boards still count in
//! the global and per-week totals.

use crate::model::board::{Board, Column};
use crate::model::project::{ProjectId, WeekKey};
use crate::repo::board_repo::BoardRepository;
use std::collections::BTreeMap;
use std::ops::AddAssign;

/// Task counts per column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
}

impl StatusCounts {
    pub fn of_board(board: &Board) -> Self {
        Self {
            todo: board.column(Column::Todo).len(),
            in_progress: board.column(Column::InProgress).len(),
            done: board.column(Column::Done).len(),
        }
    }

    pub fn total(&self) -> usize {
        self.todo + self.in_progress + self.done
    }

    /// Done share in whole percent, half rounding up; 0 for no tasks.
    pub fn completion_rate(&self) -> u8 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        let rate = (self.done * 200 + total) / (total * 2);
        u8::try_from(rate).unwrap_or(100)
    }

    pub fn is_complete(&self) -> bool {
        self.total() > 0 && self.done == self.total()
    }
}

impl AddAssign for StatusCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.todo += rhs.todo;
        self.in_progress += rhs.in_progress;
        self.done += rhs.done;
    }
}

/// Totals across every stored board.
pub fn dashboard_stats<B: BoardRepository>(boards: &B) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for (_, _, board) in boards.all_boards() {
        counts += StatusCounts::of_board(&board);
    }
    counts
}

/// Totals across the stored boards of one project.
pub fn project_stats<B: BoardRepository>(boards: &B, project_id: &ProjectId) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for (_, board) in boards.boards_for_project(project_id) {
        counts += StatusCounts::of_board(&board);
    }
    counts
}

/// Per-week counts of one project, in week order.
pub fn week_stats<B: BoardRepository>(
    boards: &B,
    project_id: &ProjectId,
) -> Vec<(WeekKey, StatusCounts)> {
    boards
        .boards_for_project(project_id)
        .iter()
        .map(|(week, board)| (*week, StatusCounts::of_board(board)))
        .collect()
}

/// Per-project totals for every project that has stored boards, ordered by
/// project id.
pub fn stats_by_project<B: BoardRepository>(boards: &B) -> Vec<(ProjectId, StatusCounts)> {
    let mut grouped: BTreeMap<ProjectId, StatusCounts> = BTreeMap::new();
    for (project_id, _, board) in boards.all_boards() {
        *grouped.entry(project_id).or_default() += StatusCounts::of_board(&board);
    }
    grouped.into_iter().collect()
}

/// Per-week-key totals summed across projects.
pub fn stats_by_week<B: BoardRepository>(boards: &B) -> Vec<(WeekKey, StatusCounts)> {
    let mut grouped: BTreeMap<WeekKey, StatusCounts> = BTreeMap::new();
    for (_, week, board) in boards.all_boards() {
        *grouped.entry(week).or_default() += StatusCounts::of_board(&board);
    }
    grouped.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::StatusCounts;

    #[test]
    fn completion_rate_rounds_half_up() {
        let counts = StatusCounts {
            todo: 1,
            in_progress: 0,
            done: 1,
        };
        assert_eq!(counts.completion_rate(), 50);

        let thirds = StatusCounts {
            todo: 2,
            in_progress: 0,
            done: 1,
        };
        assert_eq!(thirds.completion_rate(), 33);

        let eighths = StatusCounts {
            todo: 7,
            in_progress: 0,
            done: 1,
        };
        // 12.5 rounds up.
        assert_eq!(eighths.completion_rate(), 13);
    }

    #[test]
    fn empty_counts_have_zero_rate() {
        assert_eq!(StatusCounts::default().completion_rate(), 0);
        assert!(!StatusCounts::default().is_complete());
    }
}
