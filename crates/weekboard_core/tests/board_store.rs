use weekboard_core::{
    Board, BoardRepository, Column, InMemoryBoards, MoveOutcome, Priority, ProjectId, Task,
    TaskId, WeekKey,
};

fn week(n: u32) -> WeekKey {
    WeekKey::new(n).unwrap()
}

fn task(id: &str) -> Task {
    Task::with_id(TaskId::new(id), format!("Task {id}"))
}

fn ids(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.id.as_str()).collect()
}

fn seeded_store() -> (InMemoryBoards, ProjectId) {
    let mut store = InMemoryBoards::new();
    let project = ProjectId::new("project-a");
    store.set_board(
        &project,
        week(1),
        Board {
            todo: vec![task("t1"), task("t2"), task("t3")],
            in_progress: vec![task("p1"), task("p2")],
            done: vec![task("d1")],
        },
    );
    (store, project)
}

#[test]
fn unseeded_pair_reads_as_empty_board() {
    let store = InMemoryBoards::new();
    let board = store.get_board(&ProjectId::new("missing"), week(3));
    assert!(board.todo.is_empty());
    assert!(board.in_progress.is_empty());
    assert!(board.done.is_empty());
}

#[test]
fn move_transfers_task_to_target_tail() {
    let mut store = InMemoryBoards::new();
    let project = ProjectId::new("p");
    store.set_board(
        &project,
        week(1),
        Board {
            todo: vec![task("T1"), task("T2")],
            ..Board::default()
        },
    );

    let outcome = store.move_task(
        &project,
        week(1),
        &TaskId::new("T1"),
        Column::Todo,
        Column::InProgress,
    );

    assert_eq!(outcome, MoveOutcome::Moved);
    let board = store.get_board(&project, week(1));
    assert_eq!(ids(&board.todo), vec!["T2"]);
    assert_eq!(ids(&board.in_progress), vec!["T1"]);
    assert!(board.done.is_empty());
}

#[test]
fn move_preserves_relative_order_of_other_tasks() {
    let (mut store, project) = seeded_store();

    store.move_task(
        &project,
        week(1),
        &TaskId::new("t2"),
        Column::Todo,
        Column::InProgress,
    );

    let board = store.get_board(&project, week(1));
    assert_eq!(ids(&board.todo), vec!["t1", "t3"]);
    assert_eq!(ids(&board.in_progress), vec!["p1", "p2", "t2"]);
    assert_eq!(ids(&board.done), vec!["d1"]);
    assert_eq!(board.task_count(), 6);
}

#[test]
fn move_within_same_column_leaves_board_identical() {
    let (mut store, project) = seeded_store();
    let before = store.get_board(&project, week(1));

    let outcome = store.move_task(&project, week(1), &TaskId::new("t1"), Column::Todo, Column::Todo);

    assert_eq!(outcome, MoveOutcome::SameColumn);
    assert_eq!(store.get_board(&project, week(1)), before);
}

#[test]
fn move_of_unknown_task_leaves_board_identical() {
    let (mut store, project) = seeded_store();
    let before = store.get_board(&project, week(1));

    let outcome = store.move_task(
        &project,
        week(1),
        &TaskId::new("ghost"),
        Column::Todo,
        Column::Done,
    );

    assert_eq!(outcome, MoveOutcome::TaskNotFound);
    assert_eq!(store.get_board(&project, week(1)), before);
}

#[test]
fn every_cross_column_move_keeps_task_in_exactly_one_column() {
    for source in Column::ALL {
        for target in Column::ALL {
            if source == target {
                continue;
            }
            let (mut store, project) = seeded_store();
            let moving = store.get_board(&project, week(1)).column(source)[0].id.clone();

            assert_eq!(
                store.move_task(&project, week(1), &moving, source, target),
                MoveOutcome::Moved
            );

            let board = store.get_board(&project, week(1));
            let holders: Vec<Column> = Column::ALL
                .into_iter()
                .filter(|column| board.column(*column).iter().any(|t| t.id == moving))
                .collect();
            assert_eq!(holders, vec![target]);
            assert_eq!(board.column(target).last().map(|t| &t.id), Some(&moving));
        }
    }
}

#[test]
fn add_then_delete_restores_column() {
    let (mut store, project) = seeded_store();
    let before = store.get_board(&project, week(1));

    store.add_task(&project, week(1), Column::InProgress, task("new"));
    let added = store.get_board(&project, week(1));
    assert_eq!(ids(&added.in_progress), vec!["p1", "p2", "new"]);

    assert!(store.delete_task(&project, week(1), Column::InProgress, &TaskId::new("new")));
    assert_eq!(store.get_board(&project, week(1)), before);
}

#[test]
fn update_preserves_position_and_identity() {
    let (mut store, project) = seeded_store();
    let mut edited = task("t2");
    edited.title = "Renamed".to_string();
    edited.priority = Some(Priority::High);
    edited.due_date = Some("2024-05-01".to_string());

    assert!(store.update_task(&project, week(1), Column::Todo, &TaskId::new("t2"), edited));

    let board = store.get_board(&project, week(1));
    assert_eq!(ids(&board.todo), vec!["t1", "t2", "t3"]);
    assert_eq!(board.todo[1].title, "Renamed");
    assert_eq!(board.todo[1].priority, Some(Priority::High));
}

#[test]
fn update_with_absent_id_leaves_board_identical() {
    let (mut store, project) = seeded_store();
    let before = store.get_board(&project, week(1));

    // `p1` exists, but not in the named column.
    assert!(!store.update_task(&project, week(1), Column::Todo, &TaskId::new("p1"), task("p1")));
    assert!(!store.update_task(&project, week(1), Column::Done, &TaskId::new("nope"), task("x")));

    assert_eq!(store.get_board(&project, week(1)), before);
}

#[test]
fn delete_of_absent_task_is_noop() {
    let (mut store, project) = seeded_store();
    let before = store.get_board(&project, week(1));

    assert!(!store.delete_task(&project, week(1), Column::Done, &TaskId::new("t1")));

    assert_eq!(store.get_board(&project, week(1)), before);
}

#[test]
fn boards_are_isolated_per_week_and_project() {
    let (mut store, project) = seeded_store();
    store.add_task(&project, week(2), Column::Todo, task("w2"));
    store.add_task(&ProjectId::new("other"), week(1), Column::Todo, task("o1"));

    assert_eq!(ids(&store.get_board(&project, week(2)).todo), vec!["w2"]);
    assert_eq!(ids(&store.get_board(&project, week(1)).todo), vec!["t1", "t2", "t3"]);
    assert_eq!(store.boards_for_project(&project).len(), 2);
}
