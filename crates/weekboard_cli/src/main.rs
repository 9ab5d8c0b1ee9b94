//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `weekboard_core` linkage without a UI shell.
//! - Print a deterministic dashboard summary of the configured session.

use std::process::ExitCode;
use weekboard_core::{Column, Session, SessionConfig};

fn main() -> ExitCode {
    println!("weekboard_core ping={}", weekboard_core::ping());
    println!("weekboard_core version={}", weekboard_core::core_version());

    let session = match SessionConfig::from_env()
        .map_err(|err| err.to_string())
        .and_then(|config| Session::from_config(&config).map_err(|err| err.to_string()))
    {
        Ok(session) => session,
        Err(message) => {
            eprintln!("weekboard: {message}");
            return ExitCode::FAILURE;
        }
    };

    let totals = session.dashboard_stats();
    println!(
        "tasks total={} in_progress={} done={} completion={}%",
        totals.total(),
        totals.in_progress,
        totals.done,
        totals.completion_rate()
    );

    for project in session.projects.list_projects() {
        let stats = session.project_stats(&project.id);
        println!(
            "project id={} name={:?} weeks={} done={}/{} ({}%)",
            project.id,
            project.name,
            project.weeks.len(),
            stats.done,
            stats.total(),
            stats.completion_rate()
        );
        for week in project.week_keys() {
            let board = session.boards.board(&project.id, week);
            let counts: Vec<String> = Column::ALL
                .iter()
                .map(|column| format!("{}={}", column, board.column(*column).len()))
                .collect();
            println!(
                "  {} {:?} {}",
                week,
                project.week_label(week).unwrap_or_default(),
                counts.join(" ")
            );
        }
    }

    ExitCode::SUCCESS
}
