//! Core state for the weekboard project dashboard.
//! This crate is the single source of truth for catalog and board invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;
pub mod session;
pub mod stats;

pub use config::{ConfigError, SeedSource, SessionConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::board::{Board, BoardIntegrityError, Column, ColumnParseError, MoveOutcome};
pub use model::project::{
    Project, ProjectId, ProjectPatch, ProjectValidationError, WeekKey, WeekKeyParseError,
};
pub use model::task::{Priority, Task, TaskDraft, TaskEntry, TaskId, TaskValidationError};
pub use repo::board_repo::{BoardRepository, InMemoryBoards};
pub use repo::catalog_repo::{CatalogError, CatalogRepository, CatalogResult, InMemoryCatalog};
pub use seed::{SeedBoard, SeedDocument, SeedError, SeedSummary};
pub use service::board_service::BoardService;
pub use service::drag::{DragPayload, DropOutcome, IgnoreReason};
pub use service::project_service::ProjectService;
pub use session::{Session, SessionError};
pub use stats::StatusCounts;

/// Minimal health-check API for shell integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
