//! One dashboard session: catalog plus boards, owned together.
//!
//! # Responsibility
//! - Build a session empty, from the built-in seed, or from config.
//! - Expose the catalog and board services to view code by reference.
//!
//! # Invariants
//! - Deleting a project leaves its boards stored (orphaned), not purged.

use crate::config::{ConfigError, SeedSource, SessionConfig};
use crate::logging::init_logging;
use crate::model::project::{ProjectId, WeekKey};
use crate::repo::board_repo::InMemoryBoards;
use crate::repo::catalog_repo::InMemoryCatalog;
use crate::seed::{SeedDocument, SeedError, SeedSummary};
use crate::service::board_service::BoardService;
use crate::service::project_service::ProjectService;
use crate::stats::{self, StatusCounts};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum SessionError {
    Config(ConfigError),
    Seed(SeedError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Seed(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Seed(err) => Some(err),
        }
    }
}

impl From<ConfigError> for SessionError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<SeedError> for SessionError {
    fn from(value: SeedError) -> Self {
        Self::Seed(value)
    }
}

/// Session-scoped state shared by every dashboard view.
pub struct Session {
    pub projects: ProjectService<InMemoryCatalog>,
    pub boards: BoardService<InMemoryBoards>,
}

impl Default for Session {
    fn default() -> Self {
        Self::empty()
    }
}

impl Session {
    /// Session with no projects and no boards.
    pub fn empty() -> Self {
        Self {
            projects: ProjectService::new(InMemoryCatalog::new()),
            boards: BoardService::new(InMemoryBoards::new()),
        }
    }

    /// Session preloaded with the built-in demo data.
    pub fn seeded() -> Result<Self, SeedError> {
        let mut session = Self::empty();
        session.apply_seed(SeedDocument::builtin()?)?;
        Ok(session)
    }

    /// Starts logging when a directory is configured, then seeds.
    pub fn from_config(config: &SessionConfig) -> Result<Self, SessionError> {
        if let Some(dir) = config.log_dir.as_deref() {
            init_logging(&config.log_level, &dir.to_string_lossy()).map_err(ConfigError::from)?;
        }
        let mut session = Self::empty();
        match &config.seed {
            SeedSource::Builtin => {
                session.apply_seed(SeedDocument::builtin()?)?;
            }
            SeedSource::Empty => {}
            SeedSource::File(path) => {
                session.apply_seed(SeedDocument::from_file(path)?)?;
            }
        }
        Ok(session)
    }

    pub fn apply_seed(&mut self, seed: SeedDocument) -> Result<SeedSummary, SeedError> {
        seed.apply(self.projects.repo_mut(), self.boards.repo_mut())
    }

    /// Removes a project from the catalog; its boards stay stored.
    pub fn delete_project(&mut self, id: &ProjectId) -> bool {
        self.projects.delete_project(id)
    }

    pub fn dashboard_stats(&self) -> StatusCounts {
        stats::dashboard_stats(self.boards.repo())
    }

    pub fn project_stats(&self, id: &ProjectId) -> StatusCounts {
        stats::project_stats(self.boards.repo(), id)
    }

    pub fn week_stats(&self, id: &ProjectId) -> Vec<(WeekKey, StatusCounts)> {
        stats::week_stats(self.boards.repo(), id)
    }

    /// Per-project totals labelled with display names.
    ///
    /// Catalog projects come first in catalog order, then orphaned boards by
    /// project id. Catalog projects without stored boards are left out.
    pub fn stats_by_project(&self) -> Vec<(String, StatusCounts)> {
        let mut grouped: BTreeMap<ProjectId, StatusCounts> =
            stats::stats_by_project(self.boards.repo()).into_iter().collect();
        let mut ordered = Vec::with_capacity(grouped.len());
        for project in self.projects.list_projects() {
            if let Some(counts) = grouped.remove(&project.id) {
                ordered.push((project.name, counts));
            }
        }
        ordered.extend(grouped.into_iter().map(|(id, counts)| (id.to_string(), counts)));
        ordered
    }

    pub fn stats_by_week(&self) -> Vec<(WeekKey, StatusCounts)> {
        stats::stats_by_week(self.boards.repo())
    }
}
