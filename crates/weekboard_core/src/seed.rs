//! Seed data decoding and import.
//!
//! # Responsibility
//! - Decode seed documents holding a catalog and legacy-shaped boards.
//! - Push them through the store boundary, where bare strings are migrated.
//!
//! # Invariants
//! - Boards may reference projects missing from the catalog; they are kept
//!   as orphans, same as boards of a deleted project.
//! - Every seeded board passes `Board::check_integrity` (non-blank unique
//!   ids, valid titles and due dates) before it is stored.
//! - A failing seed stops at the first error; catalog entries and boards
//!   stored before it remain.

use crate::model::board::BoardIntegrityError;
use crate::model::project::{Project, ProjectId, WeekKey};
use crate::model::task::TaskEntry;
use crate::repo::board_repo::BoardRepository;
use crate::repo::catalog_repo::{CatalogError, CatalogRepository};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const BUILTIN_SEED_JSON: &str = include_str!("../seed/demo.json");

/// Column entries of one seeded board, in either task shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedBoard {
    #[serde(default)]
    pub todo: Vec<TaskEntry>,
    #[serde(default)]
    pub in_progress: Vec<TaskEntry>,
    #[serde(default)]
    pub done: Vec<TaskEntry>,
}

/// Seed document: catalog entries plus boards keyed by project and week key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedDocument {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub boards: BTreeMap<ProjectId, BTreeMap<WeekKey, SeedBoard>>,
}

/// Counts reported after a seed import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub projects: usize,
    pub boards: usize,
    pub tasks: usize,
}

#[derive(Debug)]
pub enum SeedError {
    Json(serde_json::Error),
    Io { path: PathBuf, source: std::io::Error },
    Catalog(CatalogError),
    Board {
        project: ProjectId,
        week: WeekKey,
        source: BoardIntegrityError,
    },
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid seed document: {err}"),
            Self::Io { path, source } => {
                write!(f, "failed to read seed file `{}`: {source}", path.display())
            }
            Self::Catalog(err) => write!(f, "seed catalog rejected: {err}"),
            Self::Board {
                project,
                week,
                source,
            } => write!(f, "seed board `{project}/{week}` rejected: {source}"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::Catalog(err) => Some(err),
            Self::Board { source, .. } => Some(source),
        }
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<CatalogError> for SeedError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl SeedDocument {
    /// The built-in demo catalog and boards.
    pub fn builtin() -> Result<Self, SeedError> {
        Self::from_json(BUILTIN_SEED_JSON)
    }

    pub fn from_json(text: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, SeedError> {
        let text = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Inserts catalog entries then imports every board.
    pub fn apply<C, B>(self, catalog: &mut C, boards: &mut B) -> Result<SeedSummary, SeedError>
    where
        C: CatalogRepository,
        B: BoardRepository,
    {
        let mut summary = SeedSummary::default();
        for project in self.projects {
            catalog.insert_project(project)?;
            summary.projects += 1;
        }
        for (project_id, weeks) in self.boards {
            for (week, seed) in weeks {
                let tasks = seed.todo.len() + seed.in_progress.len() + seed.done.len();
                boards
                    .import_board(&project_id, week, seed.todo, seed.in_progress, seed.done)
                    .map_err(|source| SeedError::Board {
                        project: project_id.clone(),
                        week,
                        source,
                    })?;
                summary.boards += 1;
                summary.tasks += tasks;
            }
        }
        info!(
            "event=seed_apply module=seed status=ok projects={} boards={} tasks={}",
            summary.projects, summary.boards, summary.tasks
        );
        Ok(summary)
    }
}
