//! Project catalog use-case service.
//!
//! # Responsibility
//! - Provide stable catalog entry points for dashboard callers.
//! - Resolve display fallbacks and week navigation keys.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.

use crate::model::project::{Project, ProjectId, ProjectPatch, WeekKey};
use crate::repo::catalog_repo::{CatalogRepository, CatalogResult};

/// Use-case wrapper for catalog operations.
pub struct ProjectService<R: CatalogRepository> {
    repo: R,
}

impl<R: CatalogRepository> ProjectService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_projects(&self) -> Vec<Project> {
        self.repo.list_projects()
    }

    /// Looks up one project. `None` is a normal outcome.
    pub fn get_project(&self, id: &ProjectId) -> Option<Project> {
        self.repo.get_project(id)
    }

    /// Creates a project with `weeks = ["Week 1"]`.
    ///
    /// # Errors
    /// - `CatalogError::Validation` when `name` is blank.
    pub fn create_project(
        &mut self,
        name: &str,
        description: Option<String>,
    ) -> CatalogResult<Project> {
        self.repo.create_project(name, description)
    }

    /// Renames and/or re-describes a project.
    ///
    /// # Errors
    /// - `CatalogError::Validation` when the new name is blank.
    /// - `CatalogError::NotFound` when `id` is unknown.
    pub fn update_project(&mut self, id: &ProjectId, patch: &ProjectPatch) -> CatalogResult<Project> {
        self.repo.update_project(id, patch)
    }

    /// Idempotent delete. Returns whether a project was removed.
    pub fn delete_project(&mut self, id: &ProjectId) -> bool {
        self.repo.delete_project(id)
    }

    /// Appends `Week <n+1>`.
    pub fn add_week(&mut self, id: &ProjectId) -> CatalogResult<Project> {
        self.repo.add_week(id)
    }

    /// Board header name: the project name, or the raw id when unknown.
    pub fn project_display_name(&self, id: &ProjectId) -> String {
        self.repo
            .get_project(id)
            .map(|project| project.name)
            .unwrap_or_else(|| id.to_string())
    }

    /// Navigation keys for a project's weeks. Empty when unknown.
    pub fn week_keys(&self, id: &ProjectId) -> Vec<WeekKey> {
        self.repo
            .get_project(id)
            .map(|project| project.week_keys())
            .unwrap_or_default()
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn repo_mut(&mut self) -> &mut R {
        &mut self.repo
    }
}
