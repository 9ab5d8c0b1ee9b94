//! Project catalog contracts and in-memory implementation.
//!
//! # Responsibility
//! - Own the ordered list of projects for one session.
//! - Assign unique project ids on create.
//!
//! # Invariants
//! - Insertion order is the listing order.
//! - Write paths validate names before mutating; failed writes change nothing.
//! - `id` and `weeks` are never touched by `update_project`.

use crate::model::project::{
    normalize_project_name, Project, ProjectId, ProjectPatch, ProjectValidationError,
};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog write errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    Validation(ProjectValidationError),
    NotFound(ProjectId),
    DuplicateId(ProjectId),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "project not found: {id}"),
            Self::DuplicateId(id) => write!(f, "project id already exists: {id}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) | Self::DuplicateId(_) => None,
        }
    }
}

impl From<ProjectValidationError> for CatalogError {
    fn from(value: ProjectValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Repository interface for the project catalog.
pub trait CatalogRepository {
    fn list_projects(&self) -> Vec<Project>;
    fn get_project(&self, id: &ProjectId) -> Option<Project>;
    /// Creates a project with a generated id and a single `Week 1`.
    fn create_project(&mut self, name: &str, description: Option<String>)
        -> CatalogResult<Project>;
    /// Inserts a fully formed project, e.g. from seed data.
    fn insert_project(&mut self, project: Project) -> CatalogResult<()>;
    fn update_project(&mut self, id: &ProjectId, patch: &ProjectPatch) -> CatalogResult<Project>;
    /// Removes a project. Returns `false` when nothing matched.
    fn delete_project(&mut self, id: &ProjectId) -> bool;
    fn add_week(&mut self, id: &ProjectId) -> CatalogResult<Project>;
}

/// Vec-backed catalog; lookups are linear, which suits catalog sizes.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    projects: Vec<Project>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    fn find_mut(&mut self, id: &ProjectId) -> CatalogResult<&mut Project> {
        self.projects
            .iter_mut()
            .find(|project| &project.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }

    fn contains(&self, id: &ProjectId) -> bool {
        self.projects.iter().any(|project| &project.id == id)
    }

    fn next_project_id(&self) -> ProjectId {
        let base = format!("project-{}", epoch_millis());
        let mut candidate = ProjectId::new(base.clone());
        let mut suffix = 1u32;
        while self.contains(&candidate) {
            suffix += 1;
            candidate = ProjectId::new(format!("{base}-{suffix}"));
        }
        candidate
    }
}

impl CatalogRepository for InMemoryCatalog {
    fn list_projects(&self) -> Vec<Project> {
        self.projects.clone()
    }

    fn get_project(&self, id: &ProjectId) -> Option<Project> {
        self.projects.iter().find(|project| &project.id == id).cloned()
    }

    fn create_project(
        &mut self,
        name: &str,
        description: Option<String>,
    ) -> CatalogResult<Project> {
        let name = normalize_project_name(name)?;
        let project = Project::new(self.next_project_id(), name, normalize_description(description));
        self.projects.push(project.clone());
        info!(
            "event=project_create module=catalog status=ok project={}",
            project.id
        );
        Ok(project)
    }

    fn insert_project(&mut self, mut project: Project) -> CatalogResult<()> {
        project.name = normalize_project_name(&project.name)?;
        if self.contains(&project.id) {
            return Err(CatalogError::DuplicateId(project.id));
        }
        self.projects.push(project);
        Ok(())
    }

    fn update_project(&mut self, id: &ProjectId, patch: &ProjectPatch) -> CatalogResult<Project> {
        let name = patch
            .name
            .as_deref()
            .map(normalize_project_name)
            .transpose()?;
        let project = self.find_mut(id)?;
        if let Some(name) = name {
            project.name = name;
        }
        if let Some(description) = patch.description.clone() {
            project.description = normalize_description(Some(description));
        }
        debug!("event=project_update module=catalog status=ok project={id}");
        Ok(project.clone())
    }

    fn delete_project(&mut self, id: &ProjectId) -> bool {
        let before = self.projects.len();
        self.projects.retain(|project| &project.id != id);
        let removed = self.projects.len() != before;
        info!(
            "event=project_delete module=catalog status={} project={id}",
            if removed { "ok" } else { "noop" }
        );
        removed
    }

    fn add_week(&mut self, id: &ProjectId) -> CatalogResult<Project> {
        let project = self.find_mut(id)?;
        let key = project.push_week();
        debug!("event=week_add module=catalog status=ok project={id} week={key}");
        Ok(project.clone())
    }
}

fn normalize_description(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

fn epoch_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default()
}
