use std::path::{Path, PathBuf};
use chrono::Utc;
use tracing::{info, warn};
use crate::errors::RepositoryError;
use crate::models::{Project, ProjectId};
use super::categories::CategorySet;
use super::file_service::{ensure_dir, read_json, remove_file, write_json};
use super::seed::seed_projects;

/// Persistence for the project list and the category set.
///
/// `list` returns projects in insertion order. `insert` appends and refuses
/// an id that is already taken; `update` replaces the record with the same
/// id in place and fails when there is none.
pub trait ProjectRepository: Send + Sync {
    fn list(&self) -> Result<Vec<Project>, RepositoryError>;

    fn get(&self, id: ProjectId) -> Result<Option<Project>, RepositoryError> {
        Ok(self.list()?.into_iter().find(|p| p.id == id))
    }

    fn insert(&mut self, project: Project) -> Result<(), RepositoryError>;

    fn update(&mut self, project: Project) -> Result<(), RepositoryError>;

    /// Returns whether a record was removed.
    fn delete(&mut self, id: ProjectId) -> Result<bool, RepositoryError>;

    fn categories(&self) -> Result<CategorySet, RepositoryError>;

    fn store_categories(&mut self, categories: &CategorySet) -> Result<(), RepositoryError>;

    fn next_id(&self) -> Result<ProjectId, RepositoryError> {
        Ok(fresh_project_id(self.list()?.iter().map(|p| p.id)))
    }
}

/// A timestamp-derived id that is also above every id in use.
pub fn fresh_project_id(existing: impl IntoIterator<Item = ProjectId>) -> ProjectId {
    let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
    let above_existing = existing
        .into_iter()
        .max()
        .map_or(0, |max| max.saturating_add(1));
    now.max(above_existing)
}

// ============================================================================
// In-memory
// ============================================================================

/// Session-scoped store: everything is lost when the process exits.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    projects: Vec<Project>,
    categories: CategorySet,
}

impl InMemoryProjectRepository {
    pub fn new(projects: Vec<Project>, categories: CategorySet) -> Self {
        Self { projects, categories }
    }

    pub fn seeded() -> Self {
        Self::new(seed_projects(), CategorySet::default())
    }
}

impl ProjectRepository for InMemoryProjectRepository {
    fn list(&self) -> Result<Vec<Project>, RepositoryError> {
        Ok(self.projects.clone())
    }

    fn get(&self, id: ProjectId) -> Result<Option<Project>, RepositoryError> {
        Ok(self.projects.iter().find(|p| p.id == id).cloned())
    }

    fn insert(&mut self, project: Project) -> Result<(), RepositoryError> {
        if self.projects.iter().any(|p| p.id == project.id) {
            return Err(RepositoryError::DuplicateId(project.id));
        }
        self.projects.push(project);
        Ok(())
    }

    fn update(&mut self, project: Project) -> Result<(), RepositoryError> {
        let slot = self
            .projects
            .iter_mut()
            .find(|p| p.id == project.id)
            .ok_or(RepositoryError::NotFound(project.id))?;
        *slot = project;
        Ok(())
    }

    fn delete(&mut self, id: ProjectId) -> Result<bool, RepositoryError> {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        Ok(self.projects.len() != before)
    }

    fn categories(&self) -> Result<CategorySet, RepositoryError> {
        Ok(self.categories.clone())
    }

    fn store_categories(&mut self, categories: &CategorySet) -> Result<(), RepositoryError> {
        self.categories = categories.clone();
        Ok(())
    }
}

// ============================================================================
// JSON files
// ============================================================================

const PROJECTS_DIR: &str = "projects";
const ORDER_FILE: &str = "order.json";
const CATEGORIES_FILE: &str = "categories.json";

/// One `<id>.json` per project plus an `order.json` holding the list order,
/// and `categories.json` for the category set.
#[derive(Debug, Clone)]
pub struct JsonProjectRepository {
    root: PathBuf,
}

impl JsonProjectRepository {
    /// Open (or initialize) the store under `root`. A fresh store gets the
    /// default categories and, when `seed` is set, the sample projects.
    pub fn open(root: &Path, seed: bool) -> Result<Self, RepositoryError> {
        let repository = Self {
            root: root.to_path_buf(),
        };
        ensure_dir(&repository.projects_dir())?;

        if !repository.categories_path().exists() {
            write_json(&repository.categories_path(), &CategorySet::default())?;
        }

        if !repository.order_path().exists() {
            let projects = if seed { seed_projects() } else { Vec::new() };
            info!(
                "Initializing project store at {} with {} projects",
                root.display(),
                projects.len()
            );
            for project in &projects {
                write_json(&repository.project_path(project.id), project)?;
            }
            let order: Vec<ProjectId> = projects.iter().map(|p| p.id).collect();
            repository.write_order(&order)?;
        }

        Ok(repository)
    }

    fn projects_dir(&self) -> PathBuf {
        self.root.join(PROJECTS_DIR)
    }

    fn project_path(&self, id: ProjectId) -> PathBuf {
        self.projects_dir().join(format!("{}.json", id))
    }

    fn order_path(&self) -> PathBuf {
        self.projects_dir().join(ORDER_FILE)
    }

    fn categories_path(&self) -> PathBuf {
        self.root.join(CATEGORIES_FILE)
    }

    fn read_order(&self) -> Result<Vec<ProjectId>, RepositoryError> {
        Ok(read_json(&self.order_path())?.unwrap_or_default())
    }

    fn write_order(&self, order: &[ProjectId]) -> Result<(), RepositoryError> {
        write_json(&self.order_path(), order)?;
        Ok(())
    }
}

impl ProjectRepository for JsonProjectRepository {
    fn list(&self) -> Result<Vec<Project>, RepositoryError> {
        let mut projects = Vec::new();
        for id in self.read_order()? {
            match read_json::<Project>(&self.project_path(id))? {
                Some(project) => projects.push(project),
                None => warn!("Project {} is listed but has no file, skipping", id),
            }
        }
        Ok(projects)
    }

    fn get(&self, id: ProjectId) -> Result<Option<Project>, RepositoryError> {
        if !self.read_order()?.contains(&id) {
            return Ok(None);
        }
        Ok(read_json(&self.project_path(id))?)
    }

    fn insert(&mut self, project: Project) -> Result<(), RepositoryError> {
        let mut order = self.read_order()?;
        if order.contains(&project.id) {
            return Err(RepositoryError::DuplicateId(project.id));
        }
        write_json(&self.project_path(project.id), &project)?;
        order.push(project.id);
        self.write_order(&order)
    }

    fn update(&mut self, project: Project) -> Result<(), RepositoryError> {
        if !self.read_order()?.contains(&project.id) {
            return Err(RepositoryError::NotFound(project.id));
        }
        write_json(&self.project_path(project.id), &project)?;
        Ok(())
    }

    fn delete(&mut self, id: ProjectId) -> Result<bool, RepositoryError> {
        let mut order = self.read_order()?;
        let before = order.len();
        order.retain(|existing| *existing != id);
        if order.len() == before {
            return Ok(false);
        }
        self.write_order(&order)?;
        remove_file(&self.project_path(id))?;
        Ok(true)
    }

    fn categories(&self) -> Result<CategorySet, RepositoryError> {
        Ok(read_json(&self.categories_path())?.unwrap_or_default())
    }

    fn store_categories(&mut self, categories: &CategorySet) -> Result<(), RepositoryError> {
        write_json(&self.categories_path(), categories)?;
        Ok(())
    }
}
