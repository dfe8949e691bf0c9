use std::{future::Future, sync::Arc};

use actix_web::web::Bytes;
use serde::Serialize;
use validator::Validate;

use crate::{
    cache::{CacheKey, ProjectCache},
    constants::PROJECT_NAME_REQUIRED,
    entities::project::{NewProject, Project},
    errors::AppError,
    repositories::project::ProjectRepository,
};

/// Project operations behind the HTTP layer.
///
/// The two list views are served through `cache`; single-project reads and
/// writes always go to the repository. Every successful write drops both
/// cached views, and they are refilled by the next read.
#[derive(Clone)]
pub struct ProjectHandler {
    pub project_repo: Arc<dyn ProjectRepository>,
    cache: ProjectCache,
}

impl ProjectHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepository>, cache: ProjectCache) -> Self {
        ProjectHandler { project_repo, cache }
    }

    pub fn cache(&self) -> &ProjectCache {
        &self.cache
    }

    /// JSON array of every project, cached under `all_projects`
    pub async fn all_projects(&self) -> Result<Bytes, AppError> {
        self.read_through(CacheKey::AllProjects, "Failed to fetch projects", || {
            self.project_repo.list_projects()
        })
        .await
    }

    /// JSON array of project summaries, cached under `project_list`
    pub async fn project_list(&self) -> Result<Bytes, AppError> {
        self.read_through(CacheKey::ProjectList, "Failed to fetch project list", || {
            self.project_repo.list_project_summaries()
        })
        .await
    }

    pub async fn get_project(&self, name: &str) -> Result<Project, AppError> {
        self.project_repo
            .get_project_by_name(name)
            .await
            .map_err(|e| persistence_failure("Failed to fetch project", e))?
            .ok_or_else(|| AppError::NotFound(format!("Project '{}' not found", name)))
    }

    pub async fn create_project(&self, project: NewProject) -> Result<i32, AppError> {
        project.validate()?;

        let id = self
            .project_repo
            .create_project(&project)
            .await
            .map_err(|e| persistence_failure("Failed to create project", e))?;

        self.invalidate_views();
        Ok(id)
    }

    pub async fn update_project(&self, project: NewProject) -> Result<(), AppError> {
        project.validate()?;

        let updated = self
            .project_repo
            .update_project(&project)
            .await
            .map_err(|e| persistence_failure("Failed to edit project", e))?;

        if updated == 0 {
            tracing::warn!(name = %project.name, "Update matched no project");
        }

        self.invalidate_views();
        Ok(())
    }

    /// Deleting a name that does not exist succeeds.
    pub async fn delete_project(&self, name: &str) -> Result<(), AppError> {
        if name.trim().is_empty() {
            return Err(AppError::BadRequest(PROJECT_NAME_REQUIRED.to_string()));
        }

        let deleted = self
            .project_repo
            .delete_project(name)
            .await
            .map_err(|e| persistence_failure("Failed to delete project", e))?;

        if deleted == 0 {
            tracing::debug!(name, "Delete matched no project");
        }

        self.invalidate_views();
        Ok(())
    }

    async fn read_through<T, F, Fut>(
        &self,
        key: CacheKey,
        failure: &'static str,
        load: F,
    ) -> Result<Bytes, AppError>
    where
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        if let Some(payload) = self.cache.get(key.as_str()) {
            tracing::debug!(%key, "Cache hit");
            return Ok(payload);
        }
        tracing::debug!(%key, "Cache miss");

        let rows = load().await.map_err(|e| persistence_failure(failure, e))?;
        let payload = Bytes::from(serde_json::to_vec(&rows)?);

        self.cache.set(key.as_str(), payload.clone());
        Ok(payload)
    }

    fn invalidate_views(&self) {
        for key in CacheKey::ALL {
            if self.cache.invalidate(key.as_str()) {
                tracing::debug!(%key, "Cache entry invalidated");
            }
        }
    }
}

/// Logs the underlying error and replaces it with a fixed client-facing message.
fn persistence_failure(message: &'static str, err: AppError) -> AppError {
    tracing::error!(error = %err, "{}", message);
    AppError::Internal(message.to_string())
}
