use std::{path::PathBuf, sync::Arc};

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod background_task;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, cache, db};

use auth::basic::ApiCredentials;
use cache::ProjectCache;
use repositories::project::ProjectRepository;
use use_cases::projects::ProjectHandler;

pub struct AppState {
    pub project_handler: ProjectHandler,
    pub credentials: ApiCredentials,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, project_repo: Arc<dyn ProjectRepository>) -> Self {
        let cache = if config.cache_enabled {
            ProjectCache::new(config.cache_ttl())
        } else {
            tracing::warn!("Project cache disabled; every list request will hit the database");
            ProjectCache::disabled()
        };

        AppState {
            project_handler: ProjectHandler::new(project_repo, cache),
            credentials: ApiCredentials::from(config),
            static_dir: PathBuf::from(&config.static_dir),
        }
    }

    pub fn cache(&self) -> &ProjectCache {
        self.project_handler.cache()
    }
}
