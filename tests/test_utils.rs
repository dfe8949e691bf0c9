#![allow(dead_code)]

use std::{
    path::Path,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use actix_http::Request;
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::header::{HeaderName, AUTHORIZATION},
    middleware::NormalizePath,
    test, web, App,
};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use portfolio_api::{
    entities::project::{NewProject, Project, ProjectSummary},
    errors::AppError,
    repositories::project::ProjectRepository,
    routes::configure_routes,
    settings::{AppConfig, AppEnvironment},
    AppState,
};

pub const TEST_USERNAME: &str = "portfolio-admin";
pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// `ProjectRepository` backed by a `Vec`, counting calls per operation.
#[derive(Default)]
pub struct InMemoryProjectRepo {
    rows: Mutex<Vec<Project>>,
    next_id: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub summary_calls: AtomicUsize,
    pub get_calls: AtomicUsize,
    pub write_calls: AtomicUsize,
}

impl InMemoryProjectRepo {
    pub fn with_projects(projects: Vec<NewProject>) -> Self {
        let repo = Self::default();
        for project in projects {
            repo.insert(project);
        }
        repo
    }

    fn insert(&self, project: NewProject) -> i32 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i32 + 1;
        self.rows.lock().unwrap().push(project.into_project(id, Utc::now()));
        id
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn summary_calls(&self) -> usize {
        self.summary_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.list_calls()
            + self.summary_calls()
            + self.get_calls.load(Ordering::SeqCst)
            + self.write_calls.load(Ordering::SeqCst)
    }

    pub fn names(&self) -> Vec<String> {
        self.rows.lock().unwrap().iter().map(|p| p.name.clone()).collect()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepo {
    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn list_project_summaries(&self) -> Result<Vec<ProjectSummary>, AppError> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.lock().unwrap().iter().map(ProjectSummary::from).collect())
    }

    async fn get_project_by_name(&self, name: &str) -> Result<Option<Project>, AppError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.lock().unwrap().iter().find(|p| p.name == name).cloned())
    }

    async fn create_project(&self, project: &NewProject) -> Result<i32, AppError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.insert(project.clone()))
    }

    async fn update_project(&self, project: &NewProject) -> Result<u64, AppError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let mut touched = 0;
        for row in rows.iter_mut().filter(|p| p.name == project.name) {
            project.apply_to(row);
            touched += 1;
        }
        Ok(touched)
    }

    async fn delete_project(&self, name: &str) -> Result<u64, AppError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.name != name);
        Ok((before - rows.len()) as u64)
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        database_url: "postgres://unused@localhost/test_db".into(),
        api_username: TEST_USERNAME.into(),
        api_password: TEST_PASSWORD.into(),
        worker_count: 1,
        ..AppConfig::default()
    }
}

pub fn test_state(repo: Arc<dyn ProjectRepository>) -> web::Data<AppState> {
    web::Data::new(AppState::new(&test_config(), repo))
}

pub fn test_state_with_static_dir(
    repo: Arc<dyn ProjectRepository>,
    static_dir: &Path,
) -> web::Data<AppState> {
    let config = AppConfig {
        static_dir: static_dir.to_string_lossy().into_owned(),
        ..test_config()
    };
    web::Data::new(AppState::new(&config, repo))
}

pub async fn init_app(
    state: web::Data<AppState>,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    let static_dir = state.static_dir.clone();
    test::init_service(
        App::new()
            .app_data(state)
            .wrap(NormalizePath::trim())
            .configure(|cfg| configure_routes(cfg, &static_dir)),
    )
    .await
}

pub fn basic_auth(username: &str, password: &str) -> (HeaderName, String) {
    let encoded = STANDARD.encode(format!("{}:{}", username, password));
    (AUTHORIZATION, format!("Basic {}", encoded))
}

pub fn admin_auth() -> (HeaderName, String) {
    basic_auth(TEST_USERNAME, TEST_PASSWORD)
}

pub fn full_project(name: &str) -> NewProject {
    NewProject {
        name: name.into(),
        project_type: "web".into(),
        github_link: Some(format!("https://github.com/example/{name}")),
        project_url: Some(format!("https://{name}.example.com")),
        year: Some(2024),
        dev_time: Some("3 weeks".into()),
        technologies: Some("Rust, Postgres".into()),
        main_image: Some(format!("/img/{name}.png")),
        secondary_image: None,
        overview: Some("Short overview".into()),
        detailed_description: Some("A much longer description".into()),
        in_progress: Some(false),
        bg_color: Some("#101010".into()),
        text_color: Some("#fafafa".into()),
    }
}
