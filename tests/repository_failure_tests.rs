mod test_utils;

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use actix_web::{http::StatusCode, test};
use async_trait::async_trait;
use mockall::mock;
use portfolio_api::{
    entities::project::{NewProject, Project, ProjectSummary},
    errors::AppError,
    repositories::project::ProjectRepository,
};
use serde_json::{json, Value};
use test_utils::{admin_auth, full_project, init_app, test_state};

mock! {
    pub ProjectRepo {}

    #[async_trait]
    impl ProjectRepository for ProjectRepo {
        async fn list_projects(&self) -> Result<Vec<Project>, AppError>;
        async fn list_project_summaries(&self) -> Result<Vec<ProjectSummary>, AppError>;
        async fn get_project_by_name(&self, name: &str) -> Result<Option<Project>, AppError>;
        async fn create_project(&self, project: &NewProject) -> Result<i32, AppError>;
        async fn update_project(&self, project: &NewProject) -> Result<u64, AppError>;
        async fn delete_project(&self, name: &str) -> Result<u64, AppError>;
    }
}

fn connection_refused() -> AppError {
    AppError::Database("error communicating with database: Connection refused".into())
}

async fn error_body<S, B>(app: &S, req: actix_http::Request) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse<B>,
            Error = actix_web::Error,
        >,
    B: actix_web::body::MessageBody,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    (status, test::read_body_json(resp).await)
}

#[actix_rt::test]
async fn failed_list_is_reported_and_not_cached() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();

    let mut repo = MockProjectRepo::new();
    repo.expect_list_projects().times(2).returning(move || {
        if seen.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(connection_refused())
        } else {
            Ok(Vec::new())
        }
    });

    let state = test_state(Arc::new(repo));
    let app = init_app(state.clone()).await;

    let req = test::TestRequest::get()
        .uri("/api/projects")
        .insert_header(admin_auth())
        .to_request();
    let (status, body) = error_body(&app, req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to fetch projects"}));
    assert!(state.cache().get("all_projects").is_none());

    let req = test::TestRequest::get()
        .uri("/api/projects")
        .insert_header(admin_auth())
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "[]");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[actix_rt::test]
async fn failed_summary_list_hides_driver_detail() {
    let mut repo = MockProjectRepo::new();
    repo.expect_list_project_summaries()
        .times(1)
        .returning(|| Err(connection_refused()));

    let app = init_app(test_state(Arc::new(repo))).await;

    let req = test::TestRequest::get()
        .uri("/api/projects/list")
        .insert_header(admin_auth())
        .to_request();
    let (status, body) = error_body(&app, req).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to fetch project list"}));
}

#[actix_rt::test]
async fn failed_lookup_is_reported() {
    let mut repo = MockProjectRepo::new();
    repo.expect_get_project_by_name()
        .withf(|name| name == "alpha")
        .times(1)
        .returning(|_| Err(connection_refused()));

    let app = init_app(test_state(Arc::new(repo))).await;

    let req = test::TestRequest::get()
        .uri("/api/projects/alpha")
        .insert_header(admin_auth())
        .to_request();
    let (status, body) = error_body(&app, req).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to fetch project"}));
}

#[actix_rt::test]
async fn failed_writes_keep_cached_views() {
    let mut repo = MockProjectRepo::new();
    repo.expect_list_projects().times(1).returning(|| Ok(Vec::new()));
    repo.expect_create_project()
        .times(1)
        .returning(|_| Err(AppError::Database("duplicate key value violates unique constraint".into())));
    repo.expect_update_project()
        .times(1)
        .returning(|_| Err(connection_refused()));
    repo.expect_delete_project()
        .withf(|name| name == "alpha")
        .times(1)
        .returning(|_| Err(connection_refused()));

    let state = test_state(Arc::new(repo));
    let app = init_app(state.clone()).await;

    // warm the cache
    let req = test::TestRequest::get()
        .uri("/api/projects")
        .insert_header(admin_auth())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let cases = [
        (
            test::TestRequest::post().uri("/api/projects").set_json(full_project("alpha")),
            "Failed to create project",
        ),
        (
            test::TestRequest::put().uri("/api/projects").set_json(full_project("alpha")),
            "Failed to edit project",
        ),
        (
            test::TestRequest::delete().uri("/api/projects/alpha"),
            "Failed to delete project",
        ),
    ];

    for (req, message) in cases {
        let (status, body) = error_body(&app, req.insert_header(admin_auth()).to_request()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": message }));
    }

    assert!(state.cache().get("all_projects").is_some());
}
