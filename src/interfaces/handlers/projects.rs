use actix_web::{http::header::ContentType, web, HttpResponse, Responder};

use crate::{
    constants::PROJECT_NAME_REQUIRED,
    entities::project::NewProject,
    errors::AppError,
    use_cases::extractors::ApiUser,
    AppState,
};

pub async fn get_projects(state: web::Data<AppState>) -> impl Responder {
    match state.project_handler.all_projects().await {
        Ok(body) => HttpResponse::Ok().content_type(ContentType::json()).body(body),
        Err(e) => e.to_http_response(),
    }
}

pub async fn get_project_list(state: web::Data<AppState>) -> impl Responder {
    match state.project_handler.project_list().await {
        Ok(body) => HttpResponse::Ok().content_type(ContentType::json()).body(body),
        Err(e) => e.to_http_response(),
    }
}

pub async fn get_project(
    state: web::Data<AppState>,
    name: web::Path<String>,
) -> impl Responder {
    let name = name.into_inner();
    tracing::info!(name = %name, "Fetching project");

    match state.project_handler.get_project(&name).await {
        Ok(project) => HttpResponse::Ok().json(project),
        Err(e) => e.to_http_response(),
    }
}

pub async fn create_project(
    user: ApiUser,
    state: web::Data<AppState>,
    project: web::Json<NewProject>,
) -> impl Responder {
    let project = project.into_inner();
    let name = project.name.clone();

    match state.project_handler.create_project(project).await {
        Ok(id) => {
            tracing::info!(%user, name = %name, id, "Project created");
            HttpResponse::Created().json(serde_json::json!({
                "message": "Project created successfully"
            }))
        }
        Err(e) => e.to_http_response(),
    }
}

pub async fn edit_project(
    user: ApiUser,
    state: web::Data<AppState>,
    project: web::Json<NewProject>,
) -> impl Responder {
    let project = project.into_inner();
    let name = project.name.clone();

    match state.project_handler.update_project(project).await {
        Ok(()) => {
            tracing::info!(%user, name = %name, "Project updated");
            HttpResponse::Ok().json(serde_json::json!({
                "message": "Project updated successfully"
            }))
        }
        Err(e) => e.to_http_response(),
    }
}

pub async fn delete_project(
    user: ApiUser,
    state: web::Data<AppState>,
    name: web::Path<String>,
) -> impl Responder {
    let name = name.into_inner();

    match state.project_handler.delete_project(&name).await {
        Ok(()) => {
            tracing::info!(%user, name = %name, "Project deleted");
            HttpResponse::Ok().json(serde_json::json!({
                "message": "Project deleted successfully"
            }))
        }
        Err(e) => e.to_http_response(),
    }
}

/// `DELETE /api/projects` (and `/api/projects/` after trimming): no name given.
pub async fn delete_project_without_name(_user: ApiUser) -> impl Responder {
    AppError::BadRequest(PROJECT_NAME_REQUIRED.to_string()).to_http_response()
}
