use actix_web::web;

use crate::handlers::projects;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/projects")
            .service(
                web::resource("")
                    .route(web::get().to(projects::get_projects))
                    .route(web::post().to(projects::create_project))
                    .route(web::put().to(projects::edit_project))
                    .route(web::delete().to(projects::delete_project_without_name))
            )
            // Registered before `/{name}` so "list" is never read as a project name.
            .service(
                web::resource("/list")
                    .route(web::get().to(projects::get_project_list))
            )
            .service(
                web::resource("/{name}")
                    .route(web::get().to(projects::get_project))
                    .route(web::delete().to(projects::delete_project))
            )
    );
}
