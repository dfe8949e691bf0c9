use std::path::Path;

use actix_web::web;

use crate::{handlers::system::ping, middlewares::auth::BasicAuthMiddleware};

mod json_error;
mod projects;
mod static_files;

pub fn configure_routes(cfg: &mut web::ServiceConfig, static_dir: &Path) {
    cfg.configure(json_error::config_routes);

    cfg.service(
        web::scope("/api")
            .wrap(BasicAuthMiddleware)
            .service(ping)
            .configure(projects::config_routes)
    );

    static_files::config_routes(cfg, static_dir);
}
