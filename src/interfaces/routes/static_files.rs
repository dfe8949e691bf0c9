use std::path::Path;

use actix_files::Files;
use actix_web::web;

use crate::handlers::static_files;

const INDEX_FILE: &str = "index.html";

/// Public pages. Registered last: the `Files` service is mounted at `/`.
pub fn config_routes(cfg: &mut web::ServiceConfig, static_dir: &Path) {
    tracing::info!(path = %static_dir.display(), "Serving static files");

    cfg.service(
        web::resource("/admin")
            .route(web::get().to(static_files::admin_page))
    )
    .service(Files::new("/", static_dir).index_file(INDEX_FILE));
}
