use actix_files::NamedFile;
use actix_web::web;

use crate::AppState;

const ADMIN_PAGE: &str = "admin.html";

/// `GET /admin`: the admin page.
pub async fn admin_page(state: web::Data<AppState>) -> actix_web::Result<NamedFile> {
    Ok(NamedFile::open_async(state.static_dir.join(ADMIN_PAGE)).await?)
}
