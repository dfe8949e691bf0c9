use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::errors::AppError;

/// Rejects unreadable JSON bodies with a 400 and no parser detail.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler));
}

fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = %req.path(), error = %err, "Rejected JSON body");
    AppError::invalid_project_data().into()
}
