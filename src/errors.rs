use actix_web::{
    error::ResponseError,
    http::{
        header::{ContentType, WWW_AUTHENTICATE},
        StatusCode,
    },
    HttpResponse,
};
use derive_more::Display;
use validator::ValidationErrors;

use crate::constants::BASIC_AUTH_CHALLENGE;

#[derive(Debug, Display)]
pub enum AppError {
    #[display("{_0}")]
    BadRequest(String),

    #[display("Unauthorized")]
    Unauthorized,

    #[display("{_0}")]
    NotFound(String),

    #[display("Database error: {_0}")]
    Database(String),

    #[display("{_0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let message = match self {
            // Raw driver text stays in the logs.
            AppError::Database(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        let mut builder = HttpResponse::build(self.status_code());
        builder.insert_header(ContentType::json());
        if let AppError::Unauthorized = self {
            builder.insert_header((WWW_AUTHENTICATE, BASIC_AUTH_CHALLENGE));
        }
        builder.json(serde_json::json!({ "error": message }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            // Lookups report a missing project as a failed query.
            AppError::NotFound(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl AppError {
    pub fn to_http_response(&self) -> HttpResponse {
        self.error_response()
    }

    pub fn invalid_project_data() -> Self {
        AppError::BadRequest(crate::constants::INVALID_PROJECT_DATA.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        tracing::debug!("Project payload rejected: {}", errors);
        AppError::invalid_project_data()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("Failed to encode response: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn database_errors_hide_driver_text() {
        let err = AppError::Database("password authentication failed for user \"x\"".into());
        let response = err.error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body()).await.unwrap();
        let text = std::str::from_utf8(&body).unwrap();
        assert!(!text.contains("password authentication"));
    }

    #[actix_web::test]
    async fn unauthorized_carries_basic_challenge() {
        let response = AppError::Unauthorized.error_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(WWW_AUTHENTICATE).unwrap(),
            BASIC_AUTH_CHALLENGE
        );
    }

    #[test]
    fn missing_project_maps_to_server_error() {
        let err = AppError::NotFound("Project not found".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Project not found");
    }
}
