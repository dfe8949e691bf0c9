use actix_web::{FromRequest, HttpRequest, HttpMessage};
use futures_util::future::{ready, Ready};

use crate::errors::AppError;

/// Username that passed the Basic auth check on this request.
///
/// Inserted by `BasicAuthMiddleware`; add `user: ApiUser` to a handler that
/// lives under `/api`. Returns 401 if the middleware did not run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiUser(pub String);

impl FromRequest for ApiUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<ApiUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::Unauthorized.into())),
        }
    }
}

impl std::fmt::Display for ApiUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
