use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, HttpMessage, ResponseError,
};
use futures_util::future::{ok, Ready, LocalBoxFuture};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{
    auth::basic::BasicCredentials,
    errors::AppError,
    use_cases::extractors::ApiUser,
    AppState,
};

/// HTTP Basic authentication for the `/api` scope.
pub struct BasicAuthMiddleware;

impl<S> Transform<S, ServiceRequest> for BasicAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = BasicAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(BasicAuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct BasicAuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for BasicAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if is_public_route(req.path(), req.method().as_str()) {
                return service.call(req).await;
            }

            let Some(state) = req.app_data::<web::Data<AppState>>() else {
                tracing::error!("AppState missing in auth middleware");
                return Ok(reject(req, AppError::Internal("Internal server error".into())));
            };

            let credentials = match extract_credentials(&req) {
                Some(credentials) => credentials,
                None => {
                    tracing::warn!(path = %req.path(), "Missing or malformed Authorization header");
                    return Ok(reject(req, AppError::Unauthorized));
                }
            };

            if !state.credentials.verify(&credentials) {
                tracing::warn!(
                    path = %req.path(),
                    username = %credentials.username,
                    "Rejected API credentials"
                );
                return Ok(reject(req, AppError::Unauthorized));
            }

            req.extensions_mut().insert(ApiUser(credentials.username.clone()));
            service.call(req).await
        })
    }
}

fn is_public_route(path: &str, method: &str) -> bool {
    if method == "OPTIONS" {
        return true;
    }

    path == "/api/ping" && method == "GET"
}

fn extract_credentials(req: &ServiceRequest) -> Option<BasicCredentials> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(BasicCredentials::from_header)
}

fn reject(req: ServiceRequest, err: AppError) -> ServiceResponse<BoxBody> {
    req.into_response(err.error_response())
}
