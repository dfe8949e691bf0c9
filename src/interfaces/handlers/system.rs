use actix_web::{get, HttpResponse, Responder};

use crate::constants::PING_RESPONSE;

/// Liveness probe. Public, never touches the database.
#[get("/ping")]
pub async fn ping() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(PING_RESPONSE)
}
