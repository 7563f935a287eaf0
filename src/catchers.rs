use crate::error::{ApiErrorDetail, ApiErrorResponse};
use crate::fairings::request_span_for;
use rocket::serde::json::Json;
use rocket::Catcher;
use rocket::Request;

fn error_body(code: &str, message: &str) -> Json<ApiErrorResponse> {
    Json(ApiErrorResponse {
        error: ApiErrorDetail {
            code: code.to_string(),
            message: message.to_string(),
        },
    })
}

#[catch(400)]
pub fn bad_request(req: &Request<'_>) -> Json<ApiErrorResponse> {
    let span = request_span_for(req);
    span.in_scope(|| tracing::warn!("bad request (malformed query string or headers)"));

    error_body("BAD_REQUEST", "The request was invalid or malformed")
}

#[catch(404)]
pub fn not_found(req: &Request<'_>) -> Json<ApiErrorResponse> {
    let span = request_span_for(req);
    span.in_scope(|| tracing::warn!("route not found"));

    error_body("NOT_FOUND", "The requested resource was not found")
}

#[catch(422)]
pub fn unprocessable_entity(req: &Request<'_>) -> Json<ApiErrorResponse> {
    let span = request_span_for(req);
    span.in_scope(|| tracing::warn!("unprocessable entity (query parameters failed validation)"));

    error_body("UNPROCESSABLE_ENTITY", "Request parameters could not be parsed")
}

#[catch(500)]
pub fn internal_server_error(req: &Request<'_>) -> Json<ApiErrorResponse> {
    let span = request_span_for(req);
    span.in_scope(|| tracing::error!("unhandled internal server error"));

    error_body("INTERNAL_ERROR", "Internal server error")
}

pub fn catchers() -> Vec<Catcher> {
    rocket::catchers![
        bad_request,
        not_found,
        unprocessable_entity,
        internal_server_error
    ]
}
