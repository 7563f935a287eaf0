use crate::catalog::{error_chain, CatalogError};
use crate::fairings::request_span_for;
use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use rocket::{Request, Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorDetail {
    #[schema(example = "SERVICE_UNAVAILABLE")]
    pub code: String,
    #[schema(example = "failed to connect to catalog API: operation timed out")]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"error": {"code": "UPSTREAM_ERROR", "message": "catalog API returned an error: {\"error\":\"bad query\"}"}}))]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),
    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::Status { status, body } => {
                // 1xx cannot be relayed as a final status.
                let status = if status.is_informational() {
                    Status::BadGateway.code
                } else {
                    status.as_u16()
                };
                ApiError::Upstream {
                    status,
                    message: format!("catalog API returned an error: {body}"),
                }
            }
            CatalogError::Transport(err) => ApiError::ServiceUnavailable(format!(
                "failed to connect to catalog API: {}",
                error_chain(&err)
            )),
            other => ApiError::Internal(format!("unexpected error: {other}")),
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> rocket::response::Result<'static> {
        let (status, code, message) = match self {
            ApiError::UnprocessableEntity(msg) => {
                (Status::UnprocessableEntity, "UNPROCESSABLE_ENTITY", msg)
            }
            ApiError::Upstream { status, message } => {
                (Status::new(status), "UPSTREAM_ERROR", message)
            }
            ApiError::ServiceUnavailable(msg) => {
                (Status::ServiceUnavailable, "SERVICE_UNAVAILABLE", msg)
            }
            ApiError::Internal(msg) => (Status::InternalServerError, "INTERNAL_ERROR", msg),
        };
        let span = request_span_for(req);
        span.in_scope(|| {
            if status.code >= 500 {
                tracing::error!(
                    status = status.code,
                    code = %code,
                    error_message = %message,
                    "request failed"
                );
            } else {
                tracing::warn!(
                    status = status.code,
                    code = %code,
                    error_message = %message,
                    "request failed"
                );
            }
        });

        let body = ApiErrorResponse {
            error: ApiErrorDetail {
                code: code.to_string(),
                message,
            },
        };
        let json_response = match Json(body).respond_to(req) {
            Ok(r) => r,
            Err(s) => {
                tracing::error!(status = %s.code, "failed to serialize error response");
                return Err(s);
            }
        };
        Ok(Response::build_from(json_response).status(status).finalize())
    }
}
