use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;
use rocket::request::{FromRequest, Outcome};
use rocket::{Data, Request, Response};
use std::time::Instant;
use uuid::Uuid;

pub(crate) const REQUEST_ID_HEADER: &str = "X-Request-Id";
const MAX_REQUEST_ID_LEN: usize = 128;

/// Opens a `request` span per request and logs its start and completion.
pub struct RequestLogger;

/// Request guard handing the current request span to a handler.
pub struct TracingSpan(pub tracing::Span);

/// Per-request bookkeeping kept in Rocket's request-local cache.
struct RequestTrace {
    id: String,
    span: tracing::Span,
    started: Instant,
}

impl RequestTrace {
    fn open(req: &Request<'_>) -> Self {
        let id = request_id_for(req);
        let span = tracing::info_span!(
            "request",
            method = %req.method(),
            uri = %req.uri(),
            request_id = %id,
        );
        span.in_scope(|| tracing::info!("request started"));
        Self {
            id,
            span,
            started: Instant::now(),
        }
    }

    /// Stand-in for requests the fairing never saw, such as local catcher tests.
    fn untracked() -> Self {
        Self {
            id: "unknown".to_string(),
            span: tracing::Span::none(),
            started: Instant::now(),
        }
    }

    fn close(&self, status: u16) {
        let duration_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        let _entered = self.span.enter();
        if status >= 500 {
            tracing::error!(status, duration_ms, "request completed");
        } else if status >= 400 {
            tracing::warn!(status, duration_ms, "request completed");
        } else {
            tracing::info!(status, duration_ms, "request completed");
        }
    }
}

fn is_acceptable_request_id(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.is_ascii()
        && !value.chars().any(|c| c.is_control())
}

fn request_id_for(req: &Request<'_>) -> String {
    req.headers()
        .get_one(REQUEST_ID_HEADER)
        .map(str::trim)
        .filter(|id| is_acceptable_request_id(id))
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

pub(crate) fn request_span_for(req: &Request<'_>) -> tracing::Span {
    req.local_cache(RequestTrace::untracked).span.clone()
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for TracingSpan {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        Outcome::Success(TracingSpan(request_span_for(req)))
    }
}

#[rocket::async_trait]
impl Fairing for RequestLogger {
    fn info(&self) -> Info {
        Info {
            name: "Request Logger",
            kind: Kind::Request | Kind::Response,
        }
    }

    async fn on_request(&self, req: &mut Request<'_>, _data: &mut Data<'_>) {
        let trace = RequestTrace::open(req);
        req.local_cache(|| trace);
    }

    async fn on_response<'r>(&self, req: &'r Request<'_>, res: &mut Response<'r>) {
        let trace = req.local_cache(RequestTrace::untracked);
        trace.close(res.status().code);
        res.set_header(Header::new(REQUEST_ID_HEADER, trace.id.clone()));
    }
}
