use crate::catalog::CatalogClient;
use crate::error::{ApiError, ApiErrorResponse};
use crate::fairings::TracingSpan;
use crate::types::search::SearchResponse;
use rocket::response::content::RawJson;
use rocket::{Route, State};
use tracing::Instrument;

#[utoipa::path(
    get,
    path = "/api/search",
    tag = "Search",
    params(
        ("q" = String, Query, description = "Search query for music (artist, track, album)"),
    ),
    responses(
        (status = 200, description = "Catalog response relayed unchanged", body = SearchResponse),
        (status = 422, description = "Missing query parameter", body = ApiErrorResponse),
        (status = 500, description = "Unexpected local failure", body = ApiErrorResponse),
        (status = 503, description = "Catalog API unreachable", body = ApiErrorResponse),
        (status = "3XX", description = "Catalog API answered with a redirect", body = ApiErrorResponse),
        (status = "4XX", description = "Catalog API rejected the request", body = ApiErrorResponse),
        (status = "5XX", description = "Catalog API failed", body = ApiErrorResponse),
    )
)]
#[get("/search?<q>")]
pub async fn get_search(
    q: Vec<String>,
    span: TracingSpan,
    catalog: &State<CatalogClient>,
) -> Result<RawJson<Vec<u8>>, ApiError> {
    async move {
        // Repeated `q` parameters forward the last value.
        let query = q.into_iter().last().ok_or_else(|| {
            ApiError::UnprocessableEntity("missing required query parameter `q`".into())
        })?;
        tracing::info!(query = %query, "searching catalog");

        let body = catalog.search(&query).await?;

        tracing::info!(bytes = body.len(), "relaying catalog response");
        Ok(RawJson(body))
    }
    .instrument(span.0)
    .await
}

pub fn routes() -> Vec<Route> {
    rocket::routes![get_search]
}
