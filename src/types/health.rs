use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const HEALTHY: &str = "healthy";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    /// RFC 3339 / ISO-8601 instant with an explicit `+00:00` offset.
    #[schema(example = "2024-05-01T12:30:45.123456+00:00")]
    pub timestamp: String,
}

impl HealthResponse {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            status: HEALTHY.into(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Micros, false),
        }
    }

    pub fn now() -> Self {
        Self::at(Utc::now())
    }
}
