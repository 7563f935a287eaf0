//! Shape of the catalog search envelope as the page script consumes it.
//!
//! These types document the passthrough payload in the OpenAPI schema. The
//! search route relays the catalog body as raw bytes and never deserializes
//! into them; unknown fields are ignored so the contract stays minimal.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub data: Vec<TrackRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 300)]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "https://api.deezer.com/search?q=daft+punk&index=25")]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrackRecord {
    #[schema(example = "One More Time")]
    pub title: String,
    /// 30 second preview clip; absent for tracks without one.
    #[schema(example = "https://cdns-preview-e.dzcdn.net/stream/c-e77d23e0c8ed7567a507a6d1b6a9ca1b-9.mp3")]
    pub preview: Option<String>,
    pub artist: ArtistRef,
    pub album: AlbumRef,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArtistRef {
    #[schema(example = "Daft Punk")]
    pub name: String,
    #[serde(default)]
    pub picture_medium: Option<String>,
    #[serde(default)]
    pub picture_big: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AlbumRef {
    #[serde(default)]
    pub cover_big: Option<String>,
}
