use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode, Url};
use serde::de::IgnoredAny;
use std::time::Duration;

pub const DEFAULT_CATALOG_URL: &str = "https://api.deezer.com/search";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub search_url: Url,
    pub timeout: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to build catalog HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    #[error("catalog API returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("catalog request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("catalog API returned malformed JSON: {0}")]
    Payload(#[source] serde_json::Error),
}

/// Process-wide client for the external music catalog.
///
/// Lives in Rocket managed state for the whole process and is shared by
/// reference across handlers; the underlying connection pool is dropped
/// together with the ignited Rocket instance.
#[derive(Debug)]
pub struct CatalogClient {
    http: Client,
    search_url: Url,
}

impl CatalogClient {
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .redirect(Policy::none())
            .build()
            .map_err(CatalogError::Build)?;

        tracing::info!(
            search_url = %config.search_url,
            timeout_secs = config.timeout.as_secs(),
            "catalog client created"
        );

        Ok(Self {
            http,
            search_url: config.search_url.clone(),
        })
    }

    pub fn search_url_for(&self, query: &str) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut().append_pair("q", query);
        url
    }

    /// Issues one GET for `query` and returns the catalog's JSON body untouched.
    pub async fn search(&self, query: &str) -> Result<Vec<u8>, CatalogError> {
        let url = self.search_url_for(query);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(CatalogError::Transport)?;

        let status = response.status();
        let body = response.bytes().await.map_err(CatalogError::Transport)?;

        if !status.is_success() {
            return Err(CatalogError::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        // Validate only; re-serializing would reorder keys.
        serde_json::from_slice::<IgnoredAny>(&body).map_err(CatalogError::Payload)?;

        Ok(body.to_vec())
    }
}

/// Renders an error followed by every `source()` beneath it.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
