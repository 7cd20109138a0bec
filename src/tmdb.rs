use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

const TMDB_BASE: &str = "https://api.themoviedb.org/3";

/// Template value shipped in example configs. A key left at this value (or
/// never set at all) means the service has no usable credential.
pub const API_KEY_PLACEHOLDER: &str = "YOUR_TMDB_API_KEY_HERE";

pub fn api_key_is_configured(api_key: &str) -> bool {
    !api_key.trim().is_empty() && api_key != API_KEY_PLACEHOLDER
}

/// What TMDB answered, regardless of status. Non-200 statuses are data here,
/// not errors: the handler forwards them to the caller untouched. Only
/// transport-level failures surface as `Err` from the trait.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: String,
}

#[async_trait]
pub trait TmdbApi: Send + Sync {
    async fn search_movies(&self, query: &str) -> Result<UpstreamResponse>;
}

#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
}

impl TmdbClient {
    /// One client per process; the reqwest pool is shared across requests.
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{TMDB_BASE}/search/movie?api_key={}&query={}",
            self.api_key,
            urlencoding::encode(query)
        )
    }
}

#[async_trait]
impl TmdbApi for TmdbClient {
    async fn search_movies(&self, query: &str) -> Result<UpstreamResponse> {
        let res = self
            .client
            .get(self.search_url(query))
            .send()
            .await
            .context("TMDB search request failed")?;
        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read TMDB search body")?;
        Ok(UpstreamResponse { status, body })
    }
}
