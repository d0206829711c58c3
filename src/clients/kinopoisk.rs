use reqwest::{Client, StatusCode, header::CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::{FilmMetadata, UpstreamError};
use crate::config::KinopoiskConfig;
use crate::domain::FilmId;
use crate::models::film::{FilmDetails, KeywordSearchFilm, KeywordSearchResponse};

const API_KEY_HEADER: &str = "X-API-KEY";

/// Client for the unofficial Kinopoisk API.
///
/// Holds a pooled `reqwest::Client`; clones share the pool.
#[derive(Clone)]
pub struct KinopoiskClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl KinopoiskClient {
    /// Creates a client with its own connection pool.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(config: &KinopoiskConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_seconds))
            .user_agent(concat!("Cinebot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;

        Self::with_shared_client(client, config)
    }

    /// Creates a client on top of an existing HTTP client.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid.
    pub fn with_shared_client(client: Client, config: &KinopoiskConfig) -> anyhow::Result<Self> {
        let mut base_url = Url::parse(&config.base_url).map_err(|e| {
            anyhow::anyhow!("Invalid Kinopoisk base URL '{}': {e}", config.base_url)
        })?;

        // Endpoints are joined as relative paths; a trailing slash keeps any prefix.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, UpstreamError> {
        self.base_url
            .join(path)
            .map_err(|e| UpstreamError::Transport(format!("Failed to build URL for {path}: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        film_id: Option<FilmId>,
    ) -> Result<T, UpstreamError> {
        debug!(url = %url, "Kinopoisk request");

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .inspect_err(|e| warn!("Kinopoisk request failed: {}", e))?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND
            && let Some(id) = film_id
        {
            return Err(UpstreamError::NotFound(id));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Kinopoisk API error: {}", body);
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            warn!("Malformed Kinopoisk payload: {}", e);
            UpstreamError::from(e)
        })
    }
}

#[async_trait::async_trait]
impl FilmMetadata for KinopoiskClient {
    async fn search_by_keyword(
        &self,
        query: &str,
    ) -> Result<Vec<KeywordSearchFilm>, UpstreamError> {
        let mut url = self.endpoint("api/v2.1/films/search-by-keyword")?;
        url.query_pairs_mut().append_pair("keyword", query);

        let response: KeywordSearchResponse = self.get_json(url, None).await?;
        Ok(response.films)
    }

    async fn fetch_film_details(&self, film_id: FilmId) -> Result<FilmDetails, UpstreamError> {
        let url = self.endpoint(&format!("api/v2.2/films/{film_id}"))?;
        self.get_json(url, Some(film_id)).await
    }
}
