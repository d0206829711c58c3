//! Upstream film metadata.
//!
//! [`FilmMetadata`] is the seam the pipelines depend on; [`kinopoisk::KinopoiskClient`]
//! is the production implementation.

pub mod kinopoisk;

pub use kinopoisk::KinopoiskClient;

use crate::domain::FilmId;
use crate::models::film::{FilmDetails, KeywordSearchFilm};
use thiserror::Error;

/// Failure talking to the metadata service. Always recoverable by retrying.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Kinopoisk request failed: {0}")]
    Transport(String),

    #[error("Kinopoisk API error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("Film {0} not found upstream")]
    NotFound(FilmId),

    #[error("Malformed Kinopoisk payload: {0}")]
    Decode(String),

    #[error("Upstream deadline exceeded")]
    DeadlineExceeded,
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::DeadlineExceeded
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for UpstreamError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Read-only access to the film metadata service.
///
/// No caching happens behind this trait: every call is a live round-trip.
#[async_trait::async_trait]
pub trait FilmMetadata: Send + Sync {
    /// Films matching a free-text keyword, in upstream order.
    async fn search_by_keyword(
        &self,
        query: &str,
    ) -> Result<Vec<KeywordSearchFilm>, UpstreamError>;

    /// Full detail record for one film.
    async fn fetch_film_details(&self, film_id: FilmId) -> Result<FilmDetails, UpstreamError>;
}
