use serde::{Deserialize, Serialize};

use crate::domain::UserId;
use crate::models::{EnrichedFilm, FilmStat, HistoryEntry, SearchCandidate};
use crate::presentation::{FilmMessage, SelectableOption};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub user_id: UserId,
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub header: String,
    pub candidates: Vec<SearchCandidate>,
    pub options: Vec<SelectableOption>,
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub user_id: UserId,
}

#[derive(Debug, Serialize)]
pub struct SelectResponse {
    pub film: EnrichedFilm,
    pub message: FilmMessage,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub entries: Vec<HistoryEntry>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub stats: Vec<FilmStat>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HelpResponse {
    pub greeting: &'static str,
    pub help: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_secs: u64,
}
