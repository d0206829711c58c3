use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, HistoryResponse, StatsResponse};
use crate::domain::UserId;
use crate::presentation;

pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<ApiResponse<HistoryResponse>>, ApiError> {
    let entries = state
        .activity_service()
        .recent_history_entries(UserId::new(user_id))
        .await?;

    let queries: Vec<String> = entries.iter().map(|e| e.query.clone()).collect();

    Ok(Json(ApiResponse::success(HistoryResponse {
        message: presentation::history_message(&queries),
        entries,
    })))
}

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<ApiResponse<StatsResponse>>, ApiError> {
    let stats = state
        .activity_service()
        .top_stats(UserId::new(user_id))
        .await?;

    Ok(Json(ApiResponse::success(StatsResponse {
        message: presentation::stats_message(&stats),
        stats,
    })))
}
