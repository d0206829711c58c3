use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::{
    ApiError, ApiResponse, AppState, SearchRequest, SearchResponse, SelectRequest, SelectResponse,
};
use crate::domain::FilmId;
use crate::presentation;

pub async fn search_films(
    State(state): State<Arc<AppState>>,
    Query(request): Query<SearchRequest>,
) -> Result<Json<ApiResponse<SearchResponse>>, ApiError> {
    let candidates = state
        .search_service()
        .search(request.user_id, &request.query)
        .await?;

    Ok(Json(ApiResponse::success(SearchResponse {
        header: presentation::search_header(&request.query, &candidates),
        options: presentation::selectable_options(&candidates),
        candidates,
    })))
}

pub async fn select_film(
    State(state): State<Arc<AppState>>,
    Path(film_id): Path<i64>,
    Json(request): Json<SelectRequest>,
) -> Result<Json<ApiResponse<SelectResponse>>, ApiError> {
    let film = state
        .enrichment_service()
        .select(request.user_id, FilmId::new(film_id))
        .await?;

    Ok(Json(ApiResponse::success(SelectResponse {
        message: presentation::film_message(&film),
        film,
    })))
}
