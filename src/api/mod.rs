use axum::{
    Json, Router,
    extract::State,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::clients::FilmMetadata;
use crate::config::Config;
use crate::state::SharedState;

mod error;
mod films;
mod observability;
mod types;
mod users;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn search_service(&self) -> &Arc<crate::services::SearchService> {
        &self.shared.search_service
    }

    #[must_use]
    pub fn enrichment_service(&self) -> &Arc<crate::services::EnrichmentService> {
        &self.shared.enrichment_service
    }

    #[must_use]
    pub fn activity_service(&self) -> &Arc<crate::services::ActivityService> {
        &self.shared.activity_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

/// Same as [`create_app_state_from_config`] but with a caller-provided metadata source.
pub async fn create_app_state_with_metadata(
    config: Config,
    metadata: Arc<dyn FilmMetadata>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::with_metadata(config, metadata).await?);
    Ok(create_app_state(shared, None))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().server.cors_allowed_origins.clone();

    let api_router = Router::new()
        .route("/health", get(health))
        .route("/help", get(help))
        .route("/search", get(films::search_films))
        .route("/films/{film_id}/select", post(films::select_film))
        .route("/users/{user_id}/history", get(users::get_history))
        .route("/users/{user_id}/stats", get(users::get_stats));

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .route("/metrics", get(observability::get_metrics))
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<HealthStatus>>, ApiError> {
    state
        .store()
        .ping()
        .await
        .map_err(|e| ApiError::StorageUnavailable(e.to_string()))?;

    Ok(Json(ApiResponse::success(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })))
}

async fn help() -> Json<ApiResponse<HelpResponse>> {
    Json(ApiResponse::success(HelpResponse {
        greeting: crate::presentation::GREETING,
        help: crate::presentation::HELP,
    }))
}
