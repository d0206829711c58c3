use crate::api::AppState;
use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

/// User a pipeline request acts for: `user_id` query parameter on search,
/// path segment on `/api/users/{user_id}/..`. Selection carries it in the body
/// and is logged by the enrichment service instead.
fn request_user_id(req: &Request) -> Option<i64> {
    if let Some(query) = req.uri().query()
        && let Some((_, value)) =
            url::form_urlencoded::parse(query.as_bytes()).find(|(key, _)| key == "user_id")
    {
        return value.parse().ok();
    }

    req.uri()
        .path()
        .strip_prefix("/api/users/")?
        .split('/')
        .next()?
        .parse()
        .ok()
}

const fn outcome(status: u16) -> &'static str {
    match status {
        500.. => "error",
        400.. => "client_error",
        _ => "success",
    }
}

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();
    let user_id = request_user_id(&req);

    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string());

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
        route = route.clone(),
        user_id = user_id,
    );

    async move {
        let response = next.run(req).await;
        let status = response.status().as_u16();
        let elapsed = start.elapsed();

        // Unmatched paths collapse into one label.
        let route_label = route.unwrap_or_else(|| "unmatched".to_string());
        let labels = [
            ("method", method),
            ("route", route_label),
            ("status", status.to_string()),
        ];

        metrics::counter!("cinebot_http_requests_total", &labels).increment(1);
        metrics::histogram!("cinebot_http_request_duration_seconds", &labels)
            .record(elapsed.as_secs_f64());

        info!(
            event = "http_request_finished",
            duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            status_code = status,
            outcome = outcome(status),
            "Request finished"
        );

        response
    }
    .instrument(span)
    .await
}
