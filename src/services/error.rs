//! Typed pipeline failures and the deadline wrappers shared by the services.

use crate::clients::UpstreamError;
use std::future::Future;
use thiserror::Error;
use tokio::time::{Instant, timeout_at};

/// Errors surfaced by the search, enrichment and activity pipelines.
///
/// None of them is fatal; the caller turns them into a "try again" outcome.
/// Empty results are not errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Search query must not be empty")]
    InvalidQuery,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Storage error: {0}")]
    Persistence(String),
}

impl PipelineError {
    /// Short label used for metrics and structured logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidQuery => "invalid_query",
            Self::Upstream(_) => "upstream",
            Self::Persistence(_) => "persistence",
        }
    }

    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        !matches!(self, Self::InvalidQuery)
    }

    pub(crate) fn record(&self, pipeline: &'static str) {
        metrics::counter!(
            "cinebot_pipeline_errors_total",
            "pipeline" => pipeline,
            "kind" => self.kind()
        )
        .increment(1);
    }
}

impl From<anyhow::Error> for PipelineError {
    fn from(err: anyhow::Error) -> Self {
        Self::Persistence(format!("{err:#}"))
    }
}

/// Runs an upstream call, giving up at `deadline`.
pub(crate) async fn upstream_call<T, F>(deadline: Instant, call: F) -> Result<T, PipelineError>
where
    F: Future<Output = Result<T, UpstreamError>>,
{
    match timeout_at(deadline, call).await {
        Ok(result) => result.map_err(PipelineError::from),
        Err(_) => Err(PipelineError::Upstream(UpstreamError::DeadlineExceeded)),
    }
}

/// Runs a store call, giving up at `deadline`. An abandoned transaction rolls back.
pub(crate) async fn store_call<T, F>(deadline: Instant, call: F) -> Result<T, PipelineError>
where
    F: Future<Output = anyhow::Result<T>>,
{
    match timeout_at(deadline, call).await {
        Ok(result) => result.map_err(PipelineError::from),
        Err(_) => Err(PipelineError::Persistence(
            "storage deadline exceeded".to_string(),
        )),
    }
}
