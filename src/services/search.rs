use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::clients::FilmMetadata;
use crate::config::SearchConfig;
use crate::db::Store;
use crate::domain::UserId;
use crate::models::SearchCandidate;
use crate::services::error::{PipelineError, store_call, upstream_call};

/// Turns a free-text query into a bounded candidate list and records the search.
pub struct SearchService {
    metadata: Arc<dyn FilmMetadata>,
    store: Store,
    candidate_limit: usize,
    default_deadline: Duration,
}

impl SearchService {
    #[must_use]
    pub fn new(metadata: Arc<dyn FilmMetadata>, store: Store, config: &SearchConfig) -> Self {
        Self {
            metadata,
            store,
            candidate_limit: config.candidate_limit,
            default_deadline: Duration::from_secs(config.request_deadline_seconds),
        }
    }

    /// Searches with the configured default deadline.
    pub async fn search(
        &self,
        user_id: UserId,
        query: &str,
    ) -> Result<Vec<SearchCandidate>, PipelineError> {
        self.search_until(user_id, query, Instant::now() + self.default_deadline)
            .await
    }

    /// Fetches upstream matches, keeps the first `candidate_limit` in upstream order,
    /// then appends the raw query to the user's history.
    ///
    /// The history entry is written even when nothing matched. An upstream failure
    /// returns before anything is written.
    pub async fn search_until(
        &self,
        user_id: UserId,
        query: &str,
        deadline: Instant,
    ) -> Result<Vec<SearchCandidate>, PipelineError> {
        let result = self.run(user_id, query, deadline).await;

        if let Err(e) = &result {
            e.record("search");
            warn!(
                event = "search_failed",
                user_id = %user_id,
                kind = e.kind(),
                "Search failed: {}",
                e
            );
        }

        result
    }

    async fn run(
        &self,
        user_id: UserId,
        query: &str,
        deadline: Instant,
    ) -> Result<Vec<SearchCandidate>, PipelineError> {
        if query.trim().is_empty() {
            return Err(PipelineError::InvalidQuery);
        }

        debug!(user_id = %user_id, query = %query, "Searching films");

        let films = upstream_call(deadline, self.metadata.search_by_keyword(query)).await?;

        let candidates: Vec<SearchCandidate> = films
            .iter()
            .take(self.candidate_limit)
            .map(SearchCandidate::from)
            .collect();

        store_call(deadline, self.store.append_history(user_id, query)).await?;

        metrics::counter!("cinebot_searches_total").increment(1);
        info!(
            event = "search_completed",
            user_id = %user_id,
            query = %query,
            upstream_results = films.len(),
            candidates = candidates.len()
        );

        Ok(candidates)
    }
}
