use crate::config::SearchConfig;
use crate::db::Store;
use crate::domain::UserId;
use crate::models::{FilmStat, HistoryEntry};
use crate::services::error::PipelineError;

/// Read side of the per-user history and view counters.
pub struct ActivityService {
    store: Store,
    history_limit: u64,
    stats_limit: u64,
}

impl ActivityService {
    #[must_use]
    pub const fn new(store: Store, config: &SearchConfig) -> Self {
        Self {
            store,
            history_limit: config.history_limit,
            stats_limit: config.stats_limit,
        }
    }

    /// Latest queries, newest first.
    pub async fn recent_history(&self, user_id: UserId) -> Result<Vec<String>, PipelineError> {
        Ok(self
            .store
            .recent_history(user_id, self.history_limit)
            .await?)
    }

    pub async fn recent_history_entries(
        &self,
        user_id: UserId,
    ) -> Result<Vec<HistoryEntry>, PipelineError> {
        Ok(self
            .store
            .recent_history_entries(user_id, self.history_limit)
            .await?)
    }

    /// Most viewed films, highest count first.
    pub async fn top_stats(&self, user_id: UserId) -> Result<Vec<FilmStat>, PipelineError> {
        Ok(self.store.top_stats(user_id, self.stats_limit).await?)
    }
}
