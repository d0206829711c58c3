use crate::domain::UserId;
use crate::entities::{prelude::*, search_history};
use crate::models::HistoryEntry;
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::now_timestamp;

pub struct HistoryRepository {
    conn: DatabaseConnection,
}

impl HistoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Appends one search event. Single-row insert, so it either lands whole or not at all.
    pub async fn append(&self, user_id: UserId, query: &str) -> Result<()> {
        let active_model = search_history::ActiveModel {
            user_id: Set(user_id.value()),
            query: Set(query.to_string()),
            created_at: Set(now_timestamp()),
            ..Default::default()
        };

        SearchHistory::insert(active_model)
            .exec_without_returning(&self.conn)
            .await?;

        Ok(())
    }

    /// Newest first. Rows written within the same microsecond fall back to insertion order.
    pub async fn recent(&self, user_id: UserId, limit: u64) -> Result<Vec<HistoryEntry>> {
        let rows = SearchHistory::find()
            .filter(search_history::Column::UserId.eq(user_id.value()))
            .order_by_desc(search_history::Column::CreatedAt)
            .order_by_desc(search_history::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| HistoryEntry {
                query: row.query,
                created_at: row.created_at,
            })
            .collect())
    }
}
