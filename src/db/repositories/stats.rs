use crate::domain::{FilmId, UserId};
use crate::entities::{film_stats, prelude::*};
use crate::models::FilmStat;
use anyhow::Result;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};

use super::now_timestamp;

pub struct StatsRepository {
    conn: DatabaseConnection,
}

impl StatsRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Adds one view for `(user_id, film_id)` and returns the new count.
    ///
    /// The increment is a single `INSERT .. ON CONFLICT DO UPDATE SET count = count + 1`,
    /// so concurrent callers for the same pair never lose an update. The title is
    /// only written when the row is created.
    pub async fn increment(
        &self,
        user_id: UserId,
        film_id: FilmId,
        film_title: &str,
    ) -> Result<i32> {
        let now = now_timestamp();
        let active_model = film_stats::ActiveModel {
            user_id: Set(user_id.value()),
            film_id: Set(film_id.value()),
            film_title: Set(film_title.to_string()),
            count: Set(1),
            first_seen_at: Set(now.clone()),
            last_seen_at: Set(now),
            ..Default::default()
        };

        let txn = self.conn.begin().await?;

        FilmStats::insert(active_model)
            .on_conflict(
                OnConflict::columns([film_stats::Column::UserId, film_stats::Column::FilmId])
                    .value(
                        film_stats::Column::Count,
                        Expr::col(film_stats::Column::Count).add(1),
                    )
                    .update_column(film_stats::Column::LastSeenAt)
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await?;

        let count = FilmStats::find()
            .select_only()
            .column(film_stats::Column::Count)
            .filter(film_stats::Column::UserId.eq(user_id.value()))
            .filter(film_stats::Column::FilmId.eq(film_id.value()))
            .into_tuple::<i32>()
            .one(&txn)
            .await?
            .ok_or_else(|| {
                anyhow::anyhow!("Stats row for user {user_id} film {film_id} vanished after upsert")
            })?;

        txn.commit().await?;

        Ok(count)
    }

    /// Highest count first; equal counts keep insertion order.
    pub async fn top(&self, user_id: UserId, limit: u64) -> Result<Vec<FilmStat>> {
        let rows = FilmStats::find()
            .filter(film_stats::Column::UserId.eq(user_id.value()))
            .order_by_desc(film_stats::Column::Count)
            .order_by_asc(film_stats::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| FilmStat {
                film_id: FilmId::new(row.film_id),
                film_title: row.film_title,
                count: row.count,
            })
            .collect())
    }

    pub async fn get(&self, user_id: UserId, film_id: FilmId) -> Result<Option<FilmStat>> {
        let row = FilmStats::find()
            .filter(film_stats::Column::UserId.eq(user_id.value()))
            .filter(film_stats::Column::FilmId.eq(film_id.value()))
            .one(&self.conn)
            .await?;

        Ok(row.map(|row| FilmStat {
            film_id: FilmId::new(row.film_id),
            film_title: row.film_title,
            count: row.count,
        }))
    }
}
