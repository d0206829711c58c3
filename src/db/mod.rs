use crate::domain::{FilmId, UserId};
use crate::models::{FilmStat, HistoryEntry};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

/// Durable storage for search history and per-user film counters.
///
/// Every method is its own transaction; nothing spans two calls. Clones share
/// the connection pool.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Each connection to `:memory:` opens a separate database.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        // Pooled connections keep the schema they first saw, so migrate before the
        // pool opens. `:memory:` has only the pool's own database.
        if !in_memory {
            let mut migrate_opt = ConnectOptions::new(db_url.to_string());
            migrate_opt
                .max_connections(1)
                .min_connections(1)
                .connect_timeout(Duration::from_secs(10))
                .sqlx_logging(false);

            let migrate_conn = Database::connect(migrate_opt).await?;
            migrator::Migrator::up(&migrate_conn, None).await?;
            migrate_conn.close().await?;
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;
        let store = Self { conn };

        if in_memory {
            store.init_schema().await?;
        }

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(store)
    }

    /// Creates the tables if absent. Safe to call on every start.
    pub async fn init_schema(&self) -> Result<()> {
        migrator::Migrator::up(&self.conn, None).await?;
        Ok(())
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn history_repo(&self) -> repositories::history::HistoryRepository {
        repositories::history::HistoryRepository::new(self.conn.clone())
    }

    fn stats_repo(&self) -> repositories::stats::StatsRepository {
        repositories::stats::StatsRepository::new(self.conn.clone())
    }

    pub async fn append_history(&self, user_id: UserId, query: &str) -> Result<()> {
        self.history_repo().append(user_id, query).await
    }

    /// Most recent queries for a user, newest first. Empty when the user never searched.
    pub async fn recent_history(&self, user_id: UserId, limit: u64) -> Result<Vec<String>> {
        let entries = self.history_repo().recent(user_id, limit).await?;
        Ok(entries.into_iter().map(|e| e.query).collect())
    }

    pub async fn recent_history_entries(
        &self,
        user_id: UserId,
        limit: u64,
    ) -> Result<Vec<HistoryEntry>> {
        self.history_repo().recent(user_id, limit).await
    }

    /// Atomically increments the `(user_id, film_id)` counter, creating it at 1.
    /// Returns the count after this increment.
    pub async fn upsert_stat(
        &self,
        user_id: UserId,
        film_id: FilmId,
        film_title: &str,
    ) -> Result<i32> {
        self.stats_repo()
            .increment(user_id, film_id, film_title)
            .await
    }

    pub async fn top_stats(&self, user_id: UserId, limit: u64) -> Result<Vec<FilmStat>> {
        self.stats_repo().top(user_id, limit).await
    }

    pub async fn get_stat(&self, user_id: UserId, film_id: FilmId) -> Result<Option<FilmStat>> {
        self.stats_repo().get(user_id, film_id).await
    }
}
