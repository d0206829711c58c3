use std::sync::Arc;

use crate::clients::{FilmMetadata, KinopoiskClient};
use crate::config::Config;
use crate::db::Store;
use crate::services::{ActivityService, EnrichmentService, SearchService};

/// Pooled HTTP client handed to every upstream client.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(concat!("Cinebot/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub search_service: Arc<SearchService>,

    pub enrichment_service: Arc<EnrichmentService>,

    pub activity_service: Arc<ActivityService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let http_client = build_shared_http_client(config.kinopoisk.request_timeout_seconds)?;
        let metadata: Arc<dyn FilmMetadata> = Arc::new(KinopoiskClient::with_shared_client(
            http_client,
            &config.kinopoisk,
        )?);

        Self::with_metadata(config, metadata).await
    }

    /// Wires the services around an arbitrary metadata source.
    pub async fn with_metadata(
        config: Config,
        metadata: Arc<dyn FilmMetadata>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let search_service = Arc::new(SearchService::new(
            metadata.clone(),
            store.clone(),
            &config.search,
        ));

        let enrichment_service = Arc::new(EnrichmentService::new(
            metadata,
            store.clone(),
            &config.kinopoisk,
            &config.search,
        ));

        let activity_service = Arc::new(ActivityService::new(store.clone(), &config.search));

        Ok(Self {
            config: Arc::new(config),
            store,
            search_service,
            enrichment_service,
            activity_service,
        })
    }
}
