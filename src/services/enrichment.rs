use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::clients::FilmMetadata;
use crate::config::{KinopoiskConfig, SearchConfig};
use crate::db::Store;
use crate::domain::{FilmId, UserId};
use crate::models::{EnrichedFilm, FilmDetails};
use crate::services::error::{PipelineError, store_call, upstream_call};

/// Rendered in place of a missing rating or year.
pub const NOT_AVAILABLE: &str = "n/a";

/// Turns a selected film id into an [`EnrichedFilm`] and counts the view.
pub struct EnrichmentService {
    metadata: Arc<dyn FilmMetadata>,
    store: Store,
    link_template: String,
    default_deadline: Duration,
}

impl EnrichmentService {
    #[must_use]
    pub fn new(
        metadata: Arc<dyn FilmMetadata>,
        store: Store,
        kinopoisk: &KinopoiskConfig,
        search: &SearchConfig,
    ) -> Self {
        Self {
            metadata,
            store,
            link_template: kinopoisk.hd_link_template.clone(),
            default_deadline: Duration::from_secs(search.request_deadline_seconds),
        }
    }

    pub async fn select(
        &self,
        user_id: UserId,
        film_id: FilmId,
    ) -> Result<EnrichedFilm, PipelineError> {
        self.select_until(user_id, film_id, Instant::now() + self.default_deadline)
            .await
    }

    /// Fetches details, builds the summary and link, then increments the view counter
    /// exactly once. A failed fetch returns before the counter is touched.
    pub async fn select_until(
        &self,
        user_id: UserId,
        film_id: FilmId,
        deadline: Instant,
    ) -> Result<EnrichedFilm, PipelineError> {
        let result = self.run(user_id, film_id, deadline).await;

        if let Err(e) = &result {
            e.record("enrichment");
            warn!(
                event = "selection_failed",
                user_id = %user_id,
                film_id = %film_id,
                kind = e.kind(),
                "Film enrichment failed: {}",
                e
            );
        }

        result
    }

    async fn run(
        &self,
        user_id: UserId,
        film_id: FilmId,
        deadline: Instant,
    ) -> Result<EnrichedFilm, PipelineError> {
        let details = upstream_call(deadline, self.metadata.fetch_film_details(film_id)).await?;

        let title = details.display_name();
        let summary = build_summary(&title, &details);
        let external_link = details
            .kinopoisk_hd_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| external_link(&self.link_template, id));

        let view_count =
            store_call(deadline, self.store.upsert_stat(user_id, film_id, &title)).await?;

        metrics::counter!("cinebot_selections_total").increment(1);
        info!(
            event = "selection_completed",
            user_id = %user_id,
            film_id = %film_id,
            title = %title,
            view_count = view_count,
            has_link = external_link.is_some()
        );

        Ok(EnrichedFilm {
            film_id,
            title,
            year: details.year,
            poster_url: details.poster().map(str::to_string),
            summary,
            external_link,
            view_count,
        })
    }
}

/// Substitutes the platform id into the `{id}` placeholder.
#[must_use]
pub fn external_link(template: &str, platform_id: &str) -> String {
    template.replace("{id}", platform_id)
}

/// Title line with year, a blank line, the two ratings, then the best available
/// description (omitted when there is none).
#[must_use]
pub fn build_summary(title: &str, details: &FilmDetails) -> String {
    let year = details
        .year
        .map_or_else(|| NOT_AVAILABLE.to_string(), |y| y.to_string());

    let mut summary = format!(
        "{title} ({year})\n\nIMDb: {}\nKinopoisk: {}",
        format_rating(details.rating_imdb),
        format_rating(details.rating_kinopoisk)
    );

    if let Some(description) = details.best_description() {
        summary.push_str("\n\n");
        summary.push_str(description);
    }

    summary
}

fn format_rating(rating: Option<f64>) -> String {
    rating.map_or_else(|| NOT_AVAILABLE.to_string(), |r| format!("{r:.1}"))
}
