//! Shared fixtures for integration tests.

#![allow(dead_code)]

use cinebot::clients::{FilmMetadata, UpstreamError};
use cinebot::config::Config;
use cinebot::db::Store;
use cinebot::domain::FilmId;
use cinebot::models::{FilmDetails, KeywordSearchFilm};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// Temp-file SQLite URL, unique per call.
pub fn temp_db_url() -> String {
    let path = std::env::temp_dir().join(format!("cinebot-test-{}.db", uuid::Uuid::new_v4()));
    format!("sqlite:{}", path.display())
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.general.database_path = temp_db_url();
    config.observability.metrics_enabled = false;
    config
}

pub async fn temp_store() -> Store {
    Store::new(&temp_db_url())
        .await
        .expect("failed to open temp store")
}

pub fn keyword_film(
    id: i64,
    name_ru: Option<&str>,
    name_en: Option<&str>,
    year: i32,
) -> KeywordSearchFilm {
    KeywordSearchFilm {
        film_id: id,
        name_ru: name_ru.map(str::to_string),
        name_en: name_en.map(str::to_string),
        year: Some(year),
    }
}

/// Seven "Matrix" results; the third one is film 603.
pub fn matrix_results() -> Vec<KeywordSearchFilm> {
    vec![
        keyword_film(301, Some("Матрица"), Some("The Matrix"), 1999),
        keyword_film(302, Some("Матрица: Перезагрузка"), None, 2003),
        keyword_film(603, None, Some("The Matrix Revolutions"), 2003),
        keyword_film(604, Some("Аниматрица"), Some("The Animatrix"), 2003),
        keyword_film(605, None, None, 2021),
        keyword_film(606, Some("Матрица: Воскрешение"), None, 2021),
        keyword_film(607, Some("Матрица: Генерация"), None, 2010),
    ]
}

pub fn details(name_ru: Option<&str>, name_en: Option<&str>, hd_id: Option<&str>) -> FilmDetails {
    FilmDetails {
        name_ru: name_ru.map(str::to_string),
        name_en: name_en.map(str::to_string),
        year: Some(2003),
        rating_imdb: Some(6.7),
        rating_kinopoisk: Some(7.6),
        short_description: Some("The final battle for Zion.".to_string()),
        poster_url_preview: Some("https://img.example/603.jpg".to_string()),
        kinopoisk_hd_id: hd_id.map(str::to_string),
        ..FilmDetails::default()
    }
}

/// In-memory stand-in for the metadata service.
#[derive(Default)]
pub struct FakeMetadata {
    search_results: Mutex<HashMap<String, Vec<KeywordSearchFilm>>>,
    details: Mutex<HashMap<i64, FilmDetails>>,
    failing: AtomicBool,
    delay: Mutex<Option<Duration>>,
    pub search_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
}

impl FakeMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(self, query: &str, films: Vec<KeywordSearchFilm>) -> Self {
        self.search_results
            .lock()
            .unwrap()
            .insert(query.to_string(), films);
        self
    }

    pub fn with_details(self, film_id: i64, details: FilmDetails) -> Self {
        self.details.lock().unwrap().insert(film_id, details);
        self
    }

    pub fn with_delay(self, delay: Duration) -> Self {
        *self.delay.lock().unwrap() = Some(delay);
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    async fn simulate(&self) -> Result<(), UpstreamError> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(UpstreamError::Status {
                status: 503,
                body: "maintenance".to_string(),
            });
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl FilmMetadata for FakeMetadata {
    async fn search_by_keyword(
        &self,
        query: &str,
    ) -> Result<Vec<KeywordSearchFilm>, UpstreamError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate().await?;
        Ok(self
            .search_results
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_film_details(&self, film_id: FilmId) -> Result<FilmDetails, UpstreamError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate().await?;
        self.details
            .lock()
            .unwrap()
            .get(&film_id.value())
            .cloned()
            .ok_or(UpstreamError::NotFound(film_id))
    }
}
