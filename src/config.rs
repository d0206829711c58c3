use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable that overrides `kinopoisk.api_key`.
pub const API_KEY_ENV: &str = "CINEBOT_KINOPOISK_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub kinopoisk: KinopoiskConfig,

    pub search: SearchConfig,

    pub server: ServerConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Emit logs as JSON lines instead of the human-readable format.
    pub json_logs: bool,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/cinebot.db".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KinopoiskConfig {
    pub base_url: String,

    pub api_key: String,

    /// Request timeout in seconds (default: 15)
    pub request_timeout_seconds: u64,

    /// Deep link for films that are available on Kinopoisk HD. `{id}` is replaced
    /// with the film's HD identifier.
    pub hd_link_template: String,
}

impl Default for KinopoiskConfig {
    fn default() -> Self {
        Self {
            base_url: "https://kinopoiskapiunofficial.tech".to_string(),
            api_key: String::new(),
            request_timeout_seconds: 15,
            hd_link_template: "https://hd.kinopoisk.ru/film/{id}".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of candidates offered after a search.
    pub candidate_limit: usize,

    pub history_limit: u64,

    pub stats_limit: u64,

    /// Deadline applied to a whole pipeline run when the caller does not supply one.
    pub request_deadline_seconds: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            candidate_limit: 5,
            history_limit: 5,
            stats_limit: 5,
            request_deadline_seconds: 20,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 6790,
            cors_allowed_origins: vec![
                "http://localhost:6790".to_string(),
                "http://127.0.0.1:6790".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        let mut config = None;
        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                config = Some(Self::load_from_path(path)?);
                break;
            }
        }

        let mut config = config.unwrap_or_else(|| {
            info!("No config file found, using defaults");
            Self::default()
        });
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV)
            && !key.trim().is_empty()
        {
            self.kinopoisk.api_key = key.trim().to_string();
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("cinebot").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".cinebot").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.kinopoisk.base_url.trim().is_empty() {
            anyhow::bail!("Kinopoisk base URL cannot be empty");
        }

        url::Url::parse(&self.kinopoisk.base_url).context("Invalid Kinopoisk base URL")?;

        if !self.kinopoisk.hd_link_template.contains("{id}") {
            anyhow::bail!("kinopoisk.hd_link_template must contain an {{id}} placeholder");
        }

        if self.search.candidate_limit == 0 {
            anyhow::bail!("search.candidate_limit must be > 0");
        }

        if self.search.request_deadline_seconds == 0 {
            anyhow::bail!("search.request_deadline_seconds must be > 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.search.candidate_limit, 5);
        assert_eq!(config.search.history_limit, 5);
        assert_eq!(config.search.stats_limit, 5);
        assert_eq!(
            config.kinopoisk.hd_link_template,
            "https://hd.kinopoisk.ru/film/{id}"
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[kinopoisk]"));
        assert!(toml_str.contains("[search]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [kinopoisk]
            api_key = "secret"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.kinopoisk.api_key, "secret");

        assert_eq!(config.kinopoisk.base_url, "https://kinopoiskapiunofficial.tech");
        assert_eq!(config.search.candidate_limit, 5);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.kinopoisk.hd_link_template = "https://hd.kinopoisk.ru/film/".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.search.candidate_limit = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.kinopoisk.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }
}
