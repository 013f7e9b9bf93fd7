use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub providers: ProviderConfig,

    pub cache: CacheConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

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
            database_path: "sqlite:data/citypulse.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
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
            port: 3000,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

/// Upstream provider endpoints and credentials. Base URLs are configurable so
/// tests can point them at a local mock server; keys come from config.toml or
/// the environment (see `Config::load`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Request timeout in seconds for every upstream call (default: 10)
    pub request_timeout_seconds: u64,

    pub geocode_url: String,
    pub geocode_api_key: String,

    pub weather_url: String,
    pub weather_api_key: String,

    pub yelp_url: String,
    pub yelp_api_key: String,

    pub movie_url: String,
    pub movie_api_key: String,
    pub movie_image_base: String,

    pub meetup_url: String,
    pub meetup_api_key: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: 10,
            geocode_url: "https://maps.googleapis.com/maps/api/geocode".to_string(),
            geocode_api_key: String::new(),
            weather_url: "https://api.darksky.net/forecast".to_string(),
            weather_api_key: String::new(),
            yelp_url: "https://api.yelp.com/v3".to_string(),
            yelp_api_key: String::new(),
            movie_url: "https://api.themoviedb.org/3".to_string(),
            movie_api_key: String::new(),
            movie_image_base: "https://image.tmdb.org/t/p/w500".to_string(),
            meetup_url: "https://api.meetup.com".to_string(),
            meetup_api_key: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum age of persisted dependent data before it is considered stale
    /// and refetched (default: 30). Locations are exempt.
    pub freshness_minutes: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            freshness_minutes: 30,
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

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            providers: ProviderConfig::default(),
            cache: CacheConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    /// Loads config.toml from the usual places, then lets the environment
    /// override provider keys (the deployment convention is a .env file with
    /// just the credentials).
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::load_file()?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        let overrides = [
            ("GEOCODE_API_KEY", &mut self.providers.geocode_api_key),
            ("WEATHER_API_KEY", &mut self.providers.weather_api_key),
            ("YELP_API_KEY", &mut self.providers.yelp_api_key),
            ("MOVIE_API_KEY", &mut self.providers.movie_api_key),
            ("MEETUP_API_KEY", &mut self.providers.meetup_api_key),
        ];

        for (var, slot) in overrides {
            if let Ok(value) = std::env::var(var)
                && !value.is_empty()
            {
                *slot = value;
            }
        }
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("citypulse").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".citypulse").join("config.toml"));
        }

        paths
    }

    pub fn validate(&self) -> Result<()> {
        if self.cache.freshness_minutes <= 0 {
            anyhow::bail!("Cache freshness window must be > 0 minutes");
        }

        if self.providers.request_timeout_seconds == 0 {
            anyhow::bail!("Provider request timeout must be > 0 seconds");
        }

        Ok(())
    }
}
