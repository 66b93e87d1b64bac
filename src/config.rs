use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::models::{FeedLimits, UrgencyWeights};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    pub documents: Option<DocumentSettings>,
    #[serde(default)]
    pub collection: CollectionSettings,
    pub database: Option<DatabaseSettings>,
    #[serde(default)]
    pub ranking: RankingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Where pets and applications live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Document store for pets, PostgreSQL for applications
    #[default]
    Remote,
    /// Everything in process memory
    Memory,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,
    /// JSON array of pet documents loaded by the memory backend
    pub seed_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentSettings {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
    #[serde(default = "default_request_timeout")]
    pub timeout_secs: u64,
}

fn default_request_timeout() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    #[serde(default = "default_pets_collection")]
    pub pets: String,
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            pets: default_pets_collection(),
        }
    }
}

fn default_pets_collection() -> String { "pets".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingSettings {
    #[serde(default = "default_urgent_pool_size")]
    pub urgent_pool_size: usize,
    #[serde(default = "default_explore_pool_size")]
    pub explore_pool_size: usize,
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    #[serde(default)]
    pub weights: WeightsConfig,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            urgent_pool_size: default_urgent_pool_size(),
            explore_pool_size: default_explore_pool_size(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            weights: WeightsConfig::default(),
        }
    }
}

impl RankingSettings {
    pub fn feed_limits(&self) -> FeedLimits {
        FeedLimits {
            urgent_pool: self.urgent_pool_size,
            explore_pool: self.explore_pool_size,
            default_limit: self.default_limit,
            max_limit: self.max_limit,
        }
    }
}

fn default_urgent_pool_size() -> usize { 100 }
fn default_explore_pool_size() -> usize { 120 }
fn default_limit() -> usize { 12 }
fn default_max_limit() -> usize { 50 }

/// Urgency coefficients
#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_per_day_weight")]
    pub per_day: f64,
    #[serde(default = "default_high_energy_weight")]
    pub high_energy: f64,
    #[serde(default = "default_medical_weight")]
    pub medical: f64,
    #[serde(default = "default_visibility_weight")]
    pub visibility: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            per_day: default_per_day_weight(),
            high_energy: default_high_energy_weight(),
            medical: default_medical_weight(),
            visibility: default_visibility_weight(),
        }
    }
}

impl From<&WeightsConfig> for UrgencyWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            per_day: config.per_day,
            high_energy: config.high_energy,
            medical: config.medical,
            visibility: config.visibility,
        }
    }
}

fn default_per_day_weight() -> f64 { 2.0 }
fn default_high_energy_weight() -> f64 { 3.0 }
fn default_medical_weight() -> f64 { 6.0 }
fn default_visibility_weight() -> f64 { 2.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Configuration file (config/default.toml)
    /// 2. Local overrides (config/local.toml)
    /// 3. Environment variables (prefixed with PAWLINK__)
    /// 4. DATABASE_URL, when set
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., PAWLINK__SERVER__PORT -> server.port
            .add_source(environment());

        with_database_url(builder)?.build()?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment());

        with_database_url(builder)?.build()?.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("PAWLINK")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn with_database_url(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    match std::env::var("DATABASE_URL") {
        Ok(url) if !url.is_empty() => builder.set_override("database.url", url),
        _ => Ok(builder),
    }
}
