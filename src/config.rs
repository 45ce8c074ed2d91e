use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub cache: CacheSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub redis_url: String,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: String,
    #[serde(default = "default_leeway")]
    pub leeway_secs: u64,
}

fn default_leeway() -> u64 { 30 }

/// Placeholder secret shipped in `config/default.toml`
pub const DEFAULT_JWT_SECRET: &str = "change-me";

impl AuthSettings {
    /// True when tokens would be checked against an empty or placeholder secret
    pub fn uses_default_secret(&self) -> bool {
        let secret = self.jwt_secret.trim();
        secret.is_empty() || secret == DEFAULT_JWT_SECRET
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    #[serde(default = "default_sample_size")]
    pub skill_gap_sample_size: usize,
    #[serde(default = "default_top_n")]
    pub skill_gap_top_n: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            skill_gap_sample_size: default_sample_size(),
            skill_gap_top_n: default_top_n(),
        }
    }
}

fn default_limit() -> usize { 10 }
fn default_max_limit() -> usize { 50 }
fn default_sample_size() -> usize { 20 }
fn default_top_n() -> usize { 10 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_experience_weight")]
    pub experience: u32,
    #[serde(default = "default_skills_weight")]
    pub skills: u32,
    #[serde(default = "default_location_weight")]
    pub location: u32,
    #[serde(default = "default_remote_weight")]
    pub remote: u32,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            experience: default_experience_weight(),
            skills: default_skills_weight(),
            location: default_location_weight(),
            remote: default_remote_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(w: &WeightsConfig) -> Self {
        Self {
            experience: w.experience,
            skills: w.skills,
            location: w.location,
            remote: w.remote,
        }
    }
}

fn default_experience_weight() -> u32 { 30 }
fn default_skills_weight() -> u32 { 50 }
fn default_location_weight() -> u32 { 10 }
fn default_remote_weight() -> u32 { 10 }

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
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration files (config/default.toml, then config/local.toml)
    /// 3. Environment variables (prefixed with HIRE__)
    /// 4. DATABASE_URL, REDIS_URL and JWT_SECRET
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., HIRE__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("HIRE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        with_well_known_env(builder)?.build()?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("HIRE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        with_well_known_env(builder)?.build()?.try_deserialize()
    }
}

/// Let the conventional unprefixed variables win over everything else
fn with_well_known_env(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    use std::env;

    let overrides = [
        ("DATABASE_URL", "database.url"),
        ("REDIS_URL", "cache.redis_url"),
        ("JWT_SECRET", "auth.jwt_secret"),
    ];

    for (var, key) in overrides {
        if let Ok(value) = env::var(var) {
            builder = builder.set_override(key, value)?;
        }
    }

    Ok(builder)
}
