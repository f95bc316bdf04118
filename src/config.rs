use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub directory: DirectorySettings,
    pub generation: GenerationSettings,
    pub jobs: JobsSettings,
    pub admin: AdminSettings,
    pub matching: MatchingSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// The external managed datastore holding the church directory.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectorySettings {
    pub base_url: String,
    pub api_key: String,
    pub cache_ttl_secs: Option<u64>,
    pub cache_size: Option<u64>,
    /// Location value that means "the whole region" and disables filtering.
    #[serde(default = "default_region_location")]
    pub region_location: String,
}

fn default_region_location() -> String {
    "Centre County".to_string()
}

/// The text-generation backend used for match selection.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationSettings {
    #[serde(default = "default_generation_endpoint")]
    pub endpoint: String,
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_generation_timeout")]
    pub timeout_secs: u64,
}

fn default_generation_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}
fn default_model() -> String {
    "gpt-4o-mini".to_string()
}
fn default_temperature() -> f64 {
    0.4
}
fn default_max_retries() -> u32 {
    3
}
fn default_generation_timeout() -> u64 {
    60
}

/// Maintenance job collaborators (import, site refresh, enrichment).
#[derive(Debug, Clone, Deserialize)]
pub struct JobsSettings {
    pub base_url: String,
    #[serde(default)]
    pub admin_key: Option<String>,
}

/// Admin surface gating: the bearer identity must match one of these.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminSettings {
    pub jwt_secret: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    /// Hard cap on how many candidates are embedded in a single prompt.
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
}

fn default_max_candidates() -> usize {
    200
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with FAITH_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with FAITH_)
            // e.g., FAITH_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("FAITH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Substitute well-known environment variables for secrets
        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("FAITH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Substitute well-known environment variables into config values.
/// These are the names operators already export for the hosted stack,
/// checked before the FAITH_-prefixed equivalents.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let generation_api_key = env::var("OPENAI_API_KEY")
        .or_else(|_| env::var("FAITH_GENERATION__API_KEY"))
        .ok();
    let directory_url = env::var("DIRECTORY_URL")
        .or_else(|_| env::var("FAITH_DIRECTORY__BASE_URL"))
        .ok();
    let directory_api_key = env::var("DIRECTORY_SERVICE_KEY")
        .or_else(|_| env::var("FAITH_DIRECTORY__API_KEY"))
        .ok();
    let jobs_admin_key = env::var("ADMIN_IMPORT_KEY")
        .or_else(|_| env::var("FAITH_JOBS__ADMIN_KEY"))
        .ok();
    let admin_jwt_secret = env::var("ADMIN_JWT_SECRET")
        .or_else(|_| env::var("FAITH_ADMIN__JWT_SECRET"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(api_key) = generation_api_key {
        builder = builder.set_override("generation.api_key", api_key)?;
    }
    if let Some(url) = directory_url {
        builder = builder.set_override("directory.base_url", url)?;
    }
    if let Some(api_key) = directory_api_key {
        builder = builder.set_override("directory.api_key", api_key)?;
    }
    if let Some(key) = jobs_admin_key {
        builder = builder.set_override("jobs.admin_key", key)?;
    }
    if let Some(secret) = admin_jwt_secret {
        builder = builder.set_override("admin.jwt_secret", secret)?;
    }

    builder.build()
}
